use crate::{config::ExportFormat,
            error::Result,
            record::LeadRecord};
use rust_xlsxwriter::{Format, Workbook};
use std::{fs,
          io::Write,
          path::{Path, PathBuf}};

/// Writes an ordered sequence of leads somewhere
pub trait Exporter {
    /// Persist `records` in the given order
    fn export(&self, records: &[LeadRecord]) -> Result<()>;

    /// Human-readable destination for log messages
    fn destination(&self) -> String;
}

/// Stable sort placing leads without a website first; relative order is otherwise kept
pub fn sort_leads(records: &mut [LeadRecord]) {
    records.sort_by_key(LeadRecord::has_website);
}

/// Name of the single worksheet in exported workbooks
pub const SHEET_NAME: &str = "Leads";

/// One cell of an exported worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Text(String),
    Number(f64),
    Blank,
}

impl From<Option<&str>> for SheetCell {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Blank,
        }
    }
}

/// Worksheet contents for `records`: a header row of [`LeadRecord::COLUMNS`], then one row per lead
pub fn sheet_rows(records: &[LeadRecord]) -> Vec<Vec<SheetCell>> {
    let header = LeadRecord::COLUMNS.iter().map(|title| SheetCell::Text(title.to_string())).collect();

    std::iter::once(header)
        .chain(records.iter().map(|record| {
            vec![
                SheetCell::Text(record.business_name.clone()),
                SheetCell::from(record.address.as_deref()),
                SheetCell::from(record.phone_number.as_deref()),
                SheetCell::Text(record.website.as_str().to_string()),
                record.rating.map_or(SheetCell::Blank, SheetCell::Number),
                SheetCell::Number(f64::from(record.review_count)),
                SheetCell::Text(record.source_query.clone()),
                SheetCell::Text(record.source_url.clone()),
            ]
        }))
        .collect()
}

/// Excel workbook with one sheet; the header row is bold and absent values are empty cells
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for XlsxExporter {
    fn export(&self, records: &[LeadRecord]) -> Result<()> {
        ensure_parent(&self.path)?;

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (row, cells) in sheet_rows(records).into_iter().enumerate() {
            let row = row as u32;
            for (col, cell) in cells.into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    SheetCell::Text(text) if row == 0 => {
                        sheet.write_string_with_format(row, col, text, &bold)?;
                    }
                    SheetCell::Text(text) => {
                        sheet.write_string(row, col, text)?;
                    }
                    SheetCell::Number(value) => {
                        sheet.write_number(row, col, value)?;
                    }
                    SheetCell::Blank => {}
                }
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV table with a header row of [`LeadRecord::COLUMNS`]
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for CsvExporter {
    fn export(&self, records: &[LeadRecord]) -> Result<()> {
        ensure_parent(&self.path)?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&self.path)?;
        writer.write_record(LeadRecord::COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pretty-printed JSON array using the same field names as the CSV columns
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, records: &[LeadRecord]) -> Result<()> {
        ensure_parent(&self.path)?;

        let mut file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(&mut file, records)?;
        file.write_all(b"\n")?;

        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Exporter for `format` writing to `path`
pub fn exporter_for(format: ExportFormat, path: &Path) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Xlsx => Box::new(XlsxExporter::new(path)),
        ExportFormat::Csv => Box::new(CsvExporter::new(path)),
        ExportFormat::Json => Box::new(JsonExporter::new(path)),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
