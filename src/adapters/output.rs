use crate::adapters::lmk::format_lmk;
use crate::domain::model::{OutputFormat, ThicknessRecord};
use crate::utils::error::{Result, ThicknessError};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ThicknessRow {
    iline: i32,
    xline: i32,
    thickness: f64,
}

impl From<&ThicknessRecord> for ThicknessRow {
    fn from(record: &ThicknessRecord) -> Self {
        Self {
            iline: record.location.iline,
            xline: record.location.xline,
            thickness: record.thickness,
        }
    }
}

#[derive(Debug, Serialize)]
struct ThicknessDocument {
    generated_at: String,
    location_count: usize,
    records: Vec<ThicknessRow>,
}

/// Serializes records in the requested output format.
pub fn render_records(records: &[ThicknessRecord], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Lmk => Ok(format_lmk(records).into_bytes()),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => render_json(records),
    }
}

fn render_csv(records: &[ThicknessRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ThicknessRow::from(record))?;
    }
    // 空結果也要有表頭
    if records.is_empty() {
        writer.write_record(["iline", "xline", "thickness"])?;
    }
    writer
        .into_inner()
        .map_err(|e| ThicknessError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })
}

fn render_json(records: &[ThicknessRecord]) -> Result<Vec<u8>> {
    let document = ThicknessDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        location_count: records.len(),
        records: records.iter().map(ThicknessRow::from).collect(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
