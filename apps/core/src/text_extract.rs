//! Text extraction for uploaded story files
//! Supports: TXT, MD, CSV

use std::path::Path;
use tracing::{info, warn};

use crate::error::{AppError, Result};

/// Uploads above this size are rejected before decoding
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Extract plain requirement text from file data based on its extension.
///
/// CSV exports contribute the first column of every data row, one row per
/// output line; the header row is skipped.
pub fn extract_text_from_bytes(file_data: &[u8], file_name: &str) -> Result<String> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    info!("Extracting text from file: {} (type: {})", file_name, extension);

    if file_data.len() > MAX_UPLOAD_BYTES {
        warn!("Rejected {}: {} bytes", file_name, file_data.len());
        return Err(AppError::Validation(format!(
            "File too large: {} bytes (limit {})",
            file_data.len(),
            MAX_UPLOAD_BYTES
        )));
    }
    if let Some(kind) = detect_binary(file_data) {
        warn!("Rejected {}: binary content ({})", file_name, kind);
        return Err(AppError::Validation(format!(
            "Binary content is not supported: {}",
            kind
        )));
    }

    match extension.as_str() {
        "txt" | "md" => decode_utf8(file_data),
        "csv" => extract_csv_text(file_data),
        _ => Err(AppError::Validation(format!(
            "Unsupported file extension: {}",
            if extension.is_empty() { "<none>" } else { &extension }
        ))),
    }
}

/// Read a file from disk and extract its text
pub fn extract_text_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    extract_text_from_bytes(&data, file_name)
}

/// Name of the detected binary format, if the data is not text.
///
/// Magic-number sniffing only runs on data that is not valid UTF-8: short
/// signatures such as "MZ" also open ordinary prose.
fn detect_binary(file_data: &[u8]) -> Option<String> {
    if std::str::from_utf8(file_data).is_err() {
        if let Some(kind) = infer::get(file_data) {
            if kind.matcher_type() != infer::MatcherType::Text {
                return Some(kind.mime_type().to_string());
            }
        }
    }
    file_data.contains(&0).then(|| "NUL bytes".to_string())
}

fn decode_utf8(file_data: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(file_data)
        .map_err(|e| AppError::Validation(format!("Invalid UTF-8 content: {}", e)))?;
    // Editors on Windows like to prepend a BOM
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn extract_csv_text(file_data: &[u8]) -> Result<String> {
    let text = decode_utf8(file_data)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(0).map(str::trim).filter(|c| !c.is_empty()) {
            // Keep one requirement per line even if the cell spans several
            rows.push(cell.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }

    info!("CSV extraction successful: {} rows", rows.len());
    Ok(rows.join("\n"))
}
