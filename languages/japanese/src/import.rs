//! Bulk vocabulary formats: JSON, NDJSON and CSV in, CSV out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use kotoba_types::NotebookEntry;

/// Column order shared by dictionary CSV import and export
pub const DICTIONARY_HEADER: [&str; 5] = ["word", "romaji", "meaning", "level", "tags"];
pub const NOTEBOOK_HEADER: [&str; 5] = ["word", "romaji", "meaning", "source", "timestamp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Ndjson,
    Csv,
}

impl ImportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFormat::Json => "JSON",
            ImportFormat::Ndjson => "NDJSON",
            ImportFormat::Csv => "CSV",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Could not parse {format} input: {message} (dictionary still has {total} words)")]
    Parse {
        format: &'static str,
        message: String,
        /// Dictionary size, unchanged by the failed import
        total: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV writer error: {0}")]
    Writer(String),
}

/// One candidate entry, before word validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    pub word: String,
    pub romaji: String,
    pub meaning: String,
    pub level: String,
    pub tags: String,
}

/// A dictionary entry flattened for export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRow {
    pub word: String,
    pub romaji: String,
    pub meaning: String,
    pub level: String,
    pub tags: String,
}

/// Pick a parser from the shape of the (already trimmed) text
pub fn detect_format(trimmed: &str) -> ImportFormat {
    if trimmed.starts_with('[') || (trimmed.starts_with('{') && trimmed.ends_with('}')) {
        ImportFormat::Json
    } else if trimmed.contains('{') {
        ImportFormat::Ndjson
    } else {
        ImportFormat::Csv
    }
}

/// Parse every row of `text`. Nothing is validated beyond syntax here; rows
/// without a usable word are filtered by the dictionary.
///
/// Object-shaped text that is not a single JSON object is retried as NDJSON,
/// since several `{...}` lines also start with `{` and end with `}`.
///
/// On failure the error carries `total = 0`; callers fill in the real size.
pub fn parse_rows(text: &str) -> Result<(ImportFormat, Vec<ImportRow>), ImportError> {
    let trimmed = text.trim();
    let format = detect_format(trimmed);

    let parsed = match format {
        ImportFormat::Json => parse_json(trimmed).map(|rows| (format, rows)).or_else(|e| {
            if trimmed.starts_with('{') {
                parse_ndjson(trimmed)
                    .map(|rows| (ImportFormat::Ndjson, rows))
                    .map_err(|_| e)
            } else {
                Err(e)
            }
        }),
        ImportFormat::Ndjson => parse_ndjson(trimmed).map(|rows| (format, rows)),
        ImportFormat::Csv => parse_csv(trimmed).map(|rows| (format, rows)),
    };

    parsed.map_err(|message| ImportError::Parse {
        format: format.as_str(),
        message,
        total: 0,
    })
}

fn parse_json(text: &str) -> Result<Vec<ImportRow>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    match value {
        Value::Array(items) => Ok(items.iter().map(row_from_value).collect()),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(word, meta)| {
                // The metadata object is spread over `{word}`, so its own fields win
                let mut merged = Map::new();
                merged.insert("word".to_string(), Value::String(word));
                if let Value::Object(fields) = meta {
                    merged.extend(fields);
                }
                row_from_value(&Value::Object(merged))
            })
            .collect()),
        other => Err(format!("expected an array or object, found {}", kind(&other))),
    }
}

fn parse_ndjson(text: &str) -> Result<Vec<ImportRow>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(n, line)| {
            serde_json::from_str::<Value>(line)
                .map(|value| row_from_value(&value))
                .map_err(|e| format!("line {}: {e}", n + 1))
        })
        .collect()
}

fn parse_csv(text: &str) -> Result<Vec<ImportRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(ImportRow {
            word: field(0),
            romaji: field(1),
            meaning: field(2),
            level: field(3),
            tags: field(4),
        });
    }
    Ok(rows)
}

/// Fields are trimmed like CSV cells, so every format stores the same text
fn row_from_value(value: &Value) -> ImportRow {
    let field = |name: &str| {
        value
            .get(name)
            .map(field_text)
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    };
    ImportRow {
        word: field("word"),
        romaji: field("romaji"),
        meaning: field("meaning"),
        level: field("level"),
        tags: field("tags"),
    }
}

/// Scalar JSON values become text; null, `false` and containers become empty
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render dictionary rows as CSV with a `word,romaji,meaning,level,tags` header
pub fn dictionary_csv(rows: &[DictionaryRow]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(DICTIONARY_HEADER)?;
    for row in rows {
        writer.write_record([&row.word, &row.romaji, &row.meaning, &row.level, &row.tags])?;
    }
    finish(writer)
}

/// Render notebook entries as CSV with a `word,romaji,meaning,source,timestamp` header
pub fn notebook_csv(entries: &[NotebookEntry]) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(NOTEBOOK_HEADER)?;
    for entry in entries {
        let timestamp = entry.timestamp.to_string();
        writer.write_record([
            entry.word.as_str(),
            entry.romaji.as_str(),
            entry.meaning.as_str(),
            entry.source.as_str(),
            timestamp.as_str(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ImportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Writer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
