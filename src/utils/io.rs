use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::constants::{EMBEDDED_LOG_FIELD, JSON_INDENT};
use crate::core::record::{ChangeLog, Dataset};
use crate::error::LoadError;

/// Load the records array stored under `records_field` of a JSON document
pub fn load_dataset(path: &Path, records_field: &str) -> Result<Dataset, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    extract_records(document, records_field, path)
}

fn extract_records(mut document: Value, records_field: &str, path: &Path) -> Result<Dataset, LoadError> {
    let records = match document.get_mut(records_field).map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => {
            return Err(LoadError::MissingRecords {
                path: path.to_path_buf(),
                field: records_field.to_string(),
            })
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(record) => Ok(record),
            _ => Err(LoadError::InvalidRecord {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect()
}

/// Output document: `{"<records_field>": [...]}`, optionally followed by
/// the change log under `change_log`.
struct OutputDocument<'a> {
    records_field: &'a str,
    records: &'a Dataset,
    change_log: Option<&'a ChangeLog>,
}

impl Serialize for OutputDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.change_log.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.records_field, self.records)?;
        if let Some(change_log) = self.change_log {
            map.serialize_entry(EMBEDDED_LOG_FIELD, change_log)?;
        }
        map.end()
    }
}

/// Write the deduplicated records, embedding the change log when given
pub fn write_output(
    path: &Path,
    records_field: &str,
    records: &Dataset,
    change_log: Option<&ChangeLog>,
) -> Result<()> {
    let document = OutputDocument {
        records_field,
        records,
        change_log,
    };
    write_json(path, &document)
}

/// Write the change log as a bare JSON array
pub fn write_change_log(path: &Path, change_log: &ChangeLog) -> Result<()> {
    write_json(path, change_log)
}

/// Pretty print `value` to `path` with four-space indentation
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    {
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        value.serialize(&mut serializer)?;
    }

    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
