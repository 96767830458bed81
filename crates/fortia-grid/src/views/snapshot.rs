use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::grid::row::{parse_datetime, Row, RowId};

/// Typed record that can be converted once, at load time, into a generic [`Row`].
pub trait SnapshotRecord: DeserializeOwned {
    /// Prefix for ids generated for records that carry none, e.g. `cand-0001`.
    const ID_PREFIX: &'static str;

    /// The id the record was exported with; blank when it has none.
    fn id(&self) -> &str;

    fn into_row(self, id: RowId) -> Row;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Csv,
    Json,
}

impl SnapshotFormat {
    /// `.json` files are JSON arrays; anything else is read as CSV with headers.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read row snapshot: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid CSV row snapshot: {}", err),
            SnapshotImportError::Json(err) => write!(f, "invalid JSON row snapshot: {}", err),
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for SnapshotImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn from_path<T, P>(path: P) -> Result<Vec<Row>, SnapshotImportError>
    where
        T: SnapshotRecord,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path);
        let file = std::fs::File::open(path)?;
        Self::from_reader::<T, _>(file, format)
    }

    pub fn from_reader<T, R>(reader: R, format: SnapshotFormat) -> Result<Vec<Row>, SnapshotImportError>
    where
        T: SnapshotRecord,
        R: Read,
    {
        let records: Vec<T> = match format {
            SnapshotFormat::Csv => {
                let mut csv_reader = csv::ReaderBuilder::new()
                    .trim(csv::Trim::All)
                    .from_reader(reader);
                csv_reader
                    .deserialize::<T>()
                    .collect::<Result<_, csv::Error>>()?
            }
            SnapshotFormat::Json => serde_json::from_reader(reader)?,
        };

        Ok(Self::from_records(records))
    }

    /// Converts typed records into rows with unique ids.
    pub fn from_records<T: SnapshotRecord>(records: Vec<T>) -> Vec<Row> {
        let mut ids = RowIdAllocator::new(T::ID_PREFIX, records.iter().map(T::id));
        records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                let id = ids.assign(record.id(), position);
                record.into_row(id)
            })
            .collect()
    }
}

/// Hands out row ids that are never reused within one snapshot.
///
/// Exported ids win. Records without one, or repeating an earlier one, get a
/// positional id (`cand-0002`), suffixed (`cand-0002-2`) when that is taken.
struct RowIdAllocator {
    prefix: &'static str,
    exported: HashSet<String>,
    assigned: HashSet<String>,
}

impl RowIdAllocator {
    fn new<'a>(prefix: &'static str, exported: impl Iterator<Item = &'a str>) -> Self {
        Self {
            prefix,
            exported: exported
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            assigned: HashSet::new(),
        }
    }

    fn assign(&mut self, id: &str, position: usize) -> RowId {
        let id = id.trim();
        if !id.is_empty() {
            if self.assigned.insert(id.to_string()) {
                return RowId::new(id);
            }
            warn!(row_id = id, position, "duplicate row id in snapshot, generating another");
        }

        let base = format!("{}-{:04}", self.prefix, position + 1);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.exported.contains(&candidate) || self.assigned.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        self.assigned.insert(candidate.clone());
        RowId::new(candidate)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
    // Booleans, arrays, objects.
    #[allow(dead_code)]
    Other(IgnoredAny),
}

/// Numeric column that never fails the load: blank or malformed values become `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Lenient>::deserialize(deserializer)?;
    let number = match value {
        Some(Lenient::Number(number)) => Some(number),
        Some(Lenient::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(Lenient::Other(_)) | None => None,
    };
    Ok(number.filter(|number| number.is_finite()))
}

/// Date column; unparsable values become `None` and later sort as the epoch.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Lenient>::deserialize(deserializer)?;
    Ok(match value {
        Some(Lenient::Text(text)) => parse_datetime(&text),
        _ => None,
    })
}
