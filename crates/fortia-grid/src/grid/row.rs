use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stable opaque row key; never reused while the row exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub String);

impl RowId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed value stored under a field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl FieldValue {
    /// Raw text form used for search haystacks and categorical equality.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(value) => Cow::Borrowed(value.as_str()),
            FieldValue::Number(value) => Cow::Owned(value.to_string()),
            FieldValue::Date(value) => Cow::Owned(value.format("%Y-%m-%d").to_string()),
        }
    }

    /// Numeric reading; non-numeric values collapse to `0`.
    pub fn as_number(&self) -> f64 {
        let value = match self {
            FieldValue::Number(value) => *value,
            FieldValue::Text(value) => value.trim().parse::<f64>().unwrap_or(0.0),
            FieldValue::Date(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Chronological reading; unparsable values collapse to the epoch.
    pub fn as_date(&self) -> NaiveDateTime {
        match self {
            FieldValue::Date(value) => *value,
            FieldValue::Text(value) => parse_datetime(value).unwrap_or_else(epoch),
            FieldValue::Number(_) => epoch(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Date(value)
    }
}

/// One candidate or vacancy record as the engine sees it.
///
/// Field reads never fail: missing text is `""`, missing numbers are `0`,
/// and missing dates are the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter used while populating rows at load time.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Like [`Row::with`], but skips absent values so the field stays missing.
    pub fn with_opt<V: Into<FieldValue>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn text(&self, field: &str) -> Cow<'_, str> {
        self.get(field)
            .map(FieldValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn number(&self, field: &str) -> f64 {
        self.get(field).map(FieldValue::as_number).unwrap_or(0.0)
    }

    pub fn date(&self, field: &str) -> NaiveDateTime {
        self.get(field).map(FieldValue::as_date).unwrap_or_else(epoch)
    }
}

/// 1970-01-01T00:00:00, the oldest possible reading for a row date.
pub fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`, and plain `YYYY-MM-DD` dates.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
