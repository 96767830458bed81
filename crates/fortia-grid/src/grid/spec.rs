use serde::{Deserialize, Serialize};

/// A single `(field, required value)` categorical constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalConstraint {
    pub field: String,
    pub value: String,
}

/// Active filter selection, rebuilt on every interaction and immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    search: Option<String>,
    constraints: Vec<CategoricalConstraint>,
}

impl FilterSpec {
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::default()
    }

    /// Matches every row.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The search text, if one was entered. Empty input is stored as `None`.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Constraints with a non-empty required value; empty values impose nothing.
    pub fn active_constraints(&self) -> impl Iterator<Item = &CategoricalConstraint> {
        self.constraints
            .iter()
            .filter(|constraint| !constraint.value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.active_constraints().next().is_none()
    }
}

#[derive(Debug, Default)]
pub struct FilterSpecBuilder {
    search: Option<String>,
    constraints: Vec<CategoricalConstraint>,
}

impl FilterSpecBuilder {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn require(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.push(CategoricalConstraint {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> FilterSpec {
        FilterSpec {
            search: self.search,
            constraints: self.constraints,
        }
    }
}

/// Active sort selection: one key or none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSpec {
    #[default]
    Unsorted,
    Key(String),
}

impl SortSpec {
    /// Reads a sort selector value; the empty option means no sort.
    pub fn from_control(value: &str) -> Self {
        if value.is_empty() {
            Self::Unsorted
        } else {
            Self::Key(value.to_string())
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::Key(key) => Some(key.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_impose_no_constraint() {
        let spec = FilterSpec::builder()
            .search("")
            .require("status", "")
            .require("vacancy", "Backend")
            .build();

        assert_eq!(spec.search(), None);
        let active: Vec<_> = spec.active_constraints().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].field, "vacancy");
        assert!(!spec.is_empty());
    }

    #[test]
    fn blank_builder_is_empty() {
        assert!(FilterSpec::builder().build().is_empty());
        assert!(FilterSpec::empty().is_empty());
    }

    #[test]
    fn sort_control_maps_empty_to_unsorted() {
        assert_eq!(SortSpec::from_control(""), SortSpec::Unsorted);
        assert_eq!(SortSpec::from_control("match").key(), Some("match"));
    }
}
