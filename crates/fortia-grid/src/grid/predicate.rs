use super::normalizer::normalize;
use super::row::Row;
use super::spec::FilterSpec;

/// Conjunction of the search predicate and the categorical constraints of a [`FilterSpec`].
#[derive(Debug, Clone)]
pub struct PredicateSet {
    searchable: Vec<String>,
}

impl PredicateSet {
    /// `searchable` lists the fields concatenated (space separated) into the search haystack.
    pub fn new<I, S>(searchable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            searchable: searchable.into_iter().map(Into::into).collect(),
        }
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable
    }

    pub fn matches(&self, row: &Row, filter: &FilterSpec) -> bool {
        let needle = filter.search().map(normalize).unwrap_or_default();
        self.matches_normalized(row, &needle, filter)
    }

    /// Variant for callers that evaluate many rows against one filter, so the
    /// needle is normalized once.
    pub(crate) fn matches_normalized(&self, row: &Row, needle: &str, filter: &FilterSpec) -> bool {
        if !needle.is_empty() && !self.haystack(row).contains(needle) {
            return false;
        }

        filter.active_constraints().all(|constraint| {
            row.get(&constraint.field)
                .is_some_and(|value| value.as_text() == constraint.value)
        })
    }

    fn haystack(&self, row: &Row) -> String {
        let joined = self
            .searchable
            .iter()
            .map(|field| row.text(field))
            .collect::<Vec<_>>()
            .join(" ");
        normalize(&joined)
    }
}
