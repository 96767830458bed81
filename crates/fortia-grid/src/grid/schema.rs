use super::comparator::{Comparator, ComparatorRegistry};
use super::engine::FilterSortEngine;
use super::predicate::PredicateSet;

/// Per-view parameterization of the generic engine: which fields feed the
/// search haystack, which selector controls exist, and which sort keys are known.
#[derive(Debug, Clone)]
pub struct ViewSchema {
    name: &'static str,
    searchable: Vec<&'static str>,
    selectors: Vec<&'static str>,
    comparators: ComparatorRegistry,
    actions: Vec<&'static str>,
}

impl ViewSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            searchable: Vec::new(),
            selectors: Vec::new(),
            comparators: ComparatorRegistry::new(),
            actions: Vec::new(),
        }
    }

    pub fn searchable(mut self, fields: &[&'static str]) -> Self {
        self.searchable.extend_from_slice(fields);
        self
    }

    /// Declares a single-value selector control filtering the field of the same name.
    pub fn selector(mut self, field: &'static str) -> Self {
        self.selectors.push(field);
        self
    }

    pub fn sort(mut self, key: &'static str, comparator: Comparator) -> Self {
        self.comparators = self.comparators.register(key, comparator);
        self
    }

    pub fn action(mut self, id: &'static str) -> Self {
        self.actions.push(id);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn searchable_fields(&self) -> &[&'static str] {
        &self.searchable
    }

    pub fn selectors(&self) -> &[&'static str] {
        &self.selectors
    }

    pub fn has_selector(&self, control: &str) -> bool {
        self.selectors.iter().any(|selector| *selector == control)
    }

    pub fn sort_keys(&self) -> Vec<&'static str> {
        self.comparators.keys()
    }

    pub fn actions(&self) -> &[&'static str] {
        &self.actions
    }

    pub fn engine(&self) -> FilterSortEngine {
        FilterSortEngine::new(
            PredicateSet::new(self.searchable.iter().copied()),
            self.comparators.clone(),
        )
    }
}
