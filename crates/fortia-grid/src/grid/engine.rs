use serde::Serialize;
use tracing::debug;

use super::comparator::ComparatorRegistry;
use super::normalizer::normalize;
use super::predicate::PredicateSet;
use super::row::{Row, RowId};
use super::spec::{FilterSpec, SortSpec};

/// Outcome of one evaluation. Rows are borrowed from the snapshot, so the
/// engine only decides membership and order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult<'a> {
    pub visible: Vec<&'a Row>,
    pub hidden: Vec<&'a Row>,
    pub total: usize,
}

impl<'a> EngineResult<'a> {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn visible_ids(&self) -> Vec<RowId> {
        self.visible.iter().map(|row| row.id().clone()).collect()
    }

    pub fn hidden_ids(&self) -> Vec<RowId> {
        self.hidden.iter().map(|row| row.id().clone()).collect()
    }
}

/// Pure filter-then-sort pass parameterized by a view's searchable fields and comparators.
#[derive(Debug, Clone)]
pub struct FilterSortEngine {
    predicates: PredicateSet,
    comparators: ComparatorRegistry,
}

impl FilterSortEngine {
    pub fn new(predicates: PredicateSet, comparators: ComparatorRegistry) -> Self {
        Self {
            predicates,
            comparators,
        }
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    pub fn comparators(&self) -> &ComparatorRegistry {
        &self.comparators
    }

    pub fn evaluate<'a>(
        &self,
        rows: &'a [Row],
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> EngineResult<'a> {
        let needle = filter.search().map(normalize).unwrap_or_default();
        let (mut visible, hidden): (Vec<&Row>, Vec<&Row>) = rows
            .iter()
            .partition(|row| self.predicates.matches_normalized(row, &needle, filter));

        if let Some(key) = sort.key() {
            let comparator = self.comparators.comparator_for(key);
            if comparator.is_identity() {
                debug!(sort_key = key, "unrecognized sort key, keeping filtered order");
            } else {
                // `sort_by` is stable: equal keys keep their filtered order.
                visible.sort_by(|a, b| comparator.compare(a, b));
            }
        }

        debug!(
            visible = visible.len(),
            hidden = hidden.len(),
            total = rows.len(),
            "grid evaluated"
        );

        EngineResult {
            visible,
            hidden,
            total: rows.len(),
        }
    }
}
