use std::cmp::Ordering;
use std::collections::HashMap;

use super::normalizer::normalize;
use super::row::Row;

/// Fixed `(value, position)` table used by rank and weight comparators.
pub type RankTable = &'static [(&'static str, i32)];

fn lookup(table: RankTable, value: &str) -> Option<i32> {
    table
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, position)| *position)
}

/// `Row::number` is always finite, so only `-0.0 == 0.0` needs care; both tie.
fn compare_numbers(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

/// Total preorder over rows for one sort key.
///
/// Every variant is applied with a stable sort, so rows that compare equal keep
/// their filtered order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Leaves the order unchanged.
    Identity,
    /// Locale-style ascending: accent and case folded first, raw text breaks ties.
    Lexical { field: &'static str },
    /// Highest number first; missing or non-numeric reads as `0`.
    NumberDescending { field: &'static str },
    /// Lowest number first; missing or non-numeric reads as `0`.
    NumberAscending { field: &'static str },
    /// Most recent first; unparsable dates read as the epoch.
    DateDescending { field: &'static str },
    /// Ascending by table rank; values missing from the table sort after every known rank.
    RankAscending {
        field: &'static str,
        ranks: RankTable,
    },
    /// Descending by table weight; values missing from the table weigh least.
    WeightDescending {
        field: &'static str,
        weights: RankTable,
    },
}

impl Comparator {
    pub fn is_identity(&self) -> bool {
        matches!(self, Comparator::Identity)
    }

    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        match *self {
            Comparator::Identity => Ordering::Equal,
            Comparator::Lexical { field } => {
                let (left, right) = (a.text(field), b.text(field));
                normalize(&left)
                    .cmp(&normalize(&right))
                    .then_with(|| left.cmp(&right))
            }
            Comparator::NumberDescending { field } => {
                compare_numbers(b.number(field), a.number(field))
            }
            Comparator::NumberAscending { field } => {
                compare_numbers(a.number(field), b.number(field))
            }
            Comparator::DateDescending { field } => b.date(field).cmp(&a.date(field)),
            Comparator::RankAscending { field, ranks } => {
                let rank = |row: &Row| lookup(ranks, &row.text(field)).unwrap_or(i32::MAX);
                rank(a).cmp(&rank(b))
            }
            Comparator::WeightDescending { field, weights } => {
                let weight = |row: &Row| lookup(weights, &row.text(field)).unwrap_or(-1);
                weight(b).cmp(&weight(a))
            }
        }
    }
}

/// Maps sort-key names to comparators for one view.
#[derive(Debug, Clone, Default)]
pub struct ComparatorRegistry {
    comparators: HashMap<&'static str, Comparator>,
}

static IDENTITY: Comparator = Comparator::Identity;

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, key: &'static str, comparator: Comparator) -> Self {
        self.comparators.insert(key, comparator);
        self
    }

    /// Comparator for `key`, or [`Comparator::Identity`] when the key is unknown.
    pub fn comparator_for(&self, key: &str) -> &Comparator {
        self.comparators.get(key).unwrap_or(&IDENTITY)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.comparators.contains_key(key)
    }

    /// Registered keys in lexical order.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.comparators.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::row::RowId;

    const STAGES: RankTable = &[("new", 1), ("interview", 2)];
    const WEIGHTS: RankTable = &[("open", 2), ("paused", 1), ("closed", 0)];

    fn row(id: &str, field: &str, value: &str) -> Row {
        Row::new(RowId::new(id)).with(field, value)
    }

    fn sorted(mut rows: Vec<Row>, comparator: Comparator) -> Vec<String> {
        rows.sort_by(|a, b| comparator.compare(a, b));
        rows.iter().map(|row| row.id().to_string()).collect()
    }

    #[test]
    fn lexical_folds_accents_before_raw_order() {
        let rows = vec![
            row("zoe", "name", "Zoe"),
            row("eli", "name", "Élia"),
            row("ana", "name", "ana"),
            row("emi", "name", "Emilio"),
        ];
        let order = sorted(rows, Comparator::Lexical { field: "name" });
        assert_eq!(order, ["ana", "eli", "emi", "zoe"]);
    }

    #[test]
    fn number_descending_treats_garbage_as_zero() {
        let rows = vec![
            row("low", "match", "12"),
            row("bad", "match", "n/a"),
            row("high", "match", "97"),
            Row::new(RowId::new("missing")),
        ];
        let order = sorted(rows, Comparator::NumberDescending { field: "match" });
        assert_eq!(order, ["high", "low", "bad", "missing"]);
    }

    #[test]
    fn negative_zero_ties_with_a_missing_number() {
        let rows = vec![
            Row::new(RowId::new("neg")).with("match", -0.0),
            Row::new(RowId::new("missing")),
            Row::new(RowId::new("zero")).with("match", 0.0),
        ];
        let descending = sorted(rows.clone(), Comparator::NumberDescending { field: "match" });
        assert_eq!(descending, ["neg", "missing", "zero"]);
        let ascending = sorted(rows, Comparator::NumberAscending { field: "match" });
        assert_eq!(ascending, ["neg", "missing", "zero"]);
    }

    #[test]
    fn number_ascending_puts_smallest_first() {
        let rows = vec![
            row("ten", "days", "10"),
            row("two", "days", "2"),
            row("five", "days", "5"),
        ];
        let order = sorted(rows, Comparator::NumberAscending { field: "days" });
        assert_eq!(order, ["two", "five", "ten"]);
    }

    #[test]
    fn date_descending_sends_unparsable_dates_last() {
        let rows = vec![
            row("old", "date", "2024-01-10"),
            row("junk", "date", "someday"),
            row("new", "date", "2025-06-01"),
        ];
        let order = sorted(rows, Comparator::DateDescending { field: "date" });
        assert_eq!(order, ["new", "old", "junk"]);
    }

    #[test]
    fn rank_ascending_places_unknowns_after_known_stages_in_input_order() {
        let rows = vec![
            row("u1", "stage", "archived"),
            row("i", "stage", "interview"),
            row("u2", "stage", "limbo"),
            row("n", "stage", "new"),
        ];
        let comparator = Comparator::RankAscending {
            field: "stage",
            ranks: STAGES,
        };
        assert_eq!(sorted(rows, comparator), ["n", "i", "u1", "u2"]);
    }

    #[test]
    fn weight_descending_ranks_unknowns_lowest() {
        let rows = vec![
            row("c", "state", "closed"),
            row("x", "state", "mystery"),
            row("o", "state", "open"),
            row("p", "state", "paused"),
        ];
        let comparator = Comparator::WeightDescending {
            field: "state",
            weights: WEIGHTS,
        };
        assert_eq!(sorted(rows, comparator), ["o", "p", "c", "x"]);
    }

    #[test]
    fn unknown_keys_resolve_to_identity() {
        let registry =
            ComparatorRegistry::new().register("name", Comparator::Lexical { field: "name" });
        assert!(registry.comparator_for("name") == &Comparator::Lexical { field: "name" });
        assert!(registry.comparator_for("salary").is_identity());
        assert!(!registry.contains("salary"));
        assert_eq!(registry.keys(), ["name"]);
    }
}
