use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::actions::CandidateAction;
use super::snapshot::{lenient_date, lenient_number, SnapshotRecord};
use crate::grid::comparator::{Comparator, RankTable};
use crate::grid::row::{Row, RowId};
use crate::grid::schema::ViewSchema;

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const VACANCY: &str = "vacancy";
pub const STATUS: &str = "status";
pub const MATCH: &str = "match";
pub const DATE: &str = "date";

/// Hiring pipeline stages in order; used only to sort, never to filter.
pub const STATUS_RANKS: RankTable = &[
    ("Nuevo", 1),
    ("En revisión", 2),
    ("Entrevista", 3),
    ("Oferta", 4),
    ("Contratado", 5),
    ("Rechazado", 6),
];

/// One applicant as loaded from a candidates snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub vacancy: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "match", default, deserialize_with = "lenient_number")]
    pub match_score: Option<f64>,
    #[serde(rename = "date", default, deserialize_with = "lenient_date")]
    pub applied_on: Option<NaiveDateTime>,
}

impl SnapshotRecord for Candidate {
    const ID_PREFIX: &'static str = "cand";

    fn id(&self) -> &str {
        &self.id
    }

    fn into_row(self, id: RowId) -> Row {
        Row::new(id)
            .with(NAME, self.name)
            .with(EMAIL, self.email)
            .with(VACANCY, self.vacancy)
            .with(STATUS, self.status)
            .with_opt(MATCH, self.match_score)
            .with_opt(DATE, self.applied_on)
    }
}

/// Candidates table: search over name and email, filter by vacancy and status.
pub fn schema() -> ViewSchema {
    let schema = ViewSchema::new("candidates")
        .searchable(&[NAME, EMAIL])
        .selector(VACANCY)
        .selector(STATUS)
        .sort("name", Comparator::Lexical { field: NAME })
        .sort("match", Comparator::NumberDescending { field: MATCH })
        .sort("date", Comparator::DateDescending { field: DATE })
        .sort(
            "status",
            Comparator::RankAscending {
                field: STATUS,
                ranks: STATUS_RANKS,
            },
        );

    CandidateAction::all()
        .into_iter()
        .fold(schema, |schema, action| schema.action(action.id()))
}
