use serde::{Deserialize, Serialize};

use super::actions::VacancyAction;
use super::snapshot::{lenient_number, SnapshotRecord};
use crate::grid::comparator::{Comparator, RankTable};
use crate::grid::row::{Row, RowId};
use crate::grid::schema::ViewSchema;

pub const POSITION: &str = "position";
pub const DEPT: &str = "dept";
pub const RECRUITER: &str = "recruiter";
pub const STATE: &str = "state";
pub const APPS: &str = "apps";
pub const PUBLISHED_DAYS: &str = "publishedDays";

/// Job lifecycle weights; heavier states sort first.
pub const STATE_WEIGHTS: RankTable = &[
    ("ACTIVA", 3),
    ("BORRADOR", 2),
    ("PAUSADA", 1),
    ("CERRADA", 0),
];

/// One job opening as loaded from a vacancies snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub position: String,
    #[serde(rename = "dept", default)]
    pub department: String,
    #[serde(default)]
    pub recruiter: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "apps", default, deserialize_with = "lenient_number")]
    pub applications: Option<f64>,
    #[serde(rename = "publishedDays", default, deserialize_with = "lenient_number")]
    pub published_days: Option<f64>,
}

impl SnapshotRecord for Vacancy {
    const ID_PREFIX: &'static str = "vac";

    fn id(&self) -> &str {
        &self.id
    }

    fn into_row(self, id: RowId) -> Row {
        Row::new(id)
            .with(POSITION, self.position)
            .with(DEPT, self.department)
            .with(RECRUITER, self.recruiter)
            .with(STATE, self.state)
            .with_opt(APPS, self.applications)
            .with_opt(PUBLISHED_DAYS, self.published_days)
    }
}

/// Vacancies table: search over position, department, and recruiter; filter by
/// state, department, and recruiter.
pub fn schema() -> ViewSchema {
    let schema = ViewSchema::new("vacancies")
        .searchable(&[POSITION, DEPT, RECRUITER])
        .selector(STATE)
        .selector(DEPT)
        .selector(RECRUITER)
        .sort("apps", Comparator::NumberDescending { field: APPS })
        .sort(
            "fecha",
            Comparator::NumberAscending {
                field: PUBLISHED_DAYS,
            },
        )
        .sort(
            "estado",
            Comparator::WeightDescending {
                field: STATE,
                weights: STATE_WEIGHTS,
            },
        );

    VacancyAction::all()
        .into_iter()
        .fold(schema, |schema, action| schema.action(action.id()))
}
