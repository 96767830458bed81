pub mod actions;
pub mod candidates;
pub mod snapshot;
pub mod vacancies;

use std::io::Read;
use std::path::Path;

use crate::grid::row::Row;
use crate::grid::schema::ViewSchema;

pub use actions::{CandidateAction, VacancyAction};
pub use candidates::Candidate;
pub use snapshot::{SnapshotFormat, SnapshotImportError, SnapshotImporter, SnapshotRecord};
pub use vacancies::Vacancy;

/// The two tables the grid ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Candidates,
    Vacancies,
}

impl ViewKind {
    pub fn schema(self) -> ViewSchema {
        match self {
            Self::Candidates => candidates::schema(),
            Self::Vacancies => vacancies::schema(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidates => "candidates",
            Self::Vacancies => "vacancies",
        }
    }

    pub fn load_path<P: AsRef<Path>>(self, path: P) -> Result<Vec<Row>, SnapshotImportError> {
        match self {
            Self::Candidates => SnapshotImporter::from_path::<Candidate, _>(path),
            Self::Vacancies => SnapshotImporter::from_path::<Vacancy, _>(path),
        }
    }

    pub fn load_reader<R: Read>(
        self,
        reader: R,
        format: SnapshotFormat,
    ) -> Result<Vec<Row>, SnapshotImportError> {
        match self {
            Self::Candidates => SnapshotImporter::from_reader::<Candidate, _>(reader, format),
            Self::Vacancies => SnapshotImporter::from_reader::<Vacancy, _>(reader, format),
        }
    }
}
