//! Row action identifiers the hosts attach to buttons. The grid only forwards
//! them as [`RowCommand`](crate::grid::RowCommand)s; these parsers are for the
//! host side that actually performs them.

use serde::Serialize;

use crate::grid::normalizer::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateAction {
    ViewProfile,
    ScheduleInterview,
    Reject,
    ViewContract,
    ViewOffer,
    ViewFeedback,
}

impl CandidateAction {
    pub const fn all() -> [Self; 6] {
        [
            Self::ViewProfile,
            Self::ScheduleInterview,
            Self::Reject,
            Self::ViewContract,
            Self::ViewOffer,
            Self::ViewFeedback,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::ViewProfile => "view",
            Self::ScheduleInterview => "interview",
            Self::Reject => "reject",
            Self::ViewContract => "contract",
            Self::ViewOffer => "offer",
            Self::ViewFeedback => "feedback",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|action| action.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyAction {
    ViewCandidates,
    EditJob,
}

impl VacancyAction {
    pub const fn all() -> [Self; 2] {
        [Self::ViewCandidates, Self::EditJob]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::ViewCandidates => "view-candidates",
            Self::EditJob => "edit-job",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|action| action.id() == id)
    }

    /// Resolves a button by its action id, falling back to its visible label
    /// ("Ver candidatos", "Editar") when the id is missing or unknown.
    pub fn resolve(id: Option<&str>, label: &str) -> Option<Self> {
        if let Some(action) = id.and_then(Self::parse) {
            return Some(action);
        }

        let label = normalize(label.trim());
        if label.contains("ver") || label.contains("candidatos") {
            Some(Self::ViewCandidates)
        } else if label.contains("editar") {
            Some(Self::EditJob)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_ids_round_trip_through_parse() {
        for action in CandidateAction::all() {
            assert_eq!(CandidateAction::parse(action.id()), Some(action));
        }
        assert_eq!(CandidateAction::parse("hire"), None);
    }

    #[test]
    fn vacancy_resolve_prefers_the_action_id() {
        assert_eq!(
            VacancyAction::resolve(Some("edit-job"), "Ver candidatos"),
            Some(VacancyAction::EditJob)
        );
    }

    #[test]
    fn vacancy_resolve_falls_back_to_the_label() {
        assert_eq!(
            VacancyAction::resolve(None, "  VER CANDIDATOS "),
            Some(VacancyAction::ViewCandidates)
        );
        assert_eq!(
            VacancyAction::resolve(Some("unknown"), "Editar vacante"),
            Some(VacancyAction::EditJob)
        );
        assert_eq!(VacancyAction::resolve(None, "Duplicar"), None);
    }
}
