use fortia_grid::grid::{
    ControlState, PresentationSummary, Row, RowId, TableController, TableSurface,
};
use fortia_grid::views::{candidates, vacancies, CandidateAction, VacancyAction, ViewKind};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub(crate) struct ViewReport {
    view: &'static str,
    counter: String,
    summary: Option<PresentationSummary>,
    controls: ControlState,
    rows: Vec<Row>,
    commands: Vec<CommandView>,
}

#[derive(Debug, Serialize)]
struct CommandView {
    action: String,
    row_id: String,
    recognized: bool,
    /// `None` when no row in the snapshot has `row_id`.
    row: Option<Row>,
}

impl ViewReport {
    pub(crate) fn new(
        kind: ViewKind,
        controller: &TableController<TableSurface>,
        actions: &[(String, String)],
    ) -> Self {
        let summary = controller.summary();
        let counter = summary
            .map(|summary| summary.counter_text())
            .unwrap_or_default();

        Self {
            view: kind.label(),
            counter,
            summary,
            controls: controller.controls(),
            rows: controller.visible_rows(),
            commands: actions
                .iter()
                .map(|(action, row_id)| command_view(kind, controller, action, row_id))
                .collect(),
        }
    }
}

fn command_view(
    kind: ViewKind,
    controller: &TableController<TableSurface>,
    action: &str,
    row_id: &str,
) -> CommandView {
    let row = controller
        .command(action, &RowId::new(row_id))
        .map(|command| command.row);
    if row.is_none() {
        warn!(action, row_id, "row action targets an unknown row");
    }

    CommandView {
        action: action.to_string(),
        row_id: row_id.to_string(),
        recognized: is_known_action(kind, action),
        row,
    }
}

fn is_known_action(kind: ViewKind, action: &str) -> bool {
    match kind {
        ViewKind::Candidates => CandidateAction::parse(action).is_some(),
        ViewKind::Vacancies => VacancyAction::parse(action).is_some(),
    }
}

fn columns(view: &str) -> &'static [&'static str] {
    if view == ViewKind::Vacancies.label() {
        &[
            vacancies::POSITION,
            vacancies::DEPT,
            vacancies::RECRUITER,
            vacancies::STATE,
            vacancies::APPS,
            vacancies::PUBLISHED_DAYS,
        ]
    } else {
        &[
            candidates::NAME,
            candidates::EMAIL,
            candidates::VACANCY,
            candidates::STATUS,
            candidates::MATCH,
            candidates::DATE,
        ]
    }
}

pub(crate) fn render_text(report: &ViewReport) {
    print!("{}", format_text(report));
}

pub(crate) fn render_json(report: &ViewReport) -> Result<(), std::io::Error> {
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), report)?;
    println!();
    Ok(())
}

fn format_text(report: &ViewReport) -> String {
    let mut out = format!("{} table\n", capitalize(report.view));

    if !report.controls.search.is_empty() {
        out.push_str(&format!("Search: {}\n", report.controls.search));
    }
    for (field, value) in &report.controls.selections {
        if !value.is_empty() {
            out.push_str(&format!("Filter: {field} = {value}\n"));
        }
    }
    if !report.controls.sort.is_empty() {
        out.push_str(&format!("Sort: {}\n", report.controls.sort));
    }

    out.push('\n');
    if report.rows.is_empty() {
        out.push_str("No results\n");
    }
    for row in &report.rows {
        let cells: Vec<String> = columns(report.view)
            .iter()
            .map(|field| row.text(field).into_owned())
            .collect();
        out.push_str(&format!("- {} | {}\n", row.id(), cells.join(" | ")));
    }

    out.push_str(&format!("\n{}\n", report.counter));

    if !report.commands.is_empty() {
        out.push_str("\nRow actions\n");
        for command in &report.commands {
            let note = if command.row.is_none() {
                " (no such row)"
            } else if !command.recognized {
                " (unrecognized)"
            } else {
                ""
            };
            out.push_str(&format!(
                "- {} -> {}{}\n",
                command.action, command.row_id, note
            ));
        }
    }

    out
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use std::time::Duration;

    #[tokio::test]
    async fn text_report_lists_rows_and_counter() {
        let rows = demo::rows(ViewKind::Vacancies);
        let mut controller = TableController::new(
            ViewKind::Vacancies.schema(),
            TableSurface::new(),
            Duration::from_millis(300),
        );
        controller.refresh(rows).expect("initial evaluation");
        controller.select(vacancies::STATE, "ACTIVA").expect("select");
        controller.set_sort("apps").expect("sort");

        let actions = [
            ("edit-job".to_string(), "vac-1".to_string()),
            ("archive".to_string(), "vac-1".to_string()),
            ("edit-job".to_string(), "vac-99".to_string()),
        ];
        let report = ViewReport::new(ViewKind::Vacancies, &controller, &actions);
        let text = format_text(&report);

        assert!(text.starts_with("Vacancies table\n"));
        assert!(text.contains("Filter: state = ACTIVA\n"));
        assert!(text.contains(
            "- vac-1 | Backend Engineer | Tecnología | Lucía Gómez | ACTIVA | 14 | 3\n\
             - vac-5 | QA Tester"
        ));
        assert!(text.contains("\nShowing 2 of 5\n"));
        assert!(text.contains("- edit-job -> vac-1\n"));
        assert!(text.contains("- archive -> vac-1 (unrecognized)\n"));
        assert!(text.contains("- edit-job -> vac-99 (no such row)\n"));
        assert_eq!(report.commands.len(), 3);
        assert!(report.commands[2].row.is_none());
    }

    #[tokio::test]
    async fn empty_report_says_no_results() {
        let mut controller = TableController::new(
            ViewKind::Candidates.schema(),
            TableSurface::new(),
            Duration::from_millis(300),
        );
        controller
            .refresh(demo::rows(ViewKind::Candidates))
            .expect("initial evaluation");
        controller.select(candidates::STATUS, "Archivado").expect("select");

        let report = ViewReport::new(ViewKind::Candidates, &controller, &[]);
        let text = format_text(&report);
        assert!(text.contains("No results\n"));
        assert!(text.contains("Showing 0 of 6"));
    }
}
