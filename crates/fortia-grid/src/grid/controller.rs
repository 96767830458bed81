use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::debounce::DebounceScheduler;
use super::engine::FilterSortEngine;
use super::presenter::{DisplaySurface, PresentationSummary, ResultPresenter, SurfaceError};
use super::row::{Row, RowId};
use super::schema::ViewSchema;
use super::spec::{FilterSpec, SortSpec};

/// Current values of a view's controls, as a user left them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub search: String,
    pub selections: BTreeMap<String, String>,
    pub sort: String,
}

impl ControlState {
    /// Builds the filter for `schema`; selections for controls the schema does
    /// not declare are ignored.
    pub fn filter_spec(&self, schema: &ViewSchema) -> FilterSpec {
        schema
            .selectors()
            .iter()
            .filter_map(|field| {
                self.selections
                    .get(*field)
                    .map(|value| (*field, value.as_str()))
            })
            .fold(
                FilterSpec::builder().search(self.search.as_str()),
                |builder, (field, value)| builder.require(field, value),
            )
            .build()
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::from_control(&self.sort)
    }
}

/// Opaque row action handed back to the host, never interpreted by the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowCommand {
    pub action: String,
    pub row: Row,
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("view `{0}` has been torn down")]
    TornDown(&'static str),
}

#[derive(Debug)]
struct ViewState<S> {
    schema: ViewSchema,
    engine: FilterSortEngine,
    presenter: ResultPresenter<S>,
    rows: Vec<Row>,
    controls: ControlState,
    visible: Vec<RowId>,
    summary: Option<PresentationSummary>,
    torn_down: bool,
}

impl<S: DisplaySurface> ViewState<S> {
    fn apply(&mut self) -> Result<PresentationSummary, ControllerError> {
        if self.torn_down {
            return Err(ControllerError::TornDown(self.schema.name()));
        }

        let filter = self.controls.filter_spec(&self.schema);
        let sort = self.controls.sort_spec();
        let result = self.engine.evaluate(&self.rows, &filter, &sort);
        let summary = self.presenter.present(&result)?;

        self.visible = result.visible_ids();
        self.summary = Some(summary);
        Ok(summary)
    }
}

/// Owns one view's snapshot, control values, engine, presenter, and search debouncer.
///
/// Search input is debounced; selector and sort changes evaluate immediately.
/// Every evaluation recomputes from the full snapshot, so an immediate
/// evaluation interleaving with a pending search cannot corrupt anything.
pub struct TableController<S> {
    state: Arc<Mutex<ViewState<S>>>,
    debounce: DebounceScheduler,
}

fn lock<S>(state: &Mutex<ViewState<S>>) -> MutexGuard<'_, ViewState<S>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S> TableController<S>
where
    S: DisplaySurface + 'static,
{
    pub fn new(schema: ViewSchema, surface: S, search_delay: Duration) -> Self {
        let engine = schema.engine();
        info!(view = schema.name(), "table controller created");
        Self {
            state: Arc::new(Mutex::new(ViewState {
                schema,
                engine,
                presenter: ResultPresenter::new(surface),
                rows: Vec::new(),
                controls: ControlState::default(),
                visible: Vec::new(),
                summary: None,
                torn_down: false,
            })),
            debounce: DebounceScheduler::new(search_delay),
        }
    }

    /// Evaluates against the current controls right away.
    pub fn apply(&self) -> Result<PresentationSummary, ControllerError> {
        lock(&self.state).apply()
    }

    /// Replaces the snapshot, drops rows that left it from the surface, and re-evaluates.
    pub fn refresh(&mut self, rows: Vec<Row>) -> Result<PresentationSummary, ControllerError> {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        if state.torn_down {
            return Err(ControllerError::TornDown(state.schema.name()));
        }

        debug!(view = state.schema.name(), rows = rows.len(), "snapshot replaced");
        state.rows = rows;
        state.presenter.retain(&state.rows)?;
        state.apply()
    }

    pub fn add_row(&mut self, row: Row) -> Result<PresentationSummary, ControllerError> {
        let mut state = lock(&self.state);
        state.rows.push(row);
        state.apply()
    }

    /// Records the search text and schedules a debounced evaluation.
    pub fn input_search(&mut self, text: impl Into<String>) -> Result<(), ControllerError> {
        {
            let mut state = lock(&self.state);
            if state.torn_down {
                return Err(ControllerError::TornDown(state.schema.name()));
            }
            state.controls.search = text.into();
        }

        let shared = Arc::clone(&self.state);
        self.debounce.trigger(move || {
            let mut state = lock(&shared);
            if let Err(err) = state.apply() {
                warn!(view = state.schema.name(), error = %err, "debounced search not applied");
            }
        });
        Ok(())
    }

    /// Sets a selector value and evaluates immediately. Unknown controls impose
    /// no constraint; an empty value clears the selector.
    pub fn select(
        &mut self,
        control: &str,
        value: impl Into<String>,
    ) -> Result<PresentationSummary, ControllerError> {
        let mut state = lock(&self.state);
        if !state.schema.has_selector(control) {
            debug!(view = state.schema.name(), control, "ignoring unknown selector");
        }
        state
            .controls
            .selections
            .insert(control.to_string(), value.into());
        state.apply()
    }

    pub fn set_sort(&mut self, key: impl Into<String>) -> Result<PresentationSummary, ControllerError> {
        let mut state = lock(&self.state);
        state.controls.sort = key.into();
        state.apply()
    }

    /// Resets every control, drops a pending search, and re-evaluates.
    pub fn clear_filters(&mut self) -> Result<PresentationSummary, ControllerError> {
        self.debounce.cancel();
        let mut state = lock(&self.state);
        state.controls = ControlState::default();
        state.apply()
    }

    pub fn controls(&self) -> ControlState {
        lock(&self.state).controls.clone()
    }

    pub fn has_pending_search(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Summary of the last applied evaluation, if any ran yet.
    pub fn summary(&self) -> Option<PresentationSummary> {
        lock(&self.state).summary
    }

    pub fn filtered_count(&self) -> usize {
        self.summary().map_or(0, |summary| summary.visible_count)
    }

    /// Rows shown by the last applied evaluation, in display order.
    pub fn visible_rows(&self) -> Vec<Row> {
        let state = lock(&self.state);
        let rows = state
            .visible
            .iter()
            .filter_map(|id| state.rows.iter().find(|row| row.id() == id))
            .cloned()
            .collect();
        rows
    }

    /// Wraps `action` on `row_id` into an opaque command, or `None` if the row is unknown.
    pub fn command(&self, action: &str, row_id: &RowId) -> Option<RowCommand> {
        let state = lock(&self.state);
        let command = state
            .rows
            .iter()
            .find(|row| row.id() == row_id)
            .map(|row| RowCommand {
                action: action.to_string(),
                row: row.clone(),
            });
        command
    }

    /// Cancels any pending search; later triggers fail with [`ControllerError::TornDown`].
    pub fn teardown(&mut self) {
        self.debounce.cancel();
        let mut state = lock(&self.state);
        state.torn_down = true;
        info!(view = state.schema.name(), "table controller torn down");
    }
}
