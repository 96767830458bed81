use serde::Serialize;

use super::engine::EngineResult;
use super::row::{Row, RowId};

/// Host-side display operations the presenter drives. Implemented by the view
/// renderer; the grid never touches a display any other way.
pub trait DisplaySurface: Send {
    /// Shows the rows and moves them, in the given order, behind every other row.
    fn show_rows(&mut self, ordered: &[RowId]) -> Result<(), SurfaceError>;
    fn hide_rows(&mut self, rows: &[RowId]) -> Result<(), SurfaceError>;
    /// Toggles the single "no results" placeholder; when shown it is moved to the end.
    fn set_placeholder(&mut self, visible: bool) -> Result<(), SurfaceError>;
    fn set_counter(&mut self, text: &str) -> Result<(), SurfaceError>;
    /// Removes every row not listed in `rows`; called when the snapshot is replaced.
    fn retain_rows(&mut self, rows: &[RowId]) -> Result<(), SurfaceError>;
}

/// Failures reported by a display surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("display surface is detached")]
    Detached,
    #[error("display surface rejected the update: {0}")]
    Rejected(String),
}

/// What a presentation pass reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresentationSummary {
    pub visible_count: usize,
    pub total_count: usize,
    pub is_empty: bool,
}

impl PresentationSummary {
    pub fn hidden_count(&self) -> usize {
        self.total_count - self.visible_count
    }

    pub fn counter_text(&self) -> String {
        counter_text(self.visible_count, self.total_count)
    }
}

/// Human-readable visible/total counter.
pub fn counter_text(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total}")
}

/// Pushes engine output onto a [`DisplaySurface`].
#[derive(Debug)]
pub struct ResultPresenter<S> {
    surface: S,
}

impl<S: DisplaySurface> ResultPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Drops rows that left the snapshot so the surface only holds `snapshot`'s rows.
    pub fn retain(&mut self, snapshot: &[Row]) -> Result<(), SurfaceError> {
        let ids: Vec<RowId> = snapshot.iter().map(|row| row.id().clone()).collect();
        self.surface.retain_rows(&ids)
    }

    pub fn present(&mut self, result: &EngineResult<'_>) -> Result<PresentationSummary, SurfaceError> {
        let summary = PresentationSummary {
            visible_count: result.visible_count(),
            total_count: result.total,
            is_empty: result.is_empty(),
        };

        self.surface.hide_rows(&result.hidden_ids())?;
        self.surface.show_rows(&result.visible_ids())?;
        self.surface.set_placeholder(summary.is_empty)?;
        self.surface.set_counter(&summary.counter_text())?;

        Ok(summary)
    }
}
