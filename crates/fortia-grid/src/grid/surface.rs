use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::presenter::{DisplaySurface, SurfaceError};
use super::row::RowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Row(RowId),
    Placeholder,
}

#[derive(Debug)]
struct TableBody {
    slots: Vec<Slot>,
    hidden: HashSet<RowId>,
    placeholder_visible: bool,
    counter: Option<String>,
    attached: bool,
    updates: usize,
}

impl Default for TableBody {
    fn default() -> Self {
        Self {
            slots: vec![Slot::Placeholder],
            hidden: HashSet::new(),
            placeholder_visible: false,
            counter: None,
            attached: true,
            updates: 0,
        }
    }
}

impl TableBody {
    fn move_to_end(&mut self, slot: Slot) {
        self.slots.retain(|existing| existing != &slot);
        self.slots.push(slot);
    }

    fn guard_attached(&mut self) -> Result<(), SurfaceError> {
        if self.attached {
            self.updates += 1;
            Ok(())
        } else {
            Err(SurfaceError::Detached)
        }
    }
}

/// In-memory table body: row slots plus one placeholder slot, a hidden set, and
/// the counter text. Clones share the same body, so a host can keep a handle
/// while the presenter owns another.
#[derive(Debug, Clone, Default)]
pub struct TableSurface {
    body: Arc<Mutex<TableBody>>,
}

impl TableSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A body pre-populated with `rows` (all visible) followed by the hidden placeholder.
    pub fn with_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        let surface = Self::default();
        {
            let mut body = surface.lock();
            let mut slots: Vec<Slot> = rows.into_iter().cloned().map(Slot::Row).collect();
            slots.push(Slot::Placeholder);
            body.slots = slots;
        }
        surface
    }

    fn lock(&self) -> MutexGuard<'_, TableBody> {
        self.body.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the host as torn down; later updates fail with [`SurfaceError::Detached`].
    pub fn detach(&self) {
        self.lock().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.lock().slots.clone()
    }

    /// Rows currently displayed, in display order.
    pub fn visible_order(&self) -> Vec<RowId> {
        let body = self.lock();
        let order = body
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Row(id) if !body.hidden.contains(id) => Some(id.clone()),
                _ => None,
            })
            .collect();
        order
    }

    pub fn is_hidden(&self, id: &RowId) -> bool {
        self.lock().hidden.contains(id)
    }

    pub fn placeholder_visible(&self) -> bool {
        self.lock().placeholder_visible
    }

    pub fn placeholder_count(&self) -> usize {
        self.lock()
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Placeholder))
            .count()
    }

    pub fn placeholder_is_last(&self) -> bool {
        matches!(self.lock().slots.last(), Some(Slot::Placeholder))
    }

    pub fn counter(&self) -> Option<String> {
        self.lock().counter.clone()
    }

    /// Number of accepted surface calls, useful to assert that nothing touched a torn-down view.
    pub fn update_count(&self) -> usize {
        self.lock().updates
    }
}

impl DisplaySurface for TableSurface {
    fn show_rows(&mut self, ordered: &[RowId]) -> Result<(), SurfaceError> {
        let mut body = self.lock();
        body.guard_attached()?;

        let shown: HashSet<&RowId> = ordered.iter().collect();
        let mut slots: Vec<Slot> = std::mem::take(&mut body.slots)
            .into_iter()
            .filter(|slot| !matches!(slot, Slot::Row(id) if shown.contains(id)))
            .collect();
        slots.extend(ordered.iter().cloned().map(Slot::Row));
        body.slots = slots;

        for id in ordered {
            body.hidden.remove(id);
        }
        Ok(())
    }

    fn hide_rows(&mut self, rows: &[RowId]) -> Result<(), SurfaceError> {
        let mut body = self.lock();
        body.guard_attached()?;

        let mut mounted: HashSet<RowId> = body
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Row(id) => Some(id.clone()),
                Slot::Placeholder => None,
            })
            .collect();
        for id in rows {
            if mounted.insert(id.clone()) {
                body.slots.push(Slot::Row(id.clone()));
            }
            body.hidden.insert(id.clone());
        }
        Ok(())
    }

    fn retain_rows(&mut self, rows: &[RowId]) -> Result<(), SurfaceError> {
        let mut body = self.lock();
        body.guard_attached()?;

        let keep: HashSet<&RowId> = rows.iter().collect();
        body.slots.retain(|slot| match slot {
            Slot::Row(id) => keep.contains(id),
            Slot::Placeholder => true,
        });
        body.hidden.retain(|id| keep.contains(id));
        Ok(())
    }

    fn set_placeholder(&mut self, visible: bool) -> Result<(), SurfaceError> {
        let mut body = self.lock();
        body.guard_attached()?;
        body.placeholder_visible = visible;
        if visible {
            body.move_to_end(Slot::Placeholder);
        }
        Ok(())
    }

    fn set_counter(&mut self, text: &str) -> Result<(), SurfaceError> {
        let mut body = self.lock();
        body.guard_attached()?;
        body.counter = Some(text.to_string());
        Ok(())
    }
}
