//! View-agnostic table engine: normalize, filter, sort, debounce, present.

pub mod comparator;
pub mod controller;
pub mod debounce;
pub mod engine;
pub mod mount;
pub mod normalizer;
pub mod predicate;
pub mod presenter;
pub mod row;
pub mod schema;
pub mod spec;
pub mod surface;

pub use comparator::{Comparator, ComparatorRegistry, RankTable};
pub use controller::{ControlState, ControllerError, RowCommand, TableController};
pub use debounce::{DebounceScheduler, DEFAULT_SEARCH_DELAY};
pub use engine::{EngineResult, FilterSortEngine};
pub use mount::{wait_for_mount, MountError, MountPolicy};
pub use normalizer::normalize;
pub use predicate::PredicateSet;
pub use presenter::{
    counter_text, DisplaySurface, PresentationSummary, ResultPresenter, SurfaceError,
};
pub use row::{FieldValue, Row, RowId};
pub use schema::ViewSchema;
pub use spec::{CategoricalConstraint, FilterSpec, FilterSpecBuilder, SortSpec};
pub use surface::{Slot, TableSurface};
