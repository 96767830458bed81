//! Filter, search, and sort engine behind the candidate and vacancy tables.
//!
//! [`grid`] holds the view-agnostic pieces (normalizer, predicates,
//! comparators, engine, debouncer, presenter, controller) and [`views`]
//! parameterizes them for the two concrete tables.

pub mod config;
pub mod error;
pub mod grid;
pub mod telemetry;
pub mod views;
