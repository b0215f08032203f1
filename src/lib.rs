//! This crate builds the per-developer schedule of a sprint.
//!
//! It merges three feeds of a planning service (the tasks an optimizer assigned to every developer, the public holidays, and the personal leaves)
//! into an [`AssignmentGrid`](grid::AssignmentGrid): one row per developer, one column per working day.
//! The [`render`] module turns a grid into a plain-text or an HTML table.
//!
//! The feeds can be fetched with the [`client`] module. \
//! Because the planning service may be slow (running the optimizer takes a while), this crate also provides a local cache of the last fetched feeds in the [`cache`] module. \
//! These two sources can be used together in a [`Provider`](provider::Provider), that refreshes the cache and builds grids from it.

pub mod traits;

pub mod working_days;
pub use working_days::WorkingDays;
pub mod feed;
pub mod entry;
pub use entry::ScheduleEntry;
pub mod palette;
pub mod grid;
pub use grid::{AssignmentGrid, GridBuilder};
pub mod render;
pub mod workload;

pub mod client;
pub mod cache;
pub mod provider;
pub use provider::Provider;

pub mod config;

/// A provider that refreshes a [`Cache`](cache::Cache) from the planning service
pub type ServiceProvider = provider::Provider<client::Client>;
