use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::feed::{Developer, HolidayLeaveFeed, SprintAssignment, SprintWindow};

/// A source of the three inputs of a grid.
///
/// This is usually the planning service (a [`Client`](crate::client::Client)), or a local [`Cache`](crate::cache::Cache) of what it last returned.
///
/// Every call names the sprint it is made for. A source that keeps data per sprint (such as a cache)
/// must answer the three calls for the same `window` from the same data.
#[async_trait]
pub trait PlanningSource {
    /// Returns the developers of the team during a sprint.
    /// This function may trigger a request (that can be slow, or can even fail, e.g. in case of a remote server)
    async fn get_roster(&self, window: &SprintWindow) -> Result<Vec<Developer>, Box<dyn Error>>;

    /// Returns the public holidays and the personal leaves known for a sprint
    async fn get_holidays_and_leaves(&self, window: &SprintWindow) -> Result<HolidayLeaveFeed, Box<dyn Error>>;

    /// Returns the tasks scheduled for every developer during the sprint
    async fn get_sprint_assignment(&self, window: &SprintWindow) -> Result<SprintAssignment, Box<dyn Error>>;
}

pub trait SnapshotHolder {
    /// Returns the last time the snapshot of this window was refreshed from a remote source
    /// (or None in case it has never been refreshed)
    fn get_last_refresh(&self, window: &SprintWindow) -> Option<DateTime<Utc>>;
}
