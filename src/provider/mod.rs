//! This modules combines a remote planning source and a local cache
//!
//! The provider refreshes the cache from the remote source, and builds grids from whatever snapshot settled last in the cache.

use chrono::Utc;

use crate::cache::{Cache, Snapshot};
use crate::feed::SprintWindow;
use crate::grid::{AssignmentGrid, GridBuilder};
use crate::traits::PlanningSource;
use crate::workload::WorkloadSummary;

pub mod refresh_progress;
use refresh_progress::{Feed, FeedbackSender, RefreshEvent, RefreshProgress};


/// A data source that combines a [`PlanningSource`] (usually a [`Client`](crate::client::Client)) and a local [`Cache`].
///
/// Grids are only ever built from the cache. A snapshot lands in the cache only once the three feeds have all been received,
/// so that a grid never mixes feeds from two different refreshes.
pub struct Provider<R>
where
    R: PlanningSource,
{
    /// The remote source (usually a server)
    remote: R,
    /// The local cache
    local: Cache,
    /// Keeps task colors stable between two grids of the same plan
    builder: GridBuilder,
}

impl<R> Provider<R>
where
    R: PlanningSource,
{
    /// Create a provider.
    pub fn new(remote: R, local: Cache) -> Self {
        Self { remote, local, builder: GridBuilder::new() }
    }

    /// Create a provider that colors tasks with a custom builder
    pub fn with_builder(remote: R, local: Cache, builder: GridBuilder) -> Self {
        Self { remote, local, builder }
    }

    /// Returns the local cache
    pub fn local(&self) -> &Cache { &self.local }
    /// Returns the local cache
    pub fn local_mut(&mut self) -> &mut Cache { &mut self.local }
    /// Returns the remote source.
    ///
    /// Apart from tests, there are very few reasons to access `remote` directly.
    pub fn remote(&self) -> &R { &self.remote }

    /// Fetches the three feeds of a sprint from `remote`, and provide feeedback to the user about the progress.
    ///
    /// It returns whether the refresh was totally successful (details about errors are logged using the `log::*` macros).
    /// In case any feed fails, the previous snapshot (if any) is kept untouched. Simply run this function again to retry.
    pub async fn refresh_with_feedback(&mut self, window: &SprintWindow, feedback_sender: FeedbackSender) -> bool {
        let mut progress = RefreshProgress::new_with_feedback_channel(window, feedback_sender);
        self.run_refresh(window, &mut progress).await
    }

    /// Fetches the three feeds of a sprint from `remote`, without giving any feedback.
    ///
    /// See [`Self::refresh_with_feedback`]
    pub async fn refresh(&mut self, window: &SprintWindow) -> bool {
        let mut progress = RefreshProgress::new(window);
        self.run_refresh(window, &mut progress).await
    }

    async fn run_refresh(&mut self, window: &SprintWindow, progress: &mut RefreshProgress) -> bool {
        log::info!("Starting a refresh of {}.", window);
        progress.feedback(RefreshEvent::Fetching{ sprint: window.to_string() });

        // Every request runs to completion, so that every failing feed gets reported
        let (roster, holiday_leave, assignment) = tokio::join!(
            self.remote.get_roster(window),
            self.remote.get_holidays_and_leaves(window),
            self.remote.get_sprint_assignment(window),
        );
        let roster = progress.track(Feed::Roster, roster);
        let holiday_leave = progress.track(Feed::HolidaysAndLeaves, holiday_leave);
        let assignment = progress.track(Feed::Plan, assignment);

        if let (Some(roster), Some(holiday_leave), Some(assignment)) = (roster, holiday_leave, assignment) {
            log::debug!("Received {} developers, {} holidays, {} leaves and a plan for {} developers",
                roster.len(), holiday_leave.holidays.len(), holiday_leave.leaves.len(), assignment.len());
            self.local.store(Snapshot {
                window: *window,
                roster,
                assignment,
                holiday_leave,
                fetched_at: Some(Utc::now()),
            });

            progress.feedback(RefreshEvent::Saving);
            if let Err(err) = self.local.save_to_folder() {
                progress.save_failed(err.as_ref());
            }
        }

        progress.finish()
    }

    /// Build the grid of a sprint from its last settled snapshot (or None if it has never been fetched)
    pub fn grid(&mut self, window: &SprintWindow) -> Option<AssignmentGrid> {
        let builder = &mut self.builder;
        self.local.snapshot(window)
            .map(|snapshot| snapshot.build_grid(builder))
    }

    /// Summarize the workload of every developer during a sprint (or None if it has never been fetched)
    pub fn workload(&mut self, window: &SprintWindow) -> Option<Vec<WorkloadSummary>> {
        let builder = &mut self.builder;
        self.local.snapshot(window)
            .map(|snapshot| crate::workload::summarize(&snapshot.build_grid(builder), &snapshot.roster))
    }
}
