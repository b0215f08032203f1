//! This module provides a local cache for the inputs of a grid
//!
//! The cache keeps, for every sprint window, the last *settled* snapshot of the three feeds (roster, holidays and leaves, optimizer plan).
//! This lets an app display a grid on startup before the planning service has answered, or when it cannot be reached.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::{Developer, HolidayLeaveFeed, SprintAssignment, SprintWindow};
use crate::grid::{AssignmentGrid, GridBuilder};
use crate::traits::{PlanningSource, SnapshotHolder};

/// A consistent set of inputs for the grid of a sprint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub window: SprintWindow,
    #[serde(default)]
    pub roster: Vec<Developer>,
    #[serde(default)]
    pub assignment: SprintAssignment,
    #[serde(default)]
    pub holiday_leave: HolidayLeaveFeed,
    /// When these inputs were fetched from the planning service (None if they were built locally)
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// An empty snapshot, that builds an all-dash grid
    pub fn new(window: SprintWindow) -> Self {
        Self {
            window,
            roster: Vec::new(),
            assignment: SprintAssignment::new(),
            holiday_leave: HolidayLeaveFeed::default(),
            fetched_at: None,
        }
    }

    pub fn build_grid(&self, builder: &mut GridBuilder) -> AssignmentGrid {
        builder.build(&self.roster, &self.window, &self.assignment, &self.holiday_leave)
    }
}


/// A [`PlanningSource`] that stores its snapshots as JSON files in a local folder (one file per sprint window)
#[derive(Debug, PartialEq)]
pub struct Cache {
    backing_folder: PathBuf,
    snapshots: HashMap<SprintWindow, Snapshot>,
}

impl Cache {
    /// Get the path to the cache folder, as set in [`CACHE_FOLDER`](crate::config::CACHE_FOLDER)
    pub fn cache_folder() -> PathBuf {
        PathBuf::from(crate::config::cache_folder())
    }

    /// Initialize a cache from the content of a valid backing folder if it exists.
    /// Returns an error otherwise.
    ///
    /// Files that cannot be parsed are ignored (and logged).
    pub fn from_folder(folder: &Path) -> Result<Self, Box<dyn Error>> {
        let entries = match std::fs::read_dir(folder) {
            Err(err) => {
                return Err(format!("Unable to read folder {:?}: {}", folder, err).into());
            },
            Ok(entries) => entries,
        };

        let mut snapshots = HashMap::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().map(|ext| ext == "json") != Some(true) {
                continue;
            }

            let file = match std::fs::File::open(&path) {
                Err(err) => {
                    log::warn!("Unable to open file {:?}: {}", path, err);
                    continue;
                },
                Ok(file) => file,
            };
            let snapshot: Snapshot = match serde_json::from_reader(file) {
                Err(err) => {
                    log::warn!("Invalid snapshot file {:?}: {}. Ignoring it", path, err);
                    continue;
                },
                Ok(snapshot) => snapshot,
            };
            log::debug!("Loaded snapshot of {} from {:?}", snapshot.window, path);
            snapshots.insert(snapshot.window, snapshot);
        }

        Ok(Self {
            backing_folder: PathBuf::from(folder),
            snapshots,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
            snapshots: HashMap::new(),
        }
    }

    pub fn backing_folder(&self) -> &Path {
        &self.backing_folder
    }

    fn snapshot_file(&self, window: &SprintWindow) -> PathBuf {
        let file_name = sanitize_filename::sanitize(format!("{}.json", window));
        self.backing_folder.join(file_name)
    }

    /// Store the current Cache to its backing folder
    pub fn save_to_folder(&self) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;

        for (window, snapshot) in &self.snapshots {
            let path = self.snapshot_file(window);
            let file = match std::fs::File::create(&path) {
                Err(err) => return Err(format!("Unable to save file {:?}: {}", path, err).into()),
                Ok(file) => file,
            };
            serde_json::to_writer(file, snapshot)?;
        }
        Ok(())
    }

    /// Returns the last settled snapshot of a sprint window
    pub fn snapshot(&self, window: &SprintWindow) -> Option<&Snapshot> {
        self.snapshots.get(window)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.values()
    }

    /// Replace the snapshot of a window (as a whole)
    pub fn store(&mut self, snapshot: Snapshot) {
        self.snapshots.insert(snapshot.window, snapshot);
    }

    fn snapshot_or_err(&self, window: &SprintWindow) -> Result<&Snapshot, Box<dyn Error>> {
        match self.snapshots.get(window) {
            None => Err(format!("The cache contains no snapshot for {}", window).into()),
            Some(snapshot) => Ok(snapshot),
        }
    }
}

/// Every feed is answered from the snapshot of the requested window, so that the three of them always match
#[async_trait]
impl PlanningSource for Cache {
    async fn get_roster(&self, window: &SprintWindow) -> Result<Vec<Developer>, Box<dyn Error>> {
        Ok(self.snapshot_or_err(window)?.roster.clone())
    }

    async fn get_holidays_and_leaves(&self, window: &SprintWindow) -> Result<HolidayLeaveFeed, Box<dyn Error>> {
        Ok(self.snapshot_or_err(window)?.holiday_leave.clone())
    }

    async fn get_sprint_assignment(&self, window: &SprintWindow) -> Result<SprintAssignment, Box<dyn Error>> {
        Ok(self.snapshot_or_err(window)?.assignment.clone())
    }
}

impl SnapshotHolder for Cache {
    fn get_last_refresh(&self, window: &SprintWindow) -> Option<DateTime<Utc>> {
        self.snapshots.get(window)
            .and_then(|snapshot| snapshot.fetched_at)
    }
}
