//! How loaded every developer is during a sprint

use std::collections::HashSet;

use serde::Serialize;

use crate::entry::EntryKind;
use crate::feed::Developer;
use crate::grid::AssignmentGrid;

/// Utilization above which a developer is considered overloaded
pub const HIGH_LOAD_THRESHOLD: f64 = 0.8;
/// Utilization above which a developer is considered busy
pub const MEDIUM_LOAD_THRESHOLD: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LoadLevel {
    Low,
    Medium,
    High,
    /// The developer has no known capacity
    Unknown,
}

impl LoadLevel {
    /// Categorize a utilization ratio (scheduled points / capacity)
    pub fn from_utilization(ratio: f64) -> Self {
        if ratio.is_finite() == false {
            LoadLevel::Unknown
        } else if ratio > HIGH_LOAD_THRESHOLD {
            LoadLevel::High
        } else if ratio > MEDIUM_LOAD_THRESHOLD {
            LoadLevel::Medium
        } else {
            LoadLevel::Low
        }
    }
}

/// The workload of a developer over the working days of a grid
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkloadSummary {
    pub developer: String,
    /// Story points of every task block
    pub scheduled_points: f64,
    pub working_days: usize,
    /// Working days with a public holiday or a leave
    pub days_off: usize,
    pub available_days: usize,
    pub capacity: Option<f64>,
    pub utilization: Option<f64>,
    pub load: LoadLevel,
}

/// Summarize the workload of every developer of `roster` (once per name, in roster order)
pub fn summarize(grid: &AssignmentGrid, roster: &[Developer]) -> Vec<WorkloadSummary> {
    let mut seen = HashSet::new();
    let mut summaries = Vec::new();

    for developer in roster {
        if seen.insert(developer.name.as_str()) == false {
            continue;
        }

        let mut scheduled_points = 0.0;
        let mut days_off = 0;
        for day in grid.days() {
            let cell = grid.cell(&developer.name, *day);
            if cell.iter().any(|entry| matches!(entry.kind(), EntryKind::Holiday{..} | EntryKind::Leave)) {
                days_off += 1;
            }
            scheduled_points += cell.iter()
                .filter(|entry| entry.kind().is_task())
                .filter_map(|entry| entry.points().value())
                .sum::<f64>();
        }

        // With duplicated roster names, the last capacity wins, just like the last row does in the grid
        let capacity = roster.iter()
            .rev()
            .find(|d| d.name == developer.name)
            .and_then(|d| d.capacity)
            .filter(|capacity| *capacity > 0.0);
        let utilization = capacity.map(|capacity| scheduled_points / capacity);
        let load = utilization.map(LoadLevel::from_utilization).unwrap_or(LoadLevel::Unknown);

        let working_days = grid.days().len();
        summaries.push(WorkloadSummary {
            developer: developer.name.clone(),
            scheduled_points,
            working_days,
            days_off,
            available_days: working_days - days_off,
            capacity,
            utilization,
            load,
        });
    }

    summaries
}
