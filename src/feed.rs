//! Payloads received from the planning service
//!
//! The service is not schema-validated on its side, so these types are deliberately lenient:
//! missing collections default to empty ones, and story points accept numbers, numeric strings or `"na"`.
//! Dates are kept as strings here; they are only parsed (with [`parse_date`]) when the grid is built,
//! so that a single malformed date only discards its own entry.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::entry::Points;
use crate::working_days::WorkingDays;

/// Parse a date the way the service may send it.
///
/// Accepts `yyyy-MM-dd`, RFC 3339 timestamps and naive `yyyy-MM-ddTHH:MM:SS` timestamps (only the date part is kept).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    None
}

/// A team member, as listed by the service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    #[serde(alias = "developer_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Story points this developer can take during a sprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

impl Developer {
    pub fn new<S: ToString>(name: S) -> Self {
        Self { name: name.to_string(), role: None, capacity: None }
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// The reply of `GET api/team/members`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMembers {
    #[serde(default)]
    pub members: Vec<Developer>,
}

/// A slice of a task that the optimizer scheduled on a given day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSlot {
    pub task: String,
    #[serde(default)]
    pub points: Points,
}

impl TaskSlot {
    pub fn new<S: ToString>(task: S, points: f64) -> Self {
        Self { task: task.to_string(), points: Points::Estimated(points) }
    }
}

/// Developer name → date (as sent by the service) → tasks of that day, in the optimizer's order
pub type SprintAssignment = HashMap<String, HashMap<String, Vec<TaskSlot>>>;

/// A public holiday, shared by the whole team
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: String,
    #[serde(rename = "holidayName")]
    pub holiday_name: String,
}

/// A day of personal leave
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub date: String,
    pub developer: String,
}

/// The reply of `GET api/holidays-leaves`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidayLeaveFeed {
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub leaves: Vec<Leave>,
}

/// How much of a developer's capacity the optimizer used
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeveloperUtilization {
    pub total_sprint_capacity_input: f64,
    pub total_daily_sum_capacity: f64,
    pub total_points_scheduled: f64,
    pub utilization_rate_vs_daily_sum: f64,
    pub tasks_assigned_by_optimizer: Vec<String>,
}

/// The reply of the optimizer (`POST api/sprint/optimize`)
///
/// Only the fields this crate uses are kept, the service sends many more.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationSummary {
    pub total_tasks_considered: usize,
    pub total_tasks_selected: usize,
    pub total_story_points_selected: f64,
    pub total_story_points_scheduled: f64,
    pub developer_utilization: HashMap<String, DeveloperUtilization>,
    pub sprint_working_days: Vec<String>,
    pub developer_daily_schedule: SprintAssignment,
}

/// The inclusive date boundaries of a sprint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SprintWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SprintWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse boundaries typed by a user (or computed by another tool)
    pub fn parse(start: &str, end: &str) -> Result<Self, Box<dyn Error>> {
        let start = match parse_date(start) {
            None => return Err(format!("Invalid sprint start date {:?}", start).into()),
            Some(date) => date,
        };
        let end = match parse_date(end) {
            None => return Err(format!("Invalid sprint end date {:?}", end).into()),
            Some(date) => date,
        };
        Ok(Self { start, end })
    }

    pub fn working_days(&self) -> WorkingDays {
        WorkingDays::new(self.start, self.end)
    }
}

impl Display for SprintWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        assert_eq!(parse_date("2025-04-08"), Some(expected));
        assert_eq!(parse_date(" 2025-04-08 "), Some(expected));
        assert_eq!(parse_date("2025-04-08T09:30:00Z"), Some(expected));
        assert_eq!(parse_date("2025-04-08T09:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("2025-04-08T09:30:00"), Some(expected));
        assert_eq!(parse_date("2025-04-08T09:30:00.250"), Some(expected));
        assert_eq!(parse_date("08/04/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn holiday_feed() {
        let json = r#"{
            "holidays": [{"date": "2025-04-08", "holidayName": "Spring Day"}],
            "leaves": [{"date": "2025-04-09", "developer": "Alice"}]
        }"#;
        let feed: HolidayLeaveFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.holidays[0].holiday_name, "Spring Day");
        assert_eq!(feed.leaves[0].developer, "Alice");

        let partial: HolidayLeaveFeed = serde_json::from_str(r#"{"leaves": []}"#).unwrap();
        assert!(partial.holidays.is_empty());
    }

    #[test]
    fn team_members_use_service_field_names() {
        let json = r#"{"members": [
            {"developer_name": "Alice", "role": "Backend", "capacity": 16, "skill_sets": "rust"},
            {"name": "Bob"}
        ]}"#;
        let team: TeamMembers = serde_json::from_str(json).unwrap();
        assert_eq!(team.members[0].name, "Alice");
        assert_eq!(team.members[0].capacity, Some(16.0));
        assert_eq!(team.members[1], Developer::new("Bob"));
    }

    #[test]
    fn optimizer_summary() {
        let json = r#"{
            "total_tasks_selected": 2,
            "objective_value": 42.0,
            "sprint_working_days": ["2025-04-07", "2025-04-08"],
            "developer_daily_schedule": {
                "Alice": {"2025-04-07": [{"task": "T-1", "points": 3.0}, {"task": "T-2", "points": "na"}]}
            }
        }"#;
        let summary: OptimizationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_tasks_selected, 2);
        let day = &summary.developer_daily_schedule["Alice"]["2025-04-07"];
        assert_eq!(day[0], TaskSlot::new("T-1", 3.0));
        assert_eq!(day[1].points, Points::NotApplicable);
    }

    #[test]
    fn sprint_window() {
        let window = SprintWindow::parse("2025-04-07", "2025-04-18").unwrap();
        assert_eq!(window.working_days().len(), 10);
        assert_eq!(window.to_string(), "2025-04-07_2025-04-18");
        assert!(SprintWindow::parse("2025-04-07", "next friday").is_err());
    }
}
