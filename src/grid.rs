//! The assignment grid: who does what on every working day of a sprint
//!
//! A grid merges three independent feeds:
//! * the tasks the optimizer scheduled for every developer,
//! * the public holidays, that apply to everyone,
//! * the personal leaves.
//!
//! The developer roster is the source of truth for rows, and the working days of the sprint are the source of truth for columns.
//! Anything that does not fit in a (row, column) cell (unknown developer, weekend or out-of-sprint date, unparseable date) is dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::entry::ScheduleEntry;
use crate::feed::{parse_date, Developer, HolidayLeaveFeed, SprintAssignment, SprintWindow};
use crate::palette::TaskPalette;

type Row = BTreeMap<NaiveDate, Vec<ScheduleEntry>>;

/// Developer name → working day → entries of that day.
///
/// Within a cell, entries are kept in insertion order: holidays first, then leaves, then tasks in the optimizer's order.
/// A grid is never updated: when any input changes, a new one is built.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentGrid {
    developers: Vec<String>,
    days: Vec<NaiveDate>,
    cells: HashMap<String, Row>,
}

impl AssignmentGrid {
    /// Row names, in roster order (a name listed twice in the roster is listed twice here)
    pub fn developers(&self) -> &[String] {
        &self.developers
    }

    /// Column headers, in ascending order
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn has_row(&self, developer: &str) -> bool {
        self.cells.contains_key(developer)
    }

    /// The entries of a cell (empty if there are none, or if the cell does not exist)
    pub fn cell(&self, developer: &str, date: NaiveDate) -> &[ScheduleEntry] {
        self.cells.get(developer)
            .and_then(|row| row.get(&date))
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Returns whether `label` already appears for this developer on a working day before `date`.
    ///
    /// Any earlier day counts, not only the previous one: a task that pauses for a day and resumes
    /// is still displayed as the continuation of its first occurrence.
    pub fn is_continuation(&self, developer: &str, date: NaiveDate, label: &str) -> bool {
        match self.cells.get(developer) {
            None => false,
            Some(row) => row.range(..date)
                .any(|(_, entries)| entries.iter().any(|entry| entry.label() == label)),
        }
    }

    /// Every entry of the grid, row by row (in roster order, each row once) and day by day
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> + '_ {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for name in &self.developers {
            if seen.insert(name.as_str()) {
                if let Some(row) = self.cells.get(name) {
                    rows.push(row);
                }
            }
        }
        rows.into_iter()
            .flat_map(|row| row.values())
            .flatten()
    }
}


/// Builds [`AssignmentGrid`]s.
///
/// A builder owns the palette that colors tasks, so that it can be kept between builds as long as the task labels do not change.
/// Building twice from the same inputs always gives the same grid.
#[derive(Clone, Debug, Default)]
pub struct GridBuilder {
    palette: TaskPalette,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: TaskPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &TaskPalette {
        &self.palette
    }

    /// Merge the three feeds into a new grid
    pub fn build(&mut self,
                 roster: &[Developer],
                 window: &SprintWindow,
                 assignment: &SprintAssignment,
                 holiday_leave: &HolidayLeaveFeed,
    ) -> AssignmentGrid {
        let days: Vec<NaiveDate> = window.working_days().iter().collect();

        let mut developers = Vec::with_capacity(roster.len());
        let mut cells: HashMap<String, Row> = HashMap::new();
        for developer in roster {
            developers.push(developer.name.clone());
            let row = days.iter().map(|day| (*day, Vec::new())).collect();
            cells.insert(developer.name.clone(), row);
        }

        for holiday in &holiday_leave.holidays {
            let date = match parse_date(&holiday.date) {
                None => {
                    log::warn!("Ignoring holiday {:?} with an invalid date {:?}", holiday.holiday_name, holiday.date);
                    continue;
                },
                Some(date) => date,
            };
            for (name, row) in cells.iter_mut() {
                match row.get_mut(&date) {
                    None => {
                        log::debug!("Holiday {} on {} is not on a working day of {}", holiday.holiday_name, date, window);
                        break;
                    },
                    Some(cell) => cell.push(ScheduleEntry::holiday(name, date, &holiday.holiday_name)),
                }
            }
        }

        for leave in &holiday_leave.leaves {
            let date = match parse_date(&leave.date) {
                None => {
                    log::warn!("Ignoring leave of {} with an invalid date {:?}", leave.developer, leave.date);
                    continue;
                },
                Some(date) => date,
            };
            let row = match cells.get_mut(&leave.developer) {
                None => {
                    log::debug!("Ignoring leave of {}, who is not in the roster", leave.developer);
                    continue;
                },
                Some(row) => row,
            };
            match row.get_mut(&date) {
                None => log::debug!("Leave of {} on {} is not on a working day of {}", leave.developer, date, window),
                Some(cell) => cell.push(ScheduleEntry::leave(&leave.developer, date)),
            }
        }

        for (name, schedule) in assignment {
            let row = match cells.get_mut(name) {
                None => {
                    log::debug!("Ignoring tasks of {}, who is not in the roster", name);
                    continue;
                },
                Some(row) => row,
            };
            for (raw_date, slots) in schedule {
                let date = match parse_date(raw_date) {
                    None => {
                        log::warn!("Ignoring {} task(s) of {} with an invalid date {:?}", slots.len(), name, raw_date);
                        continue;
                    },
                    Some(date) => date,
                };
                match row.get_mut(&date) {
                    None => log::debug!("Tasks of {} on {} are not on a working day of {}", name, date, window),
                    Some(cell) => cell.extend(
                        slots.iter().map(|slot| ScheduleEntry::task(name, date, &slot.task, slot.points))
                    ),
                }
            }
        }

        self.assign_colors(&developers, &mut cells);

        log::debug!("Built a grid of {} rows and {} days for {}", developers.len(), days.len(), window);
        AssignmentGrid { developers, days, cells }
    }

    /// Colors tasks in the order they are displayed: row by row, then day by day.
    ///
    /// The palette is kept only if it colored the same labels in the same order,
    /// so a grid never depends on what the builder built before.
    fn assign_colors(&mut self, developers: &[String], cells: &mut HashMap<String, Row>) {
        let mut seen_rows = HashSet::new();
        let mut seen_labels = HashSet::new();
        let mut labels: Vec<&str> = Vec::new();
        for name in developers {
            if seen_rows.insert(name.as_str()) == false {
                continue;
            }
            if let Some(row) = cells.get(name) {
                for entry in row.values().flatten() {
                    if entry.kind().is_task() && seen_labels.insert(entry.label()) {
                        labels.push(entry.label());
                    }
                }
            }
        }
        self.palette.sync_vocabulary(&labels);

        let mut colored = HashSet::new();
        for name in developers {
            if colored.insert(name.as_str()) == false {
                continue;
            }
            let row = match cells.get_mut(name) {
                None => continue,
                Some(row) => row,
            };
            for entry in row.values_mut().flatten() {
                if entry.kind().is_task() {
                    let color = self.palette.color_for(entry.label());
                    entry.set_color(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryKind, Points};
    use crate::feed::{Holiday, Leave, TaskSlot};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn window() -> SprintWindow {
        SprintWindow::new(date("2025-04-07"), date("2025-04-11"))
    }

    #[test]
    fn duplicate_roster_names_share_a_row() {
        let roster = vec![Developer::new("Alice"), Developer::new("Bob"), Developer::new("Alice")];
        let feed = HolidayLeaveFeed {
            holidays: vec![Holiday{ date: "2025-04-08".into(), holiday_name: "Spring Day".into() }],
            leaves: Vec::new(),
        };
        let grid = GridBuilder::new().build(&roster, &window(), &SprintAssignment::new(), &feed);

        assert_eq!(grid.developers(), &["Alice".to_string(), "Bob".to_string(), "Alice".to_string()]);
        // The holiday is not inserted twice in the shared row
        assert_eq!(grid.cell("Alice", date("2025-04-08")).len(), 1);
        assert_eq!(grid.entries().count(), 2);
    }

    #[test]
    fn entries_outside_working_days_are_dropped() {
        let roster = vec![Developer::new("Alice")];
        let mut schedule = HashMap::new();
        schedule.insert("2025-04-12".to_string(), vec![TaskSlot::new("Saturday work", 1.0)]);
        schedule.insert("2025-04-14".to_string(), vec![TaskSlot::new("Next sprint", 1.0)]);
        schedule.insert("2025-04-09".to_string(), vec![TaskSlot::new("Kept", 1.0)]);
        let mut assignment = SprintAssignment::new();
        assignment.insert("Alice".to_string(), schedule);
        let feed = HolidayLeaveFeed {
            holidays: vec![Holiday{ date: "2025-04-13".into(), holiday_name: "Sunday".into() }],
            leaves: vec![Leave{ date: "2025-04-21".into(), developer: "Alice".into() }],
        };

        let grid = GridBuilder::new().build(&roster, &window(), &assignment, &feed);
        let labels: Vec<&str> = grid.entries().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Kept"]);
    }

    #[test]
    fn leaves_of_unknown_developers_are_dropped() {
        let roster = vec![Developer::new("Alice")];
        let feed = HolidayLeaveFeed {
            holidays: Vec::new(),
            leaves: vec![Leave{ date: "2025-04-08".into(), developer: "Mallory".into() }],
        };
        let grid = GridBuilder::new().build(&roster, &window(), &SprintAssignment::new(), &feed);
        assert!(grid.has_row("Mallory") == false);
        assert_eq!(grid.entries().count(), 0);
    }

    #[test]
    fn tasks_keep_optimizer_order() {
        let roster = vec![Developer::new("Alice")];
        let mut schedule = HashMap::new();
        schedule.insert("2025-04-07".to_string(), vec![TaskSlot::new("B", 5.0), TaskSlot::new("A", 1.0)]);
        let mut assignment = SprintAssignment::new();
        assignment.insert("Alice".to_string(), schedule);
        let feed = HolidayLeaveFeed {
            holidays: Vec::new(),
            leaves: vec![Leave{ date: "2025-04-07".into(), developer: "Alice".into() }],
        };

        let grid = GridBuilder::new().build(&roster, &window(), &assignment, &feed);
        let cell = grid.cell("Alice", date("2025-04-07"));
        assert_eq!(cell.len(), 3);
        assert_eq!(cell[0].kind(), &EntryKind::Leave);
        assert_eq!(cell[1].label(), "B");
        assert_eq!(cell[1].points(), Points::Estimated(5.0));
        assert_eq!(cell[2].label(), "A");
    }

    #[test]
    fn colors_follow_display_order() {
        let roster = vec![Developer::new("Bob"), Developer::new("Alice")];
        let mut bob = HashMap::new();
        bob.insert("2025-04-09".to_string(), vec![TaskSlot::new("first", 1.0)]);
        let mut alice = HashMap::new();
        alice.insert("2025-04-07".to_string(), vec![TaskSlot::new("second", 1.0)]);
        let mut assignment = SprintAssignment::new();
        assignment.insert("Alice".to_string(), alice);
        assignment.insert("Bob".to_string(), bob);

        let mut builder = GridBuilder::new();
        let grid = builder.build(&roster, &window(), &assignment, &HolidayLeaveFeed::default());

        let mut reference = TaskPalette::default();
        let first = reference.color_for("first");
        let second = reference.color_for("second");
        assert_eq!(grid.cell("Bob", date("2025-04-09"))[0].color(), Some(&first));
        assert_eq!(grid.cell("Alice", date("2025-04-07"))[0].color(), Some(&second));
    }

    #[test]
    fn continuation_needs_an_earlier_day() {
        let roster = vec![Developer::new("Alice")];
        let mut schedule = HashMap::new();
        schedule.insert("2025-04-08".to_string(), vec![TaskSlot::new("T", 1.0)]);
        let mut assignment = SprintAssignment::new();
        assignment.insert("Alice".to_string(), schedule);

        let grid = GridBuilder::new().build(&roster, &window(), &assignment, &HolidayLeaveFeed::default());
        assert!(grid.is_continuation("Alice", date("2025-04-08"), "T") == false);
        assert!(grid.is_continuation("Alice", date("2025-04-09"), "T"));
        assert!(grid.is_continuation("Bob", date("2025-04-09"), "T") == false);
    }

    #[test]
    fn colors_do_not_depend_on_previous_builds() {
        let mut alice = HashMap::new();
        alice.insert("2025-04-07".to_string(), vec![TaskSlot::new("X", 1.0)]);
        let mut bob = HashMap::new();
        bob.insert("2025-04-07".to_string(), vec![TaskSlot::new("Y", 1.0)]);
        let mut assignment = SprintAssignment::new();
        assignment.insert("Alice".to_string(), alice);
        assignment.insert("Bob".to_string(), bob);

        let alice_first = vec![Developer::new("Alice"), Developer::new("Bob")];
        let bob_first = vec![Developer::new("Bob"), Developer::new("Alice")];

        let mut builder = GridBuilder::new();
        builder.build(&alice_first, &window(), &assignment, &HolidayLeaveFeed::default());
        let after_history = builder.build(&bob_first, &window(), &assignment, &HolidayLeaveFeed::default());
        let fresh = GridBuilder::new().build(&bob_first, &window(), &assignment, &HolidayLeaveFeed::default());

        assert_eq!(after_history, fresh);
        let first_swatch = TaskPalette::default().color_for("anything");
        assert_eq!(after_history.cell("Bob", date("2025-04-07"))[0].color(), Some(&first_swatch));
    }
}
