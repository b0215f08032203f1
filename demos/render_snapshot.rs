//! This is an example of how sprint-grid can render a sprint without any planning service
//!
//! It loads a snapshot from a JSON file (the format the cache uses) if one is given on the command line,
//! or builds a small one in code otherwise.

use std::collections::HashMap;
use std::path::Path;

use sprint_grid::cache::Snapshot;
use sprint_grid::feed::{Developer, Holiday, Leave, SprintWindow, TaskSlot};
use sprint_grid::render::{self, GridView};
use sprint_grid::GridBuilder;

const HTML_OUTPUT: &str = "render_snapshot.html";


fn main() {
    env_logger::init();

    let snapshot = match std::env::args().nth(1) {
        Some(path) => match load_snapshot(Path::new(&path)) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                eprintln!("Unable to load {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => sample_snapshot(),
    };

    println!("---- Sprint {} -----", snapshot.window);
    let grid = snapshot.build_grid(&mut GridBuilder::new());
    let view = GridView::from_grid(&grid);
    render::text::print_grid(&view);

    println!();
    for summary in sprint_grid::workload::summarize(&grid, &snapshot.roster) {
        println!("{}: {} pts, {:?} load", summary.developer, summary.scheduled_points, summary.load);
    }

    match std::fs::write(HTML_OUTPUT, render::html::render(&view)) {
        Ok(()) => println!("\nThe HTML version has been written to {}", HTML_OUTPUT),
        Err(err) => log::error!("Unable to write {}: {}", HTML_OUTPUT, err),
    }
}

fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

fn sample_snapshot() -> Snapshot {
    let window = SprintWindow::parse("2025-04-07", "2025-04-18").unwrap();
    let mut snapshot = Snapshot::new(window);
    snapshot.roster = vec![
        Developer::new("Alice").with_capacity(20.0),
        Developer::new("Bob").with_capacity(14.0),
        Developer::new("Carol"),
    ];

    let plan = [
        ("Alice", "2025-04-07", "Implement OAuth2 login flow", 3.0),
        ("Alice", "2025-04-08", "Implement OAuth2 login flow", 2.0),
        ("Alice", "2025-04-09", "Code review", 1.0),
        ("Alice", "2025-04-10", "Implement OAuth2 login flow", 2.0),
        ("Bob", "2025-04-07", "Database migration", 5.0),
        ("Bob", "2025-04-14", "Fix flaky CI", 1.0),
        ("Carol", "2025-04-15", "Write release notes", 2.0),
    ];
    for (developer, day, task, points) in plan.iter() {
        snapshot.assignment.entry(developer.to_string())
            .or_insert_with(HashMap::new)
            .entry(day.to_string())
            .or_insert_with(Vec::new)
            .push(TaskSlot::new(*task, *points));
    }

    snapshot.holiday_leave.holidays.push(Holiday{ date: "2025-04-18".to_string(), holiday_name: "Good Friday".to_string() });
    snapshot.holiday_leave.leaves.push(Leave{ date: "2025-04-09".to_string(), developer: "Bob".to_string() });
    snapshot.holiday_leave.leaves.push(Leave{ date: "2025-04-10".to_string(), developer: "Bob".to_string() });
    snapshot
}
