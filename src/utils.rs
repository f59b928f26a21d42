//! Some utility functions

use std::fmt::Write;

use crate::calendar::WEEKDAYS;
use crate::calendar::day_view::DaySchedule;
use crate::calendar::grid::CalendarState;

const CELL_WIDTH: usize = 11;

/// Render a month grid as text, one line of day numbers and one line of event counts per week
pub fn render_grid(state: &CalendarState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", state.month_name(), state.year());

    for wd in WEEKDAYS.iter() {
        let _ = write!(out, "{:<width$}", wd.to_string(), width = CELL_WIDTH);
    }
    out.push('\n');

    for week in state.weeks() {
        for cell in week.iter() {
            let _ = write!(out, "{:<width$}", cell.day.label(), width = CELL_WIDTH);
        }
        out.push('\n');
        for cell in week.iter() {
            let _ = write!(out, "{:<width$}", cell.count_label(), width = CELL_WIDTH);
        }
        out.push('\n');
    }
    out
}

/// Render a day view as text. Hours without events are skipped, unless `all_rows` is set
pub fn render_day(schedule: &DaySchedule, all_rows: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", schedule.title());

    for row in schedule.rows() {
        if row.events.is_empty() {
            if all_rows {
                let _ = writeln!(out, "{:>8}", row.label);
            }
            continue;
        }
        for event in &row.events {
            let _ = writeln!(out, "{:>8}  {}", row.label, event.cell_label());
        }
    }
    out
}

/// A debug utility that pretty-prints a month grid
pub fn print_grid(state: &CalendarState) {
    print!("{}", render_grid(state));
}

/// A debug utility that pretty-prints a day view
pub fn print_day(schedule: &DaySchedule) {
    print!("{}", render_day(schedule, false));
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::store::MockStore;
    use crate::calendar::CalendarDay;
    use crate::event::NewEvent;

    #[tokio::test]
    async fn rendering() {
        let scheduler = Scheduler::new(MockStore::new());
        let day = CalendarDay::new(2021, 3, 10, chrono::Weekday::Wed);
        let event = NewEvent::from_selection("Dentist", ("07", "05", "PM"), ("08", "00", "PM")).unwrap();
        scheduler.add_event(&day, event).await.unwrap();

        let grid = render_grid(&scheduler.get_grid(2021, 3).await.unwrap());
        assert!(grid.starts_with("March 2021\nMon"));
        assert!(grid.contains("1 event"));

        let text = render_day(&scheduler.day_view(&day).await, false);
        assert_eq!(text, "Wed. March 10, 2021\n 7:00 PM  07:05 PM Dentist\n");
        assert_eq!(render_day(&scheduler.day_view(&day).await, true).lines().count(), 25);
    }
}
