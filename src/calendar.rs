//! Month calendar view of tasks
//!
//! A month is shown as six full weeks (42 days) starting on the Sunday on or
//! before the 1st, with each day listing the tasks due on it.

use crate::api::Task;
use crate::chat::classifier::MONTH_NAMES;
use crate::error::{Result, TaskmateError};
use chrono::{Datelike, Duration, NaiveDate};
use colored::Colorize;

/// Number of cells in a month grid
pub const GRID_DAYS: usize = 42;

const WEEK_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 6;

/// One cell of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub tasks: Vec<Task>,
}

/// Six-week grid for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// First day of `month` in `year`
///
/// # Errors
///
/// Returns `TaskmateError::Validation` for a month outside 1..=12 or an
/// out-of-range year
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TaskmateError::Validation(format!("Invalid month/year: {}/{}", month, year)).into()
    })
}

/// Tasks whose due date falls on `date`
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    let key = date.format("%Y-%m-%d").to_string();
    tasks.iter().filter(|t| t.due_day() == key).collect()
}

/// Build the grid for `month`/`year`, placing `tasks` on their due days
pub fn month_grid(year: i32, month: u32, tasks: &[Task], today: NaiveDate) -> Result<MonthGrid> {
    let first = first_of_month(year, month)?;
    let start = first
        .checked_sub_signed(Duration::days(i64::from(
            first.weekday().num_days_from_sunday(),
        )))
        .ok_or_else(|| out_of_range(year, month))?;

    let days = (0..GRID_DAYS as i64)
        .map(|offset| -> Result<CalendarDay> {
            let date = start
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(|| out_of_range(year, month))?;
            Ok(CalendarDay {
                date,
                in_month: date.month() == month && date.year() == year,
                is_today: date == today,
                tasks: tasks_on(tasks, date).into_iter().cloned().collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MonthGrid { year, month, days })
}

fn out_of_range(year: i32, month: u32) -> anyhow::Error {
    TaskmateError::Validation(format!(
        "Calendar for {}/{} falls outside the supported date range",
        month, year
    ))
    .into()
}

impl MonthGrid {
    /// `"September 2025"`
    pub fn title(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        format!("{} {}", name, self.year)
    }

    /// Total tasks due within the month itself
    pub fn tasks_in_month(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.in_month)
            .map(|d| d.tasks.len())
            .sum()
    }

    /// Render the grid for the terminal
    ///
    /// Days with tasks show a `+N` count. Days outside the month are dimmed
    /// and today is highlighted.
    pub fn paint(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title().bold()));
        for name in WEEK_DAYS {
            out.push_str(&format!("{:<width$}", name, width = CELL_WIDTH));
        }
        out.push('\n');

        for week in self.days.chunks(7) {
            for day in week {
                let marker = if day.tasks.is_empty() {
                    String::new()
                } else {
                    format!("+{}", day.tasks.len())
                };
                let cell = format!(
                    "{:<width$}",
                    format!("{:>2}{}", day.date.day(), marker),
                    width = CELL_WIDTH
                );
                let cell = if day.is_today {
                    cell.bold().to_string()
                } else if !day.in_month {
                    cell.dimmed().to_string()
                } else if !day.tasks.is_empty() {
                    cell.cyan().to_string()
                } else {
                    cell
                };
                out.push_str(&cell);
            }
            out.push('\n');
        }
        out
    }
}
