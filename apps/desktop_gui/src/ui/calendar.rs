//! Month-grid math for the calendar view.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl CalendarMonth {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn label(&self) -> String {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        format!("{} {}", NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    }

    pub fn day_count(&self) -> u32 {
        let next = self.next();
        next.first_day()
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }

    /// Monday-first grid in whole weeks. Cells outside the month are `None`.
    pub fn grid(&self) -> Vec<Option<NaiveDate>> {
        let first = self.first_day();
        let leading = first.weekday().num_days_from_monday() as usize;
        let days = self.day_count();

        let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
        for day in 1..=days {
            cells.push(NaiveDate::from_ymd_opt(self.year, self.month, day));
        }
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn august_2026_starts_on_saturday_and_spans_six_weeks() {
        let month = CalendarMonth {
            year: 2026,
            month: 8,
        };
        let grid = month.grid();
        assert_eq!(grid.len(), 42);
        assert!(grid[..5].iter().all(Option::is_none));
        assert_eq!(grid[5], NaiveDate::from_ymd_opt(2026, 8, 1));
        assert_eq!(grid[35], NaiveDate::from_ymd_opt(2026, 8, 31));
        assert!(grid[36..].iter().all(Option::is_none));
    }

    #[test]
    fn february_leap_year_has_29_days() {
        let month = CalendarMonth {
            year: 2024,
            month: 2,
        };
        assert_eq!(month.day_count(), 29);
    }

    #[test]
    fn prev_and_next_wrap_across_year_boundaries() {
        let jan = CalendarMonth {
            year: 2026,
            month: 1,
        };
        assert_eq!(
            jan.prev(),
            CalendarMonth {
                year: 2025,
                month: 12
            }
        );
        assert_eq!(
            jan.prev().next(),
            jan
        );
        let dec = CalendarMonth {
            year: 2026,
            month: 12,
        };
        assert_eq!(
            dec.next(),
            CalendarMonth {
                year: 2027,
                month: 1
            }
        );
    }

    #[test]
    fn label_renders_month_name_and_year() {
        let month = CalendarMonth {
            year: 2026,
            month: 8,
        };
        assert_eq!(month.label(), "August 2026");
    }
}
