//! Sunday-first week window around a reference date

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Display metadata for one column of the week grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// "YYYY-MM-DD", the key tasks are stored under
    pub formatted_date: String,
    pub day_name: String,
    pub day_number: u32,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct CalendarWeek {
    current_date: NaiveDate,
    selected_date: NaiveDate,
}

/// First day (Sunday) of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = date.weekday().num_days_from_sunday();
    date - Duration::days(days_from_sunday as i64)
}

/// "MM/DD Wed"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d %a").to_string()
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month() && date.day() == today.day()
}

/// Hour labels for the grid rows, "00:00" through "23:00"
pub fn time_periods() -> Vec<String> {
    (0..24).map(|hour| format!("{:02}:00", hour)).collect()
}

impl CalendarWeek {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_date: today,
            selected_date: today,
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn week_start_date(&self) -> NaiveDate {
        week_start(self.current_date)
    }

    pub fn week_end_date(&self) -> NaiveDate {
        self.week_start_date() + Duration::days(6)
    }

    /// Sunday 00:00:00.000
    pub fn week_start(&self) -> NaiveDateTime {
        self.week_start_date().and_time(NaiveTime::MIN)
    }

    /// Saturday 23:59:59.999
    pub fn week_end(&self) -> NaiveDateTime {
        (self.week_end_date() + Duration::days(1)).and_time(NaiveTime::MIN)
            - Duration::milliseconds(1)
    }

    pub fn week_days(&self) -> Vec<CalendarDay> {
        self.week_days_on(Local::now().date_naive())
    }

    pub fn week_days_on(&self, today: NaiveDate) -> Vec<CalendarDay> {
        let start = self.week_start_date();
        (0..7)
            .map(|i| {
                let date = start + Duration::days(i);
                CalendarDay {
                    date,
                    formatted_date: date.format("%Y-%m-%d").to_string(),
                    day_name: date.format("%a").to_string(),
                    day_number: date.day(),
                    is_today: is_today(date, today),
                    is_selected: date == self.selected_date,
                }
            })
            .collect()
    }

    pub fn is_current_week(&self) -> bool {
        self.is_current_week_at(Local::now().naive_local())
    }

    pub fn is_current_week_at(&self, now: NaiveDateTime) -> bool {
        self.week_start() <= now && now <= self.week_end()
    }

    /// "MM/DD - MM/DD"
    pub fn week_range_text(&self) -> String {
        format!(
            "{} - {}",
            self.week_start_date().format("%m/%d"),
            self.week_end_date().format("%m/%d")
        )
    }

    /// "February 2025"
    pub fn month_year_text(&self) -> String {
        self.current_date.format("%B %Y").to_string()
    }

    pub fn go_to_today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    pub fn go_to(&mut self, today: NaiveDate) {
        self.current_date = today;
        self.selected_date = today;
    }

    pub fn go_to_previous_week(&mut self) {
        self.shift(-7);
    }

    pub fn go_to_next_week(&mut self) {
        self.shift(7);
    }

    fn shift(&mut self, days: i64) {
        self.current_date = self.current_date + Duration::days(days);
        self.selected_date = self.selected_date + Duration::days(days);
    }

    /// Select a "YYYY-MM-DD" date without moving the week. Returns false for unparsable input.
    pub fn select_date(&mut self, date: &str) -> bool {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(date) => {
                self.selected_date = date;
                true
            }
            Err(_) => {
                log::warn!("Ignoring unparsable date selection {:?}", date);
                false
            }
        }
    }
}

impl Default for CalendarWeek {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        // Wednesday
        let week = CalendarWeek::new(ymd(2025, 2, 26));
        let days = week.week_days_on(ymd(2025, 2, 26));

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date.weekday(), Weekday::Sun);
        assert_eq!(days[0].formatted_date, "2025-02-23");
        assert_eq!(days[6].formatted_date, "2025-03-01");
        assert_eq!(days[3].day_name, "Wed");
        assert_eq!(days[3].day_number, 26);
        assert!(days[3].is_today && days[3].is_selected);
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn sunday_is_its_own_week_start() {
        assert_eq!(week_start(ymd(2025, 3, 2)), ymd(2025, 3, 2));
        assert_eq!(week_start(ymd(2025, 3, 1)), ymd(2025, 2, 23));
    }

    #[test]
    fn today_flag_only_in_the_real_week() {
        let week = CalendarWeek::new(ymd(2025, 2, 26));
        let days = week.week_days_on(ymd(2025, 3, 10));
        assert!(days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn window_bounds() {
        let week = CalendarWeek::new(ymd(2025, 2, 26));
        assert_eq!(week.week_start(), ymd(2025, 2, 23).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            week.week_end(),
            ymd(2025, 3, 1).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );

        assert!(week.is_current_week_at(ymd(2025, 2, 23).and_hms_opt(0, 0, 0).unwrap()));
        assert!(week.is_current_week_at(ymd(2025, 3, 1).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!week.is_current_week_at(ymd(2025, 3, 2).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn navigation_moves_exactly_one_week() {
        let mut week = CalendarWeek::new(ymd(2025, 2, 26));
        week.go_to_next_week();
        assert_eq!(week.current_date(), ymd(2025, 3, 5));
        assert_eq!(week.selected_date(), ymd(2025, 3, 5));
        assert_eq!(week.week_range_text(), "03/02 - 03/08");

        week.go_to_previous_week();
        week.go_to_previous_week();
        assert_eq!(week.week_range_text(), "02/16 - 02/22");

        week.go_to(ymd(2025, 2, 26));
        assert_eq!(week.week_range_text(), "02/23 - 03/01");
    }

    #[test]
    fn year_boundary_range_text() {
        let week = CalendarWeek::new(ymd(2025, 1, 1));
        assert_eq!(week.week_range_text(), "12/29 - 01/04");
        assert_eq!(week.month_year_text(), "January 2025");
    }

    #[test]
    fn selecting_a_date_keeps_the_week() {
        let mut week = CalendarWeek::new(ymd(2025, 2, 26));
        assert!(week.select_date("2025-02-28"));
        assert_eq!(week.selected_date(), ymd(2025, 2, 28));
        assert_eq!(week.current_date(), ymd(2025, 2, 26));

        let days = week.week_days_on(ymd(2025, 2, 26));
        assert!(days[5].is_selected);
        assert!(!days[3].is_selected);

        assert!(!week.select_date("28/02/2025"));
        assert_eq!(week.selected_date(), ymd(2025, 2, 28));
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(format_date(ymd(2025, 2, 26)), "02/26 Wed");
        assert!(is_today(ymd(2025, 2, 26), ymd(2025, 2, 26)));
        assert!(!is_today(ymd(2024, 2, 26), ymd(2025, 2, 26)));

        let periods = time_periods();
        assert_eq!(periods.len(), 24);
        assert_eq!(periods[0], "00:00");
        assert_eq!(periods[23], "23:00");
    }
}
