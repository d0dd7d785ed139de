use crate::errors::AppError;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// A Mon-Fri span identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    pub fn new(monday: NaiveDate) -> Result<Self, AppError> {
        if monday.weekday() != Weekday::Mon {
            return Err(AppError::NotMonday { date: monday });
        }
        Ok(Self { monday })
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Snaps any date back to its week's Monday (weekends snap backwards).
    pub fn containing(date: NaiveDate) -> Self {
        let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        Self { monday }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn friday(&self) -> NaiveDate {
        self.monday + Duration::days(4)
    }

    pub fn weekdays(&self) -> impl Iterator<Item = NaiveDate> {
        let monday = self.monday;
        (0..5).map(move |offset| monday + Duration::days(offset as i64))
    }

    pub fn label(&self) -> String {
        format!("{} - {}", br_date(self.monday), br_date(self.friday()))
    }

    pub fn contains_day_of_month(&self, day: u32) -> bool {
        self.weekdays().any(|date| date.day() == day)
    }
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn br_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Seg",
        Weekday::Tue => "Ter",
        Weekday::Wed => "Qua",
        Weekday::Thu => "Qui",
        Weekday::Fri => "Sex",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_non_mondays() {
        assert!(Week::new(date(2025, 9, 1)).is_ok());
        assert!(matches!(
            Week::new(date(2025, 9, 3)),
            Err(AppError::NotMonday { .. })
        ));
    }

    #[test]
    fn containing_snaps_back_to_monday() {
        let week = Week::containing(date(2025, 9, 4));
        assert_eq!(week.monday(), date(2025, 9, 1));
        // Sunday belongs to the week that started the previous Monday.
        assert_eq!(Week::containing(date(2025, 9, 7)).monday(), date(2025, 9, 1));
        assert_eq!(Week::containing(date(2025, 9, 1)).monday(), date(2025, 9, 1));
    }

    #[test]
    fn weekdays_are_monday_through_friday() {
        let week = Week::new(date(2025, 9, 1)).unwrap();
        let days: Vec<NaiveDate> = week.weekdays().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], date(2025, 9, 1));
        assert_eq!(days[4], date(2025, 9, 5));
        assert_eq!(week.friday(), date(2025, 9, 5));
    }

    #[test]
    fn label_uses_display_dates() {
        let week = Week::new(date(2025, 9, 1)).unwrap();
        assert_eq!(week.label(), "01/09/2025 - 05/09/2025");
    }

    #[test]
    fn contains_day_of_month_checks_the_five_weekdays() {
        let week = Week::new(date(2025, 9, 1)).unwrap();
        assert!(week.contains_day_of_month(1));
        assert!(week.contains_day_of_month(5));
        assert!(!week.contains_day_of_month(6));
    }

    #[test]
    fn current_week_starts_on_a_monday() {
        assert_eq!(Week::current().monday().weekday(), Weekday::Mon);
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(weekday_short(date(2025, 9, 1)), "Seg");
        assert_eq!(weekday_short(date(2025, 9, 5)), "Sex");
        assert_eq!(weekday_short(date(2025, 9, 6)), "Sáb");
    }

    #[test]
    fn date_formats() {
        assert_eq!(iso_date(date(2025, 9, 1)), "2025-09-01");
        assert_eq!(br_date(date(2025, 9, 1)), "01/09/2025");
    }
}
