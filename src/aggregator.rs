use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::Trip;
use crate::week::Week;
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedTrip {
    pub date: NaiveDate,
    pub car_id: String,
    pub trip: Trip,
}

/// A week's logged trips grouped by day. Every weekday is present; a
/// day nobody logged simply has an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekTrips {
    by_day: BTreeMap<NaiveDate, Vec<LoggedTrip>>,
}

impl WeekTrips {
    pub fn new(week: &Week) -> Self {
        Self {
            by_day: week.weekdays().map(|date| (date, Vec::new())).collect(),
        }
    }

    pub fn insert(&mut self, logged: LoggedTrip) {
        self.by_day.entry(logged.date).or_default().push(logged);
    }

    pub fn for_day(&self, date: NaiveDate) -> &[LoggedTrip] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[LoggedTrip])> {
        self.by_day.iter().map(|(date, trips)| (*date, trips.as_slice()))
    }

    pub fn logged(&self) -> impl Iterator<Item = &LoggedTrip> {
        self.by_day.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.logged().next().is_none()
    }
}

/// Fans out one fetch per (car, weekday) and waits for all of them.
/// Each result stays keyed by its (car, date), so attribution never
/// depends on completion order. Any failure other than "not logged"
/// fails the whole week.
pub async fn aggregate_week(
    client: &ApiClient,
    week: &Week,
    car_ids: &[String],
) -> Result<WeekTrips, AppError> {
    let mut fetches = Vec::with_capacity(car_ids.len() * 5);
    for date in week.weekdays() {
        for car_id in car_ids {
            fetches.push(async move {
                let result = client.get_trip(car_id, date).await;
                (car_id, date, result)
            });
        }
    }

    let mut trips = WeekTrips::new(week);
    let mut logged = 0usize;
    for (car_id, date, result) in join_all(fetches).await {
        if let Some(trip) = result? {
            trips.insert(LoggedTrip {
                date,
                car_id: car_id.clone(),
                trip,
            });
            logged += 1;
        }
    }

    info!(week = %week.label(), logged, "week aggregated");
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week() -> Week {
        Week::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()).unwrap()
    }

    #[test]
    fn empty_week_still_lists_every_day() {
        let trips = WeekTrips::new(&week());
        assert!(trips.is_empty());
        assert_eq!(trips.days().count(), 5);
        for (_, day_trips) in trips.days() {
            assert!(day_trips.is_empty());
        }
    }

    #[test]
    fn inserted_trips_group_by_day() {
        let mut trips = WeekTrips::new(&week());
        let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        trips.insert(LoggedTrip {
            date: monday,
            car_id: "COBALT".into(),
            trip: Trip::default(),
        });
        trips.insert(LoggedTrip {
            date: monday,
            car_id: "HRV".into(),
            trip: Trip::default(),
        });

        assert_eq!(trips.for_day(monday).len(), 2);
        assert_eq!(trips.logged().count(), 2);
        assert!(!trips.is_empty());
    }
}
