use crate::aggregator::{WeekTrips, aggregate_week};
use crate::api::ApiClient;
use crate::errors::AppError;
use crate::ledger::MonthlyFee;
use crate::models::{Config, Trip};
use crate::statement::build_statement;
use crate::week::Week;
use chrono::NaiveDate;
use tracing::info;

/// Caller-facing facade: one client plus the config loaded once per
/// session and treated as immutable afterwards.
pub struct Session {
    client: ApiClient,
    config: Option<Config>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            config: None,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(ApiClient::from_env()?))
    }

    pub async fn load_config(&mut self) -> Result<&Config, AppError> {
        let config = self.client.get_config().await?;
        info!(
            people = config.people.len(),
            cars = config.cars.len(),
            "config loaded"
        );
        Ok(self.config.insert(config))
    }

    pub fn config(&self) -> Result<&Config, AppError> {
        self.config.as_ref().ok_or(AppError::ConfigMissing)
    }

    pub async fn week_trips(&self, week: &Week) -> Result<WeekTrips, AppError> {
        let car_ids = self.config()?.car_ids();
        aggregate_week(&self.client, week, &car_ids).await
    }

    pub fn statement(
        &self,
        week: &Week,
        trips: &WeekTrips,
        fee: Option<&MonthlyFee>,
    ) -> Result<String, AppError> {
        Ok(build_statement(week, trips, self.config()?, fee))
    }

    pub async fn log_trip(
        &self,
        car_id: &str,
        date: NaiveDate,
        trip: &Trip,
        overwrite: bool,
    ) -> Result<(), AppError> {
        if self.config()?.car(car_id).is_none() {
            return Err(AppError::UnknownCar {
                car_id: car_id.to_string(),
            });
        }
        self.client.put_trip(car_id, date, trip, overwrite).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_required_before_use() {
        let session = Session::new(ApiClient::new("http://localhost:1", "key").unwrap());
        assert!(matches!(session.config(), Err(AppError::ConfigMissing)));
    }
}
