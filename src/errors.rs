use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config not loaded yet")]
    ConfigMissing,
    #[error("missing {0} setting")]
    MissingSetting(&'static str),
    #[error("{date} is not a Monday")]
    NotMonday { date: NaiveDate },
    #[error("unknown car {car_id}")]
    UnknownCar { car_id: String },
    #[error("trip already logged for {car_id} on {date}")]
    TripExists { car_id: String, date: NaiveDate },
    #[error("api error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::TripExists { .. })
    }
}
