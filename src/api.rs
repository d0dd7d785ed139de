use crate::errors::AppError;
use crate::models::{Config, Trip};
use crate::week::iso_date;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use tracing::{debug, info};

pub const ACCESS_KEY_HEADER: &str = "x-access-key";

const API_URL_VAR: &str = "CARPOOL_API_URL";
const ACCESS_KEY_VAR: &str = "CARPOOL_ACCESS_KEY";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, access_key: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let access_key = access_key.trim().to_string();
        if base_url.is_empty() {
            return Err(AppError::MissingSetting("api url"));
        }
        if access_key.is_empty() {
            return Err(AppError::MissingSetting("access key"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_key,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var(API_URL_VAR).unwrap_or_default();
        let access_key = env::var(ACCESS_KEY_VAR).unwrap_or_default();
        Self::new(&base_url, &access_key)
    }

    pub async fn get_config(&self) -> Result<Config, AppError> {
        info!("fetching config");
        let response = self
            .client
            .get(format!("{}/config", self.base_url))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .send()
            .await?;
        parse_json(response).await
    }

    /// A missing trip is "not logged", not an error; anything else
    /// non-2xx surfaces verbatim.
    pub async fn get_trip(
        &self,
        car_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Trip>, AppError> {
        debug!(car_id, date = %date, "fetching trip");
        let response = self
            .client
            .get(self.trip_url(car_id, date))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        match parse_json(response).await {
            Ok(trip) => Ok(Some(trip)),
            Err(AppError::Api { message, .. }) if message.contains("trip_not_found") => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Without `overwrite` the backend rejects an existing key; that
    /// conflict comes back as `TripExists` so the caller can confirm
    /// and retry with `overwrite = true`.
    pub async fn put_trip(
        &self,
        car_id: &str,
        date: NaiveDate,
        trip: &Trip,
        overwrite: bool,
    ) -> Result<(), AppError> {
        info!(car_id, date = %date, overwrite, "saving trip");
        let url = format!(
            "{}?overwrite={}",
            self.trip_url(car_id, date),
            overwrite as u8
        );
        let response = self
            .client
            .put(url)
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .json(trip)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = error_message(response).await;
        if status == StatusCode::CONFLICT || message.contains("trip_exists") {
            return Err(AppError::TripExists {
                car_id: car_id.to_string(),
                date,
            });
        }
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn trip_url(&self, car_id: &str, date: NaiveDate) -> String {
        format!("{}/trip/{}/{}", self.base_url, car_id, iso_date(date))
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(AppError::Api {
        status: status.as_u16(),
        message: error_message(response).await,
    })
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => body
            .message
            .or(body.error)
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    }
}
