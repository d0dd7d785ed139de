pub mod aggregator;
pub mod api;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod session;
pub mod statement;
pub mod week;

pub use aggregator::{LoggedTrip, WeekTrips, aggregate_week};
pub use api::ApiClient;
pub use errors::AppError;
pub use ledger::{Ledger, MonthlyFee};
pub use models::{Car, Config, Person, Trip, guest_id, guest_label, is_guest, slug};
pub use session::Session;
pub use statement::build_statement;
pub use week::Week;
