//! Error types for mechshop

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShopError>;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD or MM/DD/YYYY)")]
    InvalidDate(String),

    #[error("'{0}' is not a unique VIN")]
    DuplicateVin(String),

    #[error("Customer {0} does not exist")]
    CustomerNotFound(i64),

    #[error("Car {vin} is not owned by customer {customer_id}")]
    CarNotOwned { customer_id: i64, vin: String },

    #[error("Service request {0} does not exist")]
    RequestNotFound(i64),

    #[error("Mechanic {0} does not exist")]
    MechanicNotFound(i64),

    #[error("Service request {0} has already been closed")]
    RequestAlreadyClosed(i64),

    #[error("Closing date {closed} must be after the request date {opened}")]
    InvalidClosingDate { opened: String, closed: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("End of input")]
    EndOfInput,
}

impl ShopError {
    /// True for errors caused by user input rather than the database or filesystem.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ShopError::Sql(_)
                | ShopError::Io(_)
                | ShopError::Json(_)
                | ShopError::Csv(_)
                | ShopError::EndOfInput
        )
    }
}
