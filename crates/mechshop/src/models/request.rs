use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub rid: i64,
    pub customer_id: i64,
    pub car_vin: String,
    pub date: NaiveDate,
    pub odometer: i64,
    pub complain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewServiceRequest {
    pub customer_id: i64,
    pub car_vin: String,
    pub date: NaiveDate,
    pub odometer: i64,
    pub complain: String,
}

/// A service request that has not been closed, paired with the mechanic
/// who is about to close it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenRequest {
    pub rid: i64,
    pub opened: NaiveDate,
    pub mid: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRequest {
    pub rid: i64,
    pub mid: i64,
    pub date: NaiveDate,
    pub comment: String,
    pub bill: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRequest {
    pub wid: i64,
    pub rid: i64,
    pub mid: i64,
    pub date: NaiveDate,
    pub comment: String,
    pub bill: i64,
}
