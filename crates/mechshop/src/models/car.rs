use serde::{Deserialize, Serialize};

/// Oldest model year the shop accepts.
pub const MIN_CAR_YEAR: i64 = 1970;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

/// A car together with the ownership record linking it to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCar {
    pub ownership_id: i64,
    pub customer_id: i64,
    pub car: Car,
}

impl OwnedCar {
    pub fn label(&self) -> String {
        format!(
            "VIN: {} ({} {} {})",
            self.car.vin.trim(),
            self.car.year,
            self.car.make.trim(),
            self.car.model.trim()
        )
    }
}
