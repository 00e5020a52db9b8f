//! Canned reports over the shop database.

use crate::db::{QueryResult, ShopDb};
use crate::error::{Result, ShopError};
use clap::ValueEnum;
use crate::shop::require_positive;
use rusqlite::params;

/// The canned reports offered by the menu and the `report` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Report {
    /// Closed requests billed under a threshold (default 100)
    BillsUnder,
    /// Customers owning more than N cars (default 20)
    ManyCars,
    /// Cars built before 1995 serviced with under 50000 miles
    OldLowMileage,
    /// The K cars with the most service requests (default 10)
    MostServiced,
    /// Customers by descending total bill (default top 10)
    TotalBill,
}

/// What a report's single numeric argument means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportParam {
    Threshold,
    Limit,
    None,
}

pub const DEFAULT_BILL_THRESHOLD: i64 = 100;
pub const DEFAULT_CAR_THRESHOLD: i64 = 20;
pub const DEFAULT_LIMIT: i64 = 10;
pub const OLD_CAR_YEAR: i64 = 1995;
pub const LOW_MILEAGE: i64 = 50_000;

impl Report {
    pub fn title(self) -> &'static str {
        match self {
            Report::BillsUnder => "Customers with bill less than 100",
            Report::ManyCars => "Customers with more than 20 cars",
            Report::OldLowMileage => "Cars before 1995 with under 50000 miles",
            Report::MostServiced => "Cars with the most services",
            Report::TotalBill => "Customers by total bill",
        }
    }

    pub fn param(self) -> ReportParam {
        match self {
            Report::BillsUnder | Report::ManyCars => ReportParam::Threshold,
            Report::MostServiced | Report::TotalBill => ReportParam::Limit,
            Report::OldLowMileage => ReportParam::None,
        }
    }

    /// Picks the `--limit` or `--threshold` value this report takes, rejecting
    /// the one it doesn't.
    pub fn select_value(self, limit: Option<i64>, threshold: Option<i64>) -> Result<Option<i64>> {
        let name = self.to_possible_value().map(|v| v.get_name().to_string());
        let name = name.as_deref().unwrap_or("this report");
        match self.param() {
            ReportParam::Threshold if limit.is_some() => Err(ShopError::Validation(format!(
                "{} takes --threshold, not --limit",
                name
            ))),
            ReportParam::Limit if threshold.is_some() => Err(ShopError::Validation(format!(
                "{} takes --limit, not --threshold",
                name
            ))),
            ReportParam::None if limit.is_some() || threshold.is_some() => Err(
                ShopError::Validation(format!("{} takes no --limit or --threshold", name)),
            ),
            ReportParam::Threshold => Ok(threshold),
            ReportParam::Limit => Ok(limit),
            ReportParam::None => Ok(None),
        }
    }

    /// Runs the report. `value` overrides the report's threshold or limit.
    pub fn run(self, db: &ShopDb, value: Option<i64>) -> Result<QueryResult> {
        match self {
            Report::BillsUnder => {
                db.customers_with_bill_under(value.unwrap_or(DEFAULT_BILL_THRESHOLD))
            }
            Report::ManyCars => {
                db.customers_with_more_cars_than(value.unwrap_or(DEFAULT_CAR_THRESHOLD))
            }
            Report::OldLowMileage => db.old_cars_with_low_mileage(OLD_CAR_YEAR, LOW_MILEAGE),
            Report::MostServiced => db.most_serviced_cars(value.unwrap_or(DEFAULT_LIMIT)),
            Report::TotalBill => db.customers_by_total_bill(value.unwrap_or(DEFAULT_LIMIT)),
        }
    }
}

impl ShopDb {
    /// Closed requests with `bill < threshold`, with the customer who opened them.
    pub fn customers_with_bill_under(&self, threshold: i64) -> Result<QueryResult> {
        require_positive("threshold", threshold)?;
        self.query(
            "SELECT cr.date, cr.bill, cr.comment, c.fname, c.lname
             FROM Closed_Request cr
             JOIN Service_Request sr ON sr.rid = cr.rid
             JOIN Customer c ON c.id = sr.customer_id
             WHERE cr.bill < ?1
             ORDER BY cr.date, cr.wid",
            params![threshold],
        )
    }

    /// Customers owning more than `threshold` cars.
    pub fn customers_with_more_cars_than(&self, threshold: i64) -> Result<QueryResult> {
        require_positive("threshold", threshold)?;
        self.query(
            "SELECT c.fname, c.lname
             FROM Customer c
             WHERE ?1 < (SELECT COUNT(o.customer_id) FROM Owns o WHERE o.customer_id = c.id)
             ORDER BY c.id",
            params![threshold],
        )
    }

    /// Cars built before `year` with a service request reading under `miles`.
    ///
    /// A car appears once per qualifying service request.
    pub fn old_cars_with_low_mileage(&self, year: i64, miles: i64) -> Result<QueryResult> {
        self.query(
            "SELECT c.make, c.model, c.year
             FROM Car c
             JOIN Service_Request sr ON sr.car_vin = c.vin
             WHERE c.year < ?1 AND sr.odometer < ?2
             ORDER BY c.year, c.make, c.model",
            params![year, miles],
        )
    }

    /// The `k` cars with the most service requests.
    pub fn most_serviced_cars(&self, k: i64) -> Result<QueryResult> {
        require_positive("number of cars", k)?;
        self.query(
            "SELECT c.make, c.model, c.year, sr.car_vin, COUNT(sr.car_vin) AS requests
             FROM Car c
             JOIN Service_Request sr ON sr.car_vin = c.vin
             GROUP BY c.make, c.model, c.year, sr.car_vin
             ORDER BY requests DESC, sr.car_vin
             LIMIT ?1",
            params![k],
        )
    }

    /// Customers ordered by the sum of their closed bills, top `limit`.
    pub fn customers_by_total_bill(&self, limit: i64) -> Result<QueryResult> {
        require_positive("limit", limit)?;
        self.query(
            "SELECT c.fname, c.lname, c.id AS c_id, SUM(cr.bill) AS total_bill
             FROM Customer c
             JOIN Service_Request sr ON sr.customer_id = c.id
             JOIN Closed_Request cr ON cr.rid = sr.rid
             GROUP BY c.fname, c.lname, c.id
             ORDER BY total_bill DESC, c.id
             LIMIT ?1",
            params![limit],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bills_under_rejects_non_positive_threshold() {
        let db = ShopDb::open_in_memory().unwrap();
        let result = Report::BillsUnder.run(&db, Some(0));
        assert!(matches!(result, Err(ShopError::Validation(_))));
        assert!(Report::BillsUnder.run(&db, Some(1)).unwrap().is_empty());
    }

    #[test]
    fn many_cars_rejects_non_positive_threshold() {
        let db = ShopDb::open_in_memory().unwrap();
        let result = Report::ManyCars.run(&db, Some(-5));
        assert!(matches!(result, Err(ShopError::Validation(_))));
        assert!(matches!(
            db.customers_with_more_cars_than(0),
            Err(ShopError::Validation(_))
        ));
    }

    #[test]
    fn select_value_matches_report_kind() {
        assert_eq!(Report::BillsUnder.select_value(None, Some(50)).unwrap(), Some(50));
        assert_eq!(Report::TotalBill.select_value(Some(3), None).unwrap(), Some(3));
        assert_eq!(Report::OldLowMileage.select_value(None, None).unwrap(), None);
    }

    #[test]
    fn select_value_rejects_wrong_flag() {
        assert!(matches!(
            Report::BillsUnder.select_value(Some(5), None),
            Err(ShopError::Validation(msg)) if msg.contains("bills-under takes --threshold")
        ));
        assert!(matches!(
            Report::MostServiced.select_value(None, Some(3)),
            Err(ShopError::Validation(_))
        ));
        assert!(matches!(
            Report::OldLowMileage.select_value(Some(1), None),
            Err(ShopError::Validation(_))
        ));
    }

    #[test]
    fn defaults_apply_without_value() {
        let db = ShopDb::open_in_memory().unwrap();
        for report in [
            Report::BillsUnder,
            Report::ManyCars,
            Report::OldLowMileage,
            Report::MostServiced,
            Report::TotalBill,
        ] {
            assert!(report.run(&db, None).unwrap().is_empty());
        }
    }
}
