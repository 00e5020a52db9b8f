//! # mechshop
//!
//! A menu-driven front end for a mechanic shop database.
//!
//! The shop keeps customers, mechanics and cars, links cars to their owners,
//! and tracks service requests from the day a car comes in until a mechanic
//! closes the request with a bill. Everything lives in a single SQLite file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mechshop::{NewCustomer, Result, ShopDb};
//!
//! fn main() -> Result<()> {
//!     let db = ShopDb::open("shop.db")?;
//!     let customer = db.add_customer(NewCustomer {
//!         fname: "Ann".into(),
//!         lname: "Lee".into(),
//!         phone: "555-0100".into(),
//!         address: "12 Elm St".into(),
//!     })?;
//!     println!("Added customer {}", customer.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Tables
//!
//! `Customer`, `Mechanic`, `Car`, `Owns`, `Service_Request`, `Closed_Request`.
//! See [`TABLES`] for the full schema.

pub mod cli;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod shop;

pub use config::Config;
pub use db::{QueryResult, ShopDb, TableInfo, TABLES};
pub use error::{Result, ShopError};
pub use models::{
    Car, CloseRequest, ClosedRequest, Customer, Mechanic, NewCustomer, NewMechanic,
    NewServiceRequest, OpenRequest, OwnedCar, ServiceRequest,
};
pub use reports::{Report, ReportParam};
