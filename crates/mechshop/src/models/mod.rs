pub mod car;
pub mod customer;
pub mod mechanic;
pub mod request;

pub use car::{Car, OwnedCar, MIN_CAR_YEAR};
pub use customer::{Customer, NewCustomer};
pub use mechanic::{Mechanic, NewMechanic};
pub use request::{
    CloseRequest, ClosedRequest, NewServiceRequest, OpenRequest, ServiceRequest,
};
