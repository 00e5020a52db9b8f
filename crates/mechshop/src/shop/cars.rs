use super::require_text;
use crate::db::{self, ShopDb};
use crate::error::{Result, ShopError};
use crate::models::{Car, OwnedCar, MIN_CAR_YEAR};
use rusqlite::{params, Connection, OptionalExtension};

impl ShopDb {
    /// True when no car with this VIN is on file.
    pub fn is_unique_vin(&self, vin: &str) -> Result<bool> {
        let exists = self
            .conn()
            .prepare("SELECT 1 FROM Car WHERE TRIM(vin) = ?1")?
            .exists(params![vin.trim()])?;
        Ok(!exists)
    }

    pub fn get_car(&self, vin: &str) -> Result<Option<Car>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT vin, make, model, year FROM Car WHERE TRIM(vin) = ?1",
                params![vin.trim()],
                |row| {
                    Ok(Car {
                        vin: row.get(0)?,
                        make: row.get(1)?,
                        model: row.get(2)?,
                        year: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    /// Registers a new car and records `owner_id` as its owner.
    ///
    /// The car and its ownership row are written in one transaction.
    pub fn add_car(&self, car: Car, owner_id: i64) -> Result<OwnedCar> {
        let car = validate_car(car)?;
        if !self.is_unique_vin(&car.vin)? {
            return Err(ShopError::DuplicateVin(car.vin));
        }
        if self.get_customer(owner_id)?.is_none() {
            return Err(ShopError::CustomerNotFound(owner_id));
        }

        let tx = self.conn().unchecked_transaction()?;
        tx.execute(
            "INSERT INTO Car (vin, make, model, year) VALUES (?1, ?2, ?3, ?4)",
            params![car.vin, car.make, car.model, car.year],
        )?;
        let ownership_id = insert_ownership(&tx, owner_id, &car.vin)?;
        tx.commit()?;
        tracing::info!(vin = %car.vin, owner_id, "added car");

        Ok(OwnedCar {
            ownership_id,
            customer_id: owner_id,
            car,
        })
    }

    /// Links an existing car to a customer and returns the ownership id.
    pub fn add_ownership(&self, customer_id: i64, vin: &str) -> Result<i64> {
        if self.get_customer(customer_id)?.is_none() {
            return Err(ShopError::CustomerNotFound(customer_id));
        }
        let car = self
            .get_car(vin)?
            .ok_or_else(|| ShopError::Validation(format!("no car with VIN '{}'", vin.trim())))?;
        insert_ownership(self.conn(), customer_id, &car.vin)
    }

    /// Cars owned by a customer, oldest ownership first.
    pub fn cars_owned_by(&self, customer_id: i64) -> Result<Vec<OwnedCar>> {
        let mut stmt = self.conn().prepare(
            "SELECT o.ownership_id, o.customer_id, c.vin, c.make, c.model, c.year
             FROM Owns o JOIN Car c ON c.vin = o.car_vin
             WHERE o.customer_id = ?1
             ORDER BY o.ownership_id",
        )?;
        let cars = stmt
            .query_map(params![customer_id], |row| {
                Ok(OwnedCar {
                    ownership_id: row.get(0)?,
                    customer_id: row.get(1)?,
                    car: Car {
                        vin: row.get(2)?,
                        make: row.get(3)?,
                        model: row.get(4)?,
                        year: row.get(5)?,
                    },
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cars)
    }
}

fn validate_car(car: Car) -> Result<Car> {
    if car.year < MIN_CAR_YEAR {
        return Err(ShopError::Validation(format!(
            "car year must be {} or later (got {})",
            MIN_CAR_YEAR, car.year
        )));
    }
    Ok(Car {
        vin: require_text("VIN", &car.vin)?,
        make: require_text("make", &car.make)?,
        model: require_text("model", &car.model)?,
        year: car.year,
    })
}

fn insert_ownership(conn: &Connection, customer_id: i64, vin: &str) -> Result<i64> {
    let ownership_id = db::next_id(conn, "Owns")?;
    conn.execute(
        "INSERT INTO Owns (ownership_id, customer_id, car_vin) VALUES (?1, ?2, ?3)",
        params![ownership_id, customer_id, vin],
    )?;
    Ok(ownership_id)
}

#[cfg(test)]
mod tests {
    use crate::db::ShopDb;
    use crate::error::ShopError;
    use crate::models::{Car, NewCustomer};

    fn setup() -> (ShopDb, i64) {
        let db = ShopDb::open_in_memory().unwrap();
        let owner = db
            .add_customer(NewCustomer {
                fname: "Ann".into(),
                lname: "Lee".into(),
                phone: "555".into(),
                address: "Main St".into(),
            })
            .unwrap();
        (db, owner.id)
    }

    fn car(vin: &str, year: i64) -> Car {
        Car {
            vin: vin.into(),
            make: "Honda".into(),
            model: "Civic".into(),
            year,
        }
    }

    #[test]
    fn adds_car_with_ownership() {
        let (db, owner) = setup();
        let owned = db.add_car(car("1HGCM82633A004352", 2003), owner).unwrap();

        assert_eq!(owned.ownership_id, 1);
        assert!(!db.is_unique_vin("1HGCM82633A004352").unwrap());
        assert_eq!(db.cars_owned_by(owner).unwrap(), vec![owned]);
    }

    #[test]
    fn duplicate_vin_is_rejected() {
        let (db, owner) = setup();
        db.add_car(car("VIN1", 2003), owner).unwrap();
        let result = db.add_car(car(" VIN1 ", 2010), owner);
        assert!(matches!(result, Err(ShopError::DuplicateVin(v)) if v == "VIN1"));
        assert_eq!(db.count_rows("Owns").unwrap(), 1);
    }

    #[test]
    fn unknown_owner_leaves_no_car_behind() {
        let (db, _) = setup();
        let result = db.add_car(car("VIN2", 2003), 99);
        assert!(matches!(result, Err(ShopError::CustomerNotFound(99))));
        assert!(db.is_unique_vin("VIN2").unwrap());
    }

    #[test]
    fn old_cars_are_rejected() {
        let (db, owner) = setup();
        let result = db.add_car(car("VIN3", 1969), owner);
        assert!(matches!(result, Err(ShopError::Validation(_))));
    }

    #[test]
    fn ownership_can_be_shared() {
        let (db, owner) = setup();
        let second = db
            .add_customer(NewCustomer {
                fname: "Bob".into(),
                lname: "Lee".into(),
                phone: "556".into(),
                address: "Main St".into(),
            })
            .unwrap();
        db.add_car(car("VIN4", 1999), owner).unwrap();

        let ownership = db.add_ownership(second.id, "VIN4").unwrap();

        assert_eq!(ownership, 2);
        assert_eq!(db.cars_owned_by(second.id).unwrap().len(), 1);
        assert!(db.add_ownership(second.id, "MISSING").is_err());
    }
}
