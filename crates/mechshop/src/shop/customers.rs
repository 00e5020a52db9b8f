use super::require_text;
use crate::db::ShopDb;
use crate::error::Result;
use crate::models::{Customer, NewCustomer};
use rusqlite::{params, OptionalExtension, Row};

const CUSTOMER_COLUMNS: &str = "id, fname, lname, phone, address";

impl ShopDb {
    /// Inserts a customer under the next free id.
    pub fn add_customer(&self, customer: NewCustomer) -> Result<Customer> {
        let customer = NewCustomer {
            fname: require_text("first name", &customer.fname)?,
            lname: require_text("last name", &customer.lname)?,
            phone: customer.phone.trim().to_string(),
            address: customer.address.trim().to_string(),
        };

        let id = self.next_id("Customer")?;
        self.conn().execute(
            "INSERT INTO Customer (id, fname, lname, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, customer.fname, customer.lname, customer.phone, customer.address],
        )?;
        tracing::info!(id, "added customer");

        Ok(customer.into_customer(id))
    }

    pub fn get_customer(&self, id: i64) -> Result<Option<Customer>> {
        let sql = format!("SELECT {} FROM Customer WHERE id = ?1", CUSTOMER_COLUMNS);
        Ok(self
            .conn()
            .query_row(&sql, params![id], customer_from_row)
            .optional()?)
    }

    /// Customers whose first and last name match exactly (ignoring padding).
    pub fn find_customers_by_name(&self, fname: &str, lname: &str) -> Result<Vec<Customer>> {
        let sql = format!(
            "SELECT {} FROM Customer WHERE TRIM(fname) = ?1 AND TRIM(lname) = ?2 ORDER BY id",
            CUSTOMER_COLUMNS
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map(params![fname.trim(), lname.trim()], customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Customers with the given last name.
    pub fn find_customers_by_last_name(&self, lname: &str) -> Result<Vec<Customer>> {
        let sql = format!(
            "SELECT {} FROM Customer WHERE TRIM(lname) = ?1 ORDER BY id",
            CUSTOMER_COLUMNS
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt
            .query_map(params![lname.trim()], customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        fname: row.get(1)?,
        lname: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
    })
}
