use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// One-line label used in pick lists: `Last, First, phone`.
    pub fn label(&self) -> String {
        format!(
            "{}, {}, {}",
            self.lname.trim(),
            self.fname.trim(),
            self.phone.trim()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

impl NewCustomer {
    pub fn into_customer(self, id: i64) -> Customer {
        Customer {
            id,
            fname: self.fname,
            lname: self.lname,
            phone: self.phone,
            address: self.address,
        }
    }
}
