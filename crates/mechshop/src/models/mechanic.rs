use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    pub experience: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMechanic {
    pub fname: String,
    pub lname: String,
    /// Years of experience, `0..100`.
    pub experience: i64,
}

impl NewMechanic {
    pub fn into_mechanic(self, id: i64) -> Mechanic {
        Mechanic {
            id,
            fname: self.fname,
            lname: self.lname,
            experience: self.experience,
        }
    }
}
