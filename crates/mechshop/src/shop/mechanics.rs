use super::require_text;
use crate::db::ShopDb;
use crate::error::{Result, ShopError};
use crate::models::{Mechanic, NewMechanic};
use rusqlite::{params, OptionalExtension};

impl ShopDb {
    /// Inserts a mechanic under the next free id.
    pub fn add_mechanic(&self, mechanic: NewMechanic) -> Result<Mechanic> {
        if !(0..100).contains(&mechanic.experience) {
            return Err(ShopError::Validation(format!(
                "years of experience must be between 0 and 99 (got {})",
                mechanic.experience
            )));
        }
        let mechanic = NewMechanic {
            fname: require_text("first name", &mechanic.fname)?,
            lname: require_text("last name", &mechanic.lname)?,
            experience: mechanic.experience,
        };

        let id = self.next_id("Mechanic")?;
        self.conn().execute(
            "INSERT INTO Mechanic (id, fname, lname, experience) VALUES (?1, ?2, ?3, ?4)",
            params![id, mechanic.fname, mechanic.lname, mechanic.experience],
        )?;
        tracing::info!(id, "added mechanic");

        Ok(mechanic.into_mechanic(id))
    }

    pub fn get_mechanic(&self, id: i64) -> Result<Option<Mechanic>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, fname, lname, experience FROM Mechanic WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Mechanic {
                        id: row.get(0)?,
                        fname: row.get(1)?,
                        lname: row.get(2)?,
                        experience: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }
}
