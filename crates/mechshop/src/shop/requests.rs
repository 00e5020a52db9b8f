use super::require_positive;
use crate::db::ShopDb;
use crate::dates::{format_date, parse_date};
use crate::error::{Result, ShopError};
use crate::models::{
    CloseRequest, ClosedRequest, NewServiceRequest, OpenRequest, ServiceRequest,
};
use rusqlite::{params, OptionalExtension};

impl ShopDb {
    /// Opens a service request for a car the customer owns.
    pub fn open_service_request(&self, request: NewServiceRequest) -> Result<ServiceRequest> {
        let odometer = require_positive("odometer reading", request.odometer)?;
        if self.get_customer(request.customer_id)?.is_none() {
            return Err(ShopError::CustomerNotFound(request.customer_id));
        }
        let owned = self
            .cars_owned_by(request.customer_id)?
            .into_iter()
            .find(|c| c.car.vin.trim() == request.car_vin.trim())
            .ok_or_else(|| ShopError::CarNotOwned {
                customer_id: request.customer_id,
                vin: request.car_vin.trim().to_string(),
            })?;

        let rid = self.next_id("Service_Request")?;
        self.conn().execute(
            "INSERT INTO Service_Request (rid, customer_id, car_vin, date, odometer, complain)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                rid,
                request.customer_id,
                owned.car.vin,
                format_date(request.date),
                odometer,
                request.complain.trim(),
            ],
        )?;
        tracing::info!(rid, customer_id = request.customer_id, "opened service request");

        Ok(ServiceRequest {
            rid,
            customer_id: request.customer_id,
            car_vin: owned.car.vin,
            date: request.date,
            odometer,
            complain: request.complain.trim().to_string(),
        })
    }

    pub fn get_service_request(&self, rid: i64) -> Result<Option<ServiceRequest>> {
        let row = self
            .conn()
            .query_row(
                "SELECT rid, customer_id, car_vin, date, odometer, COALESCE(complain, '')
                 FROM Service_Request WHERE rid = ?1",
                params![rid],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(rid, customer_id, car_vin, date, odometer, complain)| {
            Ok(ServiceRequest {
                rid,
                customer_id,
                car_vin,
                date: parse_date(&date)?,
                odometer,
                complain,
            })
        })
        .transpose()
    }

    /// Checks that request `rid` exists and is still open and that mechanic
    /// `mid` exists.
    pub fn find_open_request(&self, rid: i64, mid: i64) -> Result<OpenRequest> {
        let request = self
            .get_service_request(rid)?
            .ok_or(ShopError::RequestNotFound(rid))?;
        if self.get_mechanic(mid)?.is_none() {
            return Err(ShopError::MechanicNotFound(mid));
        }
        if self.is_closed(rid)? {
            return Err(ShopError::RequestAlreadyClosed(rid));
        }

        Ok(OpenRequest {
            rid,
            opened: request.date,
            mid,
        })
    }

    /// Closes an open service request.
    ///
    /// The closing date must fall strictly after the date the request was
    /// opened and the bill must be positive.
    pub fn close_service_request(&self, close: CloseRequest) -> Result<ClosedRequest> {
        let open = self.find_open_request(close.rid, close.mid)?;
        if close.date <= open.opened {
            return Err(ShopError::InvalidClosingDate {
                opened: format_date(open.opened),
                closed: format_date(close.date),
            });
        }
        let bill = require_positive("bill", close.bill)?;
        let comment = close.comment.trim().to_string();

        let wid = self.next_id("Closed_Request")?;
        self.conn().execute(
            "INSERT INTO Closed_Request (wid, rid, mid, date, comment, bill)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![wid, close.rid, close.mid, format_date(close.date), comment, bill],
        )?;
        tracing::info!(wid, rid = close.rid, mid = close.mid, bill, "closed service request");

        Ok(ClosedRequest {
            wid,
            rid: close.rid,
            mid: close.mid,
            date: close.date,
            comment,
            bill,
        })
    }

    fn is_closed(&self, rid: i64) -> Result<bool> {
        Ok(self
            .conn()
            .prepare("SELECT 1 FROM Closed_Request WHERE rid = ?1")?
            .exists(params![rid])?)
    }
}
