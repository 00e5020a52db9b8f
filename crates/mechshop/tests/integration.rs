//! Integration tests for the mechshop library API.

use chrono::NaiveDate;
use mechshop::{
    Car, CloseRequest, NewCustomer, NewMechanic, NewServiceRequest, Report, ShopDb, ShopError,
    TABLES,
};
use serde_json::Value;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Bad test date")
}

fn customer(db: &ShopDb, fname: &str, lname: &str) -> i64 {
    db.add_customer(NewCustomer {
        fname: fname.to_string(),
        lname: lname.to_string(),
        phone: "555-0100".to_string(),
        address: "1 Shop Rd".to_string(),
    })
    .expect("Failed to add customer")
    .id
}

fn car(db: &ShopDb, owner: i64, vin: &str, year: i64) {
    db.add_car(
        Car {
            vin: vin.to_string(),
            make: "Toyota".to_string(),
            model: format!("Model-{}", vin),
            year,
        },
        owner,
    )
    .expect("Failed to add car");
}

fn request(db: &ShopDb, customer_id: i64, vin: &str, odometer: i64) -> i64 {
    db.open_service_request(NewServiceRequest {
        customer_id,
        car_vin: vin.to_string(),
        date: date("2021-01-10"),
        odometer,
        complain: "noise".to_string(),
    })
    .expect("Failed to open request")
    .rid
}

fn close(db: &ShopDb, rid: i64, mid: i64, bill: i64) {
    db.close_service_request(CloseRequest {
        rid,
        mid,
        date: date("2021-01-12"),
        comment: "done".to_string(),
        bill,
    })
    .expect("Failed to close request");
}

/// Two customers, one mechanic, a handful of requests.
fn populated() -> ShopDb {
    let db = ShopDb::open_in_memory().expect("Failed to open db");
    let ann = customer(&db, "Ann", "Lee");
    let bob = customer(&db, "Bob", "Kim");
    let mid = db
        .add_mechanic(NewMechanic {
            fname: "Max".to_string(),
            lname: "Power".to_string(),
            experience: 10,
        })
        .expect("Failed to add mechanic")
        .id;

    car(&db, ann, "OLD1", 1990);
    car(&db, ann, "NEW1", 2015);
    car(&db, bob, "OLD2", 1985);

    let r1 = request(&db, ann, "OLD1", 30_000);
    let r2 = request(&db, ann, "OLD1", 31_000);
    let r3 = request(&db, ann, "NEW1", 10_000);
    let r4 = request(&db, bob, "OLD2", 90_000);

    close(&db, r1, mid, 80);
    close(&db, r2, mid, 300);
    close(&db, r3, mid, 20);
    close(&db, r4, mid, 150);

    db
}

fn column(result: &mechshop::QueryResult, name: &str) -> Vec<Value> {
    (0..result.row_count())
        .map(|i| result.get(i, name).cloned().unwrap_or(Value::Null))
        .collect()
}

#[test]
fn test_open_file_database_persists() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("shop.db");

    {
        let db = ShopDb::open(&path).expect("Failed to open db");
        customer(&db, "Ann", "Lee");
    }

    let db = ShopDb::open(&path).expect("Failed to reopen db");
    assert_eq!(db.count_rows("Customer").unwrap(), 1);
    assert_eq!(db.next_id("Customer").unwrap(), 2);
}

#[test]
fn test_all_tables_created() {
    let db = ShopDb::open_in_memory().expect("Failed to open db");
    assert_eq!(TABLES.len(), 6);
    for table in TABLES {
        assert_eq!(db.count_rows(table.name).unwrap(), 0, "{} should be empty", table.name);
    }
}

#[test]
fn test_bills_under_report() {
    let db = populated();
    let result = Report::BillsUnder.run(&db, None).unwrap();

    assert_eq!(result.columns, vec!["date", "bill", "comment", "fname", "lname"]);
    let mut bills: Vec<i64> = column(&result, "bill").iter().filter_map(Value::as_i64).collect();
    bills.sort();
    assert_eq!(bills, vec![20, 80]);
}

#[test]
fn test_many_cars_report_threshold() {
    let db = populated();

    assert!(Report::ManyCars.run(&db, None).unwrap().is_empty());

    let result = db.customers_with_more_cars_than(1).unwrap();
    assert_eq!(column(&result, "fname"), vec![Value::from("Ann")]);
}

#[test]
fn test_old_low_mileage_report() {
    let db = populated();
    let result = Report::OldLowMileage.run(&db, None).unwrap();

    // OLD1 was serviced twice under 50000 miles; OLD2 only over it.
    assert_eq!(result.row_count(), 2);
    assert!(column(&result, "year").iter().all(|y| y == &Value::from(1990)));
}

#[test]
fn test_most_serviced_report() {
    let db = populated();
    let result = Report::MostServiced.run(&db, Some(2)).unwrap();

    assert_eq!(result.row_count(), 2);
    assert_eq!(result.get(0, "car_vin"), Some(&Value::from("OLD1")));
    assert_eq!(result.get(0, "requests"), Some(&Value::from(2)));
}

#[test]
fn test_most_serviced_rejects_zero() {
    let db = populated();
    let result = Report::MostServiced.run(&db, Some(0));
    assert!(matches!(result, Err(ShopError::Validation(_))));
}

#[test]
fn test_total_bill_report_is_descending() {
    let db = populated();
    let result = Report::TotalBill.run(&db, None).unwrap();

    assert_eq!(column(&result, "fname"), vec![Value::from("Ann"), Value::from("Bob")]);
    assert_eq!(column(&result, "total_bill"), vec![Value::from(400), Value::from(150)]);

    let top = db.customers_by_total_bill(1).unwrap();
    assert_eq!(top.row_count(), 1);
}

#[test]
fn test_open_requests_only_close_once() {
    let db = populated();
    let rid = request(&db, 1, "NEW1", 12_000);

    assert!(db.find_open_request(rid, 1).is_ok());
    close(&db, rid, 1, 99);
    assert!(matches!(
        db.find_open_request(rid, 1),
        Err(ShopError::RequestAlreadyClosed(r)) if r == rid
    ));
}

#[test]
fn test_result_to_json() {
    let db = populated();
    let json = Report::TotalBill.run(&db, Some(1)).unwrap().to_json_array();
    assert_eq!(json.len(), 1);
    assert_eq!(json[0]["c_id"], 1);
    assert_eq!(json[0]["total_bill"], 400);
}
