//! Table catalogue for the shop database.

/// Schema information for one table.
#[derive(Debug, Clone, Copy)]
pub struct TableInfo {
    /// Table name as used in SQL.
    pub name: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
    /// Integer surrogate key allocated by `next_id`, if the table has one.
    pub id_column: Option<&'static str>,
    /// `CREATE TABLE` statement.
    pub create_sql: &'static str,
}

/// All tables, in foreign-key order (parents before children).
pub static TABLES: &[TableInfo] = &[
    TableInfo {
        name: "Customer",
        description: "Shop customers",
        id_column: Some("id"),
        create_sql: "CREATE TABLE IF NOT EXISTS Customer (
            id INTEGER NOT NULL PRIMARY KEY,
            fname TEXT NOT NULL,
            lname TEXT NOT NULL,
            phone TEXT NOT NULL,
            address TEXT NOT NULL
        )",
    },
    TableInfo {
        name: "Mechanic",
        description: "Mechanics employed by the shop",
        id_column: Some("id"),
        create_sql: "CREATE TABLE IF NOT EXISTS Mechanic (
            id INTEGER NOT NULL PRIMARY KEY,
            fname TEXT NOT NULL,
            lname TEXT NOT NULL,
            experience INTEGER NOT NULL CHECK (experience >= 0 AND experience < 100)
        )",
    },
    TableInfo {
        name: "Car",
        description: "Cars known to the shop, keyed by VIN",
        id_column: None,
        create_sql: "CREATE TABLE IF NOT EXISTS Car (
            vin TEXT NOT NULL PRIMARY KEY,
            make TEXT NOT NULL,
            model TEXT NOT NULL,
            year INTEGER NOT NULL CHECK (year >= 1970)
        )",
    },
    TableInfo {
        name: "Owns",
        description: "Which customer owns which car",
        id_column: Some("ownership_id"),
        create_sql: "CREATE TABLE IF NOT EXISTS Owns (
            ownership_id INTEGER NOT NULL PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES Customer(id),
            car_vin TEXT NOT NULL REFERENCES Car(vin)
        )",
    },
    TableInfo {
        name: "Service_Request",
        description: "Open and historical service requests",
        id_column: Some("rid"),
        create_sql: "CREATE TABLE IF NOT EXISTS Service_Request (
            rid INTEGER NOT NULL PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES Customer(id),
            car_vin TEXT NOT NULL REFERENCES Car(vin),
            date TEXT NOT NULL,
            odometer INTEGER NOT NULL CHECK (odometer > 0),
            complain TEXT
        )",
    },
    TableInfo {
        name: "Closed_Request",
        description: "Closure records with mechanic and bill",
        id_column: Some("wid"),
        create_sql: "CREATE TABLE IF NOT EXISTS Closed_Request (
            wid INTEGER NOT NULL PRIMARY KEY,
            rid INTEGER NOT NULL UNIQUE REFERENCES Service_Request(rid),
            mid INTEGER NOT NULL REFERENCES Mechanic(id),
            date TEXT NOT NULL,
            comment TEXT,
            bill INTEGER NOT NULL CHECK (bill > 0)
        )",
    },
];

/// Looks up a table by name, ignoring case.
pub fn get_table_info(name: &str) -> Option<&'static TableInfo> {
    TABLES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Lists all table names.
pub fn list_tables() -> Vec<&'static str> {
    TABLES.iter().map(|t| t.name).collect()
}
