//! The interactive main menu.

use super::output::{OutputFormat, OutputWriter};
use super::prompt::Prompter;
use crate::db::ShopDb;
use crate::error::{Result, ShopError};
use crate::models::{Car, CloseRequest, Customer, NewCustomer, NewMechanic, NewServiceRequest};
use crate::reports::Report;
use colored::Colorize;
use std::io::{BufRead, Write};

const MENU: &str = "MAIN MENU
---------
1. AddCustomer
2. AddMechanic
3. AddCar
4. InsertServiceRequest
5. CloseServiceRequest
6. ListCustomersWithBillLessThan100
7. ListCustomersWithMoreThan20Cars
8. ListCarsBefore1995With50000Milles
9. ListKCarsWithTheMostServices
10. ListCustomersInDescendingOrderOfTheirTotalBill
11. < EXIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddMechanic,
    AddCar,
    InsertServiceRequest,
    CloseServiceRequest,
    Report(Report),
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        let choice = match n {
            1 => MenuChoice::AddCustomer,
            2 => MenuChoice::AddMechanic,
            3 => MenuChoice::AddCar,
            4 => MenuChoice::InsertServiceRequest,
            5 => MenuChoice::CloseServiceRequest,
            6 => MenuChoice::Report(Report::BillsUnder),
            7 => MenuChoice::Report(Report::ManyCars),
            8 => MenuChoice::Report(Report::OldLowMileage),
            9 => MenuChoice::Report(Report::MostServiced),
            10 => MenuChoice::Report(Report::TotalBill),
            11 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

pub struct Menu<'a, R: BufRead, W: Write> {
    db: &'a ShopDb,
    prompt: Prompter<R, W>,
    format: OutputFormat,
    show_header: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a ShopDb, input: R, output: W) -> Self {
        Self {
            db,
            prompt: Prompter::new(input, output),
            format: OutputFormat::Table,
            show_header: true,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_header(mut self, show_header: bool) -> Self {
        self.show_header = show_header;
        self
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Runs until the user picks EXIT or input ends.
    ///
    /// Failed operations are reported and the menu is shown again; only I/O
    /// errors on the terminal itself end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompt.say(&MENU.bold().to_string())?;
            let choice = match self.prompt.choice() {
                Ok(n) => n,
                Err(ShopError::EndOfInput) => break,
                Err(e) => return Err(e),
            };

            let Some(choice) = MenuChoice::from_number(choice) else {
                self.prompt.warn("Unknown menu option.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                break;
            }

            tracing::debug!(?choice, "menu selection");
            match self.dispatch(choice) {
                Ok(()) => {}
                Err(ShopError::EndOfInput) => break,
                Err(ShopError::Io(e)) => return Err(ShopError::Io(e)),
                Err(e) => self.report_error(&e)?,
            }
        }
        Ok(())
    }

    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddCustomer => self.add_customer().map(|_| ()),
            MenuChoice::AddMechanic => self.add_mechanic(),
            MenuChoice::AddCar => self.add_car(),
            MenuChoice::InsertServiceRequest => self.insert_service_request(),
            MenuChoice::CloseServiceRequest => self.close_service_request(),
            MenuChoice::Report(report) => self.run_report(report),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn report_error(&mut self, err: &ShopError) -> Result<()> {
        let message = if err.is_user_error() {
            err.to_string()
        } else {
            format!("Error processing request: {}", err)
        };
        writeln!(self.prompt.output(), "{}", message.red())?;
        Ok(())
    }

    fn read_customer(&mut self) -> Result<NewCustomer> {
        Ok(NewCustomer {
            fname: self.prompt.required("Enter Customer First Name: ")?,
            lname: self.prompt.required("Enter Customer Last Name: ")?,
            phone: self.prompt.line("Enter Customer Phone #: ")?,
            address: self.prompt.line("Enter Customer Address: ")?,
        })
    }

    fn add_customer(&mut self) -> Result<Customer> {
        let customer = self.read_customer()?;
        let customer = self.db.add_customer(customer)?;
        self.prompt.say(&format!("New Customer ID: {}", customer.id))?;
        Ok(customer)
    }

    fn add_mechanic(&mut self) -> Result<()> {
        let mechanic = NewMechanic {
            fname: self.prompt.required("Enter Mechanic First Name: ")?,
            lname: self.prompt.required("Enter Mechanic Last Name: ")?,
            experience: self.prompt.number("Enter Mechanic Years of Experience: ")?,
        };
        let mechanic = self.db.add_mechanic(mechanic)?;
        self.prompt.say(&format!("New Mechanic ID: {}", mechanic.id))
    }

    /// Collects car details, re-asking for the VIN until it is unused.
    fn read_car(&mut self) -> Result<Car> {
        let vin = loop {
            let vin = self.prompt.required("Enter Car VIN#: ")?;
            if self.db.is_unique_vin(&vin)? {
                break vin;
            }
            self.prompt.warn(&ShopError::DuplicateVin(vin).to_string())?;
        };
        Ok(Car {
            vin,
            make: self.prompt.required("Enter Car Make: ")?,
            model: self.prompt.required("Enter Car Model: ")?,
            year: self.prompt.number("Enter Car Year: ")?,
        })
    }

    fn choose_customer(&mut self, customers: &[Customer]) -> Result<i64> {
        if customers.len() == 1 {
            return Ok(customers[0].id);
        }
        let labels: Vec<String> = customers.iter().map(Customer::label).collect();
        let idx = self.prompt.pick("Select a customer:", &labels)?;
        Ok(customers[idx].id)
    }

    fn add_car(&mut self) -> Result<()> {
        let car = self.read_car()?;
        let fname = self.prompt.line("Enter the owner's first name: ")?;
        let lname = self.prompt.line("Enter the owner's last name: ")?;

        let customers = self.db.find_customers_by_name(&fname, &lname)?;
        if customers.is_empty() {
            return self.prompt.warn(
                "Customer does not exist. Add customer to the database before trying again.",
            );
        }
        let owner = self.choose_customer(&customers)?;

        let owned = self.db.add_car(car, owner)?;
        self.prompt.say(&format!(
            "Added car {} for customer {} (ownership {})",
            owned.car.vin, owned.customer_id, owned.ownership_id
        ))
    }

    fn insert_service_request(&mut self) -> Result<()> {
        let lname = self.prompt.line("Enter Customer Last Name: ")?;
        let customers = self.db.find_customers_by_last_name(&lname)?;

        let customer_id = if customers.is_empty() {
            let question = format!(
                "There is no customer with the last name of '{}'.\nWould you like to initiate Add Customer procedure?",
                lname.trim()
            );
            if !self.prompt.confirm(&question)? {
                return Ok(());
            }
            self.add_customer()?.id
        } else {
            self.choose_customer(&customers)?
        };

        let cars = self.db.cars_owned_by(customer_id)?;
        let vin = match cars.len() {
            0 => {
                let question = "There are no cars associated with this customer.\nWould you like to initiate Add Car procedure?";
                if !self.prompt.confirm(question)? {
                    return Ok(());
                }
                let car = self.read_car()?;
                let owned = self.db.add_car(car, customer_id)?;
                self.prompt
                    .say(&format!("New Ownership ID: {}", owned.ownership_id))?;
                owned.car.vin
            }
            1 => cars[0].car.vin.clone(),
            _ => {
                let labels: Vec<String> = cars.iter().map(|c| c.label()).collect();
                let idx = self.prompt.pick("Select a car VIN:", &labels)?;
                cars[idx].car.vin.clone()
            }
        };

        let request = NewServiceRequest {
            customer_id,
            car_vin: vin,
            date: self.prompt.date("Enter Date (MM/DD/YYYY): ")?,
            odometer: self.prompt.positive("Enter Odometer Reading: ")?,
            complain: self.prompt.line("Enter Complaint: ")?,
        };
        let request = self.db.open_service_request(request)?;
        self.prompt.say(&format!("New Request ID: {}", request.rid))
    }

    fn close_service_request(&mut self) -> Result<()> {
        let rid = self.prompt.number("Enter Request ID #: ")?;
        let mid = self.prompt.number("Enter Mechanic ID #: ")?;
        let open = self.db.find_open_request(rid, mid)?;

        let date = self.prompt.date("Enter Request Closing Date (YYYY-MM-DD): ")?;
        if date <= open.opened {
            return Err(ShopError::InvalidClosingDate {
                opened: crate::dates::format_date(open.opened),
                closed: crate::dates::format_date(date),
            });
        }

        let close = CloseRequest {
            rid,
            mid,
            date,
            comment: self.prompt.line("Enter comment: ")?,
            bill: self.prompt.positive("Enter bill: ")?,
        };
        let closed = self.db.close_service_request(close)?;
        self.prompt
            .say(&format!("New Closed_Request ID: {}", closed.wid))
    }

    fn run_report(&mut self, report: Report) -> Result<()> {
        let value = match report {
            Report::MostServiced => {
                Some(self.prompt.number("How many cars do you want to find?: ")?)
            }
            _ => None,
        };
        let result = report.run(self.db, value)?;

        self.prompt.say(&report.title().bold().to_string())?;
        OutputWriter::new(self.prompt.output(), self.format)
            .with_header(self.show_header)
            .write_result(&result)
    }
}
