//! Typed rows of the six source tables
//!
//! Each record type knows the columns it needs and how to lift itself out of a
//! [`RawTable`]. A missing required column or a cell that does not parse fails
//! the whole table.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::core::error::Result;
use crate::core::table::RawTable;

/// One sales transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactRecord {
    pub order_date: NaiveDate,
    /// Customer name, the key into the partner table
    pub customer: String,
    pub product_id: String,
    pub employee_id: String,
    pub quantity: f64,
    pub gross_sales: f64,
    pub net_sales: f64,
    pub supplier_price: f64,
    pub discount: f64,
    pub unit_price: Option<f64>,
}

impl FactRecord {
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }

    pub fn month(&self) -> u32 {
        self.order_date.month()
    }

    pub fn day_of_week(&self) -> Weekday {
        self.order_date.weekday()
    }

    /// Net sale amount minus what the goods cost from the supplier
    pub fn profit(&self) -> f64 {
        self.net_sales - self.supplier_price
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let order_date = table.column_index("orderdate")?;
        let customer = table.column_index("name")?;
        let product_id = table.column_index("productid")?;
        let employee_id = table.column_index("employee_id")?;
        let quantity = table.column_index("quantity")?;
        let gross_sales = table.column_index("grosssalesamount")?;
        let net_sales = table.column_index("netsalesamount")?;
        let supplier_price = table.column_index("supplierprice")?;
        let discount = table.find_column("discount");
        let unit_price = table.find_column("unitprice");

        (0..table.row_count())
            .map(|row| {
                Ok(FactRecord {
                    order_date: table.date(row, order_date)?,
                    customer: table.text(row, customer)?,
                    product_id: table.key(row, product_id)?,
                    employee_id: table.key(row, employee_id)?,
                    quantity: table.number(row, quantity)?,
                    gross_sales: table.number(row, gross_sales)?,
                    net_sales: table.number(row, net_sales)?,
                    supplier_price: table.number(row, supplier_price)?,
                    discount: match discount {
                        Some(col) => table.optional_number(row, col)?.unwrap_or(0.0),
                        None => 0.0,
                    },
                    unit_price: match unit_price {
                        Some(col) => table.optional_number(row, col)?,
                        None => None,
                    },
                })
            })
            .collect()
    }
}

/// Customer (counterparty) and the country it trades from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partner {
    pub name: String,
    pub country: String,
}

impl Partner {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Partner {
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let name = table.column_index("name")?;
        let country = table.column_index("country")?;
        (0..table.row_count())
            .map(|row| {
                Ok(Partner {
                    name: table.text(row, name)?,
                    country: table.text(row, country)?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Product {
            product_id: product_id.into(),
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let product_id = table.column_index("productid")?;
        let name = table.column_index("productname")?;
        let category = table.column_index("categoryname")?;
        (0..table.row_count())
            .map(|row| {
                Ok(Product {
                    product_id: table.key(row, product_id)?,
                    name: table.text(row, name)?,
                    category: table.text(row, category)?,
                })
            })
            .collect()
    }
}

/// Sales manager
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Staff {
    pub employee_id: String,
    pub name: String,
}

impl Staff {
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Staff {
            employee_id: employee_id.into(),
            name: name.into(),
        }
    }

    // The staff sheet spells the key `employeeid`, the fact sheet `employee_id`
    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let employee_id = table.column_index("employeeid")?;
        let name = table.column_index("employeename")?;
        (0..table.row_count())
            .map(|row| {
                Ok(Staff {
                    employee_id: table.key(row, employee_id)?,
                    name: table.text(row, name)?,
                })
            })
            .collect()
    }
}

/// Row of the calendar table, reduced to the fields the ledger carries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CalendarDay {
    pub fn of(date: NaiveDate) -> Self {
        CalendarDay {
            date,
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let date = table.column_index("orderdate")?;
        let day = table.column_index("day")?;
        let month = table.column_index("month")?;
        let year = table.column_index("year")?;
        (0..table.row_count())
            .map(|row| {
                Ok(CalendarDay {
                    date: table.date(row, date)?,
                    day: table.integer(row, day)?,
                    month: table.integer(row, month)?,
                    year: table.integer(row, year)?,
                })
            })
            .collect()
    }
}

/// Sales target for one category on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub date: NaiveDate,
    pub category: Option<String>,
    pub gross_plan: f64,
    pub net_plan: f64,
}

impl PlanRow {
    pub fn new(date: NaiveDate, gross_plan: f64, net_plan: f64) -> Self {
        PlanRow {
            date,
            category: None,
            gross_plan,
            net_plan,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>> {
        let date = table.column_index("Date")?;
        let gross_plan = table.column_index("Gross_Plan")?;
        let net_plan = table.column_index("Net_Plan")?;
        let category = table.find_column("categoryname");
        (0..table.row_count())
            .map(|row| {
                Ok(PlanRow {
                    date: table.date(row, date)?,
                    category: category.and_then(|col| table.optional_text(row, col)),
                    gross_plan: table.number(row, gross_plan)?,
                    net_plan: table.number(row, net_plan)?,
                })
            })
            .collect()
    }
}
