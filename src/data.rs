use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type PatronId = String;

/// Fees are reported with this many decimals.
pub const FEE_DECIMALS: u32 = 2;

/// Date layout of the `date_due` / `date_returned` columns.
pub const CHECKOUT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Columns the checkout table must carry, in whatever order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date_due", "date_returned", "patron_id"];

/// How much a patron owes for each day a book comes back after its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub daily_rate: Decimal,
}

impl FeeSchedule {
    /// A schedule charging `daily_rate` per late day. Negative rates are refused, a fee
    /// can't turn into a credit.
    pub fn new(daily_rate: Decimal) -> Result<Self, Error> {
        let schedule = Self { daily_rate };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Rejects a negative rate. Also run on hand-built schedules before any fee is charged.
    pub fn validate(&self) -> Result<(), Error> {
        if self.daily_rate.is_sign_negative() && !self.daily_rate.is_zero() {
            return Err(Error::NegativeRate(self.daily_rate));
        }
        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            daily_rate: dec!(0.25),
        }
    }
}

/// A row of the checkout table as it sits in the file. Only the columns we need are picked
/// by name; serde drops the rest. Dates stay textual here so that a bad one is reported as a
/// date problem rather than a generic CSV one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutRecord {
    pub patron_id: PatronId,
    pub date_due: String,
    pub date_returned: String,
}

/// A checkout whose dates have been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub patron_id: PatronId,
    pub date_due: NaiveDate,
    pub date_returned: NaiveDate,
}

impl Checkout {
    /// Whole days between due date and return, never below zero.
    pub fn days_late(&self) -> i64 {
        (self.date_returned - self.date_due).num_days().max(0)
    }
}

impl TryFrom<CheckoutRecord> for Checkout {
    type Error = Error;

    fn try_from(record: CheckoutRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date_due: crate::dates::parse_date(&record.date_due, CHECKOUT_DATE_FORMAT)?,
            date_returned: crate::dates::parse_date(&record.date_returned, CHECKOUT_DATE_FORMAT)?,
            patron_id: record.patron_id,
        })
    }
}

/// One line of the generated report. `late_fees` is expected to be already rescaled to
/// `FEE_DECIMALS` so that it prints as e.g. `1.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FeeReportRow<'a> {
    pub patron_id: &'a str,
    pub late_fees: Decimal,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Date {value:?} does not match the expected format {format:?}")]
    Parse { value: String, format: &'static str },
    #[error("Argument `{0}` has the wrong type")]
    TypeArgument(&'static str),
    #[error("Cannot access {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Checkout table has no `{0}` column")]
    Schema(&'static str),
    #[error("Daily rate must not be negative, got {0}")]
    NegativeRate(Decimal),
    #[error("Late fees of patron {0:?} overflowed")]
    FeeOverflow(PatronId),
    #[error("Malformed checkout table: {0}")]
    Csv(#[from] csv::Error),
}
