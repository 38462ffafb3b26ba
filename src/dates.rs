use crate::data::Error;
use chrono::NaiveDate;

/// Input layout for `reformat_dates` and the range helpers.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Output layout of `reformat_dates`, e.g. `01 Jan 2001`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Parse `value` with a strftime-like `format`, keeping the offending string on failure.
pub fn parse_date(value: &str, format: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, format).map_err(|_| Error::Parse {
        value: value.to_string(),
        format,
    })
}

/// Turns `YYYY-MM-DD` strings into `DD Mon YYYY` ones, keeping order. Month names are
/// always English abbreviations.
pub fn reformat_dates<S: AsRef<str>>(dates: &[S]) -> Result<Vec<String>, Error> {
    dates
        .iter()
        .map(|date| {
            parse_date(date.as_ref(), ISO_DATE_FORMAT)
                .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        })
        .collect()
}

/// `n` consecutive days starting at `start`. A zero or negative `n` gives nothing, but
/// `start` still has to be a valid date.
pub fn date_range(start: &str, n: i64) -> Result<Vec<NaiveDate>, Error> {
    let start = parse_date(start, ISO_DATE_FORMAT)?;
    let count = usize::try_from(n).unwrap_or(0);
    Ok(start.iter_days().take(count).collect())
}

/// A loosely typed argument, for callers that only learn the shape of their input at
/// runtime (command-line tokens, cells from a sheet, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Text(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Text(value)
    }
}

impl From<i64> for Arg<'_> {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Int(value.into())
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

/// Same as `date_range`, but both arguments are type-checked first: `start` has to be text
/// and `n` an integer, otherwise `Error::TypeArgument` names the culprit.
pub fn checked_date_range<'a>(
    start: impl Into<Arg<'a>>,
    n: impl Into<Arg<'a>>,
) -> Result<Vec<NaiveDate>, Error> {
    let Arg::Text(start) = start.into() else {
        return Err(Error::TypeArgument("start"));
    };
    let Arg::Int(n) = n.into() else {
        return Err(Error::TypeArgument("n"));
    };
    date_range(start, n)
}

/// Pairs each value with a day, the first one getting `start_date`.
pub fn add_date_range<V>(
    values: impl IntoIterator<Item = V>,
    start_date: &str,
) -> Result<Vec<(NaiveDate, V)>, Error> {
    let values: Vec<V> = values.into_iter().collect();
    let dates = date_range(start_date, values.len() as i64)?;
    Ok(dates.into_iter().zip(values).collect())
}
