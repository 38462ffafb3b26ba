//! Date helpers and a late-fee report for library checkouts.
//!
//! The report reads a CSV table of checkouts (`patron_id`, `date_due`, `date_returned`, any
//! other column being ignored), charges a fixed amount per day a book came back late and
//! writes the total per patron as `patron_id,late_fees`.

pub mod compute;
pub mod data;
pub mod dates;
pub mod read;
pub mod write;

use std::{fs, path::Path};

pub use data::{Error, FeeSchedule};
pub use dates::{add_date_range, checked_date_range, date_range, reformat_dates, Arg};

use compute::LateFees;
use read::read_checkouts;
use write::write_late_fees;

/// Computes late fees per patron from the checkout table `infile` and writes the summary
/// to `outfile`, charging the default 0.25 per day.
pub fn fees_report(infile: impl AsRef<Path>, outfile: impl AsRef<Path>) -> Result<(), Error> {
    fees_report_with(infile, outfile, &FeeSchedule::default())
}

/// Same as `fees_report` with a custom rate.
///
/// The whole input is consumed before `outfile` is touched, so a bad row leaves any
/// existing `outfile` as it was. Writing itself isn't atomic though.
pub fn fees_report_with(
    infile: impl AsRef<Path>,
    outfile: impl AsRef<Path>,
    schedule: &FeeSchedule,
) -> Result<(), Error> {
    let (infile, outfile) = (infile.as_ref(), outfile.as_ref());

    schedule.validate()?;

    let mut fees = LateFees::new(*schedule);
    {
        // read in one go: a directory or an unreadable file only fails on the first read
        let input = fs::read(infile).map_err(|source| Error::FileAccess {
            path: infile.to_owned(),
            source,
        })?;
        read_checkouts(&input[..], &mut fees)?;
    }

    let mut report = Vec::new();
    write_late_fees(&mut report, &fees)?;
    fs::write(outfile, report).map_err(|source| Error::FileAccess {
        path: outfile.to_owned(),
        source,
    })?;

    tracing::info!(
        infile = %infile.display(),
        outfile = %outfile.display(),
        patrons = fees.fees.len(),
        "late fees report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{fees_report, fees_report_with, Error, FeeSchedule};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn checkouts_in(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("book_returns.csv");
        fs::write(&path, content).expect("write checkouts");
        path
    }

    const SHORT_RETURNS: &str = "\
book_uid,isbn_13,patron_id,date_checkout,date_due,date_returned
b1,9780000000001,P1,01/02/2023,01/16/2023,01/20/2023
b2,9780000000002,P2,01/03/2023,01/17/2023,01/17/2023
";

    #[test]
    fn report_two_patrons() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, SHORT_RETURNS);
        let outfile = dir.path().join("book_fees.csv");
        fees_report(&infile, &outfile).unwrap();
        assert_eq!(
            fs::read_to_string(&outfile).unwrap(),
            "patron_id,late_fees\r\nP1,1.00\r\nP2,0.00\r\n"
        );
    }

    #[test]
    fn report_is_idempotent() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(
            &dir,
            "\
date_returned,patron_id,date_due
03/01/2023,A,02/01/2023
01/01/2023,B,02/01/2023
02/02/2023,A,02/01/2023
12/31/2022,C,12/30/2022
",
        );
        let outfile = dir.path().join("book_fees.csv");
        fees_report(&infile, &outfile).unwrap();
        let first = fs::read(&outfile).unwrap();
        fees_report(&infile, &outfile).unwrap();
        assert_eq!(fs::read(&outfile).unwrap(), first);
        assert_eq!(
            String::from_utf8(first).unwrap(),
            "patron_id,late_fees\r\nA,7.25\r\nB,0.00\r\nC,0.25\r\n"
        );
    }

    #[test]
    fn report_with_custom_rate() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, SHORT_RETURNS);
        let outfile = dir.path().join("book_fees.csv");
        fees_report_with(
            &infile,
            &outfile,
            &FeeSchedule {
                daily_rate: dec!(1.5),
            },
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(&outfile).unwrap(),
            "patron_id,late_fees\r\nP1,6.00\r\nP2,0.00\r\n"
        );
    }

    #[test]
    fn missing_input() {
        let dir = TempDir::new().expect("temp dir");
        let infile = dir.path().join("nope.csv");
        let outfile = dir.path().join("book_fees.csv");
        let err = fees_report(&infile, &outfile).unwrap_err();
        assert!(matches!(err, Error::FileAccess { ref path, .. } if *path == infile));
        assert!(!outfile.exists());
    }

    #[test]
    fn unwritable_output() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, SHORT_RETURNS);
        let outfile = dir.path().join("missing_dir").join("book_fees.csv");
        let err = fees_report(&infile, &outfile).unwrap_err();
        assert!(matches!(err, Error::FileAccess { ref path, .. } if *path == outfile));
    }

    #[test]
    fn bad_date_writes_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(
            &dir,
            "patron_id,date_due,date_returned\nP1,01/16/2023,01/20/2023\nP2,13/01/2023,01/20/2023\n",
        );
        let outfile = dir.path().join("book_fees.csv");
        let err = fees_report(&infile, &outfile).unwrap_err();
        assert!(matches!(err, Error::Parse { ref value, .. } if value == "13/01/2023"));
        assert!(!outfile.exists());
    }

    #[test]
    fn bad_date_keeps_previous_report() {
        let dir = TempDir::new().expect("temp dir");
        let outfile = dir.path().join("book_fees.csv");
        fs::write(&outfile, "previous").unwrap();
        let infile = checkouts_in(&dir, "patron_id,date_due,date_returned\nP1,yesterday,today\n");
        assert!(fees_report(&infile, &outfile).is_err());
        assert_eq!(fs::read_to_string(&outfile).unwrap(), "previous");
    }

    #[test]
    fn missing_column() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, "patron,date_due,date_returned\n");
        let outfile = dir.path().join("book_fees.csv");
        assert!(matches!(
            fees_report(&infile, &outfile),
            Err(Error::Schema("patron_id"))
        ));
    }

    #[test]
    fn header_only_input() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, "patron_id,date_due,date_returned\n");
        let outfile = dir.path().join("book_fees.csv");
        fees_report(&infile, &outfile).unwrap();
        assert_eq!(fs::read_to_string(&outfile).unwrap(), "patron_id,late_fees\r\n");
    }

    #[test]
    fn directory_as_input() {
        let dir = TempDir::new().expect("temp dir");
        let outfile = dir.path().join("book_fees.csv");
        let err = fees_report(dir.path(), &outfile).unwrap_err();
        assert!(matches!(err, Error::FileAccess { ref path, .. } if path == dir.path()));
        assert!(!outfile.exists());
    }

    #[test]
    fn negative_rate_writes_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, SHORT_RETURNS);
        let outfile = dir.path().join("book_fees.csv");
        let err = fees_report_with(
            &infile,
            &outfile,
            &FeeSchedule {
                daily_rate: Decimal::from(-1),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::NegativeRate(_)));
        assert!(!outfile.exists());
    }

    #[test]
    fn negative_rate_rejected_without_rows() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, "patron_id,date_due,date_returned\n");
        let outfile = dir.path().join("book_fees.csv");
        assert!(matches!(
            fees_report_with(
                &infile,
                &outfile,
                &FeeSchedule {
                    daily_rate: dec!(-0.25)
                }
            ),
            Err(Error::NegativeRate(_))
        ));
    }

    #[test]
    fn huge_rate_overflows() {
        let dir = TempDir::new().expect("temp dir");
        let infile = checkouts_in(&dir, SHORT_RETURNS);
        let outfile = dir.path().join("book_fees.csv");
        let err = fees_report_with(
            &infile,
            &outfile,
            &FeeSchedule {
                daily_rate: Decimal::MAX,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::FeeOverflow(ref patron) if patron == "P1"));
        assert!(!outfile.exists());
    }
}
