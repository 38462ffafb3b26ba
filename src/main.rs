use late_fees::{checked_date_range, fees_report_with, reformat_dates, Arg, FeeSchedule};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: late_fees report <book_returns.csv> <book_fees.csv> [--rate <per day>]
       late_fees reformat <YYYY-MM-DD>...
       late_fees range <YYYY-MM-DD> <n>";

/// Directives from `rust_log` (the `RUST_LOG` value), or `late_fees=info` when there are none.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter, anyhow::Error> {
    Ok(EnvFilter::builder()
        .with_default_directive("late_fees=info".parse()?)
        .parse_lossy(rust_log.unwrap_or_default()))
}

/// Logs go to stderr so the command output can be piped.
fn init_tracing() -> Result<(), anyhow::Error> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Command-line tokens are all text; anything that reads as an integer is passed on as one.
fn token(arg: &str) -> Arg<'_> {
    arg.parse::<i64>().map_or(Arg::Text(arg), Arg::Int)
}

fn main() -> Result<(), anyhow::Error> {
    init_tracing()?;
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("report") => {
            let (infile, outfile, schedule) = match &args[2..] {
                [infile, outfile] => (infile, outfile, FeeSchedule::default()),
                [infile, outfile, flag, rate] if flag == "--rate" => (
                    infile,
                    outfile,
                    FeeSchedule::new(Decimal::from_str(rate)?)?,
                ),
                _ => anyhow::bail!(USAGE),
            };
            fees_report_with(infile, outfile, &schedule)?;
            print!("{}", std::fs::read_to_string(outfile)?);
        }
        Some("reformat") if args.len() > 2 => {
            for date in reformat_dates(&args[2..])? {
                println!("{date}");
            }
        }
        Some("range") if args.len() == 4 => {
            for date in checked_date_range(token(&args[2]), token(&args[3]))? {
                println!("{date}");
            }
        }
        _ => anyhow::bail!(USAGE),
    }
    Ok(())
}
