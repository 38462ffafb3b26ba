use crate::{compute::LateFees, data::Error};

/// Header of the report, written even when there's no patron at all.
pub const REPORT_HEADER: [&str; 2] = ["patron_id", "late_fees"];

/// Basic CSV exporter for `LateFees`. Lines end with `\r\n`, as spreadsheet-style CSV does.
pub fn write_late_fees<W: std::io::Write>(writer: W, fees: &LateFees) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(REPORT_HEADER)?;
    for row in fees.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
