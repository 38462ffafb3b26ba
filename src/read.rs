use crate::data::{Checkout, CheckoutRecord, Error, REQUIRED_COLUMNS};

/// Trait for doing something with a `Checkout` read from a CSV file
/// (or received from elsewhere). Used by the fee computation, but also by tests
/// to check we get the correct records out of a CSV stream.
pub trait CheckoutUser {
    fn use_checkout(&mut self, checkout: Checkout) -> Result<(), Error>;
}

/// Streaming CSV importer for `Checkout`s. The header is checked up front; after that
/// the first row that fails (bad date, broken record, or a refusal from `user`) stops
/// the whole import.
pub fn read_checkouts<R: std::io::Read, U: CheckoutUser>(
    reader: R,
    user: &mut U,
) -> Result<(), Error> {
    // only header names are trimmed; cells are taken verbatim
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?;
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(Error::Schema(missing));
    }
    for (line, result) in rdr.deserialize::<CheckoutRecord>().enumerate() {
        let checkout = Checkout::try_from(result?)?;
        tracing::debug!(row = line + 1, patron = %checkout.patron_id, "checkout read");
        user.use_checkout(checkout)?;
    }
    Ok(())
}
