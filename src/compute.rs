use crate::{
    data::{Checkout, Error, FeeReportRow, FeeSchedule, PatronId, FEE_DECIMALS},
    read::CheckoutUser,
};
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};

/// Running totals per patron, filled while the checkouts are read. The map keeps patrons
/// in the order they first showed up, which is also the order of the report.
#[derive(Debug)]
pub struct LateFees {
    pub fees: IndexMap<PatronId, Decimal>,
    schedule: FeeSchedule,
}

impl LateFees {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self {
            fees: IndexMap::new(),
            schedule,
        }
    }

    /// Fee owed for a single checkout.
    pub fn fee_for(&self, checkout: &Checkout) -> Result<Decimal, Error> {
        self.schedule.validate()?;
        Decimal::from(checkout.days_late())
            .checked_mul(self.schedule.daily_rate)
            .ok_or_else(|| Error::FeeOverflow(checkout.patron_id.clone()))
    }

    /// Report lines, totals rounded half away from zero to `FEE_DECIMALS` places.
    pub(crate) fn rows(&self) -> impl Iterator<Item = FeeReportRow<'_>> {
        self.fees.iter().map(|(patron_id, total)| {
            let mut late_fees =
                total.round_dp_with_strategy(FEE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
            late_fees.rescale(FEE_DECIMALS);
            FeeReportRow {
                patron_id,
                late_fees,
            }
        })
    }
}

impl Default for LateFees {
    fn default() -> Self {
        Self::new(FeeSchedule::default())
    }
}

impl CheckoutUser for LateFees {
    fn use_checkout(&mut self, checkout: Checkout) -> Result<(), Error> {
        if checkout.date_returned < checkout.date_due {
            tracing::warn!(
                patron = %checkout.patron_id,
                due = %checkout.date_due,
                returned = %checkout.date_returned,
                "book returned before its due date"
            );
        }
        let fee = self.fee_for(&checkout)?;
        let total = self
            .fees
            .get(&checkout.patron_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
            .checked_add(fee)
            .ok_or_else(|| Error::FeeOverflow(checkout.patron_id.clone()))?;
        // an existing patron keeps its position
        self.fees.insert(checkout.patron_id, total);
        Ok(())
    }
}
