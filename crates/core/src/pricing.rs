//! Rental duration and cost calculation.

use decimal_percentage::Percentage;
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Errors that can occur while quoting a rental.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// A monetary amount overflowed during calculation.
    #[error("monetary amount overflowed during calculation")]
    AmountOverflow,
}

/// Flat tax rate applied to the base amount.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.1)
}

/// Fixed service fee, independent of duration and daily rate.
#[must_use]
pub fn service_fee(currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_major(15, currency)
}

/// Billable rental days between pickup and dropoff.
///
/// Any span is rounded up to whole days and floored at 1, so a same-day
/// rental still bills one day (minimum-charge policy). A reversed range
/// (dropoff before pickup) is clamped to 1 by the same floor; drafts are
/// expected to reject reversed ranges before billing.
#[must_use]
pub fn rental_days(pickup: DateTime, dropoff: DateTime) -> i64 {
    let duration = pickup.duration_until(dropoff);
    let seconds = duration.as_secs();

    let whole = seconds / SECONDS_PER_DAY;
    let days = if seconds % SECONDS_PER_DAY > 0 || duration.subsec_nanos() > 0 {
        whole + 1
    } else {
        whole
    };

    days.max(1)
}

/// Itemised cost of a rental.
///
/// Amounts keep full decimal precision; rounding to the currency exponent
/// happens only at display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Billable days.
    pub days: i64,

    /// Rate per day the quote was computed from.
    pub daily_rate: Money<'static, Currency>,

    /// Daily rate multiplied by billable days.
    pub base: Money<'static, Currency>,

    /// Tax on the base amount.
    pub tax: Money<'static, Currency>,

    /// Fixed service fee.
    pub service_fee: Money<'static, Currency>,

    /// Base + tax + service fee.
    pub total: Money<'static, Currency>,
}

impl CostBreakdown {
    /// Quote a rental of `days` billable days at `daily_rate`.
    ///
    /// Negative rates are not rejected and propagate into the totals, as in
    /// the rest of the marketplace.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::AmountOverflow`] if a monetary amount overflows.
    pub fn quote(
        daily_rate: Money<'static, Currency>,
        days: i64,
    ) -> Result<Self, QuoteError> {
        let currency = daily_rate.currency();

        let base = daily_rate
            .amount()
            .checked_mul(Decimal::from(days))
            .ok_or(QuoteError::AmountOverflow)?;

        let tax = tax_rate() * base;
        let fee = service_fee(currency);

        let total = base
            .checked_add(tax)
            .and_then(|amount| amount.checked_add(*fee.amount()))
            .ok_or(QuoteError::AmountOverflow)?;

        Ok(CostBreakdown {
            days,
            daily_rate,
            base: Money::from_decimal(base, currency),
            tax: Money::from_decimal(tax, currency),
            service_fee: fee,
            total: Money::from_decimal(total, currency),
        })
    }
}
