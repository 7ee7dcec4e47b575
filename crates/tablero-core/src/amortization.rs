//! Loan amortization: month-by-month breakdown of a fixed-payment loan.
//!
//! Pure computation, no store involvement. Internal accumulation stays
//! unrounded; monetary values are rounded to 2 decimals only at the output
//! boundary, so rounding error does not compound across periods.

use serde::Serialize;

use crate::domain::BoardError;

/// Longest schedule worth producing: a century of monthly payments.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// One month of the schedule. All monetary fields are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub period: u32,
    pub payment: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub remaining_balance: f64,
}

/// Compute the full schedule for `principal` at `annual_rate_percent`
/// (e.g. `5.0` for 5% a year) over `term_months` months.
///
/// Uses the standard fixed-payment annuity formula; a zero rate degrades
/// to an even split of the principal.
pub fn schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<Vec<ScheduleEntry>, BoardError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(BoardError::Validation(
            "principal must be a positive amount".to_string(),
        ));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(BoardError::Validation(
            "annual rate must not be negative".to_string(),
        ));
    }
    if term_months == 0 {
        return Err(BoardError::Validation(
            "term must be at least one month".to_string(),
        ));
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(BoardError::Validation(format!(
            "term must not exceed {MAX_TERM_MONTHS} months"
        )));
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / f64::from(term_months)
    } else {
        let growth = (1.0 + monthly_rate).powf(f64::from(term_months));
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let mut entries = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    for period in 1..=term_months {
        let interest = balance * monthly_rate;
        let principal_portion = payment - interest;
        balance -= principal_portion;
        if period == term_months {
            // Eliminate floating-point residue at the end of the schedule.
            balance = 0.0;
        }
        entries.push(ScheduleEntry {
            period,
            payment: round2(payment),
            principal_portion: round2(principal_portion),
            interest_portion: round2(interest),
            remaining_balance: round2(balance),
        });
    }
    Ok(entries)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
