use chrono::{Months, NaiveDate};
use log::{debug, trace, warn};
use rust_decimal::{Decimal, MathematicalOps};

use crate::config::SimulationLimits;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, InputField, Result};
use crate::types::{LoanTerms, RecurringCharges, StandardPaymentResult};

/// one simulated month of the payoff ledger
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: Option<NaiveDate>,
    pub beginning_balance: Money,
    pub interest_portion: Money,
    /// principal retired this month, extra principal included
    pub principal_portion: Money,
    pub extra_principal: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

/// extra principal policy for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraPrincipal {
    None,
    Monthly(Money),
    OneTime(Money),
}

/// lazy month-by-month amortization of a balance at a fixed payment
///
/// Each step accrues `balance x rate`, then applies `payment - interest`
/// (plus any extra principal). A repayment that covers the whole balance
/// closes the loan. The schedule ends once the balance is at or below the
/// payoff tolerance, or when the month cap is reached, whichever is first.
/// A step whose arithmetic leaves the decimal range also ends the schedule;
/// the run then counts as capped.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    balance: Money,
    payment: Money,
    monthly_rate: Rate,
    extra: ExtraPrincipal,
    limits: SimulationLimits,
    first_payment_date: Option<NaiveDate>,
    month: u32,
    cumulative_interest: Money,
    overflowed: bool,
}

impl AmortizationSchedule {
    pub fn new(balance: Money, payment: Money, monthly_rate: Rate) -> Self {
        Self {
            balance,
            payment,
            monthly_rate,
            extra: ExtraPrincipal::None,
            limits: SimulationLimits::default(),
            first_payment_date: None,
            month: 0,
            cumulative_interest: Money::ZERO,
            overflowed: false,
        }
    }

    pub fn with_extra(mut self, extra: ExtraPrincipal) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_first_payment_date(mut self, date: Option<NaiveDate>) -> Self {
        self.first_payment_date = date;
        self
    }

    /// balance still owed after the months produced so far
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// the balance outgrew the decimal range and the schedule stopped early
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    fn extra_for_month(&self, payment_number: u32) -> Money {
        match self.extra {
            ExtraPrincipal::None => Money::ZERO,
            ExtraPrincipal::Monthly(amount) => amount,
            ExtraPrincipal::OneTime(amount) if payment_number == 1 => amount,
            ExtraPrincipal::OneTime(_) => Money::ZERO,
        }
    }

    /// drain the schedule into run totals
    pub fn summarize(mut self) -> ScheduleSummary {
        let max_months = self.limits.max_months;
        let tolerance = self.limits.payoff_tolerance;
        let mut summary = ScheduleSummary {
            months: 0,
            total_interest: Money::ZERO,
            final_balance: self.balance,
            last_payment_date: None,
            capped: false,
        };

        for entry in self.by_ref() {
            summary.months = entry.payment_number;
            summary.total_interest = entry.cumulative_interest;
            summary.final_balance = entry.ending_balance;
            summary.last_payment_date = entry.payment_date;
        }

        summary.capped =
            self.overflowed || (summary.months >= max_months && summary.final_balance > tolerance);
        summary
    }
}

impl Iterator for AmortizationSchedule {
    type Item = ScheduledPayment;

    fn next(&mut self) -> Option<ScheduledPayment> {
        if self.overflowed
            || self.balance <= self.limits.payoff_tolerance
            || self.month >= self.limits.max_months
        {
            return None;
        }

        let payment_number = self.month + 1;
        let beginning_balance = self.balance;
        let extra_principal = self.extra_for_month(payment_number);

        let step = beginning_balance.checked_apply_rate(self.monthly_rate).and_then(|interest| {
            let repayment = self.payment.checked_sub(interest)?.checked_add(extra_principal)?;
            let cumulative_interest = self.cumulative_interest.checked_add(interest)?;
            let (principal_portion, ending_balance) = if repayment >= beginning_balance {
                (beginning_balance, Money::ZERO)
            } else {
                (repayment, beginning_balance.checked_sub(repayment)?)
            };
            Some((interest, principal_portion, ending_balance, cumulative_interest))
        });

        let Some((interest, principal_portion, ending_balance, cumulative_interest)) = step else {
            warn!(
                "balance {} overflowed at month {}, stopping the schedule",
                beginning_balance, payment_number
            );
            self.overflowed = true;
            return None;
        };

        self.month = payment_number;
        self.balance = ending_balance;
        self.cumulative_interest = cumulative_interest;

        trace!(
            "month {}, interest {}, principal {}, balance {}",
            self.month,
            interest,
            principal_portion,
            ending_balance
        );

        let payment_date = self
            .first_payment_date
            .and_then(|first| first.checked_add_months(Months::new(self.month - 1)));

        Some(ScheduledPayment {
            payment_number: self.month,
            payment_date,
            beginning_balance,
            interest_portion: interest,
            principal_portion,
            extra_principal,
            ending_balance,
            cumulative_interest: self.cumulative_interest,
        })
    }
}

/// totals from running a schedule to completion
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    pub months: u32,
    pub total_interest: Money,
    pub final_balance: Money,
    pub last_payment_date: Option<NaiveDate>,
    /// stopped at the month cap, or on overflow, with a balance still owed
    pub capped: bool,
}

/// fixed-rate payment calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPaymentCalculator;

impl StandardPaymentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// monthly P&I, add-ons and term totals
    pub fn compute(
        &self,
        terms: &LoanTerms,
        charges: &RecurringCharges,
    ) -> Result<StandardPaymentResult> {
        if !terms.price.is_positive() {
            return Err(CalculatorError::invalid(InputField::Price));
        }

        let down_payment = terms.down_payment_amount();
        if down_payment.is_negative() || down_payment >= terms.price {
            return Err(CalculatorError::invalid(InputField::DownPayment));
        }

        let monthly_rate = terms.monthly_rate();
        let term_months = terms.term_months();
        if !monthly_rate.is_positive() || term_months == 0 {
            return Err(CalculatorError::invalid(InputField::RateOrTerm));
        }

        if charges.has_negative() {
            return Err(CalculatorError::invalid(InputField::Charges));
        }

        let principal = terms.price - down_payment;
        let monthly_pi = calculate_monthly_payment(principal, monthly_rate, term_months)?;

        let monthly_tax = charges.monthly_tax();
        let monthly_insurance = charges.monthly_insurance();
        let monthly_hoa = charges.monthly_hoa;
        let total_monthly_payment = monthly_pi + monthly_tax + monthly_insurance + monthly_hoa;

        let months = Decimal::from(term_months);
        let total_interest_over_term = monthly_pi
            .checked_mul(months)
            .and_then(|paid| paid.checked_sub(principal))
            .ok_or_else(|| CalculatorError::invalid(InputField::RateOrTerm))?;
        let total_paid_over_term = total_monthly_payment
            .checked_mul(months)
            .ok_or_else(|| CalculatorError::invalid(InputField::RateOrTerm))?;

        debug!(
            "standard payment: principal {}, rate {}, {} months -> P&I {}, total {}",
            principal, terms.annual_rate, term_months, monthly_pi, total_monthly_payment
        );

        Ok(StandardPaymentResult {
            monthly_principal_and_interest: monthly_pi,
            monthly_tax,
            monthly_insurance,
            monthly_hoa,
            total_monthly_payment,
            total_principal: principal,
            total_interest_over_term,
            total_paid_over_term,
            monthly_rate,
            term_months,
        })
    }
}

/// compute the standard payment for a loan
pub fn compute_standard_payment(
    terms: &LoanTerms,
    charges: &RecurringCharges,
) -> Result<StandardPaymentResult> {
    StandardPaymentCalculator::new().compute(terms, charges)
}

/// level payment that amortizes `principal` over `months` at `monthly_rate`
///
/// Fails with `RateOrTerm` when `(1 + r)^n` or the payment leaves the
/// decimal range, e.g. a multi-century term.
pub fn calculate_monthly_payment(principal: Money, monthly_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Ok(principal);
    }

    let r = monthly_rate.as_decimal();

    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let out_of_range = || CalculatorError::invalid(InputField::RateOrTerm);

    // P * x * r / (x - 1), x = (1 + r)^n
    let x = (Decimal::ONE + r)
        .checked_powu(u64::from(months))
        .ok_or_else(out_of_range)?;
    let growth = x - Decimal::ONE;
    if growth.is_zero() {
        return Err(out_of_range());
    }

    principal
        .as_decimal()
        .checked_mul(x)
        .and_then(|d| d.checked_mul(r))
        .and_then(|d| d.checked_div(growth))
        .map(Money::from_decimal)
        .ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DownPayment;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    fn reference_terms() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(525_000),
            DownPayment::Amount(Money::from_major(105_000)),
            Rate::from_percentage(dec!(6.75)),
            30,
        )
    }

    fn reference_charges() -> RecurringCharges {
        RecurringCharges::new(
            Money::from_major(6_300),
            Money::from_major(1_440),
            Money::from_major(250),
        )
    }

    #[test]
    fn test_reference_payment() {
        let result = compute_standard_payment(&reference_terms(), &reference_charges()).unwrap();

        assert_eq!(result.monthly_principal_and_interest.round_dp(2), Money::from_cents(272_411));
        assert_eq!(result.monthly_tax, Money::from_major(525));
        assert_eq!(result.monthly_insurance, Money::from_major(120));
        assert_eq!(result.monthly_hoa, Money::from_major(250));
        assert_eq!(result.total_monthly_payment.round_dp(2), Money::from_cents(361_911));
        assert_eq!(result.total_principal, Money::from_major(420_000));
        assert_eq!(result.term_months, 360);
        assert_eq!(result.monthly_escrow(), Money::from_major(895));
    }

    #[test]
    fn test_term_totals_use_closed_form() {
        let result = compute_standard_payment(&reference_terms(), &reference_charges()).unwrap();
        let months = Decimal::from(360);

        assert_eq!(
            result.total_interest_over_term,
            result.monthly_principal_and_interest * months - result.total_principal
        );
        assert_eq!(result.total_paid_over_term, result.total_monthly_payment * months);
        assert_eq!(result.total_interest_over_term.whole_dollars(), Money::from_major(560_680));
    }

    #[test]
    fn test_percentage_down_payment_gives_same_payment() {
        let by_amount = compute_standard_payment(&reference_terms(), &reference_charges()).unwrap();
        let terms = LoanTerms {
            down_payment: DownPayment::Percentage(Rate::from_percentage(dec!(20))),
            ..reference_terms()
        };
        let by_percent = compute_standard_payment(&terms, &reference_charges()).unwrap();

        assert_eq!(by_amount, by_percent);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let charges = RecurringCharges::default();

        let terms = LoanTerms { price: Money::ZERO, ..reference_terms() };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::Price));

        let terms = LoanTerms {
            down_payment: DownPayment::Amount(Money::from_major(525_000)),
            ..reference_terms()
        };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::DownPayment));

        let terms = LoanTerms {
            down_payment: DownPayment::Percentage(Rate::from_percentage(dec!(120))),
            ..reference_terms()
        };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::DownPayment));

        let terms = LoanTerms { price: Money::from_major(-1), ..reference_terms() };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::Price));

        let terms = LoanTerms { annual_rate: Rate::ZERO, ..reference_terms() };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));

        let terms = LoanTerms { annual_rate: Rate::from_percentage(dec!(-5)), ..reference_terms() };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));

        let terms = LoanTerms { term_years: 0, ..reference_terms() };
        let err = compute_standard_payment(&terms, &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));

        let charges = RecurringCharges { monthly_hoa: Money::from_major(-1), ..RecurringCharges::default() };
        let err = compute_standard_payment(&reference_terms(), &charges).unwrap_err();
        assert_eq!(err.field(), Some(InputField::Charges));
    }

    #[test]
    fn test_out_of_range_term_is_rejected() {
        let terms = LoanTerms::new(
            Money::from_major(300_000),
            DownPayment::Amount(Money::from_major(60_000)),
            Rate::from_percentage(dec!(6)),
            2_000,
        );
        let err = compute_standard_payment(&terms, &RecurringCharges::default()).unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));

        // years that do not fit in a month count
        let terms = LoanTerms { term_years: u32::MAX, ..terms };
        let err = compute_standard_payment(&terms, &RecurringCharges::default()).unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));

        let err = calculate_monthly_payment(
            Money::from_major(240_000),
            Rate::from_percentage(dec!(6)).monthly_rate(),
            24_000,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some(InputField::RateOrTerm));
    }

    #[test]
    fn test_breakdown_shares() {
        let result = compute_standard_payment(&reference_terms(), &reference_charges()).unwrap();
        let parts = result.breakdown();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].kind.label(), "P&I");
        assert_eq!(parts[3].amount, Money::from_major(250));

        let total_share: Decimal = parts.iter().map(|p| p.share.as_decimal()).sum();
        assert!((total_share - Decimal::ONE).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_pays_off_within_term() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(12)).monthly_rate();
        let payment = calculate_monthly_payment(principal, rate, 12).unwrap();

        let rows: Vec<ScheduledPayment> = AmortizationSchedule::new(principal, payment, rate).collect();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].beginning_balance, principal);
        assert_eq!(rows[0].interest_portion, Money::from_major(1_000));
        assert!(rows[11].ending_balance <= Money::CENT);

        // interest should decline each month
        for i in 1..rows.len() {
            assert!(rows[i].interest_portion < rows[i - 1].interest_portion);
        }
    }

    #[test]
    fn test_final_partial_period_closes_loan() {
        // payment far larger than balance: one month, balance to zero
        let rows: Vec<ScheduledPayment> = AmortizationSchedule::new(
            Money::from_major(500),
            Money::from_major(2_000),
            Rate::from_percentage(dec!(6)).monthly_rate(),
        )
        .collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal_portion, Money::from_major(500));
        assert_eq!(rows[0].ending_balance, Money::ZERO);
    }

    #[test]
    fn test_one_time_extra_only_first_month() {
        let principal = Money::from_major(50_000);
        let rate = Rate::from_percentage(dec!(6)).monthly_rate();
        let payment = calculate_monthly_payment(principal, rate, 120).unwrap();

        let rows: Vec<ScheduledPayment> = AmortizationSchedule::new(principal, payment, rate)
            .with_extra(ExtraPrincipal::OneTime(Money::from_major(5_000)))
            .collect();

        assert_eq!(rows[0].extra_principal, Money::from_major(5_000));
        assert!(rows[1..].iter().all(|r| r.extra_principal.is_zero()));
    }

    #[test]
    fn test_payment_dates_follow_calendar_months() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let rows: Vec<ScheduledPayment> = AmortizationSchedule::new(
            Money::from_major(10_000),
            Money::from_major(1_000),
            Rate::from_percentage(dec!(6)).monthly_rate(),
        )
        .with_first_payment_date(Some(first))
        .take(3)
        .collect();

        assert_eq!(rows[0].payment_date, Some(first));
        assert_eq!(rows[1].payment_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(rows[2].payment_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test_log::test]
    fn test_underpayment_stops_at_cap() {
        let summary = AmortizationSchedule::new(
            Money::from_major(580_000),
            Money::from_major(1_000),
            Rate::from_percentage(dec!(6.5)).monthly_rate(),
        )
        .summarize();

        assert_eq!(summary.months, 600);
        assert!(summary.capped);
        assert!(summary.final_balance > Money::from_major(580_000));
    }

    #[test_log::test]
    fn test_runaway_balance_stops_without_panic() {
        // 12.5% a month on a $100 payment: the balance outgrows the decimal range before month 600
        let mut schedule = AmortizationSchedule::new(
            Money::from_major(500_000),
            Money::from_major(100),
            Rate::from_percentage(dec!(150)).monthly_rate(),
        );
        let rows = schedule.by_ref().count() as u32;

        assert!(schedule.overflowed());
        assert!(rows < 600);
        assert_eq!(schedule.next(), None);

        let summary = AmortizationSchedule::new(
            Money::from_major(500_000),
            Money::from_major(100),
            Rate::from_percentage(dec!(150)).monthly_rate(),
        )
        .summarize();

        assert!(summary.capped);
        assert_eq!(summary.months, rows);
        assert!(summary.final_balance > Money::from_major(500_000));
    }

    #[test]
    fn test_custom_limits() {
        let limits = SimulationLimits {
            max_months: 24,
            ..SimulationLimits::default()
        };
        let summary = AmortizationSchedule::new(
            Money::from_major(100_000),
            Money::from_major(100),
            Rate::from_percentage(dec!(5)).monthly_rate(),
        )
        .with_limits(limits)
        .summarize();

        assert_eq!(summary.months, 24);
        assert!(summary.capped);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_level_payment_amortizes_principal(
            principal in 1_000i64..2_000_000,
            rate_bps in 1u32..1_500,
            term_years in 1u32..41
        ) {
            let principal = Money::from_major(principal);
            let rate = Rate::from_bps(rate_bps).monthly_rate();
            let months = term_years * 12;
            let payment = calculate_monthly_payment(principal, rate, months).unwrap();

            let summary = AmortizationSchedule::new(principal, payment, rate).summarize();

            prop_assert!(summary.months <= months);
            prop_assert!(summary.months + 1 >= months);
            prop_assert!(summary.final_balance <= Money::CENT);
            prop_assert!(!summary.capped);
        }
    }
}
