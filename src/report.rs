//! serializable summary of one calculation
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::MortgageConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::types::{
    ExtraPaymentMode, PaymentComponent, PayoffSimulationResult, StandardPaymentResult,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct MortgageReport {
    pub loan: LoanView,
    pub monthly: MonthlyView,
    pub term: TermView,
    pub breakdown: Vec<PaymentComponent>,
    pub payoff: PayoffView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub price: Money,
    pub down_payment: Money,
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyView {
    pub principal_and_interest: Money,
    pub tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    pub taxes_and_fees: Money,
    pub total: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermView {
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayoffView {
    pub extra_payment: Money,
    pub mode: ExtraPaymentMode,
    pub baseline_months: u32,
    pub accelerated_months: u32,
    pub baseline_total_interest: Money,
    pub accelerated_total_interest: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
    /// e.g. "9y 5m"
    pub time_saved: String,
    pub baseline_capped: bool,
    pub accelerated_capped: bool,
    pub baseline_payoff_date: Option<NaiveDate>,
    pub accelerated_payoff_date: Option<NaiveDate>,
}

impl MortgageReport {
    pub fn build(
        config: &MortgageConfig,
        standard: &StandardPaymentResult,
        payoff: &PayoffSimulationResult,
    ) -> Self {
        let loan = &config.loan;

        MortgageReport {
            loan: LoanView {
                price: loan.price,
                down_payment: loan.down_payment_amount(),
                principal: standard.total_principal,
                annual_rate: loan.annual_rate,
                term_years: loan.term_years,
            },
            monthly: MonthlyView {
                principal_and_interest: standard.monthly_principal_and_interest,
                tax: standard.monthly_tax,
                insurance: standard.monthly_insurance,
                hoa: standard.monthly_hoa,
                taxes_and_fees: standard.monthly_escrow(),
                total: standard.total_monthly_payment,
            },
            term: TermView {
                total_principal: standard.total_principal,
                total_interest: standard.total_interest_over_term,
                total_paid: standard.total_paid_over_term,
            },
            breakdown: standard.breakdown(),
            payoff: PayoffView {
                extra_payment: config.extra_payment,
                mode: config.extra_payment_mode,
                baseline_months: payoff.baseline_months,
                accelerated_months: payoff.accelerated_months,
                baseline_total_interest: payoff.baseline_total_interest,
                accelerated_total_interest: payoff.accelerated_total_interest,
                interest_saved: payoff.interest_saved,
                months_saved: payoff.months_saved,
                time_saved: payoff.time_saved().to_string(),
                baseline_capped: payoff.baseline_capped,
                accelerated_capped: payoff.accelerated_capped,
                baseline_payoff_date: payoff.baseline_payoff_date,
                accelerated_payoff_date: payoff.accelerated_payoff_date,
            },
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalculatorError::CalculationError {
            message: e.to_string(),
        })
    }
}
