use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// how the down payment was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum DownPayment {
    /// absolute dollar amount
    Amount(Money),
    /// fraction of the purchase price
    Percentage(Rate),
}

impl DownPayment {
    /// resolve to a dollar amount against the purchase price
    pub fn resolve(&self, price: Money) -> Money {
        match self {
            DownPayment::Amount(amount) => *amount,
            DownPayment::Percentage(rate) => price.apply_rate(*rate),
        }
    }
}

impl Default for DownPayment {
    fn default() -> Self {
        DownPayment::Amount(Money::ZERO)
    }
}

/// when the extra principal is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtraPaymentMode {
    /// added to every monthly payment
    #[default]
    Monthly,
    /// applied once, with the first payment
    OneTime,
}

/// fixed-rate loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub price: Money,
    pub down_payment: DownPayment,
    /// annual rate, e.g. `Rate::from_percentage(dec!(6.75))`
    pub annual_rate: Rate,
    pub term_years: u32,
}

impl LoanTerms {
    pub fn new(price: Money, down_payment: DownPayment, annual_rate: Rate, term_years: u32) -> Self {
        Self {
            price,
            down_payment,
            annual_rate,
            term_years,
        }
    }

    pub fn down_payment_amount(&self) -> Money {
        self.down_payment.resolve(self.price)
    }

    pub fn principal(&self) -> Money {
        self.price - self.down_payment_amount()
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// zero when the term does not fit in a month count
    pub fn term_months(&self) -> u32 {
        self.term_years.checked_mul(12).unwrap_or(0)
    }
}

/// property tax, insurance and HOA dues carried on top of P&I
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecurringCharges {
    pub annual_property_tax: Money,
    pub annual_insurance: Money,
    pub monthly_hoa: Money,
}

impl RecurringCharges {
    pub fn new(annual_property_tax: Money, annual_insurance: Money, monthly_hoa: Money) -> Self {
        Self {
            annual_property_tax,
            annual_insurance,
            monthly_hoa,
        }
    }

    pub fn monthly_tax(&self) -> Money {
        self.annual_property_tax / Decimal::from(12)
    }

    pub fn monthly_insurance(&self) -> Money {
        self.annual_insurance / Decimal::from(12)
    }

    pub fn has_negative(&self) -> bool {
        self.annual_property_tax.is_negative()
            || self.annual_insurance.is_negative()
            || self.monthly_hoa.is_negative()
    }
}

/// monthly payment and lifetime totals for a fixed-rate loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardPaymentResult {
    pub monthly_principal_and_interest: Money,
    pub monthly_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_hoa: Money,
    pub total_monthly_payment: Money,
    pub total_principal: Money,
    /// `P&I x term - principal`, not the sum of a rounded schedule
    pub total_interest_over_term: Money,
    pub total_paid_over_term: Money,
    pub monthly_rate: Rate,
    pub term_months: u32,
}

impl StandardPaymentResult {
    /// tax + insurance + HOA
    pub fn monthly_escrow(&self) -> Money {
        self.monthly_tax + self.monthly_insurance + self.monthly_hoa
    }

    /// P&I, tax, insurance and HOA with their share of the monthly total
    pub fn breakdown(&self) -> Vec<PaymentComponent> {
        let total = self.total_monthly_payment;
        [
            (ComponentKind::PrincipalAndInterest, self.monthly_principal_and_interest),
            (ComponentKind::Tax, self.monthly_tax),
            (ComponentKind::Insurance, self.monthly_insurance),
            (ComponentKind::Hoa, self.monthly_hoa),
        ]
        .into_iter()
        .map(|(kind, amount)| PaymentComponent {
            kind,
            amount,
            share: amount.share_of(total),
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    PrincipalAndInterest,
    Tax,
    Insurance,
    Hoa,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::PrincipalAndInterest => "P&I",
            ComponentKind::Tax => "Taxes",
            ComponentKind::Insurance => "Insurance",
            ComponentKind::Hoa => "HOA",
        }
    }
}

/// one slice of the monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentComponent {
    pub kind: ComponentKind,
    pub amount: Money,
    pub share: Rate,
}

/// inputs for projecting payoff with extra principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentScenario {
    /// original loan principal
    pub principal: Money,
    /// balance to simulate from; the principal when not supplied
    pub current_balance: Option<Money>,
    pub standard_monthly_payment: Money,
    pub monthly_rate: Rate,
    pub term_months: u32,
    pub extra_payment: Money,
    pub mode: ExtraPaymentMode,
    pub first_payment_date: Option<NaiveDate>,
}

impl ExtraPaymentScenario {
    /// scenario over the full principal of a computed standard payment
    pub fn from_standard(
        standard: &StandardPaymentResult,
        extra_payment: Money,
        mode: ExtraPaymentMode,
    ) -> Self {
        Self {
            principal: standard.total_principal,
            current_balance: None,
            standard_monthly_payment: standard.monthly_principal_and_interest,
            monthly_rate: standard.monthly_rate,
            term_months: standard.term_months,
            extra_payment,
            mode,
            first_payment_date: None,
        }
    }

    pub fn with_current_balance(mut self, balance: Money) -> Self {
        self.current_balance = Some(balance);
        self
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    pub fn starting_balance(&self) -> Money {
        self.current_balance.unwrap_or(self.principal)
    }
}

/// baseline vs accelerated payoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSimulationResult {
    pub baseline_months: u32,
    pub baseline_total_interest: Money,
    pub accelerated_months: u32,
    pub accelerated_total_interest: Money,
    /// never negative
    pub months_saved: u32,
    /// never negative
    pub interest_saved: Money,
    /// baseline stopped at the month cap with a balance outstanding
    pub baseline_capped: bool,
    pub accelerated_capped: bool,
    pub baseline_payoff_date: Option<NaiveDate>,
    pub accelerated_payoff_date: Option<NaiveDate>,
}

impl PayoffSimulationResult {
    pub fn time_saved(&self) -> PayoffDuration {
        PayoffDuration::from_months(self.months_saved)
    }
}

/// a month count split into years and months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PayoffDuration {
    pub years: u32,
    pub months: u32,
}

impl PayoffDuration {
    pub fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

impl fmt::Display for PayoffDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_months() == 0 {
            write!(f, "0 months")
        } else {
            write!(f, "{}y {}m", self.years, self.months)
        }
    }
}
