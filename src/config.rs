use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::types::{DownPayment, ExtraPaymentMode, LoanTerms, RecurringCharges};

/// hard upper bound on simulated months (50 years)
pub const MAX_SIMULATION_MONTHS: u32 = 600;

/// bounds on the payoff simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    /// months simulated before giving up on a non-converging loan
    pub max_months: u32,
    /// balance at or below which the loan counts as paid off
    pub payoff_tolerance: Money,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            max_months: MAX_SIMULATION_MONTHS,
            payoff_tolerance: Money::CENT,
        }
    }
}

impl SimulationLimits {
    pub fn validate(&self) -> Result<()> {
        if self.max_months == 0 || self.max_months > MAX_SIMULATION_MONTHS {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!(
                    "max_months must be between 1 and {}, got {}",
                    MAX_SIMULATION_MONTHS, self.max_months
                ),
            });
        }

        if self.payoff_tolerance.is_negative() {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("payoff_tolerance must not be negative, got {}", self.payoff_tolerance),
            });
        }

        Ok(())
    }
}

/// one complete calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    pub loan: LoanTerms,
    #[serde(default)]
    pub charges: RecurringCharges,
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default)]
    pub extra_payment_mode: ExtraPaymentMode,
    /// simulate from this balance instead of the original principal
    #[serde(default)]
    pub current_balance: Option<Money>,
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub limits: SimulationLimits,
}

impl MortgageConfig {
    pub fn new(loan: LoanTerms) -> Self {
        Self {
            loan,
            charges: RecurringCharges::default(),
            extra_payment: Money::ZERO,
            extra_payment_mode: ExtraPaymentMode::Monthly,
            current_balance: None,
            first_payment_date: None,
            limits: SimulationLimits::default(),
        }
    }

    /// $525k home, 20% down, 6.75% over 30 years with typical add-ons
    pub fn sample() -> Self {
        let loan = LoanTerms::new(
            Money::from_major(525_000),
            DownPayment::Amount(Money::from_major(105_000)),
            Rate::from_percentage(dec!(6.75)),
            30,
        );

        Self {
            charges: RecurringCharges::new(
                Money::from_major(6_300),
                Money::from_major(1_440),
                Money::from_major(250),
            ),
            ..Self::new(loan)
        }
    }

    pub fn with_charges(mut self, charges: RecurringCharges) -> Self {
        self.charges = charges;
        self
    }

    pub fn with_extra_payment(mut self, amount: Money, mode: ExtraPaymentMode) -> Self {
        self.extra_payment = amount;
        self.extra_payment_mode = mode;
        self
    }

    pub fn with_current_balance(mut self, balance: Money) -> Self {
        self.current_balance = Some(balance);
        self
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// configuration-level checks; loan inputs are validated by the calculators
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: MortgageConfig =
            serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalculatorError::InvalidConfiguration {
            message: e.to_string(),
        })
    }
}
