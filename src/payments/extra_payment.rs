use std::fmt;

use log::{debug, warn};

use crate::config::SimulationLimits;
use crate::decimal::Money;
use crate::errors::{CalculatorError, InputField, Result};
use crate::types::{ExtraPaymentMode, ExtraPaymentScenario, PayoffSimulationResult};

use super::amortization::{AmortizationSchedule, ExtraPrincipal, ScheduleSummary};

/// which of the two payoff projections to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// standard payment only
    Baseline,
    /// standard payment plus the scenario's extra principal
    Accelerated,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Run::Baseline => write!(f, "baseline"),
            Run::Accelerated => write!(f, "accelerated"),
        }
    }
}

/// projects payoff with and without extra principal
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraPaymentSimulator {
    limits: SimulationLimits,
}

impl ExtraPaymentSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SimulationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SimulationLimits {
        self.limits
    }

    /// run baseline and accelerated schedules and compare them
    pub fn simulate(&self, scenario: &ExtraPaymentScenario) -> Result<PayoffSimulationResult> {
        validate_scenario(scenario)?;

        let baseline = self.run(scenario, Run::Baseline);
        let accelerated = self.run(scenario, Run::Accelerated);

        let interest_saved = (baseline.total_interest - accelerated.total_interest).max(Money::ZERO);
        let months_saved = baseline.months.saturating_sub(accelerated.months);

        debug!(
            "payoff: baseline {} months / {} interest, accelerated {} months / {} interest",
            baseline.months, baseline.total_interest, accelerated.months, accelerated.total_interest
        );

        Ok(PayoffSimulationResult {
            baseline_months: baseline.months,
            baseline_total_interest: baseline.total_interest,
            accelerated_months: accelerated.months,
            accelerated_total_interest: accelerated.total_interest,
            months_saved,
            interest_saved,
            baseline_capped: baseline.capped,
            accelerated_capped: accelerated.capped,
            baseline_payoff_date: baseline.last_payment_date,
            accelerated_payoff_date: accelerated.last_payment_date,
        })
    }

    /// month-by-month ledger for either run; call again to restart
    pub fn schedule(&self, scenario: &ExtraPaymentScenario, run: Run) -> Result<AmortizationSchedule> {
        validate_scenario(scenario)?;
        Ok(self.build_schedule(scenario, run))
    }

    fn build_schedule(&self, scenario: &ExtraPaymentScenario, run: Run) -> AmortizationSchedule {
        let extra = match (run, scenario.mode) {
            (Run::Baseline, _) => ExtraPrincipal::None,
            (Run::Accelerated, ExtraPaymentMode::Monthly) => ExtraPrincipal::Monthly(scenario.extra_payment),
            (Run::Accelerated, ExtraPaymentMode::OneTime) => ExtraPrincipal::OneTime(scenario.extra_payment),
        };

        AmortizationSchedule::new(
            scenario.starting_balance(),
            scenario.standard_monthly_payment,
            scenario.monthly_rate,
        )
        .with_extra(extra)
        .with_limits(self.limits)
        .with_first_payment_date(scenario.first_payment_date)
    }

    fn run(&self, scenario: &ExtraPaymentScenario, run: Run) -> ScheduleSummary {
        let summary = self.build_schedule(scenario, run).summarize();
        if summary.capped {
            warn!(
                "{} run stopped after {} of {} months with {} outstanding",
                run, summary.months, self.limits.max_months, summary.final_balance
            );
        }
        summary
    }
}

fn validate_scenario(scenario: &ExtraPaymentScenario) -> Result<()> {
    if !scenario.principal.is_positive() {
        return Err(CalculatorError::invalid(InputField::Price));
    }

    if !scenario.monthly_rate.is_positive() || scenario.term_months == 0 {
        return Err(CalculatorError::invalid(InputField::RateOrTerm));
    }

    if !scenario.starting_balance().is_positive()
        || !scenario.standard_monthly_payment.is_positive()
        || scenario.extra_payment.is_negative()
    {
        return Err(CalculatorError::invalid(InputField::Scenario));
    }

    Ok(())
}

/// simulate payoff with default limits
pub fn simulate_payoff(scenario: &ExtraPaymentScenario) -> Result<PayoffSimulationResult> {
    ExtraPaymentSimulator::new().simulate(scenario)
}
