use log::info;

use crate::config::MortgageConfig;
use crate::errors::Result;
use crate::payments::{
    AmortizationSchedule, ExtraPaymentSimulator, Run, StandardPaymentCalculator,
};
use crate::report::MortgageReport;
use crate::types::{ExtraPaymentScenario, PayoffSimulationResult, StandardPaymentResult};

/// runs both calculators off one configuration
///
/// Nothing is cached: every call recomputes from the config, so a caller
/// reacting to input changes simply builds a new calculator and keeps the
/// latest result.
#[derive(Debug, Clone)]
pub struct MortgageCalculator {
    config: MortgageConfig,
    payments: StandardPaymentCalculator,
    simulator: ExtraPaymentSimulator,
}

impl MortgageCalculator {
    pub fn new(config: MortgageConfig) -> Result<Self> {
        config.validate()?;
        let simulator = ExtraPaymentSimulator::with_limits(config.limits);

        Ok(Self {
            config,
            payments: StandardPaymentCalculator::new(),
            simulator,
        })
    }

    /// parse, validate and wrap a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(MortgageConfig::from_json(json)?)
    }

    pub fn config(&self) -> &MortgageConfig {
        &self.config
    }

    pub fn standard_payment(&self) -> Result<StandardPaymentResult> {
        self.payments.compute(&self.config.loan, &self.config.charges)
    }

    /// extra-payment scenario derived from the config and its standard payment
    pub fn scenario(&self) -> Result<ExtraPaymentScenario> {
        let standard = self.standard_payment()?;
        Ok(self.scenario_for(&standard))
    }

    fn scenario_for(&self, standard: &StandardPaymentResult) -> ExtraPaymentScenario {
        let mut scenario = ExtraPaymentScenario::from_standard(
            standard,
            self.config.extra_payment,
            self.config.extra_payment_mode,
        );
        scenario.current_balance = self.config.current_balance;
        scenario.first_payment_date = self.config.first_payment_date;
        scenario
    }

    pub fn payoff(&self) -> Result<PayoffSimulationResult> {
        self.simulator.simulate(&self.scenario()?)
    }

    /// month-by-month ledger of the baseline or accelerated run
    pub fn schedule(&self, run: Run) -> Result<AmortizationSchedule> {
        self.simulator.schedule(&self.scenario()?, run)
    }

    pub fn report(&self) -> Result<MortgageReport> {
        let standard = self.standard_payment()?;
        let payoff = self.simulator.simulate(&self.scenario_for(&standard))?;

        info!(
            "mortgage report: total monthly {}, {} saved with {} extra ({:?})",
            standard.total_monthly_payment.whole_dollars(),
            payoff.time_saved(),
            self.config.extra_payment,
            self.config.extra_payment_mode
        );

        Ok(MortgageReport::build(&self.config, &standard, &payoff))
    }

    /// pretty JSON of the full report
    pub fn json(&self) -> Result<String> {
        self.report()?.to_json_pretty()
    }
}
