pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod report;
pub mod types;

// re-export key types
pub use calculator::MortgageCalculator;
pub use config::{MortgageConfig, SimulationLimits, MAX_SIMULATION_MONTHS};
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, InputField, Result};
pub use payments::{
    calculate_monthly_payment, compute_standard_payment, simulate_payoff, AmortizationSchedule,
    ExtraPaymentSimulator, ExtraPrincipal, Run, ScheduledPayment, StandardPaymentCalculator,
};
pub use report::MortgageReport;
pub use types::{
    ComponentKind, DownPayment, ExtraPaymentMode, ExtraPaymentScenario, LoanTerms,
    PaymentComponent, PayoffDuration, PayoffSimulationResult, RecurringCharges,
    StandardPaymentResult,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
