pub mod amortization;
pub mod extra_payment;

pub use amortization::{
    calculate_monthly_payment, compute_standard_payment, AmortizationSchedule, ExtraPrincipal,
    ScheduleSummary, ScheduledPayment, StandardPaymentCalculator,
};
pub use extra_payment::{simulate_payoff, ExtraPaymentSimulator, Run};
