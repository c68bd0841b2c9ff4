/// extra payments - monthly vs one-time extra principal
use mortgage_calc_rs::{
    compute_standard_payment, simulate_payoff, DownPayment, ExtraPaymentMode, ExtraPaymentScenario,
    LoanTerms, Money, Rate, RecurringCharges,
};
use rust_decimal_macros::dec;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let terms = LoanTerms::new(
        Money::from_major(600_000),
        DownPayment::Amount(Money::from_major(120_000)),
        Rate::from_percentage(dec!(6.5)),
        30,
    );
    let standard = compute_standard_payment(&terms, &RecurringCharges::default())?;
    println!("P&I: ${}", standard.monthly_principal_and_interest.round_dp(2));

    for mode in [ExtraPaymentMode::Monthly, ExtraPaymentMode::OneTime] {
        for extra in [100, 500, 10_000] {
            let scenario = ExtraPaymentScenario::from_standard(&standard, Money::from_major(extra), mode);
            let result = simulate_payoff(&scenario)?;
            println!(
                "{:?} ${:>6}: paid off in {} months, {} sooner, ${} interest saved",
                mode,
                extra,
                result.accelerated_months,
                result.time_saved(),
                result.interest_saved.whole_dollars()
            );
        }
    }

    // refinanced balance higher than the payment can carry: baseline hits the cap
    let scenario = ExtraPaymentScenario::from_standard(&standard, Money::from_major(500), ExtraPaymentMode::Monthly)
        .with_current_balance(Money::from_major(580_000));
    let result = simulate_payoff(&scenario)?;
    println!(
        "balance $580,000: baseline {} months (capped: {}), accelerated {} months",
        result.baseline_months, result.baseline_capped, result.accelerated_months
    );

    Ok(())
}
