/// schedule - walk the month-by-month ledger
use chrono::NaiveDate;
use mortgage_calc_rs::{ExtraPaymentMode, Money, MortgageCalculator, MortgageConfig, Run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = MortgageConfig::sample()
        .with_extra_payment(Money::from_major(20_000), ExtraPaymentMode::OneTime)
        .with_first_payment_date(NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?);
    let calculator = MortgageCalculator::new(config)?;

    println!("first year, accelerated:");
    for row in calculator.schedule(Run::Accelerated)?.take(12) {
        println!(
            "#{:>3} {} interest ${:>8} principal ${:>9} balance ${:>10}",
            row.payment_number,
            row.payment_date.map(|d| d.to_string()).unwrap_or_default(),
            row.interest_portion.round_dp(2),
            row.principal_portion.round_dp(2),
            row.ending_balance.round_dp(2)
        );
    }

    let payoff = calculator.payoff()?;
    println!(
        "payoff moves from {:?} to {:?} ({} sooner)",
        payoff.baseline_payoff_date,
        payoff.accelerated_payoff_date,
        payoff.time_saved()
    );

    Ok(())
}
