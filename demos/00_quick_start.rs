/// quick start - standard payment for a $525k home
use mortgage_calc_rs::{compute_standard_payment, DownPayment, LoanTerms, Money, Rate, RecurringCharges};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::new(
        Money::from_major(525_000),
        DownPayment::Percentage(Rate::from_percentage(dec!(20))),
        Rate::from_percentage(dec!(6.75)),
        30,
    );
    let charges = RecurringCharges::new(
        Money::from_major(6_300),
        Money::from_major(1_440),
        Money::from_major(250),
    );

    let result = compute_standard_payment(&terms, &charges)?;

    println!("monthly payment: ${}", result.total_monthly_payment.whole_dollars());
    for part in result.breakdown() {
        println!(
            "  {:<10} ${:>6} ({}%)",
            part.kind.label(),
            part.amount.whole_dollars(),
            part.share.as_percentage().round_dp(1)
        );
    }
    println!("total interest: ${}", result.total_interest_over_term.whole_dollars());
    println!("total paid: ${}", result.total_paid_over_term.whole_dollars());

    Ok(())
}
