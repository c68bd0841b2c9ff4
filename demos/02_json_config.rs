/// json config - load a calculation request and print the report
use mortgage_calc_rs::MortgageCalculator;

const CONFIG: &str = r#"{
    "loan": {
        "price": "450000",
        "down_payment": { "mode": "percentage", "value": "0.1" },
        "annual_rate": "0.0625",
        "term_years": 30
    },
    "charges": {
        "annual_property_tax": "5400",
        "annual_insurance": "1200",
        "monthly_hoa": "0"
    },
    "extra_payment": "300",
    "extra_payment_mode": "monthly",
    "first_payment_date": "2025-02-01"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = MortgageCalculator::from_json(CONFIG)?;
    println!("{}", calculator.json()?);
    Ok(())
}
