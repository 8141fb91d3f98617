use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use estate_finance_core::loan::amortization::{self, AmortizationInput};
use estate_finance_core::loan::eligibility::{self, EligibilityInput};
use estate_finance_core::loan::emi::{self, LoanRequest};
use estate_finance_core::loan::property_emi::{self, PropertyEmiInput};

use crate::config::CliConfig;
use crate::input;

/// Arguments for a plain loan EMI
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for financing a specific property
#[derive(Args)]
pub struct PropertyEmiArgs {
    /// Property price in lakhs
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment as a percentage of price
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a month-by-month repayment schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Loan principal in rupees
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Disbursement date (YYYY-MM-DD) to date each installment
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Print only the yearly summary
    #[arg(long)]
    pub yearly: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for loan eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Net monthly income in rupees
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Existing monthly EMIs in rupees
    #[arg(long, default_value = "0")]
    pub obligations: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let request = match input::read_typed::<LoanRequest>(args.input.as_deref())? {
        Some(req) => req,
        None => loan_from_flags(args.principal, args.rate, args.tenure, config)?,
    };
    let result = emi::calculate_emi(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_property_emi(
    args: PropertyEmiArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pe_input = match input::read_typed::<PropertyEmiInput>(args.input.as_deref())? {
        Some(i) => i,
        None => PropertyEmiInput {
            property_price_lakhs: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            down_payment_percent: args
                .down_payment
                .unwrap_or(config.loan.down_payment_percent),
            annual_rate_percent: args.rate.unwrap_or(config.loan.annual_rate_percent),
            tenure_years: args.tenure.unwrap_or(config.loan.tenure_years),
        },
    };
    let result = property_emi::calculate_property_emi(&pe_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(
    args: AmortizationArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let am_input = match input::read_typed::<AmortizationInput>(args.input.as_deref())? {
        Some(i) => i,
        None => AmortizationInput {
            loan: loan_from_flags(args.principal, args.rate, args.tenure, config)?,
            start_date: args.start_date,
        },
    };
    let result = amortization::build_amortization_schedule(&am_input)?;
    if args.yearly {
        return Ok(serde_json::json!({ "results": result.result.yearly }));
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_eligibility(
    args: EligibilityArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let el_input = match input::read_typed::<EligibilityInput>(args.input.as_deref())? {
        Some(i) => i,
        None => EligibilityInput {
            monthly_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            existing_obligations: args.obligations,
            annual_rate_percent: args.rate.unwrap_or(config.loan.annual_rate_percent),
            tenure_years: args.tenure.unwrap_or(config.loan.tenure_years),
        },
    };
    let result = eligibility::calculate_eligibility(&el_input)?;
    Ok(serde_json::to_value(result)?)
}

fn loan_from_flags(
    principal: Option<Decimal>,
    rate: Option<Decimal>,
    tenure: Option<u32>,
    config: &CliConfig,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    Ok(LoanRequest {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: rate.unwrap_or(config.loan.annual_rate_percent),
        tenure_years: tenure.unwrap_or(config.loan.tenure_years),
    })
}
