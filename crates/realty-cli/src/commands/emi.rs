use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use realty_core::emi::{self, LoanQuote, LoanQuoteInput, DEFAULT_TENURE_MONTHS};
use realty_core::format::{format_inr, format_price_display};
use realty_core::models::Property;
use realty_core::types::{ComputationOutput, Months};

use crate::context::Context;
use crate::input;

/// Arguments for the loan calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price, plain (7500000) or as displayed (₹75,00,000)
    #[arg(long)]
    pub price: Option<String>,

    /// Quote against a listing's price instead of --price
    #[arg(long, conflicts_with = "price")]
    pub property: Option<String>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long)]
    pub tenure: Option<Months>,
}

pub fn run_emi(args: EmiArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(id) = args.property.as_deref() {
        return run_listing_emi(id, &args, ctx);
    }

    let quote_input: LoanQuoteInput = match input::load_payload(args.input.as_deref())? {
        Some(payload) => payload,
        None => LoanQuoteInput {
            price: args
                .price
                .ok_or("--price is required (or provide --input / --property)")?
                .into(),
            down_payment: args.down_payment.unwrap_or(Decimal::ZERO),
            tenure_months: args.tenure.unwrap_or(DEFAULT_TENURE_MONTHS),
        },
    };

    quote_value(&emi::quote_loan(&quote_input))
}

/// Serialize a quote envelope with the display fields added, logging its
/// warnings.
pub(crate) fn quote_value(
    output: &ComputationOutput<LoanQuote>,
) -> Result<Value, Box<dyn std::error::Error>> {
    for warning in &output.warnings {
        tracing::warn!(%warning, "loan quote");
    }

    let mut value = serde_json::to_value(output)?;
    if let Some(result) = value.get_mut("result") {
        add_display_fields(result, &output.result);
    }
    Ok(value)
}

/// The listing page's calculator: starts at the listing price with no down
/// payment and the default tenure, then applies the adjustments given.
fn run_listing_emi(
    id: &str,
    args: &EmiArgs,
    ctx: &Context,
) -> Result<Value, Box<dyn std::error::Error>> {
    let property = ctx.public_client()?.get_property(id)?;
    let mut calculator = property.emi_calculator();

    if let Some(down) = args.down_payment {
        calculator.set_down_payment(down);
    }
    if let Some(tenure) = args.tenure {
        calculator.set_tenure(tenure);
    }
    listing_quote_value(&property, &calculator.quote_output())
}

fn listing_quote_value(
    property: &Property,
    output: &ComputationOutput<LoanQuote>,
) -> Result<Value, Box<dyn std::error::Error>> {
    tracing::debug!(
        property = %property.id,
        tenure = output.result.tenure_months,
        "listing quote"
    );

    let mut value = quote_value(output)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "property".into(),
            json!({
                "_id": property.id,
                "title": property.title,
                "price_display": format_price_display(property.price.as_ref()),
            }),
        );
    }
    Ok(value)
}

fn add_display_fields(target: &mut Value, quote: &LoanQuote) {
    if let Value::Object(map) = target {
        map.insert(
            "monthly_installment_display".into(),
            Value::String(format_inr(quote.monthly_installment)),
        );
        map.insert(
            "loan_amount_display".into(),
            Value::String(format_inr(quote.loan_amount)),
        );
    }
}
