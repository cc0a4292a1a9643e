use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use realty_core::format::{format_currency, format_inr};
use realty_core::pricing::normalize_price_str;
use realty_core::types::Currency;

/// Arguments for price normalization
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NormalizePriceArgs {
    /// Price as typed or displayed, e.g. "₹75,00,000"
    pub price: String,
}

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatCurrencyArgs {
    /// Amount to render
    pub amount: Decimal,

    /// ISO currency code; rupees use lakh/crore grouping
    #[arg(long, default_value = "INR")]
    pub currency: Currency,
}

pub fn run_normalize_price(args: NormalizePriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = normalize_price_str(&args.price);
    Ok(json!({
        "input": args.price,
        "amount": amount,
        "formatted": format_inr(amount),
    }))
}

pub fn run_format_currency(args: FormatCurrencyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "amount": args.amount,
        "currency": args.currency.symbol(),
        "formatted": format_currency(args.amount, &args.currency),
    }))
}
