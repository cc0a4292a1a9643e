use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use realty_core::emi::{self, LoanQuoteInput, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_TENURE_MONTHS};
use realty_core::format;
use realty_core::pricing::{self, PriceInput};
use realty_core::types::{Currency, Money, Months, RatePercent};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Plain amount from a displayed price, as a decimal string.
#[napi]
pub fn normalize_price(raw: String) -> String {
    pricing::normalize_price_str(&raw).to_string()
}

#[napi]
pub fn format_currency(amount: String, currency: Option<String>) -> NapiResult<String> {
    let amount = Decimal::from_str(amount.trim()).map_err(to_napi_error)?;
    let currency = match currency {
        Some(code) => Currency::from_str(&code).map_err(to_napi_error)?,
        None => Currency::INR,
    };
    Ok(format::format_currency(amount, &currency))
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EmiRequest {
    principal: PriceInput,
    #[serde(default)]
    down_payment: Money,
    #[serde(default = "default_tenure")]
    tenure_months: Months,
    #[serde(default = "default_rate")]
    annual_rate_percent: RatePercent,
}

fn default_tenure() -> Months {
    DEFAULT_TENURE_MONTHS
}

fn default_rate() -> RatePercent {
    DEFAULT_ANNUAL_RATE_PERCENT
}

#[derive(Serialize)]
struct EmiReply {
    monthly_installment: Money,
    display: String,
}

/// Bare instalment for `{principal, down_payment?, tenure_months?, annual_rate_percent?}`.
#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: EmiRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let monthly_installment = emi::compute_emi(
        pricing::normalize_price(&input.principal),
        input.down_payment,
        input.tenure_months,
        input.annual_rate_percent,
    );
    let reply = EmiReply {
        monthly_installment,
        display: format::format_inr(monthly_installment),
    };
    serde_json::to_string(&reply).map_err(to_napi_error)
}

/// Full quote with totals and warnings at the site's terms.
#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: LoanQuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi::quote_loan(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}
