use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::pricing::{normalize_price, PriceInput};
use crate::types::{with_metadata, ComputationOutput, Money, Months, RatePercent};

/// Nominal annual rate the site quotes every property at.
pub const DEFAULT_ANNUAL_RATE_PERCENT: RatePercent = dec!(9);
/// Tenure the calculator opens with.
pub const DEFAULT_TENURE_MONTHS: Months = 120;
/// Slider lower bound.
pub const MIN_TENURE_MONTHS: Months = 12;
/// Slider upper bound.
pub const MAX_TENURE_MONTHS: Months = 360;

const MONTHS_PER_YEAR_PERCENT: Decimal = dec!(1200);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Business constants for the calculator. Fixed per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub annual_rate_percent: RatePercent,
    pub default_tenure_months: Months,
    pub min_tenure_months: Months,
    pub max_tenure_months: Months,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            default_tenure_months: DEFAULT_TENURE_MONTHS,
            min_tenure_months: MIN_TENURE_MONTHS,
            max_tenure_months: MAX_TENURE_MONTHS,
        }
    }
}

/// What the buyer enters in the calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Advertised price, in whatever form the listing carries it
    pub price: PriceInput,
    /// Up-front payment; defaults to zero
    #[serde(default)]
    pub down_payment: Money,
    /// Repayment period in months; defaults to the calculator's opening value
    #[serde(default = "default_tenure")]
    pub tenure_months: Months,
}

fn default_tenure() -> Months {
    DEFAULT_TENURE_MONTHS
}

/// A computed installment. Transient: recomputed on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Normalized property price
    pub principal: Money,
    /// Down payment after normalization (never negative)
    pub down_payment: Money,
    /// max(principal - down_payment, 0)
    pub loan_amount: Money,
    pub tenure_months: Months,
    pub annual_rate_percent: RatePercent,
    /// Equated monthly installment, whole currency units
    pub monthly_installment: Money,
    /// monthly_installment * tenure_months
    pub total_payable: Money,
    /// total_payable - loan_amount, floored at zero
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amount left to finance once the down payment is taken off the price.
pub fn loan_amount(principal: Money, down_payment: Money) -> Money {
    match principal.checked_sub(down_payment) {
        Some(v) => v.max(Decimal::ZERO),
        None if down_payment < Decimal::ZERO => Decimal::MAX,
        None => Decimal::ZERO,
    }
}

/// Equated monthly installment for a fixed-rate amortizing loan.
///
/// `emi = L * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate,
/// rounded to the nearest whole unit. Returns zero whenever the loan amount,
/// the tenure or the rate is not positive, so the division never sees a zero
/// denominator. Total over its whole input domain.
pub fn compute_emi(
    principal: Money,
    down_payment: Money,
    tenure_months: Months,
    annual_rate_percent: RatePercent,
) -> Money {
    let loan = loan_amount(principal, down_payment);
    let monthly_rate = annual_rate_percent / MONTHS_PER_YEAR_PERCENT;

    if monthly_rate <= Decimal::ZERO || tenure_months <= 0 || loan <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let factor = annuity_factor(monthly_rate, tenure_months);
    let emi = loan.checked_mul(factor).unwrap_or(Decimal::MAX);

    emi.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Quote a loan at the default business terms.
pub fn quote_loan(input: &LoanQuoteInput) -> ComputationOutput<LoanQuote> {
    quote_loan_with_terms(input, &LoanTerms::default())
}

/// Quote a loan, reporting anything unusual about the inputs as warnings.
pub fn quote_loan_with_terms(
    input: &LoanQuoteInput,
    terms: &LoanTerms,
) -> ComputationOutput<LoanQuote> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let principal = normalize_price(&input.price);
    if principal.is_zero() {
        warnings.push(format!(
            "Price '{}' has no usable amount; quoting against zero",
            input.price
        ));
    }

    if input.down_payment < Decimal::ZERO {
        warnings.push(format!(
            "Negative down payment {} treated as zero",
            input.down_payment
        ));
    }
    let down_payment = input.down_payment.max(Decimal::ZERO);

    if down_payment > principal && !principal.is_zero() {
        warnings.push(format!(
            "Down payment {down_payment} exceeds price {principal}; nothing left to finance"
        ));
    }

    if input.tenure_months < terms.min_tenure_months
        || input.tenure_months > terms.max_tenure_months
    {
        warnings.push(format!(
            "Tenure of {} months is outside the offered {}-{} month range",
            input.tenure_months, terms.min_tenure_months, terms.max_tenure_months
        ));
    }

    let result = build_quote(principal, down_payment, input.tenure_months, terms);

    let assumptions = serde_json::json!({
        "annual_rate_percent": terms.annual_rate_percent.to_string(),
        "compounding": "monthly",
        "rounding": "nearest whole unit, halves away from zero",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Equated monthly installment (standard amortization formula)",
        &assumptions,
        warnings,
        elapsed,
        result,
    )
}

/// Calculator state while the detail view has it open. Each setter
/// recomputes and returns the fresh quote.
#[derive(Debug, Clone)]
pub struct EmiCalculator {
    terms: LoanTerms,
    price: PriceInput,
    principal: Money,
    down_payment: Money,
    tenure_months: Months,
}

impl EmiCalculator {
    pub fn new(price: &PriceInput) -> Self {
        Self::with_terms(price, LoanTerms::default())
    }

    pub fn with_terms(price: &PriceInput, terms: LoanTerms) -> Self {
        Self {
            price: price.clone(),
            principal: normalize_price(price),
            down_payment: Decimal::ZERO,
            tenure_months: terms.default_tenure_months,
            terms,
        }
    }

    /// Negative amounts are normalized to zero.
    pub fn set_down_payment(&mut self, amount: Money) -> LoanQuote {
        self.down_payment = amount.max(Decimal::ZERO);
        self.quote()
    }

    /// Moves the tenure slider; values snap to the slider's bounds.
    pub fn set_tenure(&mut self, months: Months) -> LoanQuote {
        self.tenure_months = months.clamp(self.terms.min_tenure_months, self.terms.max_tenure_months);
        self.quote()
    }

    pub fn quote(&self) -> LoanQuote {
        build_quote(self.principal, self.down_payment, self.tenure_months, &self.terms)
    }

    /// The current quote in the standard envelope, with the same warnings
    /// [`quote_loan_with_terms`] raises for these inputs.
    pub fn quote_output(&self) -> ComputationOutput<LoanQuote> {
        let input = LoanQuoteInput {
            price: self.price.clone(),
            down_payment: self.down_payment,
            tenure_months: self.tenure_months,
        };
        quote_loan_with_terms(&input, &self.terms)
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn build_quote(
    principal: Money,
    down_payment: Money,
    tenure_months: Months,
    terms: &LoanTerms,
) -> LoanQuote {
    let loan = loan_amount(principal, down_payment);
    let monthly_installment =
        compute_emi(principal, down_payment, tenure_months, terms.annual_rate_percent);

    let (total_payable, total_interest) = if monthly_installment.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let total = monthly_installment
            .checked_mul(Decimal::from(tenure_months))
            .unwrap_or(Decimal::MAX);
        (total, (total - loan).max(Decimal::ZERO))
    };

    LoanQuote {
        principal,
        down_payment,
        loan_amount: loan,
        tenure_months,
        annual_rate_percent: terms.annual_rate_percent,
        monthly_installment,
        total_payable,
        total_interest,
    }
}

/// `r * g / (g - 1)` where `g = (1 + r)^n`. Both `r` and `n` are positive.
///
/// When `g` leaves the decimal range the ratio `g / (g - 1)` has already
/// converged to 1, so the factor is `r`. The smallest positive rate the
/// decimal type carries still leaves `g > 1`, so `g - 1` is never zero.
fn annuity_factor(monthly_rate: Decimal, months: Months) -> Decimal {
    let Some(growth) = checked_growth(monthly_rate, months) else {
        return monthly_rate;
    };

    monthly_rate
        .checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(growth - Decimal::ONE))
        .unwrap_or(monthly_rate)
}

/// (1 + r)^n by square-and-multiply; `None` on overflow.
fn checked_growth(monthly_rate: Decimal, months: Months) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(monthly_rate)?;
    let mut remaining = months as u64;
    let mut acc = Decimal::ONE;

    while remaining > 0 {
        if remaining & 1 == 1 {
            acc = acc.checked_mul(base)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.checked_mul(base)?;
        }
    }

    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_listing_quote() {
        // 75 lakh over 10 years at 9%
        let emi = compute_emi(dec!(7500000), Decimal::ZERO, 120, dec!(9));
        assert_eq!(emi, dec!(95007));
    }

    #[test]
    fn test_growth_matches_repeated_multiplication() {
        let r = dec!(9) / MONTHS_PER_YEAR_PERCENT;
        let mut expected = Decimal::ONE;
        for _ in 0..37 {
            expected *= Decimal::ONE + r;
        }
        let growth = checked_growth(r, 37).unwrap();
        assert!((growth - expected).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_growth_overflow_is_none() {
        assert!(checked_growth(dec!(0.5), 1_000).is_none());
    }

    #[test]
    fn test_huge_tenure_converges_to_interest_only() {
        // g/(g-1) -> 1, so the installment is just a month's interest
        let emi = compute_emi(dec!(1200000), Decimal::ZERO, 1_000_000, dec!(12));
        assert_eq!(emi, dec!(12000));
    }

    #[test]
    fn test_vanishing_rate_tends_to_even_split() {
        // monthly rate of 1e-28, the smallest the decimal type carries; the
        // formula itself approaches L / n
        let emi = compute_emi(dec!(1200), Decimal::ZERO, 12, dec!(0.00000000000000000000000012));
        assert_eq!(emi, dec!(100));
    }

    #[test]
    fn test_smallest_rate_still_grows() {
        let r = dec!(0.0000000000000000000000000001);
        for n in [1, 2, 12, 120, 360, 100_000] {
            assert!(checked_growth(r, n).unwrap() > Decimal::ONE, "n = {n}");
        }
        // anything smaller is already zero once divided down to a monthly rate
        assert!((dec!(0.0000000000000000000000000001) / MONTHS_PER_YEAR_PERCENT).is_zero());
    }

    #[test]
    fn test_single_month_tenure() {
        // One payment: principal plus one month of interest
        let emi = compute_emi(dec!(120000), Decimal::ZERO, 1, dec!(12));
        assert_eq!(emi, dec!(121200));
    }

    #[test]
    fn test_negative_rate_is_zero() {
        assert_eq!(compute_emi(dec!(1000000), Decimal::ZERO, 120, dec!(-9)), Decimal::ZERO);
    }

    #[test]
    fn test_loan_amount_clamps() {
        assert_eq!(loan_amount(dec!(100), dec!(250)), Decimal::ZERO);
        assert_eq!(loan_amount(dec!(100), dec!(40)), dec!(60));
        assert_eq!(loan_amount(Decimal::MIN, Decimal::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_quote_totals() {
        let input = LoanQuoteInput {
            price: PriceInput::from("₹10,00,000"),
            down_payment: dec!(200000),
            tenure_months: 60,
        };
        let out = quote_loan(&input);
        let q = &out.result;
        assert_eq!(q.principal, dec!(1000000));
        assert_eq!(q.loan_amount, dec!(800000));
        assert_eq!(q.total_payable, q.monthly_installment * dec!(60));
        assert_eq!(q.total_interest, q.total_payable - dec!(800000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_quote_warns_on_oversized_down_payment() {
        let input = LoanQuoteInput {
            price: PriceInput::from("500000"),
            down_payment: dec!(600000),
            tenure_months: 120,
        };
        let out = quote_loan(&input);
        assert_eq!(out.result.loan_amount, Decimal::ZERO);
        assert_eq!(out.result.monthly_installment, Decimal::ZERO);
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("exceeds price")));
    }

    #[test]
    fn test_quote_normalizes_negative_down_payment() {
        let input = LoanQuoteInput {
            price: PriceInput::from("500000"),
            down_payment: dec!(-1000),
            tenure_months: 120,
        };
        let out = quote_loan(&input);
        assert_eq!(out.result.down_payment, Decimal::ZERO);
        assert_eq!(out.result.loan_amount, dec!(500000));
        assert!(out.warnings.iter().any(|w| w.contains("Negative down payment")));
    }

    #[test]
    fn test_quote_warns_outside_slider_range() {
        let input = LoanQuoteInput {
            price: PriceInput::from("500000"),
            down_payment: Decimal::ZERO,
            tenure_months: 6,
        };
        let out = quote_loan(&input);
        assert!(out.result.monthly_installment > Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("outside the offered")));
    }

    #[test]
    fn test_quote_warns_on_unusable_price() {
        for raw in ["on request", ""] {
            let out = quote_loan(&LoanQuoteInput {
                price: PriceInput::from(raw),
                down_payment: Decimal::ZERO,
                tenure_months: 120,
            });
            assert!(
                out.warnings.iter().any(|w| w.contains("no usable amount")),
                "price {raw:?}"
            );
            assert_eq!(out.result.monthly_installment, Decimal::ZERO);
            assert_eq!(out.result.total_payable, Decimal::ZERO);
            assert_eq!(out.result.total_interest, Decimal::ZERO);
        }
    }

    #[test]
    fn test_quote_input_defaults() {
        let input: LoanQuoteInput = serde_json::from_str(r#"{"price": "₹75,00,000"}"#).unwrap();
        assert_eq!(input.down_payment, Decimal::ZERO);
        assert_eq!(input.tenure_months, DEFAULT_TENURE_MONTHS);
    }

    #[test]
    fn test_calculator_session() {
        let mut calc = EmiCalculator::new(&PriceInput::from("₹75,00,000"));
        assert_eq!(calc.quote().tenure_months, 120);
        assert_eq!(calc.quote().monthly_installment, dec!(95007));

        let q = calc.set_down_payment(dec!(7500000));
        assert_eq!(q.monthly_installment, Decimal::ZERO);

        let q = calc.set_down_payment(dec!(-5));
        assert_eq!(q.down_payment, Decimal::ZERO);

        let q = calc.set_tenure(1_000);
        assert_eq!(q.tenure_months, MAX_TENURE_MONTHS);
        let q = calc.set_tenure(0);
        assert_eq!(q.tenure_months, MIN_TENURE_MONTHS);
    }

    #[test]
    fn test_calculator_output_carries_warnings() {
        let calc = EmiCalculator::new(&PriceInput::from("on request"));
        let out = calc.quote_output();
        assert_eq!(out.result, calc.quote());
        assert!(out.warnings.iter().any(|w| w.contains("no usable amount")));

        let mut calc = EmiCalculator::new(&PriceInput::from("500000"));
        calc.set_down_payment(dec!(600000));
        let out = calc.quote_output();
        assert_eq!(out.result.monthly_installment, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("exceeds price")));

        let mut calc = EmiCalculator::new(&PriceInput::from("₹75,00,000"));
        calc.set_tenure(240);
        let out = calc.quote_output();
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.tenure_months, 240);
    }
}
