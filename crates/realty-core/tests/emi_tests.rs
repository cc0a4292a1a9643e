use realty_core::emi::{self, compute_emi, LoanQuoteInput, DEFAULT_ANNUAL_RATE_PERCENT};
use realty_core::format::format_inr;
use realty_core::pricing::{normalize_price, normalize_price_str, PriceInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PRINCIPALS: [Decimal; 5] = [dec!(1), dec!(250000), dec!(1000000), dec!(7500000), dec!(125000000)];
const DOWN_PAYMENTS: [Decimal; 4] = [dec!(0), dec!(50000), dec!(999999), dec!(20000000)];
const RATES: [Decimal; 4] = [dec!(0.5), dec!(7.25), dec!(9), dec!(18)];

// ===========================================================================
// Guard clauses
// ===========================================================================

#[test]
fn test_zero_tenure_is_zero_for_any_loan() {
    for p in PRINCIPALS {
        for d in DOWN_PAYMENTS {
            for r in RATES {
                assert_eq!(compute_emi(p, d, 0, r), Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_zero_rate_is_zero_for_any_loan() {
    for p in PRINCIPALS {
        for d in DOWN_PAYMENTS {
            for n in [1, 12, 120, 360] {
                assert_eq!(compute_emi(p, d, n, Decimal::ZERO), Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_negative_tenure_guarded() {
    assert_eq!(compute_emi(dec!(1000000), Decimal::ZERO, -5, dec!(9)), Decimal::ZERO);
    assert_eq!(compute_emi(dec!(1000000), Decimal::ZERO, i64::MIN, dec!(9)), Decimal::ZERO);
}

#[test]
fn test_down_payment_equal_to_price() {
    assert_eq!(compute_emi(dec!(1000000), dec!(1000000), 120, dec!(9)), Decimal::ZERO);
}

#[test]
fn test_oversized_down_payment_clamps_to_zero_loan() {
    for p in PRINCIPALS {
        for n in [12, 120, 360] {
            let over = compute_emi(p, p + dec!(1), n, dec!(9));
            let exact = compute_emi(p, p, n, dec!(9));
            assert_eq!(over, exact);
            assert_eq!(over, Decimal::ZERO);
        }
    }
}

// ===========================================================================
// Shape of the result
// ===========================================================================

#[test]
fn test_non_negative_whole_units() {
    for p in PRINCIPALS {
        for d in DOWN_PAYMENTS {
            for r in RATES {
                for n in [-12, 0, 1, 7, 12, 120, 240, 360, 5000] {
                    let emi = compute_emi(p, d, n, r);
                    assert!(emi >= Decimal::ZERO, "negative EMI for {p} {d} {n} {r}");
                    assert_eq!(emi, emi.trunc(), "fractional EMI {emi} for {p} {d} {n} {r}");
                }
            }
        }
    }
}

#[test]
fn test_longer_tenure_never_costs_more_per_month() {
    for p in PRINCIPALS {
        for r in RATES {
            let mut previous = compute_emi(p, Decimal::ZERO, 1, r);
            for n in 2..=360 {
                let emi = compute_emi(p, Decimal::ZERO, n, r);
                assert!(
                    emi <= previous,
                    "EMI rose from {previous} to {emi} at {n} months (p={p}, r={r})"
                );
                previous = emi;
            }
        }
    }
}

#[test]
fn test_deterministic() {
    let a = compute_emi(dec!(4321000), dec!(321000), 180, DEFAULT_ANNUAL_RATE_PERCENT);
    let b = compute_emi(dec!(4321000), dec!(321000), 180, DEFAULT_ANNUAL_RATE_PERCENT);
    assert_eq!(a, b);
}

// ===========================================================================
// Known answers at 9% p.a.
// ===========================================================================

#[test]
fn test_known_answers() {
    let cases = [
        (dec!(7500000), 120, dec!(95007)),
        (dec!(1000000), 120, dec!(12668)),
        (dec!(1000000), 12, dec!(87451)),
        (dec!(1000000), 360, dec!(8046)),
        (dec!(5000000), 240, dec!(44986)),
        (dec!(2500000), 60, dec!(51896)),
    ];
    for (principal, months, expected) in cases {
        assert_eq!(
            compute_emi(principal, Decimal::ZERO, months, dec!(9)),
            expected,
            "{principal} over {months} months"
        );
    }
}

#[test]
fn test_display_listing_end_to_end() {
    let price = PriceInput::from("₹75,00,000");
    let principal = normalize_price(&price);
    assert_eq!(principal, dec!(7500000));

    let emi = compute_emi(principal, Decimal::ZERO, 120, DEFAULT_ANNUAL_RATE_PERCENT);
    assert_eq!(format_inr(emi), "₹95,007");
}

#[test]
fn test_quote_envelope() {
    let input = LoanQuoteInput {
        price: PriceInput::from("₹75,00,000"),
        down_payment: dec!(1500000),
        tenure_months: 240,
    };
    let out = emi::quote_loan(&input);
    assert_eq!(out.result.loan_amount, dec!(6000000));
    assert_eq!(
        out.result.monthly_installment,
        compute_emi(dec!(7500000), dec!(1500000), 240, dec!(9))
    );
    assert!(out.methodology.contains("amortization"));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

// ===========================================================================
// Price normalization
// ===========================================================================

#[test]
fn test_normalization_idempotent() {
    let samples = [
        "₹75,00,000",
        "1500000",
        "1,500,000.75",
        "Rs 9.5 L",
        "",
        "price on request",
        "1.2.3",
        "000120",
        ".25",
    ];
    for raw in samples {
        let once = normalize_price_str(raw);
        let twice = normalize_price_str(&once.to_string());
        assert_eq!(once, twice, "not idempotent for {raw:?}");
    }
}

#[test]
fn test_normalization_never_negative() {
    for raw in ["-500", "−₹5,000", "(1,000)", "-0.5"] {
        assert!(normalize_price_str(raw) >= Decimal::ZERO);
    }
}
