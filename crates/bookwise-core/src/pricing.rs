//! # Pricing Module
//!
//! The booking totals pipeline: line-item pricing, subtotal aggregation,
//! discount application, and the tax & fees composition.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Totals Pipeline                                    │
//! │                                                                         │
//! │  lines + catalog ──► line_total × each ──► Σ = daily bundle            │
//! │                                              │                          │
//! │  billable_days ──────────────────────────────┤ × days                   │
//! │                                              ▼                          │
//! │                                   pre_discount_subtotal                 │
//! │                                              │ − discount (clamped ≥ 0) │
//! │                                              ▼                          │
//! │                                   post_discount_subtotal                │
//! │                                              │ + tax % + Σ fees         │
//! │                                              ▼                          │
//! │                                        grand_total                      │
//! │                                                                         │
//! │  Fees are one-off: they join AFTER the day multiplier, never inside.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. Re-running [`compute_totals`] on unchanged
//! inputs reproduces the identical result; there is no accumulation state to
//! drift.

use crate::money::{Money, Percent};
use crate::types::{AdditionalFee, BookingTotals, Catalog, Discount, ServiceLine};

// =============================================================================
// Line-Item Pricer
// =============================================================================

/// Resolves a line to its effective unit price.
///
/// ## Rules
/// - Custom price wins when > 0 (per-booking override)
/// - Otherwise the catalog default for the resolved service
/// - 0 when the row has no service or the id no longer exists in the catalog
///   (data-integrity degrade: price at zero, don't crash)
pub fn effective_unit_price(line: &ServiceLine, catalog: &Catalog) -> Money {
    if let Some(custom) = line.custom_price() {
        return custom;
    }
    line.service_id
        .and_then(|id| catalog.resolve(id))
        .map(|entry| entry.default_price())
        .unwrap_or_else(Money::zero)
}

/// Computes a line's total: effective unit price × normalized quantity.
///
/// Rows without a resolved service contribute zero; they still render in the
/// UI as empty rows but are excluded from the money.
pub fn line_total(line: &ServiceLine, catalog: &Catalog) -> Money {
    if !line.has_service() {
        return Money::zero();
    }
    effective_unit_price(line, catalog).multiply_quantity(line.normalized_quantity())
}

// =============================================================================
// Subtotal Aggregator
// =============================================================================

/// The daily service bundle: sum of all line totals for one day.
pub fn daily_bundle(lines: &[ServiceLine], catalog: &Catalog) -> Money {
    lines.iter().map(|line| line_total(line, catalog)).sum()
}

/// The pre-discount subtotal: daily bundle × billable days.
///
/// Services are billed at a daily rate, so the whole bundle's price is
/// charged once per day of the booking. (Additional fees are NOT part of
/// this - they are one-off and join after the multiplier.)
pub fn pre_discount_subtotal(lines: &[ServiceLine], catalog: &Catalog, billable_days: i64) -> Money {
    daily_bundle(lines, catalog).multiply_quantity(billable_days.max(1))
}

// =============================================================================
// Discount Engine
// =============================================================================

/// The discount amount actually applied against a subtotal, clamped so it
/// can never exceed the subtotal.
///
/// Out-of-bound specs (fixed > subtotal, percent > 100%) are a validation
/// error surfaced by [`crate::validation`]; the math here still clamps so a
/// bypassed validator cannot produce a negative post-discount subtotal.
pub fn applied_discount(subtotal: Money, discount: Option<&Discount>) -> Money {
    match discount {
        None => Money::zero(),
        Some(spec) => {
            let raw = spec.amount_against(subtotal).clamp_non_negative();
            if raw > subtotal {
                subtotal
            } else {
                raw
            }
        }
    }
}

// =============================================================================
// Tax & Fees Composer + Full Pipeline
// =============================================================================

/// Sum of all additional fees (one-off, day-independent).
pub fn additional_fees_total(fees: &[AdditionalFee]) -> Money {
    fees.iter()
        .map(|fee| fee.amount().clamp_non_negative())
        .sum()
}

/// Runs the full totals pipeline and returns the derived breakdown.
///
/// Deterministic and idempotent: identical inputs yield an identical
/// [`BookingTotals`], byte for byte.
pub fn compute_totals(
    lines: &[ServiceLine],
    catalog: &Catalog,
    billable_days: i64,
    discount: Option<&Discount>,
    tax: Percent,
    fees: &[AdditionalFee],
) -> BookingTotals {
    let pre = pre_discount_subtotal(lines, catalog, billable_days);
    let discount_amount = applied_discount(pre, discount);
    let post = pre.sub_clamped(discount_amount);
    let tax_amount = post.percent_of(tax);
    let fees_total = additional_fees_total(fees);
    let grand = (post + tax_amount + fees_total).clamp_non_negative();

    BookingTotals {
        billable_days: billable_days.max(1),
        pre_discount_subtotal_cents: pre.cents(),
        discount_cents: discount_amount.cents(),
        post_discount_subtotal_cents: post.cents(),
        tax_cents: tax_amount.cents(),
        additional_fees_cents: fees_total.cents(),
        grand_total_cents: grand.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
