//! # Domain Types
//!
//! Core domain types for the booking computation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ServiceCatalogEntry│  │   ServiceLine   │  │  AdditionalFee   │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  id (i64)        │◄─│  service_id      │  │  description     │      │
//! │  │  name            │  │  custom_price    │  │  amount_cents    │      │
//! │  │  default_price   │  │  quantity        │  └──────────────────┘      │
//! │  └──────────────────┘  │  responsible_…   │                            │
//! │                        └──────────────────┘                            │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │    Discount      │  │  PaymentStatus   │  │  BookingTotals   │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  Fixed(cents)    │  │  Unpaid          │  │  billable_days   │      │
//! │  │  Percent(bps)    │  │  Partial         │  │  subtotals, tax  │      │
//! │  └──────────────────┘  │  Paid            │  │  grand_total     │      │
//! │                        └──────────────────┘  └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog entries are owned by the catalog collaborator and read-only here;
//! everything else is transient state for a single create/edit session.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};

// =============================================================================
// Service Catalog
// =============================================================================

/// A service offered in the catalog (read-only to the engine).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalogEntry {
    /// Unique identifier (positive integer, assigned by the catalog owner).
    pub id: i64,

    /// Display name shown in the service dropdown and on the invoice.
    pub name: String,

    /// Default daily price in cents, used when a line has no custom price.
    pub default_price_cents: i64,
}

impl ServiceCatalogEntry {
    /// Returns the default price as a Money type.
    #[inline]
    pub fn default_price(&self) -> Money {
        Money::from_cents(self.default_price_cents)
    }
}

/// Lookup view over the service catalog.
///
/// The engine never mutates the catalog; it only resolves `service_id`
/// references coming from draft lines. A dangling id resolves to `None` and
/// the line degrades to a zero price rather than crashing the computation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl Catalog {
    /// Creates a catalog from its entries.
    pub fn new(entries: Vec<ServiceCatalogEntry>) -> Self {
        Catalog { entries }
    }

    /// Resolves a service id to its catalog entry.
    pub fn resolve(&self, service_id: i64) -> Option<&ServiceCatalogEntry> {
        self.entries.iter().find(|e| e.id == service_id)
    }

    /// All entries, in catalog order (for dropdown rendering).
    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Service Line
// =============================================================================

/// One selected service row in the booking draft.
///
/// ## Design Notes
/// - `service_id` is `None` for a freshly added "empty" row; such rows render
///   in the UI but contribute zero to totals
/// - `custom_price_cents` overrides the catalog default only when > 0, so a
///   zero means "use the default", matching the dashboard's form semantics
/// - `responsible_party_id` is opaque to pricing (who handles the service,
///   not what it costs)
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    /// Selected catalog service, if any.
    pub service_id: Option<i64>,

    /// Per-booking price override in cents; 0 means "use catalog default".
    pub custom_price_cents: i64,

    /// Quantity; normalized to ≥ 1 before pricing.
    pub quantity: i64,

    /// Optional reference to whoever handles this service. Opaque here.
    pub responsible_party_id: Option<String>,
}

impl ServiceLine {
    /// Creates a new empty row (no service selected, quantity 1).
    pub fn new() -> Self {
        ServiceLine {
            service_id: None,
            custom_price_cents: 0,
            quantity: 1,
            responsible_party_id: None,
        }
    }

    /// Quantity normalized to ≥ 1.
    ///
    /// The pricer never sees a quantity ≤ 0; unset or bad values count as 1.
    #[inline]
    pub fn normalized_quantity(&self) -> i64 {
        self.quantity.max(1)
    }

    /// True when a service has been selected for this row.
    #[inline]
    pub fn has_service(&self) -> bool {
        self.service_id.is_some()
    }

    /// The custom price as Money, if the override is active (> 0).
    #[inline]
    pub fn custom_price(&self) -> Option<Money> {
        if self.custom_price_cents > 0 {
            Some(Money::from_cents(self.custom_price_cents))
        } else {
            None
        }
    }
}

// =============================================================================
// Additional Fee
// =============================================================================

/// A one-off named fee, independent of services and billable days.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalFee {
    /// Free-text label (may be empty while the user is still typing).
    pub description: String,

    /// Fee amount in cents (≥ 0); summed verbatim, never multiplied by days.
    pub amount_cents: i64,
}

impl AdditionalFee {
    /// Returns the fee amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// The single active discount on a booking.
///
/// Exactly one discount may be active at a time; switching the kind replaces
/// the prior value (mutually exclusive, not additive). The draft holds an
/// `Option<Discount>` - `None` means no discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Fixed amount off, in cents. Must not exceed the pre-discount subtotal.
    Fixed(i64),
    /// Percentage off, in basis points. Must not exceed 10000 (100%).
    Percent(u32),
}

impl Discount {
    /// The discount amount this spec takes off a given subtotal.
    ///
    /// Pure math only; bound checks (`fixed ≤ subtotal`, `percent ≤ 100%`)
    /// belong to the validator, and the pipeline clamps the result so the
    /// post-discount subtotal can never go negative even when validation is
    /// bypassed.
    pub fn amount_against(&self, subtotal: Money) -> Money {
        match self {
            Discount::Fixed(cents) => Money::from_cents(*cents),
            Discount::Percent(bps) => subtotal.percent_of(Percent::from_bps(*bps)),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The payment status selected on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet; amount paid is forced to zero.
    Unpaid,
    /// Down payment received; amount capped at 90% of the grand total.
    Partial,
    /// Settled in full; amount snapshots the grand total at transition time.
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Payment State
// =============================================================================

/// The reconciled payment fields of a booking.
///
/// Invariant: `0 ≤ amount_paid ≤ grand_total` always; `partial` additionally
/// caps at 90% of the grand total. See [`crate::payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    pub status: PaymentStatus,
    /// Amount actually paid, in cents.
    pub amount_paid_cents: i64,
}

impl PaymentState {
    /// Returns the amount paid as Money.
    #[inline]
    pub fn amount_paid(&self) -> Money {
        Money::from_cents(self.amount_paid_cents)
    }
}

// =============================================================================
// Booking Totals
// =============================================================================

/// The derived monetary breakdown of a booking draft.
///
/// Never stored as a source of truth: the inputs plus the formula are
/// authoritative, and these fields are recomputed in full on every relevant
/// input change. All amounts are ≥ 0 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingTotals {
    /// Number of days the daily service rate is charged for (≥ 1).
    pub billable_days: i64,

    /// Daily service bundle × billable days, before any discount.
    pub pre_discount_subtotal_cents: i64,

    /// The discount actually applied (after clamping).
    pub discount_cents: i64,

    /// Subtotal after the discount, clamped at zero.
    pub post_discount_subtotal_cents: i64,

    /// Flat tax on the post-discount subtotal.
    pub tax_cents: i64,

    /// Sum of one-off additional fees (day-independent).
    pub additional_fees_cents: i64,

    /// Final amount owed: post-discount subtotal + tax + fees, clamped at 0.
    pub grand_total_cents: i64,
}

impl BookingTotals {
    /// Returns the pre-discount subtotal as Money.
    #[inline]
    pub fn pre_discount_subtotal(&self) -> Money {
        Money::from_cents(self.pre_discount_subtotal_cents)
    }

    /// Returns the post-discount subtotal as Money.
    #[inline]
    pub fn post_discount_subtotal(&self) -> Money {
        Money::from_cents(self.post_discount_subtotal_cents)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
