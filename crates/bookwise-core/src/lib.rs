//! # bookwise-core: Pure Business Logic for Bookwise
//!
//! This crate is the **heart** of the Bookwise booking dashboard. It contains
//! the booking cost & schedule computation engine as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Frontend                             │   │
//! │  │   Create Booking ──► Edit Booking ──► Invoice ──► Calendar      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ form events                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookwise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────┐      │   │
//! │  │   │ schedule │ │ pricing  │ │ payment  │ │  validation  │      │   │
//! │  │   │ billable │ │ totals   │ │ DP cap   │ │  error map   │      │   │
//! │  │   │  days    │ │ pipeline │ │ statuses │ │  per field   │      │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ flat row + details blob                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Persistence collaborator (excluded)                │   │
//! │  │        stores total_amount, amount_paid, details JSON           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ServiceLine, Discount, PaymentState, etc.)
//! - [`money`] - Money and Percent types with integer arithmetic (no floats!)
//! - [`schedule`] - Billable-day derivation from the booking date range
//! - [`pricing`] - The subtotal → discount → tax & fees totals pipeline
//! - [`payment`] - Payment status reconciliation and the down-payment cap
//! - [`validation`] - Cross-field validation producing a field → message map
//! - [`draft`] - The normalized booking draft shared by create and edit flows
//! - [`details`] - The persisted JSON "details" blob (durable input record)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic - same input =
//!    same output, re-run in full on every form change
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64), percentages
//!    in basis points (u32), to avoid float errors
//! 4. **Errors Are Values**: Validation failures come back in a field-keyed
//!    map; nothing in this crate panics on user input
//!
//! ## Example Usage
//!
//! ```rust
//! use bookwise_core::draft::BookingDraft;
//! use bookwise_core::types::{Catalog, ServiceCatalogEntry};
//!
//! let catalog = Catalog::new(vec![ServiceCatalogEntry {
//!     id: 1,
//!     name: "Sound system".to_string(),
//!     default_price_cents: 10_000,
//! }]);
//!
//! let mut draft = BookingDraft::new();
//! draft.schedule.start_date = "2025-03-01".to_string();
//! draft.schedule.end_date = "2025-03-03".to_string();
//! let row = draft.add_line().unwrap();
//! draft.set_line_service(row, Some(1)).unwrap();
//!
//! let eval = draft.evaluate(&catalog);
//! // 3 billable days × 10,000 = 30,000
//! assert_eq!(eval.totals.grand_total_cents, 30_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod details;
pub mod draft;
pub mod error;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bookwise_core::Money` instead of
// `use bookwise_core::money::Money`

pub use draft::{BookingDraft, Evaluation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percent};
pub use types::*;
pub use validation::ErrorMap;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum service lines allowed in a single booking draft
///
/// ## Business Reason
/// Prevents runaway drafts and keeps recomputation immediate; real bookings
/// carry a handful of services. Can be made configurable per-tenant later.
pub const MAX_SERVICE_LINES: usize = 100;

/// Maximum additional fees allowed in a single booking draft
pub const MAX_ADDITIONAL_FEES: usize = 50;

/// Down-payment cap for `partial` payment status, in basis points of the
/// grand total (9000 = 90%)
///
/// ## Business Reason
/// A booking marked `partial` must leave a balance worth collecting; amounts
/// above the cap should be recorded as `paid` instead. This is one canonical
/// rule applied to both the create and edit flows.
pub const DOWN_PAYMENT_CAP_BPS: u32 = 9_000;

/// Maximum quantity for a single service line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
