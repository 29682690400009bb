//! # Booking Draft
//!
//! The single normalized draft structure shared by the create and edit
//! booking flows.
//!
//! ## Why One Structure?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  The original dashboard kept parallel arrays per row (prices,           │
//! │  quantities, search strings, dropdown-open flags) synchronized by       │
//! │  convention, duplicated across two near-identical forms. Here the      │
//! │  draft is one indexed list of lines plus one cursor:                    │
//! │                                                                         │
//! │  Form Action                Draft Method             State Change       │
//! │  ───────────                ────────────             ────────────       │
//! │  Click "Add service" ─────► add_line() ────────────► lines.push(row)   │
//! │  Pick from dropdown ──────► set_line_service() ────► lines[i].service  │
//! │  Type custom price ───────► set_line_custom_price()► lines[i].price    │
//! │  Click remove row ────────► remove_line() ─────────► lines.remove(i)   │
//! │  Open row dropdown ───────► open_line_menu(i) ─────► active_line = i   │
//! │  Any change ──────────────► evaluate() ────────────► totals + errors   │
//! │                                                                         │
//! │  evaluate() re-runs the WHOLE pipeline on every call. No incremental   │
//! │  state, no drift.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Percent;
use crate::payment;
use crate::pricing;
use crate::schedule::ScheduleInput;
use crate::types::{
    AdditionalFee, BookingTotals, Catalog, Discount, PaymentState, PaymentStatus, ServiceLine,
};
use crate::validation::{self, ErrorMap};
use crate::{MAX_ADDITIONAL_FEES, MAX_LINE_QUANTITY, MAX_SERVICE_LINES};

// =============================================================================
// Booking Draft
// =============================================================================

/// A booking being created or edited in one dashboard session.
///
/// Transient: lives for the session, is re-evaluated on every field change,
/// and is serialized by the persistence collaborator (flat row + details
/// blob) only once validation passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Existing client reference, if one was picked from the client list.
    pub client_id: Option<i64>,

    /// New-client name (used when no existing client is selected).
    pub client_name: String,

    /// New-client contact (phone or similar; opaque here).
    pub client_contact: String,

    /// Venue / location name.
    pub location: String,

    /// Free-text notes carried into the persisted details blob.
    pub notes: String,

    /// Raw schedule fields as the form supplies them.
    pub schedule: ScheduleInput,

    /// Ordered service rows. Order matters for display only, never totals.
    pub lines: Vec<ServiceLine>,

    /// Which row's service dropdown is open, if any. Pure UI cursor;
    /// excluded from totals and from the persisted form.
    #[serde(skip)]
    #[ts(skip)]
    pub active_line: Option<usize>,

    /// The single active discount, if any.
    pub discount: Option<Discount>,

    /// Flat tax percentage applied to the post-discount subtotal.
    pub tax: Percent,

    /// One-off additional fees.
    pub fees: Vec<AdditionalFee>,

    /// Payment status + amount as last reconciled.
    pub payment: PaymentState,
}

/// The engine's complete output for one draft state.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub totals: BookingTotals,
    pub payment: PaymentState,
    /// Empty when the draft is submittable.
    pub errors: ErrorMap,
}

impl BookingDraft {
    /// Creates an empty draft (the "create booking" starting point).
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Service Lines
    // -------------------------------------------------------------------------

    /// Appends an empty service row and returns its index.
    pub fn add_line(&mut self) -> CoreResult<usize> {
        if self.lines.len() >= MAX_SERVICE_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_SERVICE_LINES,
            });
        }
        self.lines.push(ServiceLine::new());
        Ok(self.lines.len() - 1)
    }

    /// Selects (or clears) the service for a row.
    pub fn set_line_service(&mut self, index: usize, service_id: Option<i64>) -> CoreResult<()> {
        self.line_mut(index)?.service_id = service_id;
        Ok(())
    }

    /// Sets a row's quantity, clamped into `1..=MAX_LINE_QUANTITY`.
    pub fn set_line_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        self.line_mut(index)?.quantity = quantity.clamp(1, MAX_LINE_QUANTITY);
        Ok(())
    }

    /// Sets a row's custom price override; 0 restores the catalog default.
    /// Negative input clears the override rather than storing garbage.
    pub fn set_line_custom_price(&mut self, index: usize, cents: i64) -> CoreResult<()> {
        self.line_mut(index)?.custom_price_cents = cents.max(0);
        Ok(())
    }

    /// Assigns who handles the service on a row.
    pub fn set_line_responsible_party(
        &mut self,
        index: usize,
        party_id: Option<String>,
    ) -> CoreResult<()> {
        self.line_mut(index)?.responsible_party_id = party_id;
        Ok(())
    }

    /// Removes a row, shifting later rows down and fixing up the cursor.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineIndexOutOfBounds {
                index,
                len: self.lines.len(),
            });
        }
        self.lines.remove(index);

        // Cursor follows the row it pointed at.
        self.active_line = match self.active_line {
            Some(cursor) if cursor == index => None,
            Some(cursor) if cursor > index => Some(cursor - 1),
            other => other,
        };
        Ok(())
    }

    /// Opens a row's service dropdown (closing any other).
    pub fn open_line_menu(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::LineIndexOutOfBounds {
                index,
                len: self.lines.len(),
            });
        }
        self.active_line = Some(index);
        Ok(())
    }

    /// Closes whichever dropdown is open.
    pub fn close_line_menu(&mut self) {
        self.active_line = None;
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut ServiceLine> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineIndexOutOfBounds { index, len })
    }

    // -------------------------------------------------------------------------
    // Discount, Tax, Fees
    // -------------------------------------------------------------------------

    /// Sets the active discount, replacing any prior one.
    ///
    /// Switching between fixed and percent replaces the value outright:
    /// discounts are mutually exclusive, never additive.
    pub fn set_discount(&mut self, discount: Option<Discount>) {
        self.discount = discount;
    }

    /// Sets the flat tax percentage.
    pub fn set_tax(&mut self, tax: Percent) {
        self.tax = tax;
    }

    /// Appends an additional fee.
    pub fn add_fee(&mut self, fee: AdditionalFee) -> CoreResult<usize> {
        if self.fees.len() >= MAX_ADDITIONAL_FEES {
            return Err(CoreError::TooManyFees {
                max: MAX_ADDITIONAL_FEES,
            });
        }
        self.fees.push(fee);
        Ok(self.fees.len() - 1)
    }

    /// Removes an additional fee by index.
    pub fn remove_fee(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.fees.len() {
            return Err(CoreError::FeeIndexOutOfBounds {
                index,
                len: self.fees.len(),
            });
        }
        self.fees.remove(index);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    /// Stores a user-supplied down-payment amount.
    ///
    /// Bounds are checked at evaluation time (rejected, not clamped), so the
    /// user sees the cap message rather than a silently altered number.
    pub fn set_amount_paid(&mut self, cents: i64) {
        self.payment.amount_paid_cents = cents;
    }

    /// Applies a payment-status transition against the current grand total.
    ///
    /// This is where the `paid` snapshot is taken: marking a booking paid
    /// records the grand total as of now. Later edits that change the total
    /// do NOT rewrite the snapshot; the validator flags the mismatch and the
    /// caller re-applies the transition to resync.
    pub fn apply_payment_status(
        &mut self,
        status: PaymentStatus,
        catalog: &Catalog,
    ) -> CoreResult<()> {
        let grand = self.totals(catalog).grand_total();
        self.payment = payment::reconcile(status, self.payment.amount_paid_cents, grand)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Evaluation
    // -------------------------------------------------------------------------

    /// The derived monetary breakdown for the current draft state.
    pub fn totals(&self, catalog: &Catalog) -> BookingTotals {
        pricing::compute_totals(
            &self.lines,
            catalog,
            self.schedule.billable_days(),
            self.discount.as_ref(),
            self.tax,
            &self.fees,
        )
    }

    /// Runs the full pipeline: duration → pricing → discount → tax & fees →
    /// payment bounds → field validation.
    ///
    /// Pure with respect to the draft: calling it any number of times on the
    /// same state returns identical results.
    pub fn evaluate(&self, catalog: &Catalog) -> Evaluation {
        Evaluation {
            totals: self.totals(catalog),
            payment: self.payment,
            errors: validation::validate_draft(self, catalog),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
