//! # Payment Module
//!
//! The payment state reconciler: turns a payment-status selection plus the
//! grand total into concrete payment fields.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Status Transitions                           │
//! │                                                                         │
//! │  unpaid  ──► amount_paid forced to 0                                    │
//! │                                                                         │
//! │  paid    ──► amount_paid forced to grand_total                          │
//! │              (SNAPSHOT: taken at transition time; later edits that      │
//! │               change the grand total do NOT re-sync it - the caller     │
//! │               re-applies the transition to resync)                      │
//! │                                                                         │
//! │  partial ──► amount_paid is user-supplied, but REJECTED (not silently  │
//! │              clamped) above 90% of the grand total, with the error     │
//! │              naming the maximum allowed down payment                   │
//! │                                                                         │
//! │  Cross-cutting, every recomputation: 0 ≤ amount_paid ≤ grand_total      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Percent};
use crate::types::{PaymentState, PaymentStatus};
use crate::DOWN_PAYMENT_CAP_BPS;

// =============================================================================
// Down-Payment Cap
// =============================================================================

/// The maximum down payment allowed for a `partial` booking:
/// 90% of the grand total.
///
/// One canonical rule for both the create and edit flows.
pub fn down_payment_cap(grand_total: Money) -> Money {
    grand_total.percent_of(Percent::from_bps(DOWN_PAYMENT_CAP_BPS))
}

// =============================================================================
// Reconciler
// =============================================================================

/// Applies a payment-status transition against the current grand total.
///
/// ## Behavior
/// - `unpaid`: the amount is forced to zero, whatever was supplied
/// - `paid`: the amount snapshots the grand total at this moment
/// - `partial`: the supplied amount is kept, but rejected when negative or
///   above the down-payment cap
///
/// ## Example
/// ```rust
/// use bookwise_core::money::Money;
/// use bookwise_core::payment::reconcile;
/// use bookwise_core::types::PaymentStatus;
///
/// let grand = Money::from_cents(1_000_000);
/// let state = reconcile(PaymentStatus::Partial, 900_000, grand).unwrap();
/// assert_eq!(state.amount_paid_cents, 900_000);
///
/// assert!(reconcile(PaymentStatus::Partial, 950_000, grand).is_err());
/// ```
pub fn reconcile(
    status: PaymentStatus,
    supplied_cents: i64,
    grand_total: Money,
) -> Result<PaymentState, ValidationError> {
    let amount_paid_cents = match status {
        PaymentStatus::Unpaid => 0,
        PaymentStatus::Paid => grand_total.cents(),
        PaymentStatus::Partial => {
            if supplied_cents < 0 {
                return Err(ValidationError::Negative {
                    field: "amount_paid".to_string(),
                });
            }
            let cap = down_payment_cap(grand_total);
            if supplied_cents > cap.cents() {
                return Err(ValidationError::ExceedsDownPaymentCap { max: cap });
            }
            supplied_cents
        }
    };

    Ok(PaymentState {
        status,
        amount_paid_cents,
    })
}

/// Checks the cross-cutting payment bounds on an existing state.
///
/// Run on every recomputation regardless of status:
/// `0 ≤ amount_paid ≤ grand_total`, plus the down-payment cap for `partial`.
///
/// This is how a stale `paid` snapshot surfaces after an edit shrinks the
/// grand total: the snapshot now exceeds the total and the field gets an
/// error, prompting the caller to re-apply the transition.
pub fn check_bounds(state: &PaymentState, grand_total: Money) -> Result<(), ValidationError> {
    if state.amount_paid_cents < 0 {
        return Err(ValidationError::Negative {
            field: "amount_paid".to_string(),
        });
    }

    if state.amount_paid() > grand_total {
        return Err(ValidationError::ExceedsGrandTotal { max: grand_total });
    }

    if state.status == PaymentStatus::Partial {
        let cap = down_payment_cap(grand_total);
        if state.amount_paid() > cap {
            return Err(ValidationError::ExceedsDownPaymentCap { max: cap });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_payment_cap() {
        assert_eq!(
            down_payment_cap(Money::from_cents(1_000_000)).cents(),
            900_000
        );
        assert_eq!(down_payment_cap(Money::zero()).cents(), 0);
    }

    #[test]
    fn test_unpaid_forces_zero() {
        let state = reconcile(PaymentStatus::Unpaid, 5_000, Money::from_cents(10_000)).unwrap();
        assert_eq!(state.amount_paid_cents, 0);
    }

    #[test]
    fn test_paid_snapshots_grand_total() {
        let state = reconcile(PaymentStatus::Paid, 0, Money::from_cents(10_000)).unwrap();
        assert_eq!(state.amount_paid_cents, 10_000);
    }

    #[test]
    fn test_partial_at_cap_accepted() {
        let grand = Money::from_cents(1_000_000);
        let state = reconcile(PaymentStatus::Partial, 900_000, grand).unwrap();
        assert_eq!(state.amount_paid_cents, 900_000);
    }

    #[test]
    fn test_partial_over_cap_rejected_not_clamped() {
        let grand = Money::from_cents(1_000_000);
        let err = reconcile(PaymentStatus::Partial, 950_000, grand).unwrap_err();
        match err {
            ValidationError::ExceedsDownPaymentCap { max } => {
                assert_eq!(max.cents(), 900_000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_negative_rejected() {
        let err =
            reconcile(PaymentStatus::Partial, -1, Money::from_cents(10_000)).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn test_partial_zero_allowed() {
        // Status chosen before the DP amount is typed in.
        let state = reconcile(PaymentStatus::Partial, 0, Money::from_cents(10_000)).unwrap();
        assert_eq!(state.amount_paid_cents, 0);
    }

    #[test]
    fn test_check_bounds_ok() {
        let state = PaymentState {
            status: PaymentStatus::Partial,
            amount_paid_cents: 4_000,
        };
        assert!(check_bounds(&state, Money::from_cents(10_000)).is_ok());
    }

    #[test]
    fn test_check_bounds_stale_paid_snapshot() {
        // Booking was marked paid at 10_000, then an edit dropped the total.
        let state = PaymentState {
            status: PaymentStatus::Paid,
            amount_paid_cents: 10_000,
        };
        let err = check_bounds(&state, Money::from_cents(8_000)).unwrap_err();
        assert!(matches!(err, ValidationError::ExceedsGrandTotal { .. }));

        // Re-applying the transition resyncs the snapshot.
        let resynced = reconcile(state.status, state.amount_paid_cents, Money::from_cents(8_000))
            .unwrap();
        assert_eq!(resynced.amount_paid_cents, 8_000);
        assert!(check_bounds(&resynced, Money::from_cents(8_000)).is_ok());
    }

    #[test]
    fn test_check_bounds_partial_cap() {
        let state = PaymentState {
            status: PaymentStatus::Partial,
            amount_paid_cents: 9_500,
        };
        let err = check_bounds(&state, Money::from_cents(10_000)).unwrap_err();
        assert!(matches!(err, ValidationError::ExceedsDownPaymentCap { .. }));
    }
}
