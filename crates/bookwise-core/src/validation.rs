//! # Validation Module
//!
//! The schedule & field validator for a booking draft.
//!
//! ## Output Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Output                                  │
//! │                                                                         │
//! │  validate_draft(draft, catalog) ──► ErrorMap                           │
//! │                                                                         │
//! │  {}                                  → valid, submission allowed        │
//! │  { "end_time": "End time must …",                                       │
//! │    "discount": "Discount cannot …" } → submission BLOCKED, each         │
//! │                                        message rendered at its field    │
//! │                                                                         │
//! │  Per field: first failure wins (short-circuit).                         │
//! │  Across fields: ALL failures accumulate - the user sees every           │
//! │  problem at once, not one per submit attempt.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here throws; validation failures are values carried in the map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::draft::BookingDraft;
use crate::error::ValidationError;
use crate::money::Percent;
use crate::payment;
use crate::schedule::{parse_date, parse_time};
use crate::types::{Catalog, Discount};

// =============================================================================
// Field Names
// =============================================================================

/// Field keys used in the error map. The frontend anchors messages to form
/// controls by these names, so they are part of the engine's contract.
pub mod field {
    pub const CLIENT: &str = "client";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const LOCATION: &str = "location";
    pub const SERVICES: &str = "services";
    pub const DISCOUNT: &str = "discount";
    pub const AMOUNT_PAID: &str = "amount_paid";
}

// =============================================================================
// Error Map
// =============================================================================

/// Ordered field → human-readable message map.
///
/// Empty means the draft is submittable; callers must not submit while the
/// map is non-empty. BTreeMap-backed so iteration order is stable for the UI
/// and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        ErrorMap(BTreeMap::new())
    }

    /// Records an error for a field, keeping the first one per field.
    pub fn push(&mut self, field: &str, error: ValidationError) {
        self.0.entry(field.to_string()).or_insert(error.to_string());
    }

    /// Checks whether the draft passed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterates (field, message) pairs in stable field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// Draft Validator
// =============================================================================

/// Validates a booking draft, accumulating every field failure.
///
/// ## Checks, in order
/// 1. Required fields: client identity (existing client, or new-client
///    name + contact), start date, start/end time, location, at least one
///    line with a service that resolves in the catalog
/// 2. Date/time ordering, including the same-day vs. multi-day wrap rule
/// 3. Payment bounds (cross-cutting invariant + the 90% down-payment cap)
/// 4. Discount bounds
pub fn validate_draft(draft: &BookingDraft, catalog: &Catalog) -> ErrorMap {
    let mut errors = ErrorMap::new();

    validate_client(draft, &mut errors);
    validate_schedule_fields(draft, &mut errors);
    validate_location(draft, &mut errors);
    validate_services(draft, catalog, &mut errors);
    validate_schedule_ordering(draft, &mut errors);
    validate_payment(draft, catalog, &mut errors);
    validate_discount(draft, catalog, &mut errors);

    errors
}

/// Client identity: an existing client reference, or a new client with both
/// a name and a contact.
fn validate_client(draft: &BookingDraft, errors: &mut ErrorMap) {
    let has_existing = draft.client_id.is_some();
    let has_new =
        !draft.client_name.trim().is_empty() && !draft.client_contact.trim().is_empty();

    if !has_existing && !has_new {
        errors.push(
            field::CLIENT,
            ValidationError::Required {
                field: "client".to_string(),
            },
        );
    }
}

/// Presence and format of the individual schedule fields.
fn validate_schedule_fields(draft: &BookingDraft, errors: &mut ErrorMap) {
    let s = &draft.schedule;

    check_date(field::START_DATE, &s.start_date, true, errors);
    // End date is optional: only its format is checked when present.
    check_date(field::END_DATE, &s.end_date, false, errors);
    check_time(field::START_TIME, &s.start_time, errors);
    check_time(field::END_TIME, &s.end_time, errors);
}

fn check_date(name: &str, raw: &str, required: bool, errors: &mut ErrorMap) {
    if raw.trim().is_empty() {
        if required {
            errors.push(
                name,
                ValidationError::Required {
                    field: name.to_string(),
                },
            );
        }
        return;
    }
    if parse_date(raw).is_none() {
        errors.push(
            name,
            ValidationError::InvalidFormat {
                field: name.to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            },
        );
    }
}

fn check_time(name: &str, raw: &str, errors: &mut ErrorMap) {
    if raw.trim().is_empty() {
        errors.push(
            name,
            ValidationError::Required {
                field: name.to_string(),
            },
        );
        return;
    }
    if parse_time(raw).is_none() {
        errors.push(
            name,
            ValidationError::InvalidFormat {
                field: name.to_string(),
                reason: "expected HH:MM".to_string(),
            },
        );
    }
}

fn validate_location(draft: &BookingDraft, errors: &mut ErrorMap) {
    if draft.location.trim().is_empty() {
        errors.push(
            field::LOCATION,
            ValidationError::Required {
                field: "location".to_string(),
            },
        );
    }
}

/// At least one line must reference a service that resolves in the catalog.
/// A dangling id prices at zero (degrade) but does not satisfy this check.
fn validate_services(draft: &BookingDraft, catalog: &Catalog, errors: &mut ErrorMap) {
    let any_resolved = draft
        .lines
        .iter()
        .any(|line| line.service_id.and_then(|id| catalog.resolve(id)).is_some());

    if !any_resolved {
        errors.push(field::SERVICES, ValidationError::NoServiceSelected);
    }
}

/// Date/time ordering, applied only over fields that parsed.
///
/// ## Wrap Rule
/// - End date strictly after start date: times unconstrained (the booking
///   may wrap past midnight)
/// - End date absent or equal to start date: end time must be strictly
///   after start time
/// - End date before start date: always an error
fn validate_schedule_ordering(draft: &BookingDraft, errors: &mut ErrorMap) {
    let s = &draft.schedule;

    let start_date = parse_date(&s.start_date);
    let end_date = if s.end_date.trim().is_empty() {
        None
    } else {
        parse_date(&s.end_date)
    };

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors.push(field::END_DATE, ValidationError::EndDateBeforeStart);
            return;
        }
        if end > start {
            // Multi-day: overnight wrap allowed, no time constraint.
            return;
        }
    } else if end_date.is_none() && !s.end_date.trim().is_empty() {
        // Malformed end date already reported; skip ordering.
        return;
    }

    // Single-day (end absent or equal to start): end time strictly after
    // start time.
    if let (Some(start_time), Some(end_time)) = (parse_time(&s.start_time), parse_time(&s.end_time))
    {
        if end_time <= start_time {
            errors.push(field::END_TIME, ValidationError::EndTimeNotAfterStart);
        }
    }
}

/// Payment bounds per the reconciler's cross-cutting invariant.
fn validate_payment(draft: &BookingDraft, catalog: &Catalog, errors: &mut ErrorMap) {
    let totals = draft.totals(catalog);
    if let Err(err) = payment::check_bounds(&draft.payment, totals.grand_total()) {
        errors.push(field::AMOUNT_PAID, err);
    }
}

/// Discount bounds: fixed ≤ pre-discount subtotal, percent ≤ 100%.
fn validate_discount(draft: &BookingDraft, catalog: &Catalog, errors: &mut ErrorMap) {
    let Some(discount) = draft.discount else {
        return;
    };

    match discount {
        Discount::Fixed(cents) => {
            if cents < 0 {
                errors.push(
                    field::DISCOUNT,
                    ValidationError::Negative {
                        field: "discount".to_string(),
                    },
                );
            } else {
                let subtotal = draft.totals(catalog).pre_discount_subtotal();
                if cents > subtotal.cents() {
                    errors.push(
                        field::DISCOUNT,
                        ValidationError::DiscountExceedsSubtotal { subtotal },
                    );
                }
            }
        }
        Discount::Percent(bps) => {
            if Percent::from_bps(bps).exceeds_hundred() {
                errors.push(field::DISCOUNT, ValidationError::DiscountOverHundredPercent);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdditionalFee, PaymentStatus, ServiceCatalogEntry};

    fn catalog() -> Catalog {
        Catalog::new(vec![ServiceCatalogEntry {
            id: 1,
            name: "Sound system".to_string(),
            default_price_cents: 10_000,
        }])
    }

    /// A draft that passes every check.
    fn valid_draft() -> BookingDraft {
        let mut draft = BookingDraft::new();
        draft.client_id = Some(42);
        draft.location = "Main hall".to_string();
        draft.schedule.start_date = "2025-03-01".to_string();
        draft.schedule.start_time = "10:00".to_string();
        draft.schedule.end_time = "17:00".to_string();
        let row = draft.add_line().unwrap();
        draft.set_line_service(row, Some(1)).unwrap();
        draft
    }

    #[test]
    fn test_valid_draft_yields_empty_map() {
        let errors = validate_draft(&valid_draft(), &catalog());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_missing_required_fields_accumulate() {
        let draft = BookingDraft::new();
        let errors = validate_draft(&draft, &catalog());

        assert!(errors.contains(field::CLIENT));
        assert!(errors.contains(field::START_DATE));
        assert!(errors.contains(field::START_TIME));
        assert!(errors.contains(field::END_TIME));
        assert!(errors.contains(field::LOCATION));
        assert!(errors.contains(field::SERVICES));
    }

    #[test]
    fn test_new_client_name_and_contact_satisfy_client() {
        let mut draft = valid_draft();
        draft.client_id = None;
        draft.client_name = "Ayu".to_string();
        draft.client_contact = "+62 812 0000".to_string();
        assert!(!validate_draft(&draft, &catalog()).contains(field::CLIENT));

        draft.client_contact.clear();
        assert!(validate_draft(&draft, &catalog()).contains(field::CLIENT));
    }

    #[test]
    fn test_malformed_date_reports_format_error() {
        let mut draft = valid_draft();
        draft.schedule.start_date = "03/01/2025".to_string();
        let errors = validate_draft(&draft, &catalog());
        assert_eq!(
            errors.get(field::START_DATE).unwrap(),
            "start_date has invalid format: expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_same_day_end_time_must_follow_start() {
        let mut draft = valid_draft();
        draft.schedule.start_time = "10:00".to_string();
        draft.schedule.end_time = "09:00".to_string();

        // end_date absent → same-day rule applies
        let errors = validate_draft(&draft, &catalog());
        assert!(errors.contains(field::END_TIME));

        // end_date equal to start_date → same rule
        draft.schedule.end_date = "2025-03-01".to_string();
        let errors = validate_draft(&draft, &catalog());
        assert!(errors.contains(field::END_TIME));
    }

    #[test]
    fn test_multi_day_wrap_allows_reversed_times() {
        let mut draft = valid_draft();
        draft.schedule.start_time = "10:00".to_string();
        draft.schedule.end_time = "09:00".to_string();
        draft.schedule.end_date = "2025-03-02".to_string();

        let errors = validate_draft(&draft, &catalog());
        assert!(!errors.contains(field::END_TIME));
    }

    #[test]
    fn test_end_date_before_start_always_errors() {
        let mut draft = valid_draft();
        draft.schedule.end_date = "2025-02-27".to_string();

        let errors = validate_draft(&draft, &catalog());
        assert_eq!(
            errors.get(field::END_DATE).unwrap(),
            "End date precedes start date"
        );
    }

    #[test]
    fn test_equal_start_and_end_times_rejected() {
        let mut draft = valid_draft();
        draft.schedule.end_time = "10:00".to_string(); // equals start
        let errors = validate_draft(&draft, &catalog());
        assert!(errors.contains(field::END_TIME));
    }

    #[test]
    fn test_dangling_service_id_does_not_satisfy_services() {
        let mut draft = valid_draft();
        draft.lines[0].service_id = Some(999); // deleted from catalog
        let errors = validate_draft(&draft, &catalog());
        assert!(errors.contains(field::SERVICES));
    }

    #[test]
    fn test_fixed_discount_over_subtotal_rejected() {
        let mut draft = valid_draft(); // subtotal 10_000 (one day)
        draft.discount = Some(Discount::Fixed(15_000));

        let errors = validate_draft(&draft, &catalog());
        assert_eq!(
            errors.get(field::DISCOUNT).unwrap(),
            "Discount cannot exceed the subtotal of 100.00"
        );
    }

    #[test]
    fn test_percent_discount_over_hundred_rejected() {
        let mut draft = valid_draft();
        draft.discount = Some(Discount::Percent(10_100)); // 101%
        let errors = validate_draft(&draft, &catalog());
        assert!(errors.contains(field::DISCOUNT));

        draft.discount = Some(Discount::Percent(10_000)); // exactly 100%
        let errors = validate_draft(&draft, &catalog());
        assert!(!errors.contains(field::DISCOUNT));
    }

    #[test]
    fn test_partial_over_cap_flagged_on_amount_paid() {
        let mut draft = valid_draft(); // grand total 10_000
        draft.payment.status = PaymentStatus::Partial;
        draft.payment.amount_paid_cents = 9_500; // cap is 9_000

        let errors = validate_draft(&draft, &catalog());
        assert_eq!(
            errors.get(field::AMOUNT_PAID).unwrap(),
            "Down payment cannot exceed 90.00 (90% of the grand total)"
        );
    }

    #[test]
    fn test_fees_count_toward_payment_bounds() {
        let mut draft = valid_draft(); // services: 10_000
        draft.fees.push(AdditionalFee {
            description: "Transport".to_string(),
            amount_cents: 2_000,
        });
        draft.payment.status = PaymentStatus::Partial;
        draft.payment.amount_paid_cents = 10_800; // cap = 90% of 12_000

        let errors = validate_draft(&draft, &catalog());
        assert!(!errors.contains(field::AMOUNT_PAID));
    }

    #[test]
    fn test_error_map_first_failure_per_field_wins() {
        let mut map = ErrorMap::new();
        map.push(
            "start_date",
            ValidationError::Required {
                field: "start_date".to_string(),
            },
        );
        map.push("start_date", ValidationError::EndDateBeforeStart);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("start_date").unwrap(), "start_date is required");
    }

    #[test]
    fn test_error_map_iteration_is_stable() {
        let mut map = ErrorMap::new();
        map.push("zeta", ValidationError::EndDateBeforeStart);
        map.push(
            "alpha",
            ValidationError::Required {
                field: "alpha".to_string(),
            },
        );

        let fields: Vec<&str> = map.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["alpha", "zeta"]);
    }
}
