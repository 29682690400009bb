//! # Booking Details Blob
//!
//! The serialized "details" payload stored alongside the flat booking row.
//!
//! ## Why This Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persisted Booking Record                           │
//! │                                                                         │
//! │  flat row (persistence collaborator)     details blob (THIS MODULE)     │
//! │  ─────────────────────────────────      ──────────────────────────      │
//! │  total_amount, amount_paid,              services[] (id, custom price,  │
//! │  status, payment_status,                 quantity, responsible party),  │
//! │  schedule fields, client, location       discount, discount_type,       │
//! │                                          tax_percentage,                │
//! │                                          additional_fees[], notes       │
//! │                                                                         │
//! │  The blob is the ONLY durable record of the computation inputs.         │
//! │  Reopening a booking re-parses it back into a draft so the totals      │
//! │  reproduce exactly. The flat row's totals are a cache, never the       │
//! │  source of truth.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Number Format
//! The blob carries major-unit numbers (the dashboard's JSON shape:
//! `custom_price: 150.0` means 150.00). This module is the single place
//! floats are touched; conversion to integer cents happens on the way in and
//! out, nowhere else.

use serde::{Deserialize, Serialize};

use crate::draft::BookingDraft;
use crate::error::CoreResult;
use crate::money::Percent;
use crate::types::{AdditionalFee, Discount, ServiceLine};

// =============================================================================
// Blob Shape
// =============================================================================

/// One service entry as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailsService {
    pub service_id: Option<i64>,
    /// Major units; 0 means "catalog default".
    #[serde(default)]
    pub custom_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub responsible_party_id: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

/// One additional fee as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailsFee {
    #[serde(default)]
    pub description: String,
    /// Major units.
    #[serde(default)]
    pub amount: f64,
}

/// The full details payload.
///
/// Field names and shapes match the stored JSON column; `#[serde(default)]`
/// keeps older blobs (missing newer fields) parseable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(default)]
    pub services: Vec<DetailsService>,
    /// Discount value in major units (fixed) or plain percent (percent).
    #[serde(default)]
    pub discount: f64,
    /// `"fixed"` or `"percent"`.
    #[serde(default = "default_discount_type")]
    pub discount_type: String,
    /// Plain percent number (10.0 = 10%).
    #[serde(default)]
    pub tax_percentage: f64,
    #[serde(default)]
    pub additional_fees: Vec<DetailsFee>,
    #[serde(default)]
    pub notes: String,
}

fn default_discount_type() -> String {
    "fixed".to_string()
}

// =============================================================================
// Conversions
// =============================================================================

/// Major-unit number → cents, rounded half away from zero.
fn to_cents(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

/// Cents → major-unit number.
fn to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

impl BookingDetails {
    /// Captures a draft's computation inputs into the persistable shape.
    pub fn from_draft(draft: &BookingDraft) -> Self {
        let (discount, discount_type) = match draft.discount {
            None => (0.0, "fixed".to_string()),
            Some(Discount::Fixed(cents)) => (to_major(cents), "fixed".to_string()),
            Some(Discount::Percent(bps)) => {
                (Percent::from_bps(bps).percentage(), "percent".to_string())
            }
        };

        BookingDetails {
            services: draft
                .lines
                .iter()
                .map(|line| DetailsService {
                    service_id: line.service_id,
                    custom_price: to_major(line.custom_price_cents),
                    quantity: line.quantity,
                    responsible_party_id: line.responsible_party_id.clone(),
                })
                .collect(),
            discount,
            discount_type,
            tax_percentage: draft.tax.percentage(),
            additional_fees: draft
                .fees
                .iter()
                .map(|fee| DetailsFee {
                    description: fee.description.clone(),
                    amount: to_major(fee.amount_cents),
                })
                .collect(),
            notes: draft.notes.clone(),
        }
    }

    /// Restores the computation inputs onto a draft.
    ///
    /// Schedule, client, and location live on the flat booking row, not in
    /// the blob; the caller fills those from the row before evaluating. A
    /// zero discount restores "no discount" regardless of the stored type.
    pub fn apply_to_draft(&self, draft: &mut BookingDraft) {
        draft.lines = self
            .services
            .iter()
            .map(|s| ServiceLine {
                service_id: s.service_id,
                custom_price_cents: to_cents(s.custom_price).max(0),
                quantity: s.quantity.max(1),
                responsible_party_id: s.responsible_party_id.clone(),
            })
            .collect();

        draft.discount = if self.discount <= 0.0 {
            None
        } else if self.discount_type == "percent" {
            Some(Discount::Percent(
                Percent::from_percentage(self.discount).bps(),
            ))
        } else {
            Some(Discount::Fixed(to_cents(self.discount)))
        };

        draft.tax = Percent::from_percentage(self.tax_percentage);

        draft.fees = self
            .additional_fees
            .iter()
            .map(|f| AdditionalFee {
                description: f.description.clone(),
                amount_cents: to_cents(f.amount).max(0),
            })
            .collect();

        draft.notes = self.notes.clone();
    }

    /// Serializes to the stored JSON string.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored JSON string.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Percent;
    use crate::types::{Catalog, ServiceCatalogEntry};

    fn catalog() -> Catalog {
        Catalog::new(vec![ServiceCatalogEntry {
            id: 1,
            name: "Sound system".to_string(),
            default_price_cents: 10_000,
        }])
    }

    fn populated_draft() -> BookingDraft {
        let mut draft = BookingDraft::new();
        draft.schedule.start_date = "2025-03-01".to_string();
        draft.schedule.end_date = "2025-03-02".to_string();
        draft.notes = "bring spare cables".to_string();
        let row = draft.add_line().unwrap();
        draft.set_line_service(row, Some(1)).unwrap();
        draft.set_line_quantity(row, 2).unwrap();
        draft.set_line_custom_price(row, 9_500).unwrap();
        draft
            .set_line_responsible_party(row, Some("crew-7".to_string()))
            .unwrap();
        draft.set_discount(Some(Discount::Percent(1_000)));
        draft.set_tax(Percent::from_bps(1_100));
        draft
            .add_fee(AdditionalFee {
                description: "Transport".to_string(),
                amount_cents: 2_000,
            })
            .unwrap();
        draft
    }

    #[test]
    fn test_round_trip_reproduces_totals() {
        let original = populated_draft();
        let before = original.totals(&catalog());

        let json = BookingDetails::from_draft(&original).to_json().unwrap();
        let blob = BookingDetails::from_json(&json).unwrap();

        // Reopen: schedule/client come from the flat row.
        let mut reopened = BookingDraft::new();
        reopened.schedule = original.schedule.clone();
        blob.apply_to_draft(&mut reopened);

        let after = reopened.totals(&catalog());
        assert_eq!(before, after);
        assert_eq!(reopened.notes, original.notes);
        assert_eq!(
            reopened.lines[0].responsible_party_id.as_deref(),
            Some("crew-7")
        );
    }

    #[test]
    fn test_blob_field_names() {
        let blob = BookingDetails::from_draft(&populated_draft());
        let value = serde_json::to_value(&blob).unwrap();

        assert_eq!(value["services"][0]["service_id"], 1);
        assert_eq!(value["services"][0]["custom_price"], 95.0);
        assert_eq!(value["services"][0]["quantity"], 2);
        assert_eq!(value["discount_type"], "percent");
        assert_eq!(value["discount"], 10.0);
        assert_eq!(value["tax_percentage"], 11.0);
        assert_eq!(value["additional_fees"][0]["amount"], 20.0);
        assert_eq!(value["notes"], "bring spare cables");
    }

    #[test]
    fn test_zero_discount_restores_none() {
        let mut draft = BookingDraft::new();
        BookingDetails {
            discount: 0.0,
            discount_type: "percent".to_string(),
            ..Default::default()
        }
        .apply_to_draft(&mut draft);
        assert!(draft.discount.is_none());
    }

    #[test]
    fn test_sparse_legacy_blob_parses() {
        // Older bookings stored only the services array.
        let blob =
            BookingDetails::from_json(r#"{"services":[{"service_id":1}]}"#).unwrap();
        let mut draft = BookingDraft::new();
        blob.apply_to_draft(&mut draft);

        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].quantity, 1);
        assert_eq!(draft.lines[0].custom_price_cents, 0);
        assert!(draft.discount.is_none());
        assert!(draft.tax.is_zero());
    }

    #[test]
    fn test_malformed_blob_is_a_payload_error() {
        let err = BookingDetails::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::error::CoreError::DetailsPayload(_)));
    }
}
