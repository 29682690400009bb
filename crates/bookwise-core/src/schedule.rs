//! # Schedule Module
//!
//! Booking date/time fields and the billable-day derivation.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScheduleInput (raw)              ScheduleSpec (parsed)                 │
//! │  ─────────────────────            ──────────────────────                │
//! │  start_date: "2025-03-01"   ──►   start_date: NaiveDate                │
//! │  end_date:   ""             ──►   end_date:   Option<NaiveDate>        │
//! │  start_time: "10:00"        ──►   start_time: NaiveTime                │
//! │  end_time:   "17:30"        ──►   end_time:   NaiveTime                │
//! │                                                                         │
//! │  The form submits strings; the validator owns parse failures and       │
//! │  reports them per field. Everything downstream works on the parsed     │
//! │  spec and never errors.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wrap Rule
//! A multi-day booking (end date strictly after start date) may "wrap" past
//! midnight, so its end time is allowed to be numerically earlier than its
//! start time. Same-day bookings require `end_time > start_time`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Date format the dashboard's date inputs submit.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format the dashboard's time inputs submit.
pub const TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Parsing Helpers
// =============================================================================

/// Parses a form date string (`%Y-%m-%d`).
///
/// Returns `None` for anything that doesn't parse; distinguishing "empty"
/// from "malformed" is the validator's job, done on the raw string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parses a form time string (`%H:%M`).
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()
}

// =============================================================================
// Schedule Input (raw form fields)
// =============================================================================

/// The schedule fields exactly as the booking form supplies them.
///
/// Empty `end_date` means a single-day booking. Held raw so the draft can
/// round-trip keystrokes without losing what the user typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    /// Booking start date (required).
    pub start_date: String,

    /// Booking end date; empty means single-day.
    pub end_date: String,

    /// Start time (required).
    pub start_time: String,

    /// End time (required).
    pub end_time: String,
}

impl ScheduleInput {
    /// Parses into a [`ScheduleSpec`], if the required fields parse.
    ///
    /// A present-but-malformed end date yields `None` here; the validator
    /// reports the field error separately.
    pub fn spec(&self) -> Option<ScheduleSpec> {
        let start_date = parse_date(&self.start_date)?;
        let start_time = parse_time(&self.start_time)?;
        let end_time = parse_time(&self.end_time)?;
        let end_date = if self.end_date.trim().is_empty() {
            None
        } else {
            Some(parse_date(&self.end_date)?)
        };
        Some(ScheduleSpec {
            start_date,
            end_date,
            start_time,
            end_time,
        })
    }

    /// Billable days for this input, defaulting to 1 when the dates don't
    /// parse yet.
    ///
    /// Totals are recomputed on every keystroke, including while the date
    /// fields are mid-edit; an unreadable range bills as a single day until
    /// the validator forces the user to fix it.
    pub fn billable_days(&self) -> i64 {
        match parse_date(&self.start_date) {
            Some(start) => {
                let end = if self.end_date.trim().is_empty() {
                    None
                } else {
                    parse_date(&self.end_date)
                };
                billable_days(start, end)
            }
            None => 1,
        }
    }
}

// =============================================================================
// Schedule Spec (parsed)
// =============================================================================

/// A fully parsed booking schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSpec {
    pub start_date: NaiveDate,
    /// Absent means single-day.
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleSpec {
    /// Billable days for this schedule.
    pub fn billable_days(&self) -> i64 {
        billable_days(self.start_date, self.end_date)
    }

    /// True when the booking spans more than one calendar day
    /// (end date strictly after start date).
    pub fn is_multi_day(&self) -> bool {
        matches!(self.end_date, Some(end) if end > self.start_date)
    }
}

// =============================================================================
// Duration Calculator
// =============================================================================

/// Derives the number of billable days from a start date and optional end
/// date.
///
/// ## Rules
/// - No end date: 1 day (single-day booking)
/// - Otherwise: `|end − start| + 1`, inclusive of both endpoints
/// - Result is always ≥ 1
///
/// The absolute difference means a reversed range still yields its span; the
/// validator separately rejects an end date before the start date, but the
/// day count itself never errors.
///
/// ## Example
/// ```rust
/// use bookwise_core::schedule::{billable_days, parse_date};
///
/// let start = parse_date("2025-03-01").unwrap();
/// let end = parse_date("2025-03-03").unwrap();
/// assert_eq!(billable_days(start, None), 1);
/// assert_eq!(billable_days(start, Some(end)), 3);
/// assert_eq!(billable_days(start, Some(start)), 1);
/// ```
pub fn billable_days(start: NaiveDate, end: Option<NaiveDate>) -> i64 {
    match end {
        None => 1,
        Some(end) => (end - start).num_days().abs() + 1,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(start_date: &str, end_date: &str, start_time: &str, end_time: &str) -> ScheduleInput {
        ScheduleInput {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-03-01").is_some());
        assert!(parse_date("  2025-03-01  ").is_some()); // trimmed
        assert!(parse_date("01/03/2025").is_none());
        assert!(parse_date("2025-13-40").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("10:30"),
            NaiveTime::from_hms_opt(10, 30, 0)
        );
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("ten").is_none());
    }

    #[test]
    fn test_billable_days_single_day() {
        let start = parse_date("2025-03-01").unwrap();
        assert_eq!(billable_days(start, None), 1);
        assert_eq!(billable_days(start, Some(start)), 1);
    }

    #[test]
    fn test_billable_days_inclusive_endpoints() {
        let start = parse_date("2025-03-01").unwrap();
        let end = parse_date("2025-03-03").unwrap();
        assert_eq!(billable_days(start, Some(end)), 3);

        let next_day = parse_date("2025-03-02").unwrap();
        assert_eq!(billable_days(start, Some(next_day)), 2);
    }

    #[test]
    fn test_billable_days_reversed_range_still_positive() {
        let start = parse_date("2025-03-05").unwrap();
        let end = parse_date("2025-03-01").unwrap();
        // The validator rejects this ordering; the day count stays ≥ 1.
        assert_eq!(billable_days(start, Some(end)), 5);
    }

    #[test]
    fn test_billable_days_across_month_boundary() {
        let start = parse_date("2025-01-30").unwrap();
        let end = parse_date("2025-02-02").unwrap();
        assert_eq!(billable_days(start, Some(end)), 4);
    }

    #[test]
    fn test_input_spec_parses() {
        let spec = input("2025-03-01", "2025-03-02", "10:00", "09:00")
            .spec()
            .unwrap();
        assert!(spec.is_multi_day());
        assert_eq!(spec.billable_days(), 2);
    }

    #[test]
    fn test_input_spec_single_day() {
        let spec = input("2025-03-01", "", "10:00", "17:00").spec().unwrap();
        assert!(!spec.is_multi_day());
        assert_eq!(spec.billable_days(), 1);
    }

    #[test]
    fn test_input_spec_missing_fields() {
        assert!(input("", "", "10:00", "17:00").spec().is_none());
        assert!(input("2025-03-01", "", "", "17:00").spec().is_none());
        assert!(input("2025-03-01", "bad-date", "10:00", "17:00")
            .spec()
            .is_none());
    }

    #[test]
    fn test_input_billable_days_fallback() {
        // Mid-edit garbage bills as one day until validation blocks it.
        assert_eq!(input("not-a-date", "", "10:00", "11:00").billable_days(), 1);
        assert_eq!(
            input("2025-03-01", "garbage", "10:00", "11:00").billable_days(),
            1
        );
        assert_eq!(
            input("2025-03-01", "2025-03-04", "10:00", "11:00").billable_days(),
            4
        );
    }
}
