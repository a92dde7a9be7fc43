//! Untyped party input as it arrives from the staff form or an API client.
//!
//! Two rule sets apply to the same shape:
//! - [`PartyForm::to_new_party`]: the authoritative rules used when a record is created.
//! - [`PartyForm::check`]: the stricter per-field rules the staff form shows while
//!   typing (identity must be a digit string of at least 6 digits).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use tarragona_core::{DomainError, DomainResult};
use tarragona_pricing::{compute_amounts, format_amount, PartyAmounts};

use crate::party::{positive_count, NewParty};

/// Minimum number of digits the staff form accepts for an identity.
pub const MIN_IDENTITY_DIGITS: usize = 6;

/// Raw party input. Every field stays untyped so a wrong JSON type is
/// reported as a validation failure instead of a deserialization error.
///
/// Unknown fields (including caller-supplied amounts) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyForm {
    pub identity: Option<JsonValue>,
    pub guest_count: Option<JsonValue>,
    pub duration_hours: Option<JsonValue>,
}

/// Field name -> message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// What the staff form shows before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub valid: bool,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<PartyAmounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_total: Option<String>,
}

impl PartyForm {
    /// Apply the create-time rules.
    pub fn to_new_party(&self) -> DomainResult<NewParty> {
        let identity = text_field("identity", self.identity.as_ref())?;
        let guest_count = integer_field("guestCount", self.guest_count.as_ref())?;
        let duration_hours = integer_field("durationHours", self.duration_hours.as_ref())?;
        NewParty::new(identity, guest_count, duration_hours)
    }

    /// Per-field form checks. Returns the valid counts (if both are valid)
    /// alongside every field error found.
    pub fn check(&self) -> (Option<(u32, u32)>, FieldErrors) {
        let mut errors = FieldErrors::new();

        if let Some(msg) = identity_error(self.identity.as_ref()) {
            errors.insert("identity", msg);
        }

        let guests = counted_field("guestCount", self.guest_count.as_ref());
        let hours = counted_field("durationHours", self.duration_hours.as_ref());

        let counts = match (guests, hours) {
            (Ok(g), Ok(h)) => Some((g, h)),
            (g, h) => {
                if let Err(e) = g {
                    errors.insert("guestCount", e);
                }
                if let Err(e) = h {
                    errors.insert("durationHours", e);
                }
                None
            }
        };

        (counts, errors)
    }

    /// Check the form and price it with the same engine the create path uses.
    ///
    /// Amounts are filled in whenever both counts are valid, even if the
    /// identity is not.
    pub fn preview(&self) -> Preview {
        let (counts, errors) = self.check();
        let amounts = counts.and_then(|(g, h)| compute_amounts(g, h).ok());

        Preview {
            valid: errors.is_empty(),
            formatted_total: amounts.map(|a| format_amount(a.total)),
            amounts,
            errors,
        }
    }
}

fn identity_error(identity: Option<&JsonValue>) -> Option<String> {
    let identity = match text_field("identity", identity) {
        Ok(text) => text.trim(),
        Err(e) => return Some(e.message().to_string()),
    };
    if identity.is_empty() {
        return Some("identity is required".to_string());
    }
    if !identity.chars().all(|c| c.is_ascii_digit()) {
        return Some("identity must contain digits only".to_string());
    }
    if identity.len() < MIN_IDENTITY_DIGITS {
        return Some(format!(
            "identity must have at least {MIN_IDENTITY_DIGITS} digits"
        ));
    }
    None
}

fn counted_field(field: &'static str, value: Option<&JsonValue>) -> Result<u32, String> {
    integer_field(field, value)
        .and_then(|v| positive_count(field, v))
        .map_err(|e| e.message().to_string())
}

/// Read a string out of a JSON value. Numbers are not coerced.
pub fn text_field<'a>(field: &str, value: Option<&'a JsonValue>) -> DomainResult<&'a str> {
    match value {
        None | Some(JsonValue::Null) => Err(DomainError::validation(format!("{field} is required"))),
        Some(JsonValue::String(text)) => Ok(text.as_str()),
        Some(_) => Err(DomainError::validation(format!("{field} must be a string"))),
    }
}

/// Read a whole number out of a JSON value.
///
/// Integral floats (`5.0`) are accepted; fractions, strings and other types are not.
pub fn integer_field(field: &str, value: Option<&JsonValue>) -> DomainResult<i64> {
    let number = match value {
        None | Some(JsonValue::Null) => {
            return Err(DomainError::validation(format!("{field} is required")));
        }
        Some(JsonValue::Number(n)) => n,
        Some(_) => return Err(DomainError::validation(format!("{field} must be a number"))),
    };

    if let Some(v) = number.as_i64() {
        return Ok(v);
    }
    if number.is_u64() {
        return Err(DomainError::validation(format!("{field} is too large")));
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(DomainError::validation(format!(
            "{field} must be a whole number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(v: JsonValue) -> PartyForm {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn create_rules_accept_integral_numbers() {
        let party = form(json!({ "identity": "123456", "guestCount": 50, "durationHours": 2.0 }))
            .to_new_party()
            .unwrap();
        assert_eq!(party.guest_count(), 50);
        assert_eq!(party.duration_hours(), 2);
    }

    #[test]
    fn create_rules_ignore_caller_amounts() {
        let party = form(json!({
            "identity": "123456",
            "guestCount": 50,
            "durationHours": 2,
            "total": 1,
            "guestAmount": 1,
        }))
        .to_new_party()
        .unwrap()
        .price()
        .unwrap();
        assert_eq!(party.amounts.total, 500_000);
    }

    #[test]
    fn create_rules_reject_missing_and_non_integer_values() {
        let cases = [
            (json!({ "guestCount": 5, "durationHours": 5 }), "identity is required"),
            (json!({ "identity": "1", "durationHours": 5 }), "guestCount is required"),
            (
                json!({ "identity": "1", "guestCount": 5, "durationHours": null }),
                "durationHours is required",
            ),
            (
                json!({ "identity": "1", "guestCount": 2.5, "durationHours": 5 }),
                "guestCount must be a whole number",
            ),
            (
                json!({ "identity": "1", "guestCount": "5", "durationHours": 5 }),
                "guestCount must be a number",
            ),
            (
                json!({ "identity": "1", "guestCount": 5, "durationHours": 0 }),
                "durationHours must be at least 1",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(form(input).to_new_party().unwrap_err().message(), expected);
        }
    }

    #[test]
    fn non_string_identity_is_a_validation_error() {
        let input = form(json!({ "identity": 123456, "guestCount": 1, "durationHours": 1 }));
        assert_eq!(input.to_new_party().unwrap_err().message(), "identity must be a string");

        let (counts, errors) = input.check();
        assert_eq!(counts, Some((1, 1)));
        assert_eq!(errors["identity"], "identity must be a string");
    }

    #[test]
    fn create_rules_do_not_require_digit_identity() {
        assert!(form(json!({ "identity": "AB-12", "guestCount": 1, "durationHours": 1 }))
            .to_new_party()
            .is_ok());
    }

    #[test]
    fn form_check_reports_every_field() {
        let (counts, errors) = form(json!({ "identity": "12a", "guestCount": 0, "durationHours": 1.5 })).check();
        assert_eq!(counts, None);
        assert_eq!(errors["identity"], "identity must contain digits only");
        assert_eq!(errors["guestCount"], "guestCount must be at least 1");
        assert_eq!(errors["durationHours"], "durationHours must be a whole number");
    }

    #[test]
    fn form_check_requires_six_digit_identity() {
        let (counts, errors) = form(json!({ "identity": "12345", "guestCount": 10, "durationHours": 4 })).check();
        assert_eq!(counts, Some((10, 4)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["identity"], "identity must have at least 6 digits");
    }

    #[test]
    fn form_check_passes_clean_input() {
        let (counts, errors) = form(json!({ "identity": "123456", "guestCount": 600, "durationHours": 8 })).check();
        assert_eq!(counts, Some((600, 8)));
        assert!(errors.is_empty());
    }

    #[test]
    fn preview_prices_valid_counts_despite_identity_errors() {
        let preview = form(json!({ "identity": "", "guestCount": 50, "durationHours": 2 })).preview();
        assert!(!preview.valid);
        assert_eq!(preview.errors.len(), 1);
        assert_eq!(preview.amounts.map(|a| a.total), Some(500_000));
        assert_eq!(preview.formatted_total.as_deref(), Some("$500.000"));
    }

    #[test]
    fn preview_without_counts_has_no_amounts() {
        let preview = form(json!({ "identity": "123456", "guestCount": 600 })).preview();
        assert!(!preview.valid);
        assert_eq!(preview.amounts, None);

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["errors"]["durationHours"], "durationHours is required");
        assert!(json.get("amounts").is_none());
    }

    #[test]
    fn preview_matches_create_path_pricing() {
        let input = form(json!({ "identity": "654321", "guestCount": 600, "durationHours": 8 }));
        let preview = input.preview();
        let priced = input.to_new_party().unwrap().price().unwrap();
        assert!(preview.valid);
        assert_eq!(preview.amounts, Some(priced.amounts));
        assert_eq!(preview.formatted_total.as_deref(), Some("$2.700.000"));
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let (counts, errors) = PartyForm::default().check();
        assert_eq!(counts, None);
        assert_eq!(errors["identity"], "identity is required");
        assert_eq!(errors["guestCount"], "guestCount is required");
        assert_eq!(errors["durationHours"], "durationHours is required");
    }
}
