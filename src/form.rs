//! Add-record form: per-field validation and the live revenue estimate.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::util::{format_amount, parse_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
}

/// Declared shape of one form field
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl FieldSpec {
    pub fn text(name: &str, required: bool) -> Self {
        Self { name: name.to_string(), kind: FieldKind::Text, required, min: None, max: None }
    }
}

/// Validation failure for one field; `Display` is the message shown under it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Value must be at least {0}")]
    BelowMin(f64),
    #[error("Value must be at most {0}")]
    AboveMax(f64),
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+]?[1-9]\d{0,15}$").expect("phone pattern"))
}

/// Check a raw input value against its field spec.
/// Format and range rules only apply to non-empty values.
pub fn validate(spec: &FieldSpec, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return if spec.required { Err(FieldError::Required) } else { Ok(()) };
    }

    match spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email => {
            if email_re().is_match(value) {
                Ok(())
            } else {
                Err(FieldError::InvalidEmail)
            }
        }
        FieldKind::Tel => {
            let digits: String = value
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
                .collect();
            if phone_re().is_match(&digits) {
                Ok(())
            } else {
                Err(FieldError::InvalidPhone)
            }
        }
        FieldKind::Number => {
            // unparseable numbers are not range-checked
            let Ok(n) = value.parse::<f64>() else {
                return Ok(());
            };
            if let Some(min) = spec.min.filter(|m| n < *m) {
                return Err(FieldError::BelowMin(min));
            }
            if let Some(max) = spec.max.filter(|m| n > *m) {
                return Err(FieldError::AboveMax(max));
            }
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    pub error: Option<FieldError>,
}

/// Field names that drive the revenue estimate
const YIELD_FIELD: &str = "expected_yield";
const PRICE_FIELD: &str = "price";

#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        let fields = specs
            .into_iter()
            .map(|spec| FormField { spec, value: String::new(), error: None })
            .collect();
        Self { fields, focus: 0 }
    }

    /// One required text field per table column
    pub fn for_headers(headers: &[String]) -> Self {
        Self::new(headers.iter().map(|h| FieldSpec::text(h, true)).collect())
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    fn field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    /// Typing clears the field's error
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.field_mut() {
            field.value.push(c);
            field.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.field_mut() {
            field.value.pop();
            field.error = None;
        }
    }

    /// Leaving a field validates it
    pub fn focus_next(&mut self) {
        self.validate_field(self.focus);
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        self.validate_field(self.focus);
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn validate_field(&mut self, idx: usize) -> bool {
        match self.fields.get_mut(idx) {
            Some(field) => {
                field.error = validate(&field.spec, &field.value).err();
                field.error.is_none()
            }
            None => true,
        }
    }

    /// Validate every field, recording each field's error.
    /// Focus moves to the first invalid field.
    pub fn validate(&mut self) -> bool {
        let mut first_invalid = None;
        for idx in 0..self.fields.len() {
            if !self.validate_field(idx) && first_invalid.is_none() {
                first_invalid = Some(idx);
            }
        }
        if let Some(idx) = first_invalid {
            self.focus = idx;
        }
        first_invalid.is_none()
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }

    /// Trimmed value of the field called `name` (case-insensitive)
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.trim())
    }

    /// `(field name, trimmed value)` pairs in form order
    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.spec.name.clone(), f.value.trim().to_string()))
            .collect()
    }

    /// Expected yield times price, formatted as an amount.
    /// `None` unless the form has both fields.
    pub fn revenue_estimate(&self) -> Option<String> {
        let yield_val = parse_or_zero(self.value(YIELD_FIELD)?);
        let price = parse_or_zero(self.value(PRICE_FIELD)?);
        Some(format_amount(yield_val * price))
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focus = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: FieldKind, required: bool) -> FieldSpec {
        FieldSpec { name: "f".into(), kind, required, min: None, max: None }
    }

    #[test]
    fn test_required() {
        let s = spec(FieldKind::Text, true);
        assert_eq!(validate(&s, "   "), Err(FieldError::Required));
        assert_eq!(validate(&s, "Wheat"), Ok(()));
        assert_eq!(validate(&spec(FieldKind::Email, false), ""), Ok(()));
    }

    #[test]
    fn test_email() {
        let s = spec(FieldKind::Email, false);
        assert_eq!(validate(&s, "farmer@example.com"), Ok(()));
        assert_eq!(validate(&s, "farmer@example"), Err(FieldError::InvalidEmail));
        assert_eq!(validate(&s, "far mer@example.com"), Err(FieldError::InvalidEmail));
    }

    #[test]
    fn test_phone() {
        let s = spec(FieldKind::Tel, false);
        assert_eq!(validate(&s, "+1 (555) 123-4567"), Ok(()));
        assert_eq!(validate(&s, "0555123"), Err(FieldError::InvalidPhone));
        assert_eq!(validate(&s, "555-abc"), Err(FieldError::InvalidPhone));
        assert_eq!(validate(&s, "12345678901234567"), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn test_number_range() {
        let s = FieldSpec { min: Some(0.0), max: Some(100.0), ..spec(FieldKind::Number, false) };
        assert_eq!(validate(&s, "50"), Ok(()));
        assert_eq!(validate(&s, "-1"), Err(FieldError::BelowMin(0.0)));
        assert_eq!(validate(&s, "100.5"), Err(FieldError::AboveMax(100.0)));
        assert_eq!(validate(&s, "lots"), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(FieldError::BelowMin(10.0).to_string(), "Value must be at least 10");
        assert_eq!(FieldError::AboveMax(2.5).to_string(), "Value must be at most 2.5");
    }

    #[test]
    fn test_form_validate_focuses_first_error() {
        let mut form = Form::new(vec![
            FieldSpec::text("name", true),
            FieldSpec { name: "email".into(), kind: FieldKind::Email, required: false, min: None, max: None },
            FieldSpec::text("notes", true),
        ]);
        form.input_char('W');
        form.focus_next();
        for c in "bad".chars() {
            form.input_char(c);
        }

        assert!(!form.validate());
        assert_eq!(form.error_count(), 2);
        assert_eq!(form.focus(), 1);

        // typing clears the error on that field only
        form.input_char('x');
        assert_eq!(form.fields()[1].error, None);
        assert_eq!(form.fields()[2].error, Some(FieldError::Required));
    }

    #[test]
    fn test_revenue_estimate() {
        let mut form = Form::new(vec![
            FieldSpec::text("expected_yield", false),
            FieldSpec::text("price", false),
        ]);
        assert_eq!(form.revenue_estimate().as_deref(), Some("0.00"));
        for c in "1500".chars() {
            form.input_char(c);
        }
        form.focus_next();
        for c in "2.5".chars() {
            form.input_char(c);
        }
        assert_eq!(form.revenue_estimate().as_deref(), Some("3,750.00"));

        let plain = Form::for_headers(&["Name".to_string()]);
        assert_eq!(plain.revenue_estimate(), None);
    }

    #[test]
    fn test_reset() {
        let mut form = Form::for_headers(&["Name".to_string(), "Status".to_string()]);
        form.input_char('a');
        form.validate();
        form.reset();
        assert_eq!(form.focus(), 0);
        assert!(form.fields().iter().all(|f| f.value.is_empty() && f.error.is_none()));
    }
}
