//! Forms
//!
//! Each form collects raw input, validates it and produces the payload the
//! repository sends. Field rules are declared with `validator` attributes
//! whose `code` maps to a localized [`Text`]; required checks and cross-field
//! rules are done in code. Validation is a convenience; the backend stays
//! authoritative.

mod appointment;
mod business;
mod client;
mod professional;
mod service;

pub use appointment::AppointmentForm;
pub use business::BusinessForm;
pub use client::ClientForm;
pub use professional::{ProfessionalForm, TimeOffPatch};
pub use service::ServiceForm;

use std::collections::BTreeMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use validator::ValidationErrors;

use crate::error::ClientResult;
use crate::messages::{Locale, Text, text};

/// Environment a form validates against
#[derive(Debug, Clone, Copy)]
pub struct FormContext {
    pub locale: Locale,
    /// Zone of `datetime-local` inputs
    pub timezone: Tz,
    /// Submission instant (injected for deterministic tests)
    pub now: DateTime<Utc>,
}

impl FormContext {
    pub fn new(locale: Locale, timezone: Tz) -> Self {
        Self {
            locale,
            timezone,
            now: Utc::now(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Field-level and form-level validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
    form: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field error; the first error of a field wins.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Field error from a message key
    pub fn require(&mut self, field: &str, key: Text, locale: Locale) {
        self.add_field(field, text(locale, key));
    }

    /// Merge `validator` errors, translating codes to localized texts.
    pub fn merge_validation(&mut self, errors: &ValidationErrors, locale: Locale) {
        for (field, errs) in errors.field_errors() {
            if let Some(err) = errs.first() {
                let message = match Text::from_code(&err.code) {
                    Some(key) => text(locale, key).to_string(),
                    None => err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| text(locale, Text::GenericError).to_string()),
                };
                self.add_field(&field, message);
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    /// Drop the error of one field
    pub fn clear_field(&mut self, name: &str) {
        self.fields.remove(name);
    }

    fn into_result<T>(self, payload: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(payload())
        } else {
            Err(self)
        }
    }
}

/// Trimmed value, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ============================================================================
// Form trait & controller
// ============================================================================

/// A form that turns its input into a payload.
pub trait Form {
    type Payload;

    fn validate(&self, ctx: &FormContext) -> Result<Self::Payload, FormErrors>;
}

/// Lifecycle of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Pristine,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// Drives a form through `pristine → editing → submitting → succeeded|failed`.
///
/// Errors are shown after the first submit attempt and then refreshed on
/// every change. Invalid submits never leave the editing state.
#[derive(Debug, Clone)]
pub struct FormController<F: Form> {
    form: F,
    state: FormState,
    errors: FormErrors,
    submit_attempted: bool,
}

impl<F: Form> FormController<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            state: FormState::Pristine,
            errors: FormErrors::default(),
            submit_attempted: false,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Apply a change to the input.
    pub fn edit(&mut self, ctx: &FormContext, change: impl FnOnce(&mut F)) {
        change(&mut self.form);
        self.state = FormState::Editing;
        if self.submit_attempted {
            self.errors = self.form.validate(ctx).err().unwrap_or_default();
        }
    }

    /// Validate a single field when it loses focus.
    pub fn blur(&mut self, ctx: &FormContext, field: &str) {
        let current = self.form.validate(ctx).err().unwrap_or_default();
        match current.field(field) {
            Some(message) => self.errors.add_field(field, message),
            None => self.errors.clear_field(field),
        }
    }

    /// Start a submission. Returns the payload when valid.
    pub fn begin_submit(&mut self, ctx: &FormContext) -> Option<F::Payload> {
        self.submit_attempted = true;
        match self.form.validate(ctx) {
            Ok(payload) => {
                self.errors = FormErrors::default();
                self.state = FormState::Submitting;
                Some(payload)
            }
            Err(errors) => {
                tracing::debug!(fields = errors.fields().len(), "Form validation failed");
                self.errors = errors;
                self.state = FormState::Editing;
                None
            }
        }
    }

    /// Record the outcome of the request started by [`Self::begin_submit`].
    pub fn finish<T>(&mut self, result: &ClientResult<T>) {
        self.state = if result.is_ok() {
            FormState::Succeeded
        } else {
            FormState::Failed
        };
    }

    /// Validate, send and record the outcome. `None` when validation failed
    /// (nothing was sent).
    pub async fn submit<T, Fut>(
        &mut self,
        ctx: &FormContext,
        send: impl FnOnce(F::Payload) -> Fut,
    ) -> Option<ClientResult<T>>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let payload = self.begin_submit(ctx)?;
        let result = send(payload).await;
        self.finish(&result);
        Some(result)
    }

    /// Replace the input and start over.
    pub fn reset(&mut self, form: F) {
        *self = Self::new(form);
    }
}
