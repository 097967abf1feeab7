//! Contact form stub: local validation and a timed acknowledgement.
//! Nothing is sent anywhere.

use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;

/// How long the "Transmission Received" acknowledgement stays up
pub const ACKNOWLEDGE_DURATION: Duration = Duration::from_secs(3);

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Company,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Company,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Message => "Project Brief",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Company)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing(FormField),
    InvalidEmail,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required", field.label()),
            Self::InvalidEmail => f.write_str("Email must be a valid address"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Company => &self.company,
            FormField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Company => &mut self.company,
            FormField::Message => &mut self.message,
        }
    }

    /// Company is optional; blank means absent
    pub fn company(&self) -> Option<&str> {
        let company = self.company.trim();
        (!company.is_empty()).then_some(company)
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.field(*field).trim().is_empty())
            .map(FieldError::Missing)
            .collect();

        let email = self.email.trim();
        if !email.is_empty() && !email_pattern().is_match(email) {
            errors.push(FieldError::InvalidEmail);
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitted { at: Instant },
}

/// Form state owned by the contact section
#[derive(Debug, Clone)]
pub struct ContactFormState {
    pub form: ContactForm,
    phase: FormPhase,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self {
            form: ContactForm::default(),
            phase: FormPhase::Editing,
        }
    }
}

impl ContactFormState {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, FormPhase::Submitted { .. })
    }

    /// Validate and switch to the acknowledgement. Errors leave the form as is.
    pub fn submit(&mut self, now: Instant) -> Result<(), Vec<FieldError>> {
        if self.is_submitted() {
            return Ok(());
        }
        let errors = self.form.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        tracing::info!(
            "Contact request from {} ({})",
            self.form.name.trim(),
            self.form.company().unwrap_or("no company")
        );
        self.phase = FormPhase::Submitted { at: now };
        Ok(())
    }

    /// Clear the form once the acknowledgement has been shown long enough.
    /// Returns true when the form was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            FormPhase::Submitted { at } if now.saturating_duration_since(at) >= ACKNOWLEDGE_DURATION => {
                self.form = ContactForm::default();
                self.phase = FormPhase::Editing;
                true
            }
            _ => false,
        }
    }
}
