use crate::api::types::ContactRequest;
use crate::api::ListingsApi;
use thiserror::Error;
use tracing::{info, warn};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 5;
pub const MIN_MESSAGE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Message,
}

/// A validation message to show next to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All field errors of one submission attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ContactErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join("; ")
}

impl ContactErrors {
    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

/// The enquiry form on the contact and property pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub property_name: Option<String>,
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Pre-filled from a property detail page
    pub fn for_property(title: &str) -> Self {
        Self {
            property_name: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Check every field; nothing is sent unless this passes.
    pub fn validate(&self) -> Result<ContactRequest, ContactErrors> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        let phone = self.phone.trim();
        let message = self.message.trim();

        if name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError {
                field: Field::Name,
                message: "Name must be at least 2 characters",
            });
        }
        if phone.chars().count() < MIN_PHONE_LEN {
            errors.push(FieldError {
                field: Field::Phone,
                message: "Please enter a valid phone number",
            });
        }
        if message.chars().count() < MIN_MESSAGE_LEN {
            errors.push(FieldError {
                field: Field::Message,
                message: "Message must be at least 10 characters",
            });
        }

        if !errors.is_empty() {
            return Err(ContactErrors(errors));
        }
        Ok(ContactRequest {
            property_name: self
                .property_name
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            name: name.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        })
    }

    /// Clear what the user typed; the property name stays.
    pub fn reset(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.message.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Drives the confirmation dialog, addressed to `name`
    Sent { name: String },
    Invalid(ContactErrors),
    Failed,
}

/// Submits the contact form. The form is borrowed mutably for the whole
/// exchange, so it cannot be submitted twice at once.
pub struct ContactController<'a> {
    api: &'a dyn ListingsApi,
}

impl<'a> ContactController<'a> {
    pub fn new(api: &'a dyn ListingsApi) -> Self {
        Self { api }
    }

    pub async fn submit(&self, form: &mut ContactForm) -> ContactOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => return ContactOutcome::Invalid(errors),
        };

        match self.api.submit_contact(&request).await {
            Some(_) => {
                info!("Contact enquiry sent for {}", request.name);
                form.reset();
                ContactOutcome::Sent { name: request.name }
            }
            None => {
                warn!("Contact enquiry from {} was not accepted", request.name);
                ContactOutcome::Failed
            }
        }
    }
}
