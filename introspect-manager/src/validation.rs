//! Per-step answer validation. `next` is gated on the current step's
//! answer being present and well-formed; `previous` never is.

use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::QuestionnaireResponses;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// Basic US phone shapes: 555-123-4567, (555) 123-4567, 5551234567
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").expect("phone regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&stripped)
}

/// Checks the answer for `step` before the sequencer may advance past it.
/// Steps without a required answer always pass.
pub fn validate_step(step: u32, responses: &QuestionnaireResponses) -> Result<(), ValidationError> {
    match step {
        1 => {
            if responses.business_type.is_none() {
                return Err(ValidationError::new(
                    "business_type",
                    "Select the type of business before continuing",
                ));
            }
        }
        2 => {
            if responses.business_name.trim().is_empty() {
                return Err(ValidationError::new(
                    "business_name",
                    "Business name is required",
                ));
            }
            if responses.business_description.trim().len() < 10 {
                return Err(ValidationError::new(
                    "business_description",
                    "Describe the business in at least 10 characters",
                ));
            }
        }
        3 => {
            if responses.target_customers.is_empty() {
                return Err(ValidationError::new(
                    "target_customers",
                    "Pick at least one target customer group",
                ));
            }
        }
        5 => {
            if responses.primary_goal.is_none() {
                return Err(ValidationError::new(
                    "primary_goal",
                    "Select a primary goal for the project",
                ));
            }
        }
        14 => {
            if responses.platforms.is_empty() {
                return Err(ValidationError::new(
                    "platforms",
                    "Choose at least one platform",
                ));
            }
        }
        16 => {
            if responses.budget_range.is_none() {
                return Err(ValidationError::new(
                    "budget_range",
                    "Select a budget range",
                ));
            }
        }
        17 => {
            if responses.timeline_preference.is_none() {
                return Err(ValidationError::new(
                    "timeline_preference",
                    "Select a timeline preference",
                ));
            }
        }
        18 => validate_contact(responses)?,
        _ => {}
    }
    Ok(())
}

fn validate_contact(responses: &QuestionnaireResponses) -> Result<(), ValidationError> {
    let contact = responses
        .contact_info
        .as_ref()
        .ok_or_else(|| ValidationError::new("contact_info", "Contact details are required"))?;

    if contact.first_name.trim().is_empty() || contact.last_name.trim().is_empty() {
        return Err(ValidationError::new(
            "contact_info",
            "First and last name are required",
        ));
    }
    if !is_valid_email(&contact.email) {
        return Err(ValidationError::new(
            "contact_info",
            "Enter a valid email address",
        ));
    }
    if let Some(ref phone) = contact.phone {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            return Err(ValidationError::new(
                "contact_info",
                "Enter a valid phone number",
            ));
        }
    }
    Ok(())
}
