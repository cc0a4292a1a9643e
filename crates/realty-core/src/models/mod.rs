//! Entities the site and back-office exchange with the REST backend.
//!
//! Wire field names are camelCase and identifiers arrive as `_id`.

pub mod auth;
pub mod contact;
pub mod faq;
pub mod property;
pub mod team;

pub use auth::{AdminInfo, Credentials, LoginResponse};
pub use contact::{Contact, ContactSubmission, CONTACT_SUBJECTS};
pub use faq::{Faq, FaqDraft};
pub use property::{Property, PropertyDraft, PropertyStatus, PropertyType};
pub use team::{TeamMember, TeamMemberDraft};

use crate::error::RealtyError;
use crate::RealtyResult;

/// Trim a required text field, failing with the form's message when blank.
pub(crate) fn required_text(value: &str, field: &str, reason: &str) -> RealtyResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RealtyError::required(field, reason));
    }
    Ok(trimmed.to_string())
}
