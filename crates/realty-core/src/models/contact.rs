use serde::{Deserialize, Serialize};

use super::required_text;
use crate::error::RealtyError;
use crate::RealtyResult;

/// Subjects offered by the public contact form.
pub const CONTACT_SUBJECTS: [&str; 5] = [
    "Enquiry about properties",
    "Site visit request",
    "Pricing & availability",
    "Partnership/Collaboration",
    "Other",
];

const PHONE_DIGITS: usize = 10;

/// An enquiry stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Lower-cased text the admin search box matches against.
    pub fn search_text(&self) -> String {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.subject,
            &self.message,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// What a visitor sends from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Check the form in the order it is laid out and return the trimmed
    /// payload. The first failing field is reported.
    pub fn validate(self) -> RealtyResult<Self> {
        let first_name = required_text(&self.first_name, "firstName", "First name is required.")?;
        let last_name = required_text(&self.last_name, "lastName", "Last name is required.")?;

        let email = self.email.trim().to_string();
        if !looks_like_email(&email) {
            return Err(RealtyError::required("email", "Please enter a valid email."));
        }

        let phone = self.phone.trim().to_string();
        if phone.len() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(RealtyError::required(
                "phone",
                "Phone number must be 10 digits.",
            ));
        }

        let subject = required_text(&self.subject, "subject", "Please select a subject.")?;
        let message = required_text(&self.message, "message", "Message cannot be empty.")?;

        Ok(Self {
            first_name,
            last_name,
            email,
            phone,
            subject,
            message,
        })
    }
}

/// Loose address check: something, `@`, something, `.`, something, with no
/// whitespace inside the match.
pub fn looks_like_email(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();

    chars.iter().enumerate().any(|(at, c)| {
        if *c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }
        let domain = &chars[at + 1..];
        let run = domain.iter().take_while(|c| !c.is_whitespace()).count();
        // a dot with at least one character on each side inside the run
        (1..run.saturating_sub(1)).any(|i| domain[i] == '.')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            first_name: " Asha ".into(),
            last_name: "Rao".into(),
            email: " asha@example.in ".into(),
            phone: "9876543210".into(),
            subject: CONTACT_SUBJECTS[1].into(),
            message: " Saturday works. ".into(),
        }
    }

    fn failing_field(s: ContactSubmission) -> String {
        match s.validate() {
            Err(RealtyError::Validation(f)) => f.field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let s = submission().validate().unwrap();
        assert_eq!(s.first_name, "Asha");
        assert_eq!(s.email, "asha@example.in");
        assert_eq!(s.message, "Saturday works.");
    }

    #[test]
    fn test_first_failure_wins() {
        let mut s = submission();
        s.last_name = " ".into();
        s.phone = "12".into();
        assert_eq!(failing_field(s), "lastName");
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        let mut s = submission();
        s.phone = "98765-4321".into();
        assert_eq!(failing_field(s), "phone");

        let mut s = submission();
        s.phone = "98765432101".into();
        assert_eq!(failing_field(s), "phone");
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a @b.c"));
        assert!(!looks_like_email("a@b .c"));
    }

    #[test]
    fn test_missing_message() {
        let mut s = submission();
        s.message = String::new();
        assert_eq!(failing_field(s), "message");
    }

    #[test]
    fn test_contact_wire_names() {
        let c: Contact = serde_json::from_str(
            r#"{"_id":"c1","firstName":"Asha","lastName":"Rao","email":"a@b.in","phone":"9876543210","subject":"Other","message":"hi"}"#,
        )
        .unwrap();
        assert_eq!(c.full_name(), "Asha Rao");
        assert!(c.search_text().contains("asha rao a@b.in"));
    }
}
