use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use realty_core::catalog::search_contacts;
use realty_core::format::format_timestamp;
use realty_core::models::{Contact, ContactSubmission, CONTACT_SUBJECTS};

use crate::context::Context;
use crate::input;

#[derive(Subcommand)]
pub enum ContactCommand {
    /// Send an enquiry from the contact form (public)
    Submit(SubmitArgs),
    /// List enquiries (admin)
    List(ContactListArgs),
    /// Show one enquiry (admin)
    Show(ContactId),
    /// Delete an enquiry (admin)
    Delete(ContactId),
}

#[derive(Args)]
pub struct ContactId {
    pub id: String,
}

#[derive(Args)]
pub struct ContactListArgs {
    /// Case-insensitive search over name, email, phone, subject and message
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Default)]
pub struct SubmitArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Ten digits
    #[arg(long)]
    pub phone: Option<String>,

    /// One of the form's subjects, e.g. "Site visit request"
    #[arg(long, value_parser = PossibleValuesParser::new(CONTACT_SUBJECTS))]
    pub subject: Option<String>,

    #[arg(long)]
    pub message: Option<String>,
}

/// One line of the enquiries table.
#[derive(Debug, Serialize)]
struct ContactRow {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    received: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id.clone(),
            name: c.full_name(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            subject: c.subject.clone(),
            message: c.message.clone(),
            received: format_timestamp(c.created_at.as_deref()),
        }
    }
}

pub fn run_contact(cmd: ContactCommand, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        ContactCommand::Submit(args) => {
            let payload = input::load_payload(args.input.as_deref())?;
            let submission = submission_from(payload, args).validate()?;
            let created = ctx.public_client()?.submit_contact(&submission)?;
            tracing::info!(subject = %submission.subject, "enquiry sent");
            Ok(serde_json::to_value(created)?)
        }
        ContactCommand::List(args) => {
            let contacts = ctx.admin_client()?.list_contacts()?;
            Ok(serde_json::to_value(contact_rows(&contacts, args.search.as_deref()))?)
        }
        ContactCommand::Show(args) => {
            let contact = ctx.admin_client()?.get_contact(&args.id)?;
            let mut value = serde_json::to_value(&contact)?;
            if let Value::Object(map) = &mut value {
                map.insert("fullName".into(), contact.full_name().into());
                map.insert(
                    "received".into(),
                    format_timestamp(contact.created_at.as_deref()).into(),
                );
            }
            Ok(value)
        }
        ContactCommand::Delete(args) => {
            let client = ctx.admin_client()?;
            Ok(serde_json::to_value(client.delete_contact(&args.id)?)?)
        }
    }
}

fn contact_rows(contacts: &[Contact], search: Option<&str>) -> Vec<ContactRow> {
    let shown = match search {
        Some(q) => search_contacts(contacts, q),
        None => contacts.to_vec(),
    };
    shown.iter().map(ContactRow::from).collect()
}

fn submission_from(payload: Option<ContactSubmission>, args: SubmitArgs) -> ContactSubmission {
    payload.unwrap_or(ContactSubmission {
        first_name: args.first_name.unwrap_or_default(),
        last_name: args.last_name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        subject: args.subject.unwrap_or_default(),
        message: args.message.unwrap_or_default(),
    })
}
