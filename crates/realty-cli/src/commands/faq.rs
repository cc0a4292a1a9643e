use clap::{Args, Subcommand};
use serde_json::Value;

use realty_core::models::FaqDraft;

use crate::context::Context;
use crate::input;

#[derive(Subcommand)]
pub enum FaqCommand {
    /// List FAQs (public)
    List,
    /// Show one FAQ (public)
    Show(FaqId),
    /// Create an FAQ (admin)
    Create(FaqDraftArgs),
    /// Update an FAQ (admin)
    Update(FaqUpdateArgs),
    /// Delete an FAQ (admin)
    Delete(FaqId),
}

#[derive(Args)]
pub struct FaqId {
    pub id: String,
}

#[derive(Args, Default)]
pub struct FaqDraftArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub question: Option<String>,

    #[arg(long)]
    pub answer: Option<String>,
}

#[derive(Args)]
pub struct FaqUpdateArgs {
    pub id: String,

    #[command(flatten)]
    pub draft: FaqDraftArgs,
}

pub fn run_faq(cmd: FaqCommand, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        FaqCommand::List => Ok(serde_json::to_value(ctx.public_client()?.list_faqs()?)?),
        FaqCommand::Show(args) => Ok(serde_json::to_value(ctx.public_client()?.get_faq(&args.id)?)?),
        FaqCommand::Create(args) => {
            let client = ctx.admin_client()?;
            let payload = input::load_payload(args.input.as_deref())?;
            let draft = resolve_draft(payload, args, None)?;
            let created = client.create_faq(&draft)?;
            tracing::info!(id = %created.id, "faq created");
            Ok(serde_json::to_value(created)?)
        }
        FaqCommand::Update(args) => {
            let client = ctx.admin_client()?;
            let payload = input::load_payload(args.draft.input.as_deref())?;
            let current = match payload {
                Some(_) => None,
                None => Some(FaqDraft::from(&client.get_faq(&args.id)?)),
            };
            let draft = resolve_draft(payload, args.draft, current)?;
            let updated = client.update_faq(&args.id, &draft)?;
            tracing::info!(id = %args.id, "faq updated");
            Ok(serde_json::to_value(updated)?)
        }
        FaqCommand::Delete(args) => {
            let client = ctx.admin_client()?;
            Ok(serde_json::to_value(client.delete_faq(&args.id)?)?)
        }
    }
}

/// The file or stdin payload if there was one, else the flags laid over
/// `current`.
fn resolve_draft(
    payload: Option<FaqDraft>,
    args: FaqDraftArgs,
    current: Option<FaqDraft>,
) -> Result<FaqDraft, Box<dyn std::error::Error>> {
    if let Some(draft) = payload {
        return Ok(draft.validate()?);
    }
    let mut draft = current.unwrap_or(FaqDraft {
        question: String::new(),
        answer: String::new(),
    });
    if let Some(q) = args.question {
        draft.question = q;
    }
    if let Some(a) = args.answer {
        draft.answer = a;
    }
    Ok(draft.validate()?)
}
