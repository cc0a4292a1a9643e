use clap::{Args, Subcommand};
use serde_json::Value;

use realty_core::catalog::{showcase_team, SHOWCASE_TEAM_SIZE};
use realty_core::models::{TeamMember, TeamMemberDraft};

use crate::context::Context;
use crate::input;

#[derive(Subcommand)]
pub enum TeamCommand {
    /// List team members (public)
    List(TeamListArgs),
    /// Add a team member (admin)
    Create(MemberArgs),
    /// Update a team member (admin)
    Update(MemberUpdateArgs),
}

#[derive(Args)]
pub struct TeamListArgs {
    /// Only the members featured on the home page
    #[arg(long)]
    pub showcase: bool,
}

#[derive(Args, Default)]
pub struct MemberArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Portrait URL
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct MemberUpdateArgs {
    pub id: String,

    #[command(flatten)]
    pub member: MemberArgs,
}

pub fn run_team(cmd: TeamCommand, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        TeamCommand::List(args) => {
            let members = ctx.public_client()?.list_team()?;
            let shown = if args.showcase {
                showcase_team(&members, SHOWCASE_TEAM_SIZE)
            } else {
                members
            };
            Ok(serde_json::to_value(shown)?)
        }
        TeamCommand::Create(args) => {
            let client = ctx.admin_client()?;
            let payload = input::load_payload(args.input.as_deref())?;
            let draft = resolve_member(payload, args, None)?;
            let created = client.create_team_member(&draft)?;
            tracing::info!(id = %created.id, name = %created.name, "team member added");
            Ok(serde_json::to_value(created)?)
        }
        TeamCommand::Update(args) => {
            let client = ctx.admin_client()?;
            let payload = input::load_payload(args.member.input.as_deref())?;
            let current = match payload {
                Some(_) => None,
                // there is no single-member route, so prefill from the list
                None => Some(TeamMemberDraft::from(&find_member(
                    &client.list_team()?,
                    &args.id,
                )?)),
            };
            let draft = resolve_member(payload, args.member, current)?;
            let updated = client.update_team_member(&args.id, &draft)?;
            tracing::info!(id = %args.id, "team member updated");
            Ok(serde_json::to_value(updated)?)
        }
    }
}

fn find_member(members: &[TeamMember], id: &str) -> Result<TeamMember, Box<dyn std::error::Error>> {
    members
        .iter()
        .find(|m| m.id == id)
        .cloned()
        .ok_or_else(|| format!("No team member with id {id}").into())
}

fn resolve_member(
    payload: Option<TeamMemberDraft>,
    args: MemberArgs,
    current: Option<TeamMemberDraft>,
) -> Result<TeamMemberDraft, Box<dyn std::error::Error>> {
    if let Some(draft) = payload {
        return Ok(draft.validate()?);
    }
    let mut draft = current.unwrap_or(TeamMemberDraft {
        name: String::new(),
        role: String::new(),
        description: String::new(),
        image: None,
    });
    if let Some(v) = args.name {
        draft.name = v;
    }
    if let Some(v) = args.role {
        draft.role = v;
    }
    if let Some(v) = args.description {
        draft.description = v;
    }
    if args.image.is_some() {
        draft.image = args.image;
    }
    Ok(draft.validate()?)
}
