use clap::Args;
use serde_json::{json, Value};

use realty_core::models::Credentials;

use crate::context::Context;
use crate::session::Session;

/// Arguments for admin sign-in
#[derive(Args)]
pub struct LoginArgs {
    #[arg(long, env = "REALTY_ADMIN_EMAIL")]
    pub email: String,

    /// Admin password; prefer the environment variable over the flag
    #[arg(long, env = "REALTY_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub fn run_login(args: LoginArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    }
    .validate()?;

    let response = ctx.public_client()?.login(&credentials)?;
    let (token, admin) = response.into_token()?;

    let session = Session { token, admin };
    session.save(&ctx.session_path)?;

    Ok(json!({
        "token_stored": true,
        "admin": session.admin,
        "session_file": ctx.session_path.display().to_string(),
    }))
}

pub fn run_logout(ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let message = if Session::clear(&ctx.session_path)? {
        tracing::info!(path = %ctx.session_path.display(), "session removed");
        "Signed out"
    } else {
        "No active session"
    };
    Ok(json!({ "message": message }))
}
