use clap::Subcommand;
use serde_json::json;

use crate::auth;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Mint a bearer token signed with SECRET_KEY")]
    Token {
        #[arg(help = "Username to embed in the token")]
        username: String,
        #[arg(long, help = "Grant admin access")]
        admin: bool,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token { username, admin } => {
            let token = auth::create_token(&username, admin)?;
            output_success(
                output_format,
                &format!("Token issued for '{}'", username),
                Some(json!({
                    "token": token,
                    "isAdmin": admin,
                    "expiresInHours": config::config().security.jwt_expiry_hours,
                })),
            )
        }
    }
}
