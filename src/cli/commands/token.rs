use serde_json::json;

use crate::auth::create_token;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

/// Mint a token signed with the configured secret.
pub fn handle(username: &str, admin: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let token = create_token(username, admin, security)?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            Some(json!({
                "token": token,
                "username": username,
                "isAdmin": admin,
                "expiresInHours": security.jwt_expiry_hours,
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
