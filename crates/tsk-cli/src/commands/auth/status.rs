use serde::Serialize;
use tsk_config::TskConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags, config: &TskConfig) -> anyhow::Result<()> {
    output(&status(config), flags.format)
}

fn status(config: &TskConfig) -> AuthStatusResponse {
    if let Some(identity) = config.auth.identity() {
        return AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id),
            token_source: Some("config"),
            note: None,
        };
    }

    match tsk_auth::token_store::load() {
        Some(identity) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id),
            token_source: tsk_auth::token_store::detect_source().map(|source| source.as_str()),
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            token_source: None,
            note: Some("no credentials found; run `tsk auth login --user-id <id> --token <token>`".into()),
        },
    }
}
