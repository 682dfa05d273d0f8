use serde::Serialize;
use tsk_core::identity::Identity;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    token_source: Option<&'static str>,
}

pub fn handle(args: &AuthLoginArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = Identity::new(args.user_id.trim(), args.token.trim());
    tsk_auth::login(&identity)?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: identity.user_id,
            token_source: tsk_auth::token_store::detect_source().map(|source| source.as_str()),
        },
        flags.format,
    )
}
