//! Login and logout commands.

use codebin_core::auth::{AuthState, TokenStore};
use secrecy::SecretString;

use crate::error::CliError;
use crate::util::{CommandContext, runtime};

/// Login command handler
pub fn cmd_login(ctx: &CommandContext, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    let password = SecretString::from(password);

    let api = ctx.api()?;
    let mut auth = AuthState::restore(Box::new(ctx.token_store()));
    let mut notifier = ctx.notifier();

    let logged_in = runtime()?.block_on(auth.login(&api, email, &password, &mut notifier));
    if logged_in {
        tracing::debug!(path = %ctx.config.token_path().display(), "Token stored");
        Ok(())
    } else {
        Err(CliError::Api("login was not accepted".to_string()))
    }
}

/// Logout command handler
pub fn cmd_logout(ctx: &CommandContext) -> Result<(), CliError> {
    let store = ctx.token_store();
    let had_token = store
        .load()
        .map_err(|e| CliError::Config(e.to_string()))?
        .is_some();

    let mut auth = AuthState::restore(Box::new(store));
    auth.logout(&mut ctx.notifier());
    if !had_token {
        tracing::debug!("No token was stored");
    }
    Ok(())
}
