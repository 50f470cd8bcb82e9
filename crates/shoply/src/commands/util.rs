//! Shared helpers for command handlers.

use shoply_api::{StoreClient, TransportConfig};
use shoply_config::{Config, FileSessionStore};
use shoply_core::{CoreError, Role, Session};

use crate::error::CliError;

/// The session store every command reads the gate from.
pub fn session_store() -> FileSessionStore {
    FileSessionStore::default_location()
}

/// Run the session gate for a protected command. Called BEFORE any
/// data fetch; failure is the CLI's redirect to login.
pub fn require_role(required: Role) -> Result<Session, CliError> {
    Ok(shoply_core::require_role(&session_store(), required)?)
}

/// Build a `StoreClient` from the effective config.
pub fn build_client(config: &Config) -> Result<StoreClient, CliError> {
    let url = config.backend_url()?;
    let transport = TransportConfig {
        timeout: config.timeout(),
        ..TransportConfig::default()
    };
    Ok(StoreClient::new(url, &transport).map_err(CoreError::from)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(dialog_err)?;
    Ok(confirmed)
}

/// Map a dialoguer prompt failure onto the IO variant.
pub fn dialog_err(err: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(err))
}
