//! Session commands: login and logout.
//!
//! Login routes by role -- the fixed admin pair opens the console,
//! any other non-empty pair shops as a regular user. Logout is
//! two-step: confirm, then clear the persisted session.

use shoply_core::{Credentials, Role, StaticAuthenticator};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub fn handle_login(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let username = match args.username {
        Some(username) => username,
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()
            .map_err(util::dialog_err)?,
    };

    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let store = util::session_store();
    let session = shoply_core::login(
        &store,
        &StaticAuthenticator::default(),
        &Credentials { username, password },
    )?;

    // The web app navigates to /dashboard or /shop here; the CLI
    // points at the equivalent command instead.
    let next = match session.role {
        Role::Admin => "Logged in as admin. Try: shoply dashboard",
        Role::User => "Logged in. Try: shoply shop",
    };
    output::print_output(next, global.quiet);
    Ok(())
}

pub fn handle_logout(global: &GlobalOpts) -> Result<(), CliError> {
    let store = util::session_store();

    if !util::confirm(
        "Are you sure you want to logout? Your cart will be cleared.",
        global.yes,
    )? {
        output::print_output("Aborted.", global.quiet);
        return Ok(());
    }

    shoply_core::logout(&store)?;
    output::print_output("Logged out.", global.quiet);
    Ok(())
}
