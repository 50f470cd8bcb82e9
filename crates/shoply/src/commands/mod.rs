//! Command handlers, one module per command group.

pub mod categories;
pub mod config_cmd;
pub mod dashboard;
pub mod login;
pub mod products;
pub mod shop;
pub mod util;

use shoply_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(
    command: Command,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Login(args) => login::handle_login(args, global),
        Command::Logout => login::handle_logout(global),
        Command::Shop => shop::handle(config, global).await,
        Command::Products(args) => products::handle(args, config, global).await,
        Command::Categories(args) => categories::handle(args, config, global).await,
        Command::Dashboard => dashboard::handle(config, global).await,
        Command::Config(args) => config_cmd::handle(&args, config, global),
    }
}
