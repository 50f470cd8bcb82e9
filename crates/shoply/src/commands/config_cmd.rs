//! Config inspection commands.

use shoply_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let rendered =
                toml::to_string_pretty(config).map_err(shoply_config::ConfigError::from)?;
            output::print_output(rendered.trim_end(), global.quiet);
        }

        ConfigCommand::Init => {
            let path = shoply_config::save_config(config)?;
            output::print_output(
                &format!("Wrote config to {}", path.display()),
                global.quiet,
            );
        }

        ConfigCommand::Path => {
            output::print_output(
                &shoply_config::config_path().display().to_string(),
                global.quiet,
            );
        }
    }
    Ok(())
}
