//! imgwarm - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use imgwarm::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    imgwarm::logging::init(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Warm {
            urls,
            file,
            batch_size,
            delay_ms,
            timeout,
        } => commands::warm::handle(
            config_path,
            commands::warm::WarmArgs {
                urls,
                file,
                batch_size,
                delay_ms,
                timeout,
            },
        ),
        Commands::Fetch { url } => commands::fetch::handle(config_path, &url),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init => commands::config::handle_init(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
