use anyhow::Context;
use clap::Parser;
use schemr::cli::{Cli, Commands};
use schemr::commands;
use schemr::config::{self, setup};
use schemr::logger::setup_logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // init must work even when the existing config is broken
    if cli.command == Commands::Init {
        let dir = setup::get_config_dir()?;
        commands::init(&dir, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref()).into_result()?;
    setup_logger(config.logging()).context("Failed to initialize logger")?;
    log::debug!("Running {:?}", cli.command);

    commands::run(&cli.command, &config)?;
    Ok(())
}
