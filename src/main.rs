//! # Command Line Interface
//!
//! Dispatch commands to the `commands` module.

use emtf_core::commands;
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    // Run the pipeline over one event

    if let Some(cmd) = matches.subcommand_matches("run") {
        return commands::run::run(cmd);
    }

    // Inspect a pattern bank

    if let Some(cmd) = matches.subcommand_matches("bank") {
        return commands::bank::bank(cmd);
    }

    // Dump the detector geometry LUTs

    if let Some(cmd) = matches.subcommand_matches("geometry") {
        return commands::geometry::geometry(cmd);
    }

    // Shell completions

    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(cli::build_cli(), cmd);
    }

    Ok(())
}
