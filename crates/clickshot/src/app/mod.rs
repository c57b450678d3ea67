use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

mod capture;
mod check;
mod click;
mod regions;

pub fn build_cli() -> Command {
    Command::new("clickshot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Screen region matching for functional UI tests")
        .long_about(
            "clickshot checks whether reference images appear where expected inside named \
             screen regions, waits for them to appear, and clicks them. Regions and elements \
             are declared in clickshot.toml.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file to use instead of ~/.clickshot/config.toml and ./clickshot.toml")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(regions::subcommand())
        .subcommand(capture::subcommand())
        .subcommand(check::check_subcommand())
        .subcommand(check::wait_subcommand())
        .subcommand(click::subcommand())
}
