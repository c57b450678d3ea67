use clap::{Arg, ArgAction, Command};

pub fn subcommand() -> Command {
    Command::new("regions")
        .about("List configured regions and their elements")
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}
