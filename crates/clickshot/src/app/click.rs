use clap::{Arg, ArgAction, Command};

pub fn subcommand() -> Command {
    Command::new("click")
        .about("Click the center of an element once it is visible")
        .arg(
            Arg::new("element")
                .help("Element to click, as <region>.<element>")
                .required(true),
        )
        .arg(
            Arg::new("right")
                .long("right")
                .help("Right-click (context menu)")
                .action(ArgAction::SetTrue)
                .conflicts_with("double"),
        )
        .arg(
            Arg::new("double")
                .long("double")
                .help("Double-click")
                .action(ArgAction::SetTrue)
                .conflicts_with("right"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}
