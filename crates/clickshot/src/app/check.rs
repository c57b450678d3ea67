use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

fn element_arg() -> Arg {
    Arg::new("element")
        .help("Element to look for, as <region>.<element>")
        .required(true)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output the assertion result in JSON format")
        .action(ArgAction::SetTrue)
}

fn threshold_arg() -> Arg {
    Arg::new("threshold")
        .long("threshold")
        .short('t')
        .help("Minimum match confidence, 0.0 - 1.0 (overrides matching.threshold)")
        .value_parser(clap::value_parser!(f64))
}

pub fn check_subcommand() -> Command {
    Command::new("check")
        .about("Check once whether an element is visible (exit code indicates pass/fail)")
        .arg(element_arg())
        .arg(json_arg())
        .arg(threshold_arg())
        .arg(
            Arg::new("from-image")
                .long("from-image")
                .help("Match against a saved screenshot instead of the live screen")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn wait_subcommand() -> Command {
    Command::new("wait")
        .about("Wait until an element becomes visible (exit code indicates pass/fail)")
        .arg(element_arg())
        .arg(json_arg())
        .arg(threshold_arg())
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Timeout in milliseconds (overrides wait.timeout_ms, default: 10000)")
                .value_parser(clap::value_parser!(u64)),
        )
}
