use std::path::PathBuf;

use clap::{Arg, Command};

pub fn subcommand() -> Command {
    Command::new("capture")
        .about("Save a capture of a region's screen area, e.g. to cut new reference images")
        .arg(
            Arg::new("region")
                .long("region")
                .short('r')
                .help("Region name from the config")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("PNG file to write")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
}
