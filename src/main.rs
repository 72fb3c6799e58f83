use clap::{ColorChoice, Parser};
use colored::Colorize;
use dosya_dl::{Options, logger::Logger};
use log::LevelFilter;
use std::process;

static LOGGER: Logger = Logger;

fn run() -> anyhow::Result<()> {
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(e) => {
            // The original tool exits 1 on every argument error, clap's
            // default would be 2.
            let _ = e.print();
            process::exit(1);
        }
    };

    match options.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Auto => (),
        ColorChoice::Never => colored::control::set_override(false),
    }

    log::set_max_level(if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    options.execute()?;
    Ok(())
}

fn main() {
    let _ = log::set_logger(&LOGGER);

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".bold().red(), e);
        process::exit(1);
    }
}
