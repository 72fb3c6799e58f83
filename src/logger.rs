use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata, Record};

/// Backend for the `log` facade. Info lines print bare, everything else is
/// labelled; debug and trace additionally carry the call site.
pub struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Info if log::max_level() < LevelFilter::Debug => {
                println!("{}", record.args());
            }
            Level::Debug | Level::Trace => {
                let location = match (record.file(), record.line()) {
                    (Some(file), Some(line)) => format!("[{file}:{line}]"),
                    _ => "[unk]".to_owned(),
                };

                println!(
                    "{} {} {}",
                    label(record.level()),
                    location.dimmed(),
                    record.args()
                );
            }
            level => {
                println!("{} {}", label(level), record.args());
            }
        }
    }

    fn flush(&self) {}
}

fn label(level: Level) -> ColoredString {
    match level {
        Level::Debug => "[DEBUG]".bold().blue(),
        Level::Error => "[ERROR]".bold().red(),
        Level::Info => "[INFO]".bold().green(),
        Level::Trace => "[TRACE]".bold().purple(),
        Level::Warn => "[WARN]".bold().yellow(),
    }
}
