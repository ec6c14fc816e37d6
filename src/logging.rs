use std::path::Path;

use eyre::Result;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Where log records end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    /// Used while the terminal UI owns the screen.
    File(&'a Path),
    Stderr,
}

/// Map `-v` occurrences and `--debug` to a level filter.
pub fn level_for(verbose: u8, debug: bool) -> LevelFilter {
    if debug {
        return LevelFilter::Debug;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

pub fn init(level: LevelFilter, sink: LogSink<'_>) -> Result<()> {
    let dispatch = fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .level_for("surah", level);

    let dispatch = match sink {
        LogSink::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            dispatch
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}: {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(fern::log_file(path)?)
        }
        LogSink::Stderr => {
            let colors = ColoredLevelConfig::new()
                .error(Color::Red)
                .warn(Color::Yellow)
                .info(Color::Green)
                .debug(Color::Blue);
            dispatch
                .format(move |out, message, record| {
                    out.finish(format_args!("[{}] {}", colors.color(record.level()), message))
                })
                .chain(std::io::stderr())
        }
    };

    dispatch
        .apply()
        .map_err(|err| eyre::eyre!("Could not install logger: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(7, false), LevelFilter::Debug);
        assert_eq!(level_for(0, true), LevelFilter::Debug);
    }
}
