use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Map a count of `-v` flags to a log level (warnings are always shown)
pub fn select_log_level_filter(verbosity: i32) -> LevelFilter {
    match verbosity {
        i32::MIN..=0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Log to stderr so that stdout only carries the requested output
pub fn init_logging(verbosity: i32) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        select_log_level_filter(verbosity),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
