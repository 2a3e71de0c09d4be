use env_logger::{fmt::Formatter, Builder, Env, Logger};
use log::{LevelFilter, Log, Record, SetLoggerError};
use std::io::{self, Write};

/// `[<timestamp>]: <message>:`, one record per line.
fn format_record(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(buf, "[{}]: {}:", buf.timestamp(), record.args())
}

fn builder(verbose: bool) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.format(format_record);
    builder
}

/// Builds the logger handed to the scaffolder, writing to stderr.
///
/// `RUST_LOG` is honored and defaults to `info`; `verbose` forces `debug`.
pub fn build_logger(verbose: bool) -> Logger {
    builder(verbose).build()
}

/// Installs [`build_logger`] as the process logger and returns it, so the same instance
/// serves both the scaffolder and `log::debug!` diagnostics.
pub fn install(verbose: bool) -> Result<&'static dyn Log, SetLoggerError> {
    let logger = build_logger(verbose);
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);

    Ok(log::logger())
}
