// src/logging.rs

use flexi_logger::{FileSpec, FlexiLoggerError, Logger, LoggerHandle, WriteMode};

/// Starts file-based logging. Stdout belongs to the terminal UI, so log
/// output goes to `burble.log` in the working directory. Level comes from
/// `RUST_LOG`, defaulting to `info`.
///
/// The returned handle must stay alive for the duration of the program.
pub fn init() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .basename("burble")
                .suppress_timestamp(),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()
}
