//! Logging setup shared by the binaries and the test suites.
use crate::error::{CcError, CcResult};
use crate::util::find_project_root;
use flexi_logger::{self, writers::FileLogWriter, Duplicate, LogTarget, Logger};
use std::fs;
use std::sync::Once;

/// Starts the logging backend of a binary.
///
/// Everything at `info` and above (overridable through `RUST_LOG`) goes into a
/// `logs` directory at the project root; `info` is duplicated to stdout and
/// `error` to stderr. Panics are reported through the `log` facade as well, so
/// a dying worker thread still ends up in the logfile.
pub fn init_logging() -> CcResult<()> {
    let mut log_dir = find_project_root()?;
    log_dir.push("logs");
    fs::create_dir_all(&log_dir)?;

    let file_writer = FileLogWriter::builder()
        .directory(log_dir)
        .format(flexi_logger::opt_format)
        .try_build()
        .map_err(|error| CcError::from(format!("cannot open the log directory: {}", error)))?;
    Logger::with_env_or_str("info")
        .format(flexi_logger::colored_opt_format)
        .log_target(LogTarget::Writer(Box::new(file_writer)))
        .duplicate_to_stdout(Duplicate::Info)
        .duplicate_to_stderr(Duplicate::Error)
        .start()
        .map_err(|error| CcError::from(format!("cannot start the logger: {}", error)))?;
    log_panics::init();
    Ok(())
}

static TEST_LOGGING: Once = Once::new();

/// Starts a plain stderr logger for the test suites.
///
/// Shows `warn` and above unless `RUST_LOG` says otherwise. Tests call this in
/// any order and any number of times; only the first call starts the backend.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        Logger::with_env_or_str("warn")
            .format(flexi_logger::colored_opt_format)
            .start()
            .unwrap_or_else(|error| panic!("logging initialization failed: {}", error));
    });
}
