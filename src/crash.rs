//! Last-resort fault handling for the binary.
//!
//! Errors and panics that reach the top are written to a log file next to the working directory,
//! and the user is offered a look at it before the process exits.

use std::any::Any;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::error;

pub const CRASH_LOG: &str = "munchman-crash.log";

/// Appends `report` to the crash log, stamped with the current time.
pub fn write_log(path: &Path, report: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "munchman {} crashed at {}", env!("CARGO_PKG_VERSION"), OffsetDateTime::now_utc())?;
    writeln!(file)?;
    writeln!(file, "{report}")?;
    file.flush()
}

/// Records an error chain in the crash log and returns where it went.
pub fn report(fault: &anyhow::Error) -> io::Result<PathBuf> {
    error!(error = ?fault, "Fatal error");
    let path = PathBuf::from(CRASH_LOG);
    write_log(&path, &format!("{fault:?}"))?;
    Ok(path)
}

/// Routes panics into the crash log, keeping the default hook's output.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        if let Err(write_error) = write_log(Path::new(CRASH_LOG), &format!("{info}\n\n{backtrace}")) {
            eprintln!("Could not write {CRASH_LOG}: {write_error}");
        }
        default_hook(info);
    }));
}

/// Runs `body`, turning a panic that unwinds out of it into an error.
///
/// The panic hook has already logged the panic by the time this sees it.
pub fn catch_panic<T>(body: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!("Panicked: {}", panic_message(payload.as_ref()))),
    }
}

/// The text a panic was raised with, when it carried any.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown cause"
    }
}

/// Asks on stdin whether to print the crash log, and prints it if the answer is yes.
pub fn offer_log(path: &Path) -> io::Result<()> {
    let mut stderr = io::stderr();
    write!(stderr, "A crash log was written to {}. Show it? [y/N] ", path.display())?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if matches!(answer.trim(), "y" | "Y" | "yes") {
        let contents = fs::read_to_string(path)?;
        writeln!(stderr, "{contents}")?;
    }
    Ok(())
}
