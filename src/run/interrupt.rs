// src/run/interrupt.rs

//! Platform-specific delivery of an interrupt to the child test process.
//!
//! The supervisor only ever calls [`interrupt`]; the POSIX and Windows
//! implementations are selected at compile time.

use anyhow::{anyhow, Result};
use tokio::process::Child;

/// Ask the child to wind down the way a terminal Ctrl-C would.
///
/// The caller must still `wait()` on the child afterwards; cleanup can take
/// arbitrarily long.
#[cfg(unix)]
pub fn interrupt(child: &Child) -> Result<()> {
    let pid = child
        .id()
        .ok_or_else(|| anyhow!("child process has already exited"))?;

    // SIGINT rather than SIGTERM, so the test runner gets the chance to
    // report the partial session before exiting.
    let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGINT) };
    if rc != 0 {
        return Err(anyhow!(
            "failed to signal child process {pid}: {}",
            std::io::Error::last_os_error()
        ));
    }
    Ok(())
}

/// Ask the child to wind down the way a console Ctrl-C would.
///
/// Process group 0 broadcasts the synthesized Ctrl-C to every process
/// attached to this console, the child included; the supervisor's own Ctrl-C
/// listener is told to ignore that one event.
#[cfg(windows)]
pub fn interrupt(_child: &Child) -> Result<()> {
    use windows_sys::Win32::System::Console::{GenerateConsoleCtrlEvent, CTRL_C_EVENT};

    let ok = unsafe { GenerateConsoleCtrlEvent(CTRL_C_EVENT, 0) };
    if ok == 0 {
        return Err(anyhow!(
            "GenerateConsoleCtrlEvent failed: {}",
            std::io::Error::last_os_error()
        ));
    }
    Ok(())
}
