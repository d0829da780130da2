use std::io;
use std::process::{Command, Stdio};

use kbnode_core::LinkOpener;

/// Opens links in a detached browser process.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    program: Option<String>,
}

impl SystemBrowser {
    /// Use `program` instead of the platform default when given.
    pub fn new(program: Option<String>) -> Self {
        Self { program }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(program) = &self.program {
            let mut cmd = Command::new(program);
            cmd.arg(url);
            return cmd;
        }
        platform_command(url)
    }
}

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> io::Result<()> {
        let mut cmd = self.command(url);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // Not waited on; the browser owns the page from here.
        cmd.spawn()?;
        tracing::info!(event = "link_opened", program = ?cmd.get_program());
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("explorer");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
