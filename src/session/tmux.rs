use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::{MultiplexerError, MuxResult};
use crate::models::{Orientation, PaneHandle, WindowHandle};

pub const TMUX_BIN: &str = "tmux";
pub const TILED_LAYOUT: &str = "tiled";

const WINDOW_ID_FORMAT: &str = "#{window_id}";
const WINDOW_LIST_FORMAT: &str = "#{window_id} #{window_name}";
const PANE_ID_FORMAT: &str = "#{pane_id}";

/// Primitive control operations against a terminal multiplexer.
///
/// Every call is a single blocking round trip; callers await them strictly in
/// sequence and never cache replies across structural changes.
#[async_trait::async_trait]
pub trait Multiplexer: Send + Sync {
    async fn has_session(&self, session: &str) -> bool;

    /// Creates a detached session whose first window is `window_name`.
    /// Returns `None` when tmux did not report the new window's id.
    async fn new_session(&self, session: &str, window_name: &str)
        -> MuxResult<Option<WindowHandle>>;

    /// Same contract as [`Multiplexer::new_session`] for an existing session.
    async fn new_window(&self, session: &str, window_name: &str)
        -> MuxResult<Option<WindowHandle>>;

    async fn list_windows(&self, session: &str) -> MuxResult<Vec<(WindowHandle, String)>>;

    /// Panes of `window` in creation order.
    async fn list_panes(&self, window: &WindowHandle) -> MuxResult<Vec<PaneHandle>>;

    async fn split_window(&self, window: &WindowHandle, orientation: Orientation) -> MuxResult<()>;

    async fn select_layout(&self, window: &WindowHandle, layout: &str) -> MuxResult<()>;

    async fn kill_pane(&self, pane: &PaneHandle) -> MuxResult<()>;

    /// Types `text` literally; key names inside it are not interpreted.
    async fn send_keys(&self, pane: &PaneHandle, text: &str) -> MuxResult<()>;

    async fn send_enter(&self, pane: &PaneHandle) -> MuxResult<()>;

    async fn set_global_option(&self, name: &str, value: &str) -> MuxResult<()>;

    /// `set -g` spelling understood by very old tmux releases.
    async fn set_global_option_legacy(&self, name: &str, value: &str) -> MuxResult<()>;

    async fn select_window(&self, window: &WindowHandle) -> MuxResult<()>;

    /// Hands the terminal over to an interactive attach. On unix this replaces
    /// the current process and only returns on failure.
    async fn attach_session(&self, session: &str) -> MuxResult<()>;
}

/// Drives the tmux binary resolved on `PATH`.
#[derive(Debug, Clone)]
pub struct TmuxManager {
    binary: PathBuf,
}

impl TmuxManager {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    async fn run(&self, args: &[&str]) -> MuxResult<String> {
        debug!("tmux {}", args.join(" "));
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| MultiplexerError::Spawn {
                command: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(MultiplexerError::command_failed(
                args,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Runs a creation command with `-P -F #{window_id}` so tmux prints the new
    /// window's id. Releases without the print flag reject it, in which case the
    /// command is repeated without it and the id is left for the caller to find.
    async fn create_capturing(&self, base: &[&str]) -> MuxResult<Option<WindowHandle>> {
        let mut capturing = base.to_vec();
        capturing.extend(["-P", "-F", WINDOW_ID_FORMAT]);

        match self.run(&capturing).await {
            Ok(stdout) => Ok(parse_window_id(&stdout)),
            Err(MultiplexerError::CommandFailed { stderr, .. }) => {
                debug!("tmux rejected -P -F ({}), retrying without it", stderr);
                self.run(base).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl Multiplexer for TmuxManager {
    async fn has_session(&self, session: &str) -> bool {
        Command::new(&self.binary)
            .args(["has-session", "-t", session])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn new_session(
        &self,
        session: &str,
        window_name: &str,
    ) -> MuxResult<Option<WindowHandle>> {
        self.create_capturing(&["new-session", "-d", "-s", session, "-n", window_name])
            .await
    }

    async fn new_window(
        &self,
        session: &str,
        window_name: &str,
    ) -> MuxResult<Option<WindowHandle>> {
        self.create_capturing(&["new-window", "-t", session, "-n", window_name])
            .await
    }

    async fn list_windows(&self, session: &str) -> MuxResult<Vec<(WindowHandle, String)>> {
        let stdout = self
            .run(&["list-windows", "-t", session, "-F", WINDOW_LIST_FORMAT])
            .await?;
        Ok(parse_window_list(&stdout))
    }

    async fn list_panes(&self, window: &WindowHandle) -> MuxResult<Vec<PaneHandle>> {
        let stdout = self
            .run(&["list-panes", "-t", window.as_str(), "-F", PANE_ID_FORMAT])
            .await?;
        Ok(parse_pane_list(&stdout))
    }

    async fn split_window(&self, window: &WindowHandle, orientation: Orientation) -> MuxResult<()> {
        self.run(&["split-window", orientation.flag(), "-t", window.as_str()])
            .await?;
        Ok(())
    }

    async fn select_layout(&self, window: &WindowHandle, layout: &str) -> MuxResult<()> {
        self.run(&["select-layout", "-t", window.as_str(), layout])
            .await?;
        Ok(())
    }

    async fn kill_pane(&self, pane: &PaneHandle) -> MuxResult<()> {
        self.run(&["kill-pane", "-t", pane.as_str()]).await?;
        Ok(())
    }

    async fn send_keys(&self, pane: &PaneHandle, text: &str) -> MuxResult<()> {
        self.run(&["send-keys", "-t", pane.as_str(), "-l", "--", text])
            .await?;
        Ok(())
    }

    async fn send_enter(&self, pane: &PaneHandle) -> MuxResult<()> {
        self.run(&["send-keys", "-t", pane.as_str(), "C-m"]).await?;
        Ok(())
    }

    async fn set_global_option(&self, name: &str, value: &str) -> MuxResult<()> {
        self.run(&["set-option", "-g", name, value]).await?;
        Ok(())
    }

    async fn set_global_option_legacy(&self, name: &str, value: &str) -> MuxResult<()> {
        self.run(&["set", "-g", name, value]).await?;
        Ok(())
    }

    async fn select_window(&self, window: &WindowHandle) -> MuxResult<()> {
        self.run(&["select-window", "-t", window.as_str()]).await?;
        Ok(())
    }

    async fn attach_session(&self, session: &str) -> MuxResult<()> {
        let args = ["attach-session", "-t", session];
        debug!("tmux {}", args.join(" "));
        attach(&self.binary, &args).await
    }
}

#[cfg(unix)]
async fn attach(binary: &Path, args: &[&str]) -> MuxResult<()> {
    use std::os::unix::process::CommandExt;

    let source = std::process::Command::new(binary).args(args).exec();
    Err(MultiplexerError::Spawn {
        command: args.join(" "),
        source,
    })
}

#[cfg(not(unix))]
async fn attach(binary: &Path, args: &[&str]) -> MuxResult<()> {
    let status = Command::new(binary)
        .args(args)
        .status()
        .await
        .map_err(|source| MultiplexerError::Spawn {
            command: args.join(" "),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(MultiplexerError::command_failed(args, status.code(), ""))
    }
}

pub fn parse_window_id(stdout: &str) -> Option<WindowHandle> {
    stdout.lines().find_map(WindowHandle::parse)
}

pub fn parse_window_list(stdout: &str) -> Vec<(WindowHandle, String)> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            let (id, name) = line.split_once(' ').unwrap_or((line, ""));
            WindowHandle::parse(id).map(|handle| (handle, name.to_string()))
        })
        .collect()
}

pub fn parse_pane_list(stdout: &str) -> Vec<PaneHandle> {
    stdout.lines().filter_map(PaneHandle::parse).collect()
}
