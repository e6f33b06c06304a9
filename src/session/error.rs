use thiserror::Error;

use crate::models::PaneHandle;

#[derive(Debug, Error)]
pub enum MultiplexerError {
    #[error("`tmux {command}` failed ({}): {stderr}", describe_status(.status))]
    CommandFailed {
        command: String,
        /// `None` when tmux was terminated by a signal.
        status: Option<i32>,
        stderr: String,
    },

    #[error("Failed to run `tmux {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl MultiplexerError {
    pub fn command_failed(args: &[&str], status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: args.join(" "),
            status,
            stderr: stderr.into().trim().to_string(),
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type MuxResult<T> = std::result::Result<T, MultiplexerError>;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error(transparent)]
    Multiplexer(#[from] MultiplexerError),

    #[error("Failed to create or identify tmux window '{window_name}' in session '{session}'")]
    Unresolved { session: String, window_name: String },
}

#[derive(Debug, Error)]
#[error("Failed to send command {index} to pane {pane}: {source}")]
pub struct DispatchError {
    pub index: usize,
    pub pane: PaneHandle,
    #[source]
    pub source: MultiplexerError,
}
