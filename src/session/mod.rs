mod dispatcher;
mod error;
mod handoff;
mod locator;
mod options;
mod reconciler;
mod tmux;

#[cfg(test)]
pub(crate) mod fake;

pub use dispatcher::dispatch_commands;
pub use handoff::attach_to_window;
pub use locator::{locate_window, unique_window_name, LocatedWindow};
pub use options::enable_mouse;
pub use reconciler::reconcile_panes;
pub use tmux::{Multiplexer, TmuxManager, TMUX_BIN};
