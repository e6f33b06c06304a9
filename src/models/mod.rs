mod command;
mod handle;

pub use command::{CommandSpec, SubmitMode, REVIEW_COMMENT};
pub use handle::{Orientation, PaneHandle, WindowHandle};
