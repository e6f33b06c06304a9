use tracing::info;

use super::error::MuxResult;
use super::Multiplexer;
use crate::models::WindowHandle;

/// Focuses `window` and hands the terminal to `tmux attach-session`.
///
/// With the real client this does not return on success: the current process
/// is replaced by the attach. Errors from either step are returned as is.
pub async fn attach_to_window<M: Multiplexer + ?Sized>(
    mux: &M,
    session: &str,
    window: &WindowHandle,
) -> MuxResult<()> {
    mux.select_window(window).await?;
    info!("Attaching to session {}", session);
    mux.attach_session(session).await
}
