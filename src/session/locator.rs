use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use super::error::LocateError;
use super::Multiplexer;
use crate::models::WindowHandle;

/// How long tmux gets to register a new window before it is looked up by name.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Window name unique to this process, so concurrent runs sharing a session
/// never collide.
pub fn unique_window_name(prefix: &str) -> String {
    format!("{}-{}", prefix, std::process::id())
}

/// Result of [`locate_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedWindow {
    pub handle: WindowHandle,
    pub name: String,
    pub created_session: bool,
}

/// Finds or creates `session`, then always creates a fresh window named
/// `window_name` inside it.
pub async fn locate_window<M: Multiplexer + ?Sized>(
    mux: &M,
    session: &str,
    window_name: &str,
) -> Result<LocatedWindow, LocateError> {
    let created_session = !mux.has_session(session).await;

    let reported = if created_session {
        info!("Creating session {}", session);
        mux.new_session(session, window_name).await?
    } else {
        info!("Adding window {} to session {}", window_name, session);
        mux.new_window(session, window_name).await?
    };

    let handle = match reported {
        Some(handle) => handle,
        None => {
            debug!("tmux did not report a window id, looking up {}", window_name);
            sleep(SETTLE_DELAY).await;
            find_window_by_name(mux, session, window_name)
                .await?
                .ok_or_else(|| LocateError::Unresolved {
                    session: session.to_string(),
                    window_name: window_name.to_string(),
                })?
        }
    };

    debug!("Window {} is {}", window_name, handle);
    Ok(LocatedWindow {
        handle,
        name: window_name.to_string(),
        created_session,
    })
}

/// First window of `session` whose name is exactly `name`.
pub async fn find_window_by_name<M: Multiplexer + ?Sized>(
    mux: &M,
    session: &str,
    name: &str,
) -> Result<Option<WindowHandle>, LocateError> {
    let windows = mux.list_windows(session).await?;
    Ok(windows
        .into_iter()
        .find(|(_, window_name)| window_name == name)
        .map(|(handle, _)| handle))
}
