use tracing::debug;

use super::error::MuxResult;
use super::tmux::TILED_LAYOUT;
use super::Multiplexer;
use crate::models::{Orientation, PaneHandle, WindowHandle};

/// Converges `window` to exactly `target` panes in a tiled layout and returns
/// them in creation order.
///
/// Every split or kill is followed by a relayout, and the pane list is read
/// fresh after each structural change. Surplus panes are killed from the tail
/// so the lowest-index panes survive. A failed split or kill aborts with the
/// window left as it is.
pub async fn reconcile_panes<M: Multiplexer + ?Sized>(
    mux: &M,
    window: &WindowHandle,
    target: usize,
) -> MuxResult<Vec<PaneHandle>> {
    // a window always keeps at least one pane
    let target = target.max(1);

    let mut panes = mux.list_panes(window).await?;
    if panes.is_empty() {
        // brand new window whose first pane is not listed yet
        debug!("{} reported no panes, seeding with one split", window);
        mux.split_window(window, Orientation::Horizontal).await?;
        mux.select_layout(window, TILED_LAYOUT).await?;
        panes = mux.list_panes(window).await?;
    }

    let deficit = target.saturating_sub(panes.len());
    if deficit > 0 {
        debug!("{} has {} panes, splitting {} more", window, panes.len(), deficit);
    }
    for i in 0..deficit {
        mux.split_window(window, Orientation::for_split(i)).await?;
        mux.select_layout(window, TILED_LAYOUT).await?;
    }

    panes = mux.list_panes(window).await?;
    while panes.len() > target {
        let Some(last) = panes.last() else { break };
        debug!("{} has {} panes, killing {}", window, panes.len(), last);
        mux.kill_pane(last).await?;
        panes = mux.list_panes(window).await?;
        mux.select_layout(window, TILED_LAYOUT).await?;
    }

    mux.select_layout(window, TILED_LAYOUT).await?;
    mux.list_panes(window).await
}
