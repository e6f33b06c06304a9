use tracing::{debug, warn};

use super::Multiplexer;

/// Turns on tmux mouse support (click to focus, drag to resize, wheel to
/// scroll). The option is server-wide, not scoped to our window.
///
/// Falls back to the legacy `set -g` spelling; if that also fails the run
/// carries on without mouse support.
pub async fn enable_mouse<M: Multiplexer + ?Sized>(mux: &M) {
    set_global_option_with_fallback(mux, "mouse", "on").await
}

async fn set_global_option_with_fallback<M: Multiplexer + ?Sized>(mux: &M, name: &str, value: &str) {
    let Err(e) = mux.set_global_option(name, value).await else {
        return;
    };
    debug!("set-option -g {} {} failed ({}), trying legacy syntax", name, value, e);

    if let Err(e) = mux.set_global_option_legacy(name, value).await {
        warn!("Could not set tmux option {}={}: {}", name, value, e);
    }
}
