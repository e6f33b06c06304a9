use tracing::info;

use super::error::{DispatchError, MuxResult};
use super::Multiplexer;
use crate::models::{CommandSpec, PaneHandle, SubmitMode, REVIEW_COMMENT};

/// Types `command` into `pane` and submits it according to its mode.
pub async fn send_to_pane<M: Multiplexer + ?Sized>(
    mux: &M,
    pane: &PaneHandle,
    command: &CommandSpec,
) -> MuxResult<()> {
    mux.send_keys(pane, &command.text).await?;
    match command.mode {
        SubmitMode::Execute => mux.send_enter(pane).await?,
        SubmitMode::Review => {
            mux.send_keys(pane, REVIEW_COMMENT).await?;
            mux.send_enter(pane).await?;
        }
        SubmitMode::Manual => {}
    }
    Ok(())
}

/// Sends the i-th command to the i-th pane. Stops at the first failure.
pub async fn dispatch_commands<M: Multiplexer + ?Sized>(
    mux: &M,
    panes: &[PaneHandle],
    commands: &[CommandSpec],
) -> Result<(), DispatchError> {
    for (index, (pane, command)) in panes.iter().zip(commands).enumerate() {
        send_to_pane(mux, pane, command)
            .await
            .map_err(|source| DispatchError {
                index,
                pane: pane.clone(),
                source,
            })?;
        info!(
            "[{}] {} -> {} ({})",
            index,
            command.text,
            pane,
            command.mode.description()
        );
    }
    Ok(())
}
