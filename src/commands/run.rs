use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::models::PaneHandle;
use crate::session::{
    attach_to_window, dispatch_commands, enable_mouse, locate_window, reconcile_panes,
    unique_window_name, LocatedWindow, Multiplexer, TmuxManager, TMUX_BIN,
};

#[derive(ClapArgs, Default)]
pub struct Args {
    /// Config file path (default: $REMEMBERED_CONFIG or ~/.config/terminator/commands.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// tmux session to use (overrides config)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Set up the panes but stay detached
    #[arg(long)]
    pub no_attach: bool,
}

/// What a run left behind in tmux.
#[derive(Debug)]
pub enum Outcome {
    /// The config lists no commands; tmux was not touched.
    NothingToRun,
    Launched(Launch),
}

#[derive(Debug)]
pub struct Launch {
    pub window: LocatedWindow,
    pub panes: Vec<PaneHandle>,
}

pub async fn execute(args: Args) -> Result<()> {
    execute_with(args, || which::which(TMUX_BIN), TmuxManager::new).await
}

/// Checks preconditions in order (tmux on `PATH`, then a readable config)
/// before `connect` builds the client, so a failed check never reaches tmux.
pub async fn execute_with<M, F, C>(args: Args, find_tmux: F, connect: C) -> Result<()>
where
    M: Multiplexer,
    F: FnOnce() -> which::Result<PathBuf>,
    C: FnOnce(PathBuf) -> M,
{
    let binary =
        find_tmux().context("tmux is not installed. Run `sudo apt install -y tmux` and try again.")?;

    let attach = !args.no_attach;
    let mut config = Config::load(args.config)?;
    if let Some(session) = args.session {
        config = config.with_session_name(session);
    }

    let tmux = connect(binary);

    match run(&tmux, &config, attach).await? {
        Outcome::NothingToRun => {
            println!("No commands in config. Please populate the 'commands' array.");
        }
        Outcome::Launched(_) if !attach => {
            println!("Run 'tmux attach -t {}' to view them", config.session_name);
        }
        Outcome::Launched(_) => {}
    }

    Ok(())
}

/// Sets up the window, sends every command and, when `attach` is set, hands
/// the terminal over to tmux.
pub async fn run<M: Multiplexer + ?Sized>(mux: &M, config: &Config, attach: bool) -> Result<Outcome> {
    let Some(launch) = launch(mux, config).await? else {
        return Ok(Outcome::NothingToRun);
    };

    if launch.window.created_session {
        println!("Created session {}", config.session_name);
    }
    println!(
        "Launched {} commands in window {} of session {}",
        launch.panes.len(),
        launch.window.name,
        config.session_name
    );

    if attach {
        attach_to_window(mux, &config.session_name, &launch.window.handle)
            .await
            .with_context(|| format!("Failed to attach to session {}", config.session_name))?;
    }

    Ok(Outcome::Launched(launch))
}

/// Creates a fresh window with one pane per configured command and types each
/// command into its pane. Returns `None` without touching tmux when there is
/// nothing to launch.
pub async fn launch<M: Multiplexer + ?Sized>(mux: &M, config: &Config) -> Result<Option<Launch>> {
    let commands = config.command_specs();
    if commands.is_empty() {
        return Ok(None);
    }

    let window_name = unique_window_name(&config.window_prefix);
    let window = locate_window(mux, &config.session_name, &window_name).await?;

    if config.mouse {
        enable_mouse(mux).await;
    }

    let panes = reconcile_panes(mux, &window.handle, commands.len())
        .await
        .with_context(|| {
            format!(
                "Failed to split window {} into {} panes",
                window.handle,
                commands.len()
            )
        })?;
    info!("Window {} has {} panes", window.handle, panes.len());

    dispatch_commands(mux, &panes, &commands).await?;

    Ok(Some(Launch { window, panes }))
}
