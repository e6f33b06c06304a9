use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{init, run};

#[derive(Parser)]
#[command(name = "remembered")]
#[command(about = "Launch your remembered commands into tiled tmux panes and attach")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a new window with one pane per command and attach (default)
    Run(run::Args),

    /// Write an example config file
    Init(init::Args),
}
