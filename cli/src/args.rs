use clap::{Parser, Subcommand};

/// Send one request to a todo server and print the raw response
#[derive(Debug, Parser)]
#[command(name = "todo", about = "Probe a todo server's REST API")]
pub struct Args {
    /// Base URL of the todo server
    #[arg(long, env = "TODO_BASE_URL", default_value = "http://localhost:1337")]
    pub base_url: String,

    /// Session token sent as the `todo-session` cookie
    #[arg(long, env = "TODO_SESSION", default_value = "", hide_env_values = true)]
    pub session: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every task of the current user
    List,
    /// Fetch one task
    Get { id: String },
    /// Create a task
    Create {
        #[arg(long)]
        text: String,
        #[arg(long)]
        date: String,
    },
    /// Set a task's completion flag
    Update {
        id: String,
        #[arg(long, action = clap::ArgAction::Set)]
        done: bool,
    },
    /// Delete one task
    Delete { id: String },
    /// Show the user the session belongs to
    Whoami,
}
