mod args;

use args::{Args, Command};
use clap::Parser;
use todo_core::{HttpResponse, Session, TodoClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let client = TodoClient::new(&args.base_url)?;
    let session = Session::new(args.session);

    tracing::debug!(base_url = %client.base_url(), command = ?args.command, "running");

    let response = match &args.command {
        Command::List => client.read_all_tasks(&session)?,
        Command::Get { id } => client.read_task(&session, id)?,
        Command::Create { text, date } => client.create_task(&session, text, date)?,
        Command::Update { id, done } => client.update_task(&session, id, *done)?,
        Command::Delete { id } => client.delete_task(&session, id)?,
        Command::Whoami => client.read_current_user(&session)?,
    };

    print!("{}", render(&response));
    Ok(())
}

fn render(response: &HttpResponse) -> String {
    format!(
        "ok: {}\nstatus: {}\n{}\n",
        response.is_success(),
        response.status,
        response.text()
    )
}
