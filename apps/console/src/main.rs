use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{Controller, HttpUsersGateway, UsersGateway};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::load_settings;
use terminal::{parse_command, Command, TerminalView, HELP};

#[derive(Parser, Debug)]
#[command(about = "Manage users of a REST users collection from the terminal")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    users_path: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.users_path {
        settings.users_path = v;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let gateway = HttpUsersGateway::new(&settings.server_url, &settings.users_path)
        .context("failed to configure users gateway")?;
    info!(collection = gateway.collection(), "starting users console");

    let view = TerminalView::new(io::stdin().lock(), io::stdout());
    let mut controller = Controller::new(gateway, view);
    run(&mut controller).await?;
    Ok(())
}

/// Reads commands until `quit` or end of input.
async fn run<G, R, W>(controller: &mut Controller<G, TerminalView<R, W>>) -> Result<()>
where
    G: UsersGateway,
    R: BufRead,
    W: Write,
{
    controller.refresh().await;
    controller.view_mut().say("type 'help' for commands")?;

    loop {
        controller
            .view_mut()
            .check_output()
            .context("failed to write to terminal")?;
        controller.view_mut().prompt()?;
        let Some(line) = controller.view_mut().read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                controller.view_mut().say(&format!("! {err}"))?;
                continue;
            }
        };

        match command {
            Command::List => {
                controller.refresh().await;
            }
            Command::Name(name) => controller.view_mut().set_name(&name),
            Command::Email(email) => controller.view_mut().set_email(&email),
            Command::Save => {
                let form = controller.view().pending().clone();
                controller.submit(form).await;
            }
            Command::Edit(id) => match controller.table().edit_action(id).cloned() {
                Some(target) => controller.begin_edit(&target),
                None => {
                    warn!(user_id = %id, "edit requested for a row that is not displayed");
                    controller.view_mut().say(&format!("! no row with ID {id}"))?;
                }
            },
            Command::Delete(id) => match controller.table().delete_action(id) {
                Some(action) => {
                    controller.request_delete(action.id).await;
                }
                None => controller.view_mut().say(&format!("! no row with ID {id}"))?,
            },
            Command::Cancel => controller.cancel_edit(),
            Command::Html => {
                let html = controller.table().to_html();
                controller.view_mut().say(&html)?;
            }
            Command::Help => controller.view_mut().say(HELP)?,
            Command::Quit => break,
        }
    }

    controller
        .view_mut()
        .check_output()
        .context("failed to write to terminal")
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
