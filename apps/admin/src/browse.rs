//! Line-oriented session over one page controller: every line is one action.

use std::sync::Arc;

use page_controller::{ControllerError, FormField, PageController};
use shared::domain::{ProductId, ProductStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render::render_page;

pub const HELP: &str = "\
commands:
  n | next                 next page
  p | prev                 previous page
  r | refresh              reload the page on screen
  new                      open the create form
  title <text>             set the form title
  status <ACTIVE|DRAFT|ARCHIVED>
  sku <text>               set the form SKU (empty to clear)
  save                     submit the form
  cancel                   close the form and discard it
  d | delete <product id>  delete a product
  q | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Refresh,
    OpenForm,
    Field(FormField),
    Save,
    Cancel,
    Delete(ProductId),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" | "previous" => BrowseCommand::Previous,
        "r" | "refresh" => BrowseCommand::Refresh,
        "new" => BrowseCommand::OpenForm,
        "title" => BrowseCommand::Field(FormField::Title(rest.to_string())),
        "status" => {
            let status = rest.parse::<ProductStatus>().map_err(|err| err.to_string())?;
            BrowseCommand::Field(FormField::Status(status))
        }
        "sku" => BrowseCommand::Field(FormField::Sku(rest.to_string())),
        "save" => BrowseCommand::Save,
        "cancel" => BrowseCommand::Cancel,
        "d" | "delete" => {
            if rest.is_empty() {
                return Err("delete needs a product id".into());
            }
            BrowseCommand::Delete(ProductId::from(rest))
        }
        "" | "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type help")),
    };
    Ok(command)
}

/// Runs one parsed command. Returns `false` once the session should end.
pub async fn dispatch(
    controller: &PageController,
    command: BrowseCommand,
) -> Result<bool, ControllerError> {
    debug!(?command, "dispatching");
    match command {
        BrowseCommand::Next => controller.request_next_page().await.map(|_| ())?,
        BrowseCommand::Previous => controller.request_previous_page().await.map(|_| ())?,
        BrowseCommand::Refresh => controller.refresh().await.map(|_| ())?,
        BrowseCommand::OpenForm => controller.open_create_modal().await,
        BrowseCommand::Field(field) => controller.update_form(field).await?,
        BrowseCommand::Save => {
            let outcome = controller.submit_pending_form().await?;
            println!("created {}", outcome.product.product_id);
        }
        BrowseCommand::Cancel => controller.close_create_modal().await,
        BrowseCommand::Delete(product_id) => controller.request_delete(product_id).await?,
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit => return Ok(false),
    }
    Ok(true)
}

pub async fn run(controller: Arc<PageController>) -> anyhow::Result<()> {
    if let Err(err) = controller.refresh().await {
        eprintln!("{err}");
    }
    print!("{}", render_page(&controller.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        let redraw = !matches!(command, BrowseCommand::Help);
        match dispatch(&controller, command).await {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) => eprintln!("{err}"),
        }
        if redraw {
            print!("{}", render_page(&controller.snapshot().await));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
