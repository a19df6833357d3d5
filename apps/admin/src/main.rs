use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_client::{CatalogConfig, GraphqlCatalogClient, DEFAULT_API_VERSION};
use clap::{Parser, Subcommand};
use page_controller::{FormField, PageController};
use shared::domain::{Direction, ProductId, ProductStatus};
use tracing::info;

mod browse;
mod render;

use render::render_page;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit the products of one shop")]
struct Args {
    #[arg(long, env = "SHOPIFY_DOMAIN")]
    domain: String,
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    token: String,
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of products.
    List {
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long, default_value = "next")]
        direction: Direction,
    },
    /// Create a product and attach its SKU.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "ACTIVE")]
        status: ProductStatus,
        #[arg(long, default_value = "")]
        sku: String,
    },
    /// Delete a product by id.
    Delete { product_id: String },
    /// Interactive session (default).
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let config = CatalogConfig::for_shop(&args.domain, &args.api_version, args.token)
        .context("invalid shop domain")?;
    let client = GraphqlCatalogClient::new(config);
    info!(endpoint = %client.endpoint(), "catalog client ready");
    let controller = PageController::new(Arc::new(client));

    match args.command.unwrap_or(Command::Browse) {
        Command::List { cursor, direction } => {
            let result = controller.request_page(cursor, direction).await;
            finish(&controller, result.map(|_| ())).await
        }
        Command::Create { title, status, sku } => {
            controller.open_create_modal().await;
            for field in [
                FormField::Title(title),
                FormField::Status(status),
                FormField::Sku(sku),
            ] {
                controller.update_form(field).await?;
            }
            let result = controller.submit_pending_form().await.map(|outcome| {
                println!(
                    "created {} (sku attached: {})",
                    outcome.product.product_id, outcome.sku_attached
                );
            });
            finish(&controller, result).await
        }
        Command::Delete { product_id } => {
            let product_id = ProductId(product_id);
            let result = controller.request_delete(product_id.clone()).await.map(|_| {
                println!("deleted {product_id}");
            });
            finish(&controller, result).await
        }
        Command::Browse => {
            println!("{}", browse::HELP);
            browse::run(controller).await
        }
    }
}

/// Prints the page as it stands after a one-shot action, banner included.
async fn finish(
    controller: &PageController,
    result: Result<(), page_controller::ControllerError>,
) -> Result<()> {
    print!("{}", render_page(&controller.snapshot().await));
    result.map_err(Into::into)
}
