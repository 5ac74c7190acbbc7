use anyhow::{Context, Result};
use cart_sync::config::load_settings;
use cart_sync::lifecycle::{setup_tracing, CartSystem};
use cart_sync::model::{CartView, Notice, Product, ProductId, Session};
use cart_sync::store::HttpBackend;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "cart-sync", about = "Browse the catalog and edit the cart of a storefront")]
struct Args {
    /// Storefront API base URL (overrides settings)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Session token from the storefront login
    #[arg(long, global = true, env = "CART_SYNC_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the full catalog
    Products,
    /// List the products matching a search text
    Search { text: String },
    /// Show the cart
    Cart,
    /// Add one unit of a product that is not in the cart yet
    Add { product_id: String },
    /// Set the quantity of a product; 0 removes it
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let mut settings = load_settings();
    let backend = Arc::new(HttpBackend::new(
        args.endpoint.unwrap_or_else(|| settings.endpoint.clone()),
    ));
    settings.endpoint = backend.endpoint().to_string();
    let session = Session::from_token(args.token);

    let system = CartSystem::new(backend, &settings);
    let mut notices = system.subscribe_notices();

    let outcome = run(&system, &session, args.command).await;
    while let Ok(notice) = notices.try_recv() {
        print_notice(&notice);
    }
    system.shutdown().await.context("shutting down")?;
    outcome
}

async fn run(system: &CartSystem, session: &Session, command: Command) -> Result<()> {
    match command {
        Command::Products => {
            let products = system.load_catalog().await.context("loading catalog")?;
            print_products(&products);
        }
        Command::Search { text } => {
            let products = system
                .catalog
                .search(&text)
                .await
                .with_context(|| format!("searching for {text:?}"))?;
            print_products(&products);
        }
        Command::Cart => {
            load(system, session).await?;
            print_cart(&system.current_view().await?);
        }
        Command::Add { product_id } => {
            load(system, session).await?;
            system
                .coordinator
                .add_to_cart(session, &ProductId::from(product_id))
                .await?;
            print_cart(&system.current_view().await?);
        }
        Command::Set { product_id, qty } => {
            load(system, session).await?;
            system
                .coordinator
                .adjust_quantity(session, &ProductId::from(product_id), qty)
                .await?;
            print_cart(&system.current_view().await?);
        }
    }
    Ok(())
}

/// Shows the catalog and the server cart. Without a token the cart stays empty
/// and mutations report the missing login themselves.
async fn load(system: &CartSystem, session: &Session) -> Result<()> {
    system.load_catalog().await.context("loading catalog")?;
    system.refresh_cart(session).await?;
    Ok(())
}

fn print_notice(notice: &Notice) {
    eprintln!("[{:?}] {}", notice.level, notice.message);
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        println!(
            "{:<20} {:<32} {:<12} {:>8.2}  {}/5",
            product.id, product.name, product.category, product.cost, product.rating
        );
    }
}

fn print_cart(view: &CartView) {
    if view.is_empty() {
        println!("Cart is empty. Add something to your cart to see it here");
        return;
    }
    for item in &view.items {
        println!(
            "{:<20} {:<32} {:>4} x {:>8.2}",
            item.product_id, item.name, item.qty, item.cost
        );
    }
    let summary = &view.summary;
    println!();
    println!("Products        {:>10}", summary.total_qty);
    println!("Subtotal        {:>10.2}", summary.subtotal);
    println!("Shipping        {:>10.2}", summary.shipping);
    println!("Total           {:>10.2}", summary.total);
}
