//! `fdshop cart` handlers, backed by the configured storage file.

use std::path::PathBuf;

use clap::Subcommand;
use fdshop_cart::{CartStore, FileStorage};
use fdshop_core::AppConfig;
use fdshop_views::{
    add_from_detail, add_from_listing, checkout_gate, CartPanel, CheckoutGate, CheckoutPage,
    CheckoutView, DetailAddOutcome, ListingAddOutcome, QuantityInput,
};

use crate::products::{find_product, load_products, PageKind};

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart contents and totals
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Add a product from a page to the cart
    Add {
        /// HTML file containing the product
        page: PathBuf,
        /// Product name as shown on the page
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value = "listing")]
        kind: PageKind,
        /// Quantity text as typed on the detail page; omit for a listing click
        #[arg(long)]
        quantity: Option<String>,
        /// Page URL used to absolutize image sources
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Set the quantity of a cart line
    Update {
        name: String,
        /// Typed quantity; anything below 1 becomes 1
        quantity: String,
    },
    /// Remove a cart line
    Remove { name: String },
    /// Empty the cart
    Clear,
    /// Show the checkout summary
    Checkout {
        /// Treat the checkout form as submitted and clear the cart
        #[arg(long)]
        submitted: bool,
        #[arg(long)]
        json: bool,
    },
}

fn open_store(config: &AppConfig) -> CartStore<FileStorage> {
    CartStore::with_key(FileStorage::new(&config.storage_path), config.cart_key.clone())
}

pub(crate) fn run_cart(config: &AppConfig, command: CartCommands) -> anyhow::Result<()> {
    let store = open_store(config);
    match command {
        CartCommands::Show { json } => show(&store, json)?,
        CartCommands::Add {
            page,
            name,
            kind,
            quantity,
            base_url,
        } => {
            let products = load_products(&page, kind, base_url.as_deref())?;
            let product = find_product(&products, &name)?;
            match quantity {
                Some(text) => {
                    let mut input = QuantityInput::new();
                    input.set_text(&text);
                    match add_from_detail(&store, product, &input) {
                        DetailAddOutcome::Added { quantity } => {
                            println!("added {quantity} x {name}");
                        }
                        DetailAddOutcome::Updated { quantity } => {
                            println!("{name} already in cart, quantity set to {quantity}");
                        }
                    }
                }
                None => match add_from_listing(&store, product) {
                    ListingAddOutcome::Added => println!("added {name}"),
                    ListingAddOutcome::OpenCart => println!("{name} is already in the cart"),
                },
            }
        }
        CartCommands::Update { name, quantity } => {
            if store.contains(&name) {
                let n = CartPanel::new(&store).set_quantity_text(&name, &quantity);
                println!("{name}: quantity {n}");
            } else {
                println!("{name} is not in the cart");
            }
        }
        CartCommands::Remove { name } => {
            CartPanel::new(&store).remove(&name);
            println!("removed {name}");
        }
        CartCommands::Clear => {
            store.clear();
            println!("cart cleared");
        }
        CartCommands::Checkout { submitted, json } => checkout(config, &store, submitted, json)?,
    }
    Ok(())
}

fn show(store: &CartStore<FileStorage>, json: bool) -> anyhow::Result<()> {
    let view = CartPanel::new(store).render();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    if let Some(message) = view.empty_message {
        println!("{message}");
    }
    for row in &view.rows {
        println!(
            "{:>4} x {:<36}{:>12}  {}",
            row.quantity, row.name, row.price, row.brand
        );
    }
    println!("items: {}  subtotal: {}", view.items_count, view.subtotal);
    Ok(())
}

/// Where the checkout button leads; nothing when the cart is empty.
pub(crate) fn checkout_banner(gate: &CheckoutGate) -> Option<String> {
    match gate {
        CheckoutGate::Redirect(path) => Some(format!("checkout form: {path}")),
        CheckoutGate::Empty => None,
    }
}

fn checkout(
    config: &AppConfig,
    store: &CartStore<FileStorage>,
    submitted: bool,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(line) = checkout_banner(&checkout_gate(store, &config.checkout_path)) {
        println!("{line}");
    }

    let page = CheckoutPage::new(store, config.tax_rate, config.browse_path.clone());
    match page.render() {
        CheckoutView::Empty { browse_path } => {
            println!("{}", fdshop_views::cart_panel::EMPTY_CART_MESSAGE);
            println!("browse products at {browse_path}");
            return Ok(());
        }
        CheckoutView::Items(summary) if json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        CheckoutView::Items(summary) => {
            for row in &summary.rows {
                println!("{:>4} x {:<36}{:>12}", row.quantity, row.name, row.line_total);
            }
            println!();
            println!("Subtotal: {}", summary.subtotal);
            println!("Taxes:    {}", summary.taxes);
            println!("Total:    {}", summary.total);
            println!();
            println!("{}", summary.details_text);
        }
    }

    if submitted && page.on_form_success() {
        println!("order submitted, cart cleared");
    }
    Ok(())
}
