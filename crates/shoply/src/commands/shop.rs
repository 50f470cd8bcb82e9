//! The interactive shopping session (regular users).
//!
//! One invocation is one browser session: the catalog is fetched on
//! entry, the cart lives in memory until checkout, logout, or quit.

use std::time::Duration;

use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use shoply_api::Product;
use shoply_core::{CategoryChoice, CheckoutOutcome, Role, ShopSession};
use shoply_config::Config;

use crate::cli::GlobalOpts;
use crate::commands::util;
use crate::error::CliError;
use crate::output;

const MENU: &[&str] = &[
    "Search products",
    "Filter by category",
    "View a product",
    "Add to cart",
    "Edit cart",
    "Checkout",
    "Refresh catalog",
    "Logout",
    "Quit",
];

pub async fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    // Gate first: no catalog fetch for anyone who isn't a shopper.
    util::require_role(Role::User)?;
    let client = util::build_client(config)?;

    let mut shop = ShopSession::new(config.add_to_cart_delay());
    // A failure here is page-level: bail out instead of showing the shop.
    shop.load(&client).await?;

    let color = output::should_color(&global.color);

    loop {
        print_storefront(&shop, color);

        let choice = Select::new()
            .with_prompt("What next")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(util::dialog_err)?;

        match MENU[choice] {
            "Search products" => prompt_search(&mut shop)?,
            "Filter by category" => prompt_category(&mut shop)?,
            "View a product" => view_product(&mut shop).await?,
            "Add to cart" => add_to_cart(&mut shop).await?,
            "Edit cart" => edit_cart(&mut shop)?,
            "Checkout" => checkout(&mut shop, color),
            "Refresh catalog" => shop.load(&client).await?,
            "Logout" => {
                if logout(global)? {
                    // In-memory cart state dies with the session.
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

fn print_storefront(shop: &ShopSession, color: bool) {
    let visible = shop.visible();

    println!();
    if color {
        println!("{}", "── Shoply Store ──".bold());
    } else {
        println!("── Shoply Store ──");
    }

    if visible.is_empty() {
        println!("No products found");
    } else {
        for product in &visible {
            println!("  {}", product_line(product, color));
        }
    }

    let lines = shop.cart.len();
    let total = output::format_price(shop.cart.total());
    if color {
        println!("Cart: {lines} item(s), total {}", total.bold());
    } else {
        println!("Cart: {lines} item(s), total {total}");
    }
}

fn product_line(product: &Product, color: bool) -> String {
    let price = output::format_price(product.price);
    let price = if color {
        product_price_colored(&price)
    } else {
        price
    };
    let stock = if product.in_stock() {
        format!("{} in stock", product.total_items_in_stock)
    } else {
        "out of stock".to_owned()
    };
    format!(
        "{} -- {} ({}, {})",
        product.name,
        price,
        product.category_name().unwrap_or("Uncategorized"),
        stock,
    )
}

fn product_price_colored(price: &str) -> String {
    price.red().to_string()
}

// ── Filter actions ───────────────────────────────────────────────────

fn prompt_search(shop: &mut ShopSession) -> Result<(), CliError> {
    let term: String = Input::new()
        .with_prompt("Search (empty to clear)")
        .allow_empty(true)
        .interact_text()
        .map_err(util::dialog_err)?;
    shop.filter.search = term;
    Ok(())
}

fn prompt_category(shop: &mut ShopSession) -> Result<(), CliError> {
    let mut items = vec!["All Categories".to_owned()];
    items.extend(shop.categories().iter().cloned());

    let choice = Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()
        .map_err(util::dialog_err)?;

    shop.filter.category = if choice == 0 {
        CategoryChoice::All
    } else {
        CategoryChoice::Named(items.swap_remove(choice))
    };
    Ok(())
}

// ── Product actions ──────────────────────────────────────────────────

/// Pick one of the currently visible products; returns an owned
/// snapshot so the caller can mutate the cart.
fn pick_visible(shop: &ShopSession, prompt: &str) -> Result<Option<Product>, CliError> {
    let visible: Vec<Product> = shop.visible().into_iter().cloned().collect();
    if visible.is_empty() {
        println!("No products found");
        return Ok(None);
    }

    let mut items: Vec<String> = visible.iter().map(|p| product_line(p, false)).collect();
    items.push("Back".to_owned());

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()
        .map_err(util::dialog_err)?;

    Ok(visible.into_iter().nth(choice))
}

async fn view_product(shop: &mut ShopSession) -> Result<(), CliError> {
    let Some(product) = pick_visible(shop, "View which product")? else {
        return Ok(());
    };

    println!("\n{}", product.name);
    println!("  Category: {}", product.category_name().unwrap_or("Uncategorized"));
    println!("  Price:    {}", output::format_price(product.price));
    if product.in_stock() {
        println!("  In Stock: {} units available", product.total_items_in_stock);
    } else {
        println!("  Out of Stock");
    }

    if !shop.cart.can_add(&product) {
        return Ok(());
    }
    let add = Confirm::new()
        .with_prompt("Add to cart?")
        .default(true)
        .interact()
        .map_err(util::dialog_err)?;
    if add {
        run_add(shop, &product).await;
    }
    Ok(())
}

async fn add_to_cart(shop: &mut ShopSession) -> Result<(), CliError> {
    let Some(product) = pick_visible(shop, "Add which product")? else {
        return Ok(());
    };
    run_add(shop, &product).await;
    Ok(())
}

/// Run the add operation with its simulated latency behind a spinner.
/// A refusal (out of stock, add already pending) is a notice, not a
/// command failure.
async fn run_add(shop: &mut ShopSession, product: &Product) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Adding '{}' to cart...", product.name));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = shop.cart.add(product).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => println!("Added '{}' to cart.", product.name),
        Err(err) => println!("{err}"),
    }
}

// ── Cart actions ─────────────────────────────────────────────────────

fn edit_cart(shop: &mut ShopSession) -> Result<(), CliError> {
    if shop.cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    let lines: Vec<(i64, String)> = shop
        .cart
        .lines()
        .iter()
        .map(|l| {
            (
                l.product.id,
                format!(
                    "{} x{} -- {}",
                    l.product.name,
                    l.quantity,
                    output::format_price(l.subtotal()),
                ),
            )
        })
        .collect();

    let mut items: Vec<String> = lines.iter().map(|(_, label)| label.clone()).collect();
    items.push("Back".to_owned());

    let choice = Select::new()
        .with_prompt("Which line")
        .items(&items)
        .default(0)
        .interact()
        .map_err(util::dialog_err)?;
    let Some(entry) = lines.get(choice) else {
        return Ok(()); // "Back"
    };
    let product_id = entry.0;

    let actions = &["+1", "-1", "Set quantity", "Remove", "Back"];
    let action = Select::new()
        .with_prompt("Change")
        .items(actions)
        .default(0)
        .interact()
        .map_err(util::dialog_err)?;

    let current = i64::from(shop.cart.line(product_id).map_or(0, |l| l.quantity));
    match actions[action] {
        "+1" => {
            // The increment control stops at the stock snapshot.
            if shop.cart.can_increment(product_id) {
                shop.cart.update_quantity(product_id, current + 1);
            } else {
                println!("No more stock available for this item");
            }
        }
        "-1" => shop.cart.update_quantity(product_id, current - 1),
        "Set quantity" => {
            let quantity: i64 = Input::new()
                .with_prompt("Quantity (0 removes)")
                .interact_text()
                .map_err(util::dialog_err)?;
            shop.cart.update_quantity(product_id, quantity);
        }
        "Remove" => shop.cart.remove(product_id),
        _ => {}
    }
    Ok(())
}

fn checkout(shop: &mut ShopSession, color: bool) {
    match shop.cart.checkout() {
        CheckoutOutcome::EmptyCart => println!("Your cart is empty!"),
        CheckoutOutcome::Placed { total } => {
            let total = output::format_price(total);
            if color {
                println!("Order placed successfully! Total: {}", total.bold());
            } else {
                println!("Order placed successfully! Total: {total}");
            }
        }
    }
}

// ── Session actions ──────────────────────────────────────────────────

fn logout(global: &GlobalOpts) -> Result<bool, CliError> {
    if !util::confirm(
        "Are you sure you want to logout? Your cart will be cleared.",
        global.yes,
    )? {
        return Ok(false);
    }
    shoply_core::logout(&util::session_store())?;
    println!("Logged out.");
    Ok(true)
}
