//! Product management command handlers (admin).

use serde::Serialize;
use tabled::Tabled;

use shoply_api::Product;
use shoply_core::{AdminConsole, CoreError, Role};
use shoply_config::Config;

use crate::cli::{GlobalOpts, ProductFields, ProductsArgs, ProductsCommand};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
}

fn to_row(product: &Product) -> ProductRow {
    ProductRow {
        id: product.id,
        name: product.name.clone(),
        category: product.category_name().unwrap_or("N/A").to_owned(),
        price: output::format_price(product.price),
        stock: product.total_items_in_stock,
    }
}

fn detail(product: &Product) -> String {
    let mut out = format!(
        "Product {}\n  Name:     {}\n  Category: {}\n  Price:    {}\n  Stock:    {}",
        product.id,
        product.name,
        product.category_name().unwrap_or("N/A"),
        output::format_price(product.price),
        product.total_items_in_stock,
    );
    if let Some(ref url) = product.image_url {
        out.push_str(&format!("\n  Image:    {url}"));
    }
    out
}

/// Copy provided flag values over the form's current field values.
/// Absent flags keep what the form was opened with (blank in create
/// mode, the entity's current values in edit mode).
fn apply_fields(form: &mut shoply_core::ProductForm, fields: ProductFields) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(price) = fields.price {
        form.price = price;
    }
    if let Some(stock) = fields.stock {
        form.stock = stock;
    }
    if let Some(category) = fields.category {
        form.category_id = category;
    }
    if let Some(image_url) = fields.image_url {
        form.image_url = image_url;
    }
}

pub async fn handle(
    args: ProductsArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_role(Role::Admin)?;
    let client = util::build_client(config)?;

    let mut console = AdminConsole::new();
    console.load(&client).await?;

    match args.command {
        ProductsCommand::List => {
            let out = output::render_list(&global.output, console.products(), to_row, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
        }

        ProductsCommand::Get { id } => {
            let product = client.get_product(id).await.map_err(|err| {
                if err.is_not_found() {
                    CliError::NotFound {
                        resource_type: "product".into(),
                        identifier: id.to_string(),
                        list_command: "products list".into(),
                    }
                } else {
                    CliError::from(CoreError::from(err))
                }
            })?;
            let out = output::render_single(&global.output, &product, detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
        }

        ProductsCommand::Add(fields) => {
            console.open_product_form(None)?;
            let form = console
                .product_form
                .as_mut()
                .ok_or_else(|| CliError::Internal("product form did not open".into()))?;
            apply_fields(form, fields);
            console.submit_product_form(&client).await?;
            output::print_output("Product created.", global.quiet);
        }

        ProductsCommand::Edit { id, fields } => {
            console.open_product_form(Some(id))?;
            let form = console
                .product_form
                .as_mut()
                .ok_or_else(|| CliError::Internal("product form did not open".into()))?;
            apply_fields(form, fields);
            console.submit_product_form(&client).await?;
            output::print_output(&format!("Product {id} updated."), global.quiet);
        }

        ProductsCommand::Delete { id } => {
            let name = console
                .product(id)
                .map(|p| p.name.clone())
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "product".into(),
                    identifier: id.to_string(),
                    list_command: "products list".into(),
                })?;

            console.request_delete_product(id);
            let prompt =
                format!("Delete product '{name}'? This action cannot be undone.");
            if !util::confirm(&prompt, global.yes)? {
                console.cancel_delete_product();
                output::print_output("Aborted.", global.quiet);
                return Ok(());
            }

            console.confirm_delete_product(&client).await?;
            output::print_output("Product deleted.", global.quiet);
        }
    }

    Ok(())
}
