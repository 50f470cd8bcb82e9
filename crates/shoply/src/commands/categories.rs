//! Category management command handlers (admin).

use serde::Serialize;
use tabled::Tabled;

use shoply_api::Category;
use shoply_core::{AdminConsole, Role};
use shoply_config::Config;

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Category Name")]
    name: String,
}

fn to_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: category.id,
        name: category.name.clone(),
    }
}

pub async fn handle(
    args: CategoriesArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_role(Role::Admin)?;
    let client = util::build_client(config)?;

    let mut console = AdminConsole::new();
    console.load(&client).await?;

    match args.command {
        CategoriesCommand::List => {
            let out = output::render_list(&global.output, console.categories(), to_row, |c| {
                c.id.to_string()
            });
            output::print_output(&out, global.quiet);
        }

        CategoriesCommand::Add { name } => {
            console.open_category_form(None)?;
            if let Some(form) = console.category_form.as_mut() {
                form.name = name;
            }
            console.submit_category_form(&client).await?;
            output::print_output("Category created.", global.quiet);
        }

        CategoriesCommand::Edit { id, name } => {
            console.open_category_form(Some(id))?;
            if let Some(form) = console.category_form.as_mut() {
                form.name = name;
            }
            console.submit_category_form(&client).await?;
            output::print_output(&format!("Category {id} updated."), global.quiet);
        }

        CategoriesCommand::Delete { id } => {
            let name = console
                .category(id)
                .map(|c| c.name.clone())
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "category".into(),
                    identifier: id.to_string(),
                    list_command: "categories list".into(),
                })?;

            console.request_delete_category(id);
            let prompt = format!(
                "Delete category '{name}'? Make sure no products are assigned to it."
            );
            if !util::confirm(&prompt, global.yes)? {
                console.cancel_delete_category();
                output::print_output("Aborted.", global.quiet);
                return Ok(());
            }

            console.confirm_delete_category(&client).await?;
            output::print_output("Category deleted.", global.quiet);
        }
    }

    Ok(())
}
