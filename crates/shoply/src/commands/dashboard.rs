//! Dashboard command handler (admin).

use shoply_api::DashboardStats;
use shoply_core::Role;
use shoply_config::Config;

use crate::cli::GlobalOpts;
use crate::commands::util;
use crate::error::CliError;
use crate::output;

fn detail(stats: &DashboardStats) -> String {
    let categories = if stats.categories.is_empty() {
        "none".to_owned()
    } else {
        stats
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Store overview\n  \
         Products in inventory: {}\n  \
         Total inventory value: {}\n  \
         Items in stock:        {}\n  \
         Categories:            {categories}",
        stats.total_products,
        output::format_price(stats.total_value),
        stats.total_items_in_stock,
    )
}

pub async fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    // Gate first: no stats fetch for non-admin sessions.
    util::require_role(Role::Admin)?;
    let client = util::build_client(config)?;

    // Refetched on every visit; the aggregate is never cached locally.
    let stats = client.get_stats().await.map_err(shoply_core::CoreError::from)?;

    let out = output::render_single(&global.output, &stats, detail, |s| {
        s.total_products.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
