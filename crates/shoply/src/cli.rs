//! Clap derive structures for the `shoply` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shoply -- storefront and admin console for the Shoply backend
#[derive(Debug, Parser)]
#[command(
    name = "shoply",
    version,
    about = "Shop the catalog and manage the store from the command line",
    long_about = "A command-line client for the Shoply storefront backend.\n\n\
        Shoppers browse the catalog, fill a cart, and check out in an\n\
        interactive session; administrators manage products and categories\n\
        and view inventory statistics.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides the config file)
    #[arg(long, short = 'b', env = "SHOPLY_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHOPLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "SHOPLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in (admin credentials open the console, anything else shops)
    Login(LoginArgs),

    /// Log out and clear the persisted session
    Logout,

    /// Browse the catalog and fill a cart (interactive)
    Shop,

    /// Manage products (admin)
    #[command(alias = "prod", alias = "p")]
    Products(ProductsArgs),

    /// Manage categories (admin)
    #[command(alias = "cat", alias = "c")]
    Categories(CategoriesArgs),

    /// View inventory statistics (admin)
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prompted when omitted; prefer the prompt)
    #[arg(long, hide_env = true, env = "SHOPLY_PASSWORD")]
    pub password: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List all products
    #[command(alias = "ls")]
    List,

    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// Create a product
    Add(ProductFields),

    /// Update a product (omitted fields keep their current values)
    Edit {
        /// Product id
        id: i64,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Product id
        id: i64,
    },
}

/// Product form fields as entered. Values are passed as text and
/// validated at submit time.
#[derive(Debug, Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Price (decimal)
    #[arg(long)]
    pub price: Option<String>,

    /// Items in stock (whole number)
    #[arg(long)]
    pub stock: Option<String>,

    /// Category id (defaults to the first category on create)
    #[arg(long)]
    pub category: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List all categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Edit {
        /// Category id
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a category (asks for confirmation; fails while products
    /// still reference it)
    #[command(alias = "rm")]
    Delete {
        /// Category id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a config file with the current effective values
    Init,

    /// Print the config file path
    Path,
}
