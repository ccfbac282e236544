//! Clap derive structures for the `partshop` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// partshop -- browse and administer an automotive-parts storefront
#[derive(Debug, Parser)]
#[command(
    name = "partshop",
    version,
    about = "Browse and administer a partshop storefront from the command line",
    long_about = "Talks to a partshop backend: search the catalog, inspect orders,\n\
        and run owner admin tasks (product edits, order status, CSV import).",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PARTSHOP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL for both shop and auth endpoints (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Login email (overrides profile)
    #[arg(long, short = 'e', global = true)]
    pub email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARTSHOP_OUTPUT",
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

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
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
    /// Search and inspect catalog products
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// Browse the category tree
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// List brand names
    Brands {
        /// Only brands under this topic-root category
        #[arg(long)]
        root_category: Option<i64>,
    },

    /// Sign in and show the current user
    Whoami,

    /// Your own orders
    Orders(OrdersArgs),

    /// Your address book
    Addresses(AddressesArgs),

    /// Owner administration
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Paging Arguments ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: u32,
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
    /// Search the catalog
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Show one product by slug (SKU)
    Get {
        /// Product slug
        slug: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    #[command(flatten)]
    pub paging: PageArgs,

    /// Sort key: price_asc, price_desc, name_asc, name_desc, newest
    #[arg(long)]
    pub sort: Option<String>,

    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Category slug
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Brand name
    #[arg(long, short = 'b')]
    pub brand: Option<String>,

    /// Any backend filter as NAME=VALUE (repeatable), e.g. yearFrom=2004
    #[arg(long, short = 'f', value_name = "NAME=VALUE")]
    pub filter: Vec<String>,
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
    /// List categories
    #[command(alias = "ls")]
    List {
        /// Only top-level categories
        #[arg(long)]
        roots: bool,
    },

    /// Show one category by slug
    Get { slug: String },

    /// List direct children of a category
    Children { id: i64 },

    /// Show which topic root (cars, parts, tools, custom) a category is under
    Topic { slug: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORDERS (customer)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List your orders
    #[command(alias = "ls")]
    List(PageArgs),

    /// Show one order
    Get { id: i64 },

    /// Show your most recent order
    Latest,

    /// Find the order behind a hosted checkout session
    Session {
        /// Checkout session ID from the return URL
        session_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADDRESSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// List saved addresses
    #[command(alias = "ls")]
    List,

    /// Add an address from a JSON file
    Create {
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,
    },

    /// Delete an address
    Delete { id: i64 },

    /// Make an address the default
    Default { id: i64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Manage products (including inactive ones)
    Products(AdminProductsArgs),

    /// Manage categories
    Categories(AdminCategoriesArgs),

    /// Manage orders
    Orders(AdminOrdersArgs),

    /// Show the dashboard summary
    Dashboard,

    /// Bulk import products from CSV
    Import {
        /// CSV file
        file: PathBuf,

        /// Validate and report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Suggest product fields from a photo
    Ocr {
        /// Image file
        image: PathBuf,

        /// Only show fields at or above this confidence (0.0-1.0)
        #[arg(long, default_value = "0.8")]
        min_confidence: f64,
    },
}

#[derive(Debug, Args)]
pub struct AdminProductsArgs {
    #[command(subcommand)]
    pub command: AdminProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        paging: PageArgs,

        /// Free-text search
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one product by ID
    Get { id: i64 },

    /// Create a product from a JSON file (checked for publish readiness)
    Create {
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,

        /// Category slug, used to recognise wheel listings
        #[arg(long)]
        category_slug: Option<String>,

        /// Skip the publish-readiness check
        #[arg(long)]
        unchecked: bool,
    },

    /// Replace a product from a JSON file (checked for publish readiness)
    Update {
        id: i64,

        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,

        /// Category slug, used to recognise wheel listings
        #[arg(long)]
        category_slug: Option<String>,

        /// Skip the publish-readiness check
        #[arg(long)]
        unchecked: bool,
    },

    /// Make a product visible in the shop
    Activate { id: i64 },

    /// Hide a product from the shop
    Deactivate { id: i64 },

    /// Delete a product
    Delete { id: i64 },

    /// Upload a product image
    UploadImage {
        id: i64,
        /// Image file
        image: PathBuf,
    },

    /// Mark an image as the main product image
    MainImage { id: i64, image_id: i64 },

    /// Delete a product image
    DeleteImage { id: i64, image_id: i64 },
}

#[derive(Debug, Args)]
pub struct AdminCategoriesArgs {
    #[command(subcommand)]
    pub command: AdminCategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCategoriesCommand {
    /// Create a category from a JSON file
    Create {
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,
    },

    /// Replace a category from a JSON file
    Update {
        id: i64,
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,
    },

    /// Delete a category
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct AdminOrdersArgs {
    #[command(subcommand)]
    pub command: AdminOrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminOrdersCommand {
    /// List orders
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        paging: PageArgs,

        /// Only orders in this status (e.g. paid, shipped)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one order
    Get { id: i64 },

    /// Request a status change
    SetStatus {
        id: i64,
        /// New status (e.g. processing, shipped, delivered)
        status: String,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key (api_url, shop_api_base_url, auth_api_base_url, email, insecure, timeout, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_product_search_with_filters() {
        let cli = Cli::try_parse_from([
            "partshop", "products", "list", "--page", "3", "-f", "make=BMW", "-f", "yearFrom=2004",
            "--sort", "price_desc",
        ]);
        let Ok(Cli {
            command: Command::Products(ProductsArgs {
                command: ProductsCommand::List(args),
            }),
            ..
        }) = cli
        else {
            panic!("unexpected parse result");
        };
        assert_eq!(args.paging.page, 3);
        assert_eq!(args.filter, vec!["make=BMW", "yearFrom=2004"]);
        assert_eq!(args.sort.as_deref(), Some("price_desc"));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["partshop", "admin", "dashboard", "-k", "--timeout", "5"]);
        let Ok(cli) = cli else {
            panic!("unexpected parse failure");
        };
        assert!(cli.global.insecure);
        assert_eq!(cli.global.timeout, Some(5));
    }
}
