//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only products in this category.
        #[arg(long)]
        category: Option<String>,

        /// Only products of this brand.
        #[arg(short, long)]
        brand: Option<String>,
    },
    /// Show a product page.
    Show {
        /// Product id or slug.
        product: String,
    },
    /// Show a category page, or list categories.
    Category {
        /// Category slug.
        slug: Option<String>,
    },
    /// List brands.
    Brands,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text.
    pub query: Option<String>,

    /// Filter by brand.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Filter by category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price in reais.
    #[arg(long)]
    pub min: Option<i64>,

    /// Maximum price in reais.
    #[arg(long)]
    pub max: Option<i64>,

    /// Only products that ship free.
    #[arg(long)]
    pub free_shipping: bool,

    /// Only discounted products.
    #[arg(long)]
    pub on_sale: bool,

    /// Sort order (relevance, price-asc, price-desc, name-asc, name-desc).
    #[arg(short, long, default_value = "relevance")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Results per page.
    #[arg(long, default_value = "12")]
    pub per_page: usize,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product id or slug.
        product: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        qty: u32,

        /// Chosen colour.
        #[arg(long)]
        color: Option<String>,

        /// Chosen storage size.
        #[arg(long)]
        storage: Option<String>,

        /// Keep this colour and storage as a separate cart line.
        #[arg(long)]
        variant_line: bool,
    },
    /// Remove a line.
    Remove {
        /// Line id.
        id: String,
    },
    /// Increase a line's quantity.
    Inc {
        /// Line id.
        id: String,

        /// Amount to add.
        #[arg(default_value = "1")]
        by: u32,
    },
    /// Decrease a line's quantity; it is removed when it reaches zero.
    Dec {
        /// Line id.
        id: String,

        /// Amount to subtract.
        #[arg(default_value = "1")]
        by: u32,
    },
    /// Set a line's quantity; zero removes it.
    Set {
        /// Line id.
        id: String,

        /// New quantity.
        quantity: u32,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Show totals with shipping options.
    Quote {
        /// Coupon code.
        #[arg(long)]
        coupon: Option<String>,

        /// Shipping method (pac, sedex).
        #[arg(short, long)]
        shipping: Option<String>,
    },
    /// Look up an address by CEP.
    Cep {
        /// Postal code.
        code: String,
    },
    /// Build the order and print the WhatsApp link.
    Send(SendArgs),
}

/// Order details for `checkout send`.
#[derive(Args, Default)]
pub struct SendArgs {
    /// Prompt for missing details.
    #[arg(short, long)]
    pub interactive: bool,

    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Customer phone.
    #[arg(long)]
    pub phone: Option<String>,

    /// Customer e-mail.
    #[arg(long)]
    pub email: Option<String>,

    /// Postal code; the address is filled in from it when possible.
    #[arg(long)]
    pub cep: Option<String>,

    /// Street.
    #[arg(long)]
    pub street: Option<String>,

    /// House number.
    #[arg(long)]
    pub number: Option<String>,

    /// Complement.
    #[arg(long)]
    pub complement: Option<String>,

    /// Neighborhood.
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// State (UF).
    #[arg(long)]
    pub state: Option<String>,

    /// Shipping method (pac, sedex); PAC unless chosen interactively.
    #[arg(short, long)]
    pub shipping: Option<String>,

    /// Payment preference (pix, cartao, boleto).
    #[arg(short, long, default_value = "pix")]
    pub payment: String,

    /// Coupon code.
    #[arg(long)]
    pub coupon: Option<String>,

    /// Notes for the seller.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Store name.
        #[arg(short, long)]
        name: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
