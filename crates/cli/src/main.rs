//! Vitrine CLI - browse and edit the product catalog from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Second page of women's products
//! vitrine products list --gender women --page 2
//!
//! # One product, by id or by slug
//! vitrine products get 8d3c1a6e-...
//! vitrine products slug mens-chill-crew-neck-pullover
//!
//! # Create a product with two images
//! vitrine products create --title "Crew Neck" --price 75 --image front.jpg --image back.jpg
//!
//! # Update a product, appending an image
//! vitrine products update 8d3c1a6e-... --stock 12 --image side.jpg
//!
//! # Upload files and print the server-assigned names
//! vitrine upload a.png b.png
//! ```
//!
//! Configuration comes from the environment (see `StorefrontConfig`), and
//! `RUST_LOG` controls log output on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use vitrine_core::{Gender, ProductId, ProductPatch};
use vitrine_storefront::{CatalogService, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine catalog client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and edit products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Upload files and print the server-assigned names
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List one page of products
    List {
        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Number of products to skip
        #[arg(short, long, conflicts_with = "page")]
        offset: Option<u32>,

        /// 1-based page number, converted to an offset
        #[arg(short, long)]
        page: Option<String>,

        /// Only list products for this gender
        #[arg(short, long)]
        gender: Option<Gender>,
    },
    /// Show one product by id
    Get { id: String },
    /// Show one product by slug
    Slug { slug: String },
    /// Create a product
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        price: Decimal,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Update an existing product
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[command(flatten)]
        fields: ProductFields,
    },
}

/// Optional product fields shared by `create` and `update`.
#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    slug: Option<String>,

    #[arg(long)]
    stock: Option<u32>,

    #[arg(long)]
    gender: Option<Gender>,

    /// Available size, repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// Tag, repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Image file to upload and attach, repeatable
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl ProductFields {
    fn into_patch(self, title: Option<String>, price: Option<Decimal>) -> (ProductPatch, Vec<PathBuf>) {
        let patch = ProductPatch {
            title,
            price,
            description: self.description,
            slug: self.slug,
            stock: self.stock,
            sizes: (!self.sizes.is_empty()).then_some(self.sizes),
            gender: self.gender,
            tags: (!self.tags.is_empty()).then_some(self.tags),
            images: None,
        };
        (patch, self.images)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine_storefront=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let catalog = CatalogService::connect(&config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                limit,
                offset,
                page,
                gender,
            } => {
                commands::products::list(&catalog, limit, offset, page.as_deref(), gender).await?;
            }
            ProductsAction::Get { id } => {
                commands::products::get(&catalog, &ProductId::new(id)).await?;
            }
            ProductsAction::Slug { slug } => commands::products::by_slug(&catalog, &slug).await?,
            ProductsAction::Create {
                title,
                price,
                fields,
            } => {
                let (patch, images) = fields.into_patch(Some(title), Some(price));
                commands::products::save(&catalog, &ProductId::placeholder(), patch, &images)
                    .await?;
            }
            ProductsAction::Update {
                id,
                title,
                price,
                fields,
            } => {
                let (patch, images) = fields.into_patch(title, price);
                commands::products::save(&catalog, &ProductId::new(id), patch, &images).await?;
            }
        },
        Commands::Upload { paths } => commands::upload::files(&catalog, &paths).await?,
    }
    Ok(())
}
