//! Catalog seed command.
//!
//! Loads a fixed set of sample products so a fresh install has something to
//! show on the storefront. Re-running without `--clear` appends duplicates,
//! so `--clear` is the usual way to refresh a development database.

use thiserror::Error;

use juniper_core::Price;
use juniper_storefront::db::{ProductRepository, RepositoryError};

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    image_url: &'static str,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Walnut Serving Board",
        description: "Hand-finished walnut board for cheese, charcuterie, or everyday chopping.",
        price_cents: 2499,
        image_url: "https://dummyimage.com/600x400/8a6d4f/ffffff&text=Serving+Board",
    },
    SeedProduct {
        name: "Stoneware Pour-Over Set",
        description: "Matte stoneware dripper and carafe that brews two generous cups.",
        price_cents: 7499,
        image_url: "https://dummyimage.com/600x400/5f6f65/ffffff&text=Pour-Over+Set",
    },
    SeedProduct {
        name: "Linen Apron",
        description: "Stonewashed linen apron with adjustable neck strap and deep front pocket.",
        price_cents: 3999,
        image_url: "https://dummyimage.com/600x400/7a7a6d/ffffff&text=Linen+Apron",
    },
    SeedProduct {
        name: "Cast Iron Skillet",
        description: "Pre-seasoned 10-inch skillet that moves from stovetop to oven to table.",
        price_cents: 12999,
        image_url: "https://dummyimage.com/600x400/3d3d3d/ffffff&text=Cast+Iron+Skillet",
    },
    SeedProduct {
        name: "Beeswax Candle Pair",
        description: "Two hand-dipped taper candles with a clean, slow burn.",
        price_cents: 1999,
        image_url: "https://dummyimage.com/600x400/c9a86a/ffffff&text=Beeswax+Candles",
    },
    SeedProduct {
        name: "Ceramic Planter",
        description: "Glazed planter with drainage dish, sized for herbs and small succulents.",
        price_cents: 3199,
        image_url: "https://dummyimage.com/600x400/6e8276/ffffff&text=Ceramic+Planter",
    },
    SeedProduct {
        name: "Wool Throw Blanket",
        description: "Lambswool throw woven in a classic herringbone pattern.",
        price_cents: 4599,
        image_url: "https://dummyimage.com/600x400/8c6f5a/ffffff&text=Wool+Throw",
    },
    SeedProduct {
        name: "Copper Plant Mister",
        description: "Polished copper mister that keeps ferns and tropicals happy.",
        price_cents: 2899,
        image_url: "https://dummyimage.com/600x400/b87333/ffffff&text=Plant+Mister",
    },
    SeedProduct {
        name: "Oak Reading Chair",
        description: "Solid oak frame with a woven seat, built for long afternoons.",
        price_cents: 29999,
        image_url: "https://dummyimage.com/600x400/5a4632/ffffff&text=Reading+Chair",
    },
    SeedProduct {
        name: "Slate Coaster Set",
        description: "Four natural slate coasters with cork backing.",
        price_cents: 15999,
        image_url: "https://dummyimage.com/600x400/4a4f54/ffffff&text=Coaster+Set",
    },
];

/// Seed the catalog with sample products.
///
/// # Errors
///
/// Returns `SeedError` if the connection or any insert fails.
pub async fn run(clear: bool) -> Result<(), SeedError> {
    tracing::info!("Connecting to storefront database...");
    let pool = super::connect().await?;

    if clear {
        let result = sqlx::query("DELETE FROM products").execute(&pool).await?;
        tracing::info!(deleted = result.rows_affected(), "Cleared existing catalog");
    }

    let repo = ProductRepository::new(&pool);
    for seed in SEED_PRODUCTS {
        let product = repo
            .insert(
                seed.name,
                seed.description,
                Price::from_cents(seed.price_cents),
                Some(seed.image_url),
            )
            .await?;
        tracing::info!(id = %product.id, name = %product.name, "Seeded product");
    }

    tracing::info!(count = SEED_PRODUCTS.len(), "Catalog seeding complete");
    Ok(())
}
