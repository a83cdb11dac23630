//! Populates a fresh database with a small demo catalog: three categories,
//! six subcategories and eight products with variants, stock and images.
//! Safe to re-run; existing slugs are left alone.

use rust_decimal::Decimal;
use uuid::Uuid;

use axum_storefront_api::db::create_pool;

struct SeedVariant {
    name: &'static str,
    price_offset: &'static str,
    quantity: i32,
    sku: &'static str,
    location: &'static str,
}

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    base_price: &'static str,
    category_slug: &'static str,
    subcategory_slug: Option<&'static str>,
    image_url: &'static str,
    variants: &'static [SeedVariant],
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Women", "women", "Trendy fashion for women"),
    ("Men", "men", "Stylish apparel for men"),
    ("Kids", "kids", "Cute outfits for children"),
];

const SUBCATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("Dresses", "dresses", "Beautiful dresses for all occasions", "women"),
    ("Outerwear", "outerwear", "Jackets and coats for every season", "women"),
    ("T-Shirts", "t-shirts", "Comfortable cotton t-shirts", "men"),
    ("Jeans", "jeans", "Durable and stylish jeans", "men"),
    ("Toys", "toys", "Fun and educational toys", "kids"),
    ("Shoes", "shoes", "Comfortable shoes for growing feet", "kids"),
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Summer Floral Dress",
        slug: "summer-floral-dress",
        description: "Lightweight dress with beautiful floral pattern, perfect for summer",
        base_price: "59.99",
        category_slug: "women",
        subcategory_slug: Some("dresses"),
        image_url: "https://images.unsplash.com/photo-1551232864-3f0890e580d9?w=800",
        variants: &[
            SeedVariant { name: "S", price_offset: "0", quantity: 25, sku: "SFDR-S", location: "WH-A1-10" },
            SeedVariant { name: "M", price_offset: "0", quantity: 30, sku: "SFDR-M", location: "WH-A1-11" },
            SeedVariant { name: "L", price_offset: "5.00", quantity: 20, sku: "SFDR-L", location: "WH-A1-12" },
        ],
    },
    SeedProduct {
        name: "Winter Warm Coat",
        slug: "winter-warm-coat",
        description: "Insulated coat for cold weather with faux fur trim",
        base_price: "149.99",
        category_slug: "women",
        subcategory_slug: Some("outerwear"),
        image_url: "https://images.unsplash.com/photo-1594035910387-fea47794261f?w=800",
        variants: &[
            SeedVariant { name: "S", price_offset: "0", quantity: 8, sku: "WWC-S", location: "WH-A2-10" },
            SeedVariant { name: "M", price_offset: "0", quantity: 12, sku: "WWC-M", location: "WH-A2-11" },
            SeedVariant { name: "L", price_offset: "0", quantity: 10, sku: "WWC-L", location: "WH-A2-12" },
        ],
    },
    SeedProduct {
        name: "Classic White T-Shirt",
        slug: "classic-white-t-shirt",
        description: "100% organic cotton t-shirt, unisex fit",
        base_price: "29.99",
        category_slug: "men",
        subcategory_slug: Some("t-shirts"),
        image_url: "https://images.unsplash.com/photo-1529374255404-311a2a4f1fd9?w=800",
        variants: &[
            SeedVariant { name: "S", price_offset: "0", quantity: 20, sku: "CWTS-S", location: "WH-B1-10" },
            SeedVariant { name: "M", price_offset: "0", quantity: 35, sku: "CWTS-M", location: "WH-B1-11" },
            SeedVariant { name: "L", price_offset: "0", quantity: 30, sku: "CWTS-L", location: "WH-B1-12" },
            SeedVariant { name: "XL", price_offset: "2.00", quantity: 25, sku: "CWTS-XL", location: "WH-B1-13" },
        ],
    },
    SeedProduct {
        name: "Premium Black T-Shirt",
        slug: "premium-black-t-shirt",
        description: "High-quality black t-shirt with reinforced stitching",
        base_price: "34.99",
        category_slug: "men",
        subcategory_slug: Some("t-shirts"),
        image_url: "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800",
        variants: &[
            SeedVariant { name: "M", price_offset: "0", quantity: 30, sku: "PBTS-M", location: "WH-B2-10" },
            SeedVariant { name: "L", price_offset: "0", quantity: 20, sku: "PBTS-L", location: "WH-B2-11" },
        ],
    },
    SeedProduct {
        name: "Slim Fit Jeans",
        slug: "slim-fit-jeans",
        description: "Stretch denim jeans with modern slim fit",
        base_price: "79.99",
        category_slug: "men",
        subcategory_slug: Some("jeans"),
        image_url: "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=800",
        variants: &[
            SeedVariant { name: "30/32", price_offset: "0", quantity: 18, sku: "SFJ-30-32", location: "WH-B3-10" },
            SeedVariant { name: "32/32", price_offset: "0", quantity: 15, sku: "SFJ-32-32", location: "WH-B3-11" },
            SeedVariant { name: "34/32", price_offset: "0", quantity: 10, sku: "SFJ-34-32", location: "WH-B3-12" },
        ],
    },
    SeedProduct {
        name: "Educational Building Blocks",
        slug: "educational-building-blocks",
        description: "100-piece colorful building blocks set for creative play",
        base_price: "39.99",
        category_slug: "kids",
        subcategory_slug: Some("toys"),
        image_url: "https://images.unsplash.com/photo-1590073242678-70ee3fc28e8e?w=800",
        variants: &[
            SeedVariant { name: "N/A", price_offset: "0", quantity: 30, sku: "EBB-100", location: "WH-C1-10" },
        ],
    },
    SeedProduct {
        name: "Plush Teddy Bear",
        slug: "plush-teddy-bear",
        description: "Soft and cuddly teddy bear for bedtime",
        base_price: "24.99",
        category_slug: "kids",
        subcategory_slug: Some("toys"),
        image_url: "https://images.unsplash.com/photo-1604917621956-10dfa7cce2e7?w=800",
        variants: &[
            SeedVariant { name: "Small", price_offset: "0", quantity: 25, sku: "PTB-S", location: "WH-C2-10" },
            SeedVariant { name: "Medium", price_offset: "5.00", quantity: 15, sku: "PTB-M", location: "WH-C2-11" },
            SeedVariant { name: "Large", price_offset: "10.00", quantity: 10, sku: "PTB-L", location: "WH-C2-12" },
        ],
    },
    SeedProduct {
        name: "Kids Running Shoes",
        slug: "kids-running-shoes",
        description: "Lightweight sneakers with velcro straps for easy wear",
        base_price: "49.99",
        category_slug: "kids",
        subcategory_slug: Some("shoes"),
        image_url: "https://images.unsplash.com/photo-1596462502278-27bfdc403348?w=800",
        variants: &[
            SeedVariant { name: "Size 11", price_offset: "0", quantity: 12, sku: "KRS-11", location: "WH-C3-10" },
            SeedVariant { name: "Size 12", price_offset: "0", quantity: 10, sku: "KRS-12", location: "WH-C3-11" },
        ],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")?;
    let pool = create_pool(&database_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    for (name, slug, description) in CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .bind(description)
        .execute(&pool)
        .await?;
    }

    for (name, slug, description, category_slug) in SUBCATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO subcategories (id, name, slug, description, category_id)
            SELECT $1, $2, $3, $4, c.id FROM categories c WHERE c.slug = $5
            ON CONFLICT (category_id, slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(category_slug)
        .execute(&pool)
        .await?;
    }

    for product in PRODUCTS {
        seed_product(&pool, product).await?;
    }

    println!(
        "Seed completed: {} categories, {} subcategories, {} products",
        CATEGORIES.len(),
        SUBCATEGORIES.len(),
        PRODUCTS.len()
    );
    Ok(())
}

async fn seed_product(pool: &sqlx::PgPool, product: &SeedProduct) -> anyhow::Result<()> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE slug = $1")
        .bind(product.slug)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let base_price: Decimal = product.base_price.parse()?;
    let product_id = Uuid::new_v4();

    let mut txn = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO products (id, name, slug, description, base_price, category_id, subcategory_id)
        SELECT $1, $2, $3, $4, $5, c.id, s.id
        FROM categories c
        LEFT JOIN subcategories s ON s.category_id = c.id AND s.slug = $7
        WHERE c.slug = $6
        "#,
    )
    .bind(product_id)
    .bind(product.name)
    .bind(product.slug)
    .bind(product.description)
    .bind(base_price)
    .bind(product.category_slug)
    .bind(product.subcategory_slug)
    .execute(&mut *txn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO product_images (id, url, alt_text, is_primary, product_id)
        VALUES ($1, $2, $3, TRUE, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product.image_url)
    .bind(format!("{} photo", product.name))
    .bind(product_id)
    .execute(&mut *txn)
    .await?;

    for variant in product.variants {
        let variant_id = Uuid::new_v4();
        let price_offset: Decimal = variant.price_offset.parse()?;
        sqlx::query(
            r#"
            INSERT INTO product_variants (id, name, price_offset, product_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(variant_id)
        .bind(variant.name)
        .bind(price_offset)
        .bind(product_id)
        .execute(&mut *txn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stocks (id, quantity, location, sku, product_id, variant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(variant.quantity)
        .bind(variant.location)
        .bind(variant.sku)
        .bind(product_id)
        .bind(variant_id)
        .execute(&mut *txn)
        .await?;
    }

    txn.commit().await?;
    println!("Seeded product {}", product.slug);
    Ok(())
}
