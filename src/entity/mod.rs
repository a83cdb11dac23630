pub mod categories;
pub mod product_images;
pub mod product_variants;
pub mod products;
pub mod push_tokens;
pub mod sliders;
pub mod stocks;
pub mod subcategories;

pub use categories::Entity as Categories;
pub use product_images::Entity as ProductImages;
pub use product_variants::Entity as ProductVariants;
pub use products::Entity as Products;
pub use push_tokens::Entity as PushTokens;
pub use sliders::Entity as Sliders;
pub use stocks::Entity as Stocks;
pub use subcategories::Entity as Subcategories;
