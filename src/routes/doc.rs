use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::{
            CategoryList, CategoryWithChildren, CreateCategoryRequest, CreateSubcategoryRequest,
            ProductRef, SubcategoryList, SubcategoryWithCategory,
        },
        notifications::{RegisterTokenRequest, SendNotificationRequest, SendResult},
        products::{
            BulkDeleteRequest, CatalogItem, CatalogList, CategoryRef, DeleteResult,
            FeaturedToggleRequest, ImageView, ProductDetail, ProductSummary, ProductSummaryList,
            StockView, VariantWithStocks,
        },
        sliders::SliderList,
        statistics::{CategoryStock, LowStockProduct, LowStockVariant, Overview, StatisticsResponse},
    },
    models::{Category, Product, ProductImage, PushToken, Slider, Stock, Subcategory},
    response::{ApiResponse, Meta},
    routes::{catalog, categories, health, notifications, products, sliders, statistics},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::set_featured,
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        categories::list_subcategories,
        categories::create_subcategory,
        statistics::get_statistics,
        sliders::list_sliders,
        sliders::create_slider,
        catalog::featured_products,
        catalog::list_categories,
        catalog::get_product,
        catalog::delete_products,
        notifications::register_token,
        notifications::send_notification
    ),
    components(
        schemas(
            Category,
            Subcategory,
            Product,
            Stock,
            ProductImage,
            Slider,
            PushToken,
            CategoryRef,
            ImageView,
            StockView,
            ProductSummary,
            ProductSummaryList,
            VariantWithStocks,
            ProductDetail,
            CatalogItem,
            CatalogList,
            FeaturedToggleRequest,
            BulkDeleteRequest,
            DeleteResult,
            CategoryWithChildren,
            SubcategoryWithCategory,
            CategoryList,
            SubcategoryList,
            CreateCategoryRequest,
            CreateSubcategoryRequest,
            ProductRef,
            SliderList,
            Overview,
            CategoryStock,
            LowStockVariant,
            LowStockProduct,
            StatisticsResponse,
            RegisterTokenRequest,
            SendNotificationRequest,
            SendResult,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductDetail>,
            ApiResponse<ProductSummaryList>,
            ApiResponse<CatalogList>,
            ApiResponse<CategoryList>,
            ApiResponse<StatisticsResponse>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Dashboard product management"),
        (name = "Categories", description = "Category and subcategory management"),
        (name = "Statistics", description = "Dashboard aggregation"),
        (name = "Sliders", description = "Homepage banner management"),
        (name = "Catalog", description = "Storefront-facing endpoints"),
        (name = "Notifications", description = "Push token registration and delivery"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
