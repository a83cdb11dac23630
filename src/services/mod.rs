pub mod catalog_service;
pub mod category_service;
pub mod notification_service;
pub mod product_service;
pub mod slider_service;
pub mod statistics_service;
