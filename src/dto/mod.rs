pub mod categories;
pub mod notifications;
pub mod products;
pub mod sliders;
pub mod statistics;
