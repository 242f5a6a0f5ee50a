pub mod config;
pub mod context;
pub mod errors;
pub mod images;
pub mod likes;
pub mod page;
pub mod products;
