pub mod controller;
pub mod media;
pub mod models;
pub mod server;
pub mod store;
pub mod utils;
