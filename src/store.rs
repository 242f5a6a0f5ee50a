pub mod database;
pub mod documents;
pub mod storage;
