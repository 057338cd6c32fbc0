pub mod budget;
pub mod category;
pub mod config;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod fund;
pub mod method;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod relay;
pub mod routes;
pub mod transaction;
