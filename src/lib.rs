pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod router;
pub mod service;

pub use db::Employee;
pub use error::RegistryError;
