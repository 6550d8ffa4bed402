pub mod audit;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod seed;

pub use errors::AppError;
pub use models::access_matrix::AccessMatrix;
pub use models::module::{AccessLevel, Module, ModuleAccess};
pub use models::role::RoleMatrixStore;
