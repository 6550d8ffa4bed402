pub mod access;
pub mod validate;
