pub mod access_matrix;
pub mod data_manager;
pub mod module;
pub mod role;
pub mod table_filter;
