pub mod list;
pub mod session;
pub mod slug;
pub mod store;
pub mod types;

pub use session::*;
pub use store::RoleMatrixStore;
pub use types::*;
