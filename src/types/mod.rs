
pub mod models;
pub mod quotes;
pub mod api_types;

pub use models::*;
pub use quotes::*;
pub use api_types::*;
