mod base;
mod build;
mod schema;
mod types;

pub use base::*;
pub use build::*;
pub use schema::*;
pub use types::*;
