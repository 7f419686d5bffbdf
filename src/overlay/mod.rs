mod assemble;
mod merge;
mod scope;
mod types;

pub use assemble::*;
pub use merge::*;
pub use scope::*;
pub use types::*;
