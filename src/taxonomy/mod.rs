pub mod document;
pub mod group;
pub mod loader;

pub use document::*;
pub use group::{TokenGroup, flatten};
pub use loader::load;
