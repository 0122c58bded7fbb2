mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CmindxConfig, StorageBackend};
