pub mod discovery;
pub mod error;
pub mod loader;
pub mod types;

pub use discovery::discover;
pub use error::ConfigError;
pub use loader::{load, load_file};
pub use types::{Column, ColumnFormat, Config};
