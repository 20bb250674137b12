pub mod connections;
pub mod error;
pub mod loader;

pub use connections::{ConnectionsConfig, TokenType, WarehouseConnectionDetails};
pub use error::ConfigError;
pub use loader::read_connections;
