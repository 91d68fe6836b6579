//! Storage infrastructure - game store implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStore;
pub use migrations::{game_migrations, run_game_migrations, Migration, PostgresMigrator};
pub use postgres::{PostgresConfig, PostgresStore};
