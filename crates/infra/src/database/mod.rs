//! SQLite storage: pool, schema, repositories, and seed data

pub mod manager;
pub mod person_repository;
pub mod pool;
pub mod preference_repository;
pub mod seed;
pub mod user_repository;

pub use manager::DbManager;
pub use person_repository::SqlitePersonRepository;
pub use pool::{create_pool, SqliteConnection, SqlitePool, SqlitePoolConfig};
pub use preference_repository::SqlitePreferenceRepository;
pub use seed::{seed_database, seed_people, SeedReport};
pub use user_repository::SqliteUserRepository;
