pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use connection::{Connect, ConnectError, ConnectionManager, PgConnector};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{BookingStore, EventStore};
