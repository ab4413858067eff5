pub mod catalog;
pub mod persistence;
pub mod resolver;
pub mod store;
pub mod table;
pub mod tables;

pub use catalog::{BUILTIN_PLUGIN_SERVICES, SeedReport, seed_plugin_services};
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
pub use resolver::ConfigResolver;
pub use store::EntityStore;
pub use table::Table;
pub use tables::Tables;
