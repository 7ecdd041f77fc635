mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
