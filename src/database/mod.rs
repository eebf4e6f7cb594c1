pub mod cursor;
pub mod documents;
pub mod manager;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod resolver;

pub use cursor::ScopedCursor;
pub use documents::{ContractDocuments, CustomerDocuments, MongoRepository, ServiceDocuments};
pub use manager::{ConnectionManager, ConnectionStats, DatabaseError, Store};
pub use postgres::{ContractRepository, CustomerRepository, PgRepository, ServiceRepository};
pub use repository::{EntityRepository, OwnedRepository};
