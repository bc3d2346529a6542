mod error;
mod http_mapping;
pub mod inmemory;
mod traits;
mod transaction;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use inmemory::InMemoryStore;
pub use traits::{
    CalendarRepository, EventRepository, SharingRepository, Store, TransactionManager,
    UnitOfWork, UserRepository,
};
pub use transaction::with_transaction;
