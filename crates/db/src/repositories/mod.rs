//! Repository abstractions for data access.

pub mod account;
pub mod category;
pub mod entry;

pub use account::AccountRepository;
pub use category::CategoryRepository;
pub use entry::EntryRepository;
