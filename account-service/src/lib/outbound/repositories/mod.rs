pub mod in_memory;
pub mod organisation;
pub mod user;

pub use in_memory::InMemoryRepository;
pub use organisation::PostgresOrganisationRepository;
pub use user::PostgresUserRepository;
