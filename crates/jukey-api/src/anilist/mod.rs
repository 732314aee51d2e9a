pub mod birthdays;
pub mod client;
pub mod error;
pub mod mappers;
pub mod queries;
pub mod types;

pub use birthdays::BirthdayWalker;
pub use client::AniListClient;
pub use error::AniListError;
pub use queries::{QueryName, QueryRegistry};
