pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::account;
pub use outbound::avatar::GravatarResolver;
pub use outbound::cache::InMemoryUserCache;
