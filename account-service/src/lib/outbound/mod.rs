pub mod avatar;
pub mod cache;

pub use avatar::GravatarResolver;
pub use cache::InMemoryUserCache;
