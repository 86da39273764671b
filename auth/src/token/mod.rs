pub mod claims;
pub mod codec;
pub mod errors;
pub mod ttl;

pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use ttl::TokenTtls;
