pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::ClaimSet;
pub use claims::Subject;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use errors::TokenRejection;
