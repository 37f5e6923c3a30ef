//! Authentication: JWT validation and the request-context extractor.
//!
//! Token issuance lives in the identity service; this server only validates
//! tokens and derives the tenant-scoped request context from their claims.

mod extractor;
mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
