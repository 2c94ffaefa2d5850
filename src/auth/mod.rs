//! Login and bearer-token authentication.
//!
//! Users are configured through the environment and hashed once at startup.
//! A successful login yields an HS256-signed token that the bookmark and
//! message routes require in the `Authorization: Bearer` header.

mod password;
mod token;
mod users;

pub use password::PasswordHash;
pub use token::{Claims, TokenSigner};
pub use users::UserDirectory;
