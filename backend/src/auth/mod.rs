//! Authentication module
//!
//! Provides JWT-based authentication with argon2 password hashing.

mod extractors;
mod jwt;
mod password;

pub use extractors::{AdminUser, AuthUser};
pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
