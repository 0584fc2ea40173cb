//! Session token handling
//!
//! HS256 JWTs carrying the session actor's claims.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler};
