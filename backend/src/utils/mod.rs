//! Cryptographic helpers shared by the auth and user flows.

pub mod jwt;
pub mod password;
