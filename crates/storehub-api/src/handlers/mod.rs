//! Request handlers.

pub mod crud;
pub mod health;
