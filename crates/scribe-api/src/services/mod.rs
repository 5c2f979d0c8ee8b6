//! Business logic behind the HTTP handlers

pub mod session;
