//! HTTP middleware for request processing and protection.
//!
//! Provides credential verification, role guards, and observability middleware.

pub mod auth;
pub mod cors;
pub mod guard;
pub mod tracing;
