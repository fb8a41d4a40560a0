//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repositories and the in-memory store
//! - [`payments`] - Payment gateway adapters (Stripe and a disabled fallback)

pub mod payments;
pub mod persistence;
