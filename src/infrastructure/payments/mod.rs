//! Payment gateway adapters.

pub mod gateway;
pub mod stripe;

pub use gateway::{DisabledGateway, PaymentGateway};
pub use stripe::StripeGateway;

#[cfg(test)]
pub use gateway::MockPaymentGateway;
