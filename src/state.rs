//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, ContestService, ParticipationService, PaymentService, UserService,
};
use crate::domain::repositories::{ContestRepository, ParticipationRepository, UserRepository};
use crate::infrastructure::payments::PaymentGateway;

/// Services behind `Arc`, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub contest_service: Arc<ContestService>,
    pub participation_service: Arc<ParticipationService>,
    pub payment_service: Arc<PaymentService>,
}

/// Storage and gateway handles the services are built from.
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub contests: Arc<dyn ContestRepository>,
    pub participations: Arc<dyn ParticipationRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Wires all services on top of the given backends.
    ///
    /// # Arguments
    ///
    /// - `backends` - repositories and payment gateway
    /// - `token_secret` - credential signing secret
    /// - `token_ttl_hours` - credential lifetime
    pub fn new(backends: Backends, token_secret: &str, token_ttl_hours: i64) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                backends.users.clone(),
                token_secret,
                token_ttl_hours,
            )),
            user_service: Arc::new(UserService::new(backends.users)),
            contest_service: Arc::new(ContestService::new(backends.contests)),
            participation_service: Arc::new(ParticipationService::new(backends.participations)),
            payment_service: Arc::new(PaymentService::new(backends.gateway)),
        }
    }
}
