//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! give HTTP handlers a storage-agnostic API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Credential signing/verification and role checks
//! - [`services::user_service::UserService`] - Registration, admin user management, profiles
//! - [`services::contest_service::ContestService`] - Contest lifecycle, review and rankings
//! - [`services::participation_service::ParticipationService`] - Paid entries, winners, leaderboard
//! - [`services::payment_service::PaymentService`] - Payment intent creation

pub mod services;
