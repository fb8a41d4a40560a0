//! Business logic services for the application layer.

pub mod auth_service;
pub mod contest_service;
pub mod participation_service;
pub mod payment_service;
pub mod user_service;

pub use auth_service::{AuthService, Claims};
pub use contest_service::{ContestService, CreatorChange};
pub use participation_service::{ParticipationService, WinnerOutcome};
pub use payment_service::PaymentService;
pub use user_service::UserService;
