//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod category_service;
pub mod event_service;
pub mod feedback_service;
pub mod notifier;
pub mod registration_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use event_service::EventService;
pub use feedback_service::FeedbackService;
pub use notifier::{LogNotifier, ResetTokenNotifier};
pub use registration_service::RegistrationService;
pub use user_service::UserService;
