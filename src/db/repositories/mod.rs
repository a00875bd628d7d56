//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod category_repo;
pub mod event_repo;
pub mod feedback_repo;
pub mod registration_repo;
pub mod user_repo;

pub use category_repo::CategoryRepository;
pub use event_repo::{EventChanges, EventFilter, EventRepository, NewEvent};
pub use feedback_repo::FeedbackRepository;
pub use registration_repo::RegistrationRepository;
pub use user_repo::UserRepository;
