//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod activity;
pub mod category;
pub mod event;
pub mod feedback;
pub mod registration;
pub mod user;

pub use activity::*;
pub use category::*;
pub use event::*;
pub use feedback::*;
pub use registration::*;
pub use user::*;
