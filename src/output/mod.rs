//! Feedback composition, delivery and run reporting

pub mod feedback;
pub mod mailer;
pub mod formatter;
