//! Tool submissions: validation, the JSON log, and notifications.

pub mod log;
pub mod notify;
pub mod types;

pub use log::SubmissionLog;
pub use notify::{Delivery, Notifier};
pub use types::{Submission, SubmissionForm};
