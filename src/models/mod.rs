mod datetime_utils;
mod feedback;
mod transaction;

pub use feedback::{Feedback, NewFeedback};
pub use transaction::{NewTransaction, Transaction};
