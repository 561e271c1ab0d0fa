pub mod feedback_repository;
pub mod transaction_repository;
