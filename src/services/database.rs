use crate::models::{Feedback, Transaction};
use crate::repositories::{feedback_repository, transaction_repository};
use async_trait::async_trait;
use log::info;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Database};
use thiserror::Error;

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Transaction with hash {0} already exists")]
    DuplicateHash(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Persistence for the two record kinds the dashboard writes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Newest first.
    async fn transactions_for_address(&self, address: &str)
        -> Result<Vec<Transaction>, StoreError>;

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError>;
}

pub async fn connect_to_database(mongo_uri: &str) -> mongodb::error::Result<Client> {
    let client = Client::with_uri_str(mongo_uri).await?;
    info!("Connected to MongoDB");
    Ok(client)
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        transaction_repository::ensure_indexes(&self.db).await?;
        info!("Indexes ready on {}", self.db.name());
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        transaction_repository::save_transaction(&self.db, transaction)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    StoreError::DuplicateHash(transaction.hash.clone())
                } else {
                    StoreError::Database(e)
                }
            })
    }

    async fn transactions_for_address(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(transaction_repository::get_transactions_by_address(&self.db, address).await?)
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        Ok(feedback_repository::save_feedback(&self.db, feedback).await?)
    }
}
