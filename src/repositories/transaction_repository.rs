use crate::models::Transaction;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "transactions";

fn collection(db: &Database) -> Collection<Transaction> {
    db.collection(COLLECTION)
}

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let index = IndexModel::builder()
        .keys(doc! { "hash": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    collection(db).create_index(index).await?;
    Ok(())
}

pub async fn save_transaction(
    db: &Database,
    transaction: &Transaction,
) -> Result<(), mongodb::error::Error> {
    collection(db).insert_one(transaction).await?;
    Ok(())
}

pub async fn get_transactions_by_address(
    db: &Database,
    address: &str,
) -> Result<Vec<Transaction>, mongodb::error::Error> {
    let options = FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .build();
    let cursor = collection(db)
        .find(doc! { "address": address })
        .sort(options.sort.unwrap_or_default())
        .await?;
    cursor.try_collect().await
}
