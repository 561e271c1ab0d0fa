pub mod database;
pub mod upstream;

pub use database::{MongoStore, RecordStore, StoreError};
pub use upstream::{UpstreamClient, UpstreamError};
