use crate::models::Feedback;
use mongodb::{Collection, Database};

pub async fn save_feedback(db: &Database, feedback: &Feedback) -> Result<(), mongodb::error::Error> {
    let collection: Collection<Feedback> = db.collection("feedbacks");
    collection.insert_one(feedback).await?;
    Ok(())
}
