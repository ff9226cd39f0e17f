use chrono::{Duration, Utc};
use serde_json::json;

use super::{SubmissionError, Submissions};

/// Inserts eight demo "contact" submissions spread over the last five hours.
/// Does nothing when the store already holds data. Returns how many were inserted.
pub async fn seed_demo(submissions: &Submissions) -> Result<usize, SubmissionError> {
    let existing = submissions.count().await?;
    if existing > 0 {
        tracing::info!("Store already contains {existing} submissions, skipping seed");
        return Ok(0);
    }

    tracing::info!("Seeding demo submissions");
    let now = Utc::now();
    let rows = [
        (Duration::hours(5), json!({"name": "John Smith", "selected": "A", "checked": true, "picked": "One", "date": "2024-01-15"})),
        (Duration::hours(4), json!({"name": "maryjohnson@mail.test", "selected": "B", "checked": false, "picked": "Two", "date": "2024-02-20"})),
        (Duration::hours(3), json!({"name": "William Brown", "selected": "C", "checked": true, "picked": "One", "date": "2024-03-10"})),
        (Duration::hours(2), json!({"name": "alice.wonder@email.com", "selected": "A", "checked": true, "picked": "Two", "date": "2024-04-05"})),
        (Duration::hours(1), json!({"name": "Bob Anderson", "selected": "B", "checked": false, "picked": "One", "date": "2024-05-12"})),
        (Duration::minutes(45), json!({"name": "Charlie Davis", "selected": "C", "checked": true, "picked": "Two", "date": "2024-06-18"})),
        (Duration::minutes(30), json!({"name": "diana.prince@hero.com", "selected": "A", "checked": false, "picked": "One", "date": "2024-07-22"})),
        (Duration::minutes(15), json!({"name": "Eve Martinez", "selected": "B", "checked": true, "picked": "Two", "date": "2024-08-30"})),
    ];

    for (age, data) in &rows {
        submissions.create_at("contact", data, now - *age).await?;
    }

    tracing::info!("Seeded {} demo submissions", rows.len());
    Ok(rows.len())
}
