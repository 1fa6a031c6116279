use std::env;
use std::error::Error;

use chirp::models::{Tweet, User};
use chirp::store::DocumentStore;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::Fake;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("Starting data seeding...");

    let db_path = env::var("CHIRP_DB").unwrap_or_else(|_| "db.json".to_string());
    let store = DocumentStore::open(&db_path)?;

    // Configuration
    let num_users = 5;
    let tweets_per_user = 3;

    for i in 0..num_users {
        let username: String = Username().fake();
        let email: String = SafeEmail().fake();

        store
            .append_user(User {
                username: username.clone(),
                email,
            })
            .await?;

        for _ in 0..tweets_per_user {
            let message: String = Sentence(3..10).fake();
            store
                .append_tweet(Tweet {
                    username: username.clone(),
                    message,
                })
                .await?;
        }

        println!("Created user {}/{}: {}", i + 1, num_users, username);
    }

    println!("Seeding completed!");
    Ok(())
}
