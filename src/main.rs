use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use chirp::handlers;
use chirp::services::{CredentialService, TweetService};
use chirp::store::DocumentStore;
use env_logger::Builder;
use log::{info, LevelFilter};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    info!("Starting chirp backend...");

    let db_path = env::var("CHIRP_DB").unwrap_or_else(|_| "db.json".to_string());
    let store = DocumentStore::open(&db_path).expect("Failed to open document store");
    let store = Arc::new(store);

    info!("Loaded document store from {}", db_path);

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);

    info!("The API is listening on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(handlers::json_config())
            .app_data(web::Data::new(CredentialService::new(store.clone())))
            .app_data(web::Data::new(TweetService::new(store.clone())))
            .service(handlers::status)
            .service(handlers::get_tweets)
            .service(handlers::create_user)
            .service(handlers::issue_api_key)
            .service(handlers::create_tweet)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
