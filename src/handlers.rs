use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::error::ApiError;
use crate::models::{
    ApiKeyQuery, ApiKeyResponse, CreateTweetRequest, CreateUserRequest, MessageResponse,
    StatusResponse,
};
use crate::services::{CredentialService, TweetService};

/// Json extractor config that reports body errors in the same
/// `{"message": ...}` envelope as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse { status: "UP" })
}

#[get("/tweets")]
pub async fn get_tweets(tweets: web::Data<TweetService>) -> HttpResponse {
    HttpResponse::Ok().json(tweets.list().await)
}

#[post("/users")]
pub async fn create_user(
    credentials: web::Data<CredentialService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = credentials
        .register(&payload.username, &payload.email)
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!(
            "User {} is created. Thank you for registering.",
            user.username
        ),
    }))
}

#[post("/api-key")]
pub async fn issue_api_key(
    credentials: web::Data<CredentialService>,
    query: web::Query<ApiKeyQuery>,
) -> Result<HttpResponse, ApiError> {
    let key = credentials.issue_api_key(query.username.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiKeyResponse {
        api_key: key.api_key,
    }))
}

#[post("/tweets")]
pub async fn create_tweet(
    request: HttpRequest,
    tweets: web::Data<TweetService>,
    payload: web::Json<CreateTweetRequest>,
) -> Result<HttpResponse, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let CreateTweetRequest { username, message } = payload.into_inner();
    tweets.create(auth_header, username, message).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Your Tweet is Created.".to_string(),
    }))
}
