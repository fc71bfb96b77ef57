use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use validator::Validate;

use cutbar_shared::views::{
    CommentView, LikeResponse, MessageView, PostDetailView, PostView, UserView,
};
use cutbar_store::{
    CommentWithAuthor, MessageWithAuthor, NewComment, NewMessage, NewPost, NewUser,
    PostWithAuthor, Storage, StoreError,
};

use crate::config::ServerConfig;
use crate::error::{OrNotFound, ServerError};
use crate::extract::{parse_id, ValidJson};
use crate::present;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/messages", get(list_messages).post(create_message))
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/:id", get(get_post))
        .route("/api/posts/:id/comments", post(create_comment))
        .route("/api/posts/:id/like", post(like_post))
        .route("/api/users", post(create_user))
        .route("/api/users/:id", get(get_user))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run blocking store work off the async executor.
async fn run<T, F>(state: &AppState, f: F) -> Result<T, ServerError>
where
    F: FnOnce(&dyn Storage) -> Result<T, ServerError> + Send + 'static,
    T: Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    tokio::task::spawn_blocking(move || f(storage.as_ref()))
        .await
        .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?
}

// ─── Payloads ───

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateMessageRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    content: String,
    user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    content: String,
    user_id: i64,
}

/// The post id comes from the path, never from the body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateCommentRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    content: String,
    user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    username: String,
    password: String,
    #[validate(length(min = 1, message = "avatar must not be empty"))]
    avatar: Option<String>,
    #[validate(length(min = 1, message = "color must not be empty"))]
    color: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ─── Handlers ───

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ServerError> {
    run(&state, |store| Ok(store.health_check()?)).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageView>>, ServerError> {
    let limit = state.config.message_limit;
    let rows = run(&state, move |store| Ok(store.get_messages(limit)?)).await?;
    Ok(Json(rows.into_iter().map(present::message_view).collect()))
}

async fn create_message(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageView>), ServerError> {
    let row = run(&state, move |store| {
        let author = store
            .get_user(req.user_id)
            .or_not_found(ServerError::UserNotFound)?;
        let message = store.create_message(&NewMessage {
            content: req.content,
            user_id: author.id,
        })?;
        Ok(MessageWithAuthor {
            message,
            author: Some(author),
        })
    })
    .await?;

    info!(id = row.message.id, user_id = row.message.user_id, "Message created");
    Ok((StatusCode::CREATED, Json(present::message_view(row))))
}

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostView>>, ServerError> {
    let limit = state.config.post_limit;
    let rows = run(&state, move |store| Ok(store.get_posts(limit)?)).await?;
    Ok(Json(rows.into_iter().map(present::post_view).collect()))
}

async fn create_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostView>), ServerError> {
    let row = run(&state, move |store| {
        let author = store
            .get_user(req.user_id)
            .or_not_found(ServerError::UserNotFound)?;
        let post = store.create_post(&NewPost {
            title: req.title,
            content: req.content,
            user_id: author.id,
        })?;
        Ok(PostWithAuthor {
            post,
            author: Some(author),
            comment_count: 0,
        })
    })
    .await?;

    info!(id = row.post.id, user_id = row.post.user_id, "Post created");
    Ok((StatusCode::CREATED, Json(present::post_view(row))))
}

async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PostDetailView>, ServerError> {
    let id = parse_id(&raw_id, ServerError::PostNotFound)?;
    let (post, comments) = run(&state, move |store| {
        let post = store
            .get_post_by_id(id)
            .or_not_found(ServerError::PostNotFound)?;
        let comments = store.get_comments_by_post_id(id)?;
        Ok((post, comments))
    })
    .await?;

    Ok(Json(present::post_detail_view(post, comments)))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), ServerError> {
    let post_id = parse_id(&raw_id, ServerError::PostNotFound)?;
    let row = run(&state, move |store| {
        store
            .get_post_by_id(post_id)
            .or_not_found(ServerError::PostNotFound)?;
        let author = store
            .get_user(req.user_id)
            .or_not_found(ServerError::UserNotFound)?;
        let comment = store.create_comment(&NewComment {
            content: req.content,
            post_id,
            user_id: author.id,
        })?;
        Ok(CommentWithAuthor {
            comment,
            author: Some(author),
        })
    })
    .await?;

    info!(id = row.comment.id, post_id, "Comment created");
    Ok((StatusCode::CREATED, Json(present::comment_view(row))))
}

/// Liking a post that does not exist is a no-op that still reports success.
async fn like_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<LikeResponse>, ServerError> {
    let post_id = parse_id(&raw_id, ServerError::PostNotFound)?;
    let liked = run(&state, move |store| match store.like_post(post_id) {
        Ok(likes) => Ok(Some(likes)),
        Err(StoreError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    })
    .await?;

    match liked {
        Some(likes) => debug!(post_id, likes, "Post liked"),
        None => debug!(post_id, "Like for unknown post ignored"),
    }
    Ok(Json(LikeResponse { success: true }))
}

async fn create_user(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = run(&state, move |store| {
        match store.get_user_by_username(&req.username) {
            Ok(_) => return Err(ServerError::UsernameTaken(req.username)),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let mut new_user = NewUser::new(req.username, req.password);
        if let Some(avatar) = req.avatar {
            new_user = new_user.with_avatar(avatar);
        }
        if let Some(color) = req.color {
            new_user = new_user.with_color(color);
        }
        Ok(store.create_user(&new_user)?)
    })
    .await?;

    info!(id = user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(present::user_view(user))))
}

async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserView>, ServerError> {
    let id = parse_id(&raw_id, ServerError::UserNotFound)?;
    let user = run(&state, move |store| {
        store.get_user(id).or_not_found(ServerError::UserNotFound)
    })
    .await?;
    Ok(Json(present::user_view(user)))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
