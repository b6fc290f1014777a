//! Blog post handlers.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blogpost_core::DomainError;
use blogpost_core::domain::{Author, BlogPost, NewPost, PostPatch};
use blogpost_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

const ENTITY: &str = "BlogPost";

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id,
        author: post.author.full_name(),
        content: post.content,
        title: post.title,
        created: post.created,
    }
}

fn not_found(id: Uuid) -> AppError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id,
    }
    .into()
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let fields = body
        .into_inner()
        .into_fields()
        .map_err(|field| AppError::BadRequest(format!("Missing `{}` in request body", field)))?;

    let new_post = NewPost {
        author: Author::new(fields.first_name, fields.last_name),
        title: fields.title,
        content: fields.content,
    };
    new_post.validate()?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(
        post_id = %post.id,
        request_id = %request_id.as_str(),
        "Created post"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", post.id)))
        .json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let body_id = req.id.unwrap_or_default();
    if Uuid::parse_str(&body_id).ok() != Some(id) {
        return Err(AppError::BadRequest(format!(
            "Request path id (`{}`) and request body id (`{}`) must match",
            id, body_id
        )));
    }

    let patch = PostPatch {
        title: req.title,
        content: req.content,
    };
    patch.validate()?;

    state
        .posts
        .update_by_id(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        post_id = %id,
        request_id = %request_id.as_str(),
        "Updated post"
    );
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.posts.delete_by_id(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(
        post_id = %id,
        request_id = %request_id.as_str(),
        "Deleted post"
    );
    Ok(HttpResponse::NoContent().finish())
}
