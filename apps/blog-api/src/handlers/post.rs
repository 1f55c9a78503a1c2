//! Post endpoints.
//!
//! Point lookups and (by default) list reads resolve tag references, so
//! clients never see bare association ids unless they opt out with
//! `?eagerload=false`.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::domain::{Entity, Post};
use blog_shared::dto::{PageParams, SearchParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Resolve tag references on list reads; defaults to true.
    pub eagerload: Option<bool>,
}

/// POST /api/posts
pub async fn create(state: web::Data<AppState>, body: web::Json<Post>) -> AppResult<HttpResponse> {
    let post = body.into_inner();

    if post.id.is_some() {
        return Err(AppError::BadRequest(
            "a new post cannot already have an id".to_string(),
        ));
    }
    post.validate()?;

    let saved = state.posts.save(post).await?;
    let location = format!("/api/posts/{}", saved.id().unwrap_or_default());
    Ok(HttpResponse::Created()
        .insert_header(("location", location))
        .json(saved))
}

/// PUT /api/posts/{id}
pub async fn replace(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Post>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = body.into_inner();

    super::reconcile_ids(&id, &mut post)?;
    post.validate()?;

    if state.posts.find_one(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("post with id {id} not found")));
    }

    let saved = state.posts.save(post).await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// PATCH /api/posts/{id}
pub async fn patch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Post>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = body.into_inner();

    super::reconcile_ids(&id, &mut post)?;

    match state.posts.partial_update(post).await? {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(AppError::NotFound(format!("post with id {id} not found"))),
    }
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    opts: web::Query<ListParams>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let total = state.posts.count_all().await?;

    let response = if opts.eagerload.unwrap_or(true) {
        let posts = state.posts.find_all_with_tags(&page).await?;
        HttpResponse::Ok()
            .insert_header(("x-total-count", total.to_string()))
            .json(posts)
    } else {
        let posts = state.posts.find_all(&page).await?;
        HttpResponse::Ok()
            .insert_header(("x-total-count", total.to_string()))
            .json(posts)
    };
    Ok(response)
}

/// GET /api/posts/count
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.posts.count_all().await?;
    Ok(HttpResponse::Ok().json(total))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match state.posts.find_one(&id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(format!("post with id {id} not found"))),
    }
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/_search/posts
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchParams>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let hits = state.posts.search(&query.query, &page).await?;
    let total = state.posts.search_count().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-total-count", total.to_string()))
        .json(hits))
}
