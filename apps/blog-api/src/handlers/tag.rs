//! Tag endpoints.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Entity, Tag};
use blog_shared::dto::{PageParams, SearchParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/tags
pub async fn create(state: web::Data<AppState>, body: web::Json<Tag>) -> AppResult<HttpResponse> {
    let tag = body.into_inner();

    if tag.id.is_some() {
        return Err(AppError::BadRequest(
            "a new tag cannot already have an id".to_string(),
        ));
    }
    tag.validate()?;

    let saved = state.tags.save(tag).await?;
    let location = format!("/api/tags/{}", saved.id().unwrap_or_default());
    Ok(HttpResponse::Created()
        .insert_header(("location", location))
        .json(saved))
}

/// PUT /api/tags/{id}
pub async fn replace(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Tag>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut tag = body.into_inner();

    super::reconcile_ids(&id, &mut tag)?;
    tag.validate()?;

    if state.tags.find_one(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("tag with id {id} not found")));
    }

    let saved = state.tags.save(tag).await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// PATCH /api/tags/{id}
pub async fn patch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Tag>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut tag = body.into_inner();

    super::reconcile_ids(&id, &mut tag)?;

    match state.tags.partial_update(tag).await? {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(AppError::NotFound(format!("tag with id {id} not found"))),
    }
}

/// GET /api/tags
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let tags = state.tags.find_all(&page).await?;
    let total = state.tags.count_all().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-total-count", total.to_string()))
        .json(tags))
}

/// GET /api/tags/count
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.tags.count_all().await?;
    Ok(HttpResponse::Ok().json(total))
}

/// GET /api/tags/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match state.tags.find_one(&id).await? {
        Some(tag) => Ok(HttpResponse::Ok().json(tag)),
        None => Err(AppError::NotFound(format!("tag with id {id} not found"))),
    }
}

/// DELETE /api/tags/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.tags.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/_search/tags
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchParams>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let hits = state.tags.search(&query.query, &page).await?;
    let total = state.tags.search_count().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-total-count", total.to_string()))
        .json(hits))
}
