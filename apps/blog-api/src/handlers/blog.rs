//! Blog endpoints.

use actix_web::{HttpResponse, web};

use blog_core::domain::{Blog, Entity};
use blog_shared::dto::{PageParams, SearchParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/blogs
pub async fn create(state: web::Data<AppState>, body: web::Json<Blog>) -> AppResult<HttpResponse> {
    let blog = body.into_inner();

    if blog.id.is_some() {
        return Err(AppError::BadRequest(
            "a new blog cannot already have an id".to_string(),
        ));
    }
    blog.validate()?;

    let saved = state.blogs.save(blog).await?;
    let location = format!("/api/blogs/{}", saved.id().unwrap_or_default());
    Ok(HttpResponse::Created()
        .insert_header(("location", location))
        .json(saved))
}

/// PUT /api/blogs/{id}
pub async fn replace(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Blog>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut blog = body.into_inner();

    super::reconcile_ids(&id, &mut blog)?;
    blog.validate()?;

    if state.blogs.find_one(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("blog with id {id} not found")));
    }

    let saved = state.blogs.save(blog).await?;
    Ok(HttpResponse::Ok().json(saved))
}

/// PATCH /api/blogs/{id}
pub async fn patch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Blog>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut blog = body.into_inner();

    super::reconcile_ids(&id, &mut blog)?;

    match state.blogs.partial_update(blog).await? {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(AppError::NotFound(format!("blog with id {id} not found"))),
    }
}

/// GET /api/blogs
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let blogs = state.blogs.find_all(&page).await?;
    let total = state.blogs.count_all().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-total-count", total.to_string()))
        .json(blogs))
}

/// GET /api/blogs/count
pub async fn count(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total = state.blogs.count_all().await?;
    Ok(HttpResponse::Ok().json(total))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match state.blogs.find_one(&id).await? {
        Some(blog) => Ok(HttpResponse::Ok().json(blog)),
        None => Err(AppError::NotFound(format!("blog with id {id} not found"))),
    }
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.blogs.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/_search/blogs
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchParams>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = super::page_request(&params);
    let hits = state.blogs.search(&query.query, &page).await?;
    let total = state.blogs.search_count().await?;

    Ok(HttpResponse::Ok()
        .insert_header(("x-total-count", total.to_string()))
        .json(hits))
}
