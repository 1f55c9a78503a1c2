//! HTTP handlers and route configuration.

mod blog;
mod health;
mod post;
mod tag;


use actix_web::web;

use blog_core::domain::Entity;
use blog_core::error::DomainError;
use blog_core::page::{Direction, PageRequest, Sort};
use blog_shared::dto::PageParams;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Entity routes
            .service(
                web::scope("/blogs")
                    .route("", web::post().to(blog::create))
                    .route("", web::get().to(blog::list))
                    .route("/count", web::get().to(blog::count))
                    .route("/{id}", web::get().to(blog::get))
                    .route("/{id}", web::put().to(blog::replace))
                    .route("/{id}", web::patch().to(blog::patch))
                    .route("/{id}", web::delete().to(blog::delete)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(post::create))
                    .route("", web::get().to(post::list))
                    .route("/count", web::get().to(post::count))
                    .route("/{id}", web::get().to(post::get))
                    .route("/{id}", web::put().to(post::replace))
                    .route("/{id}", web::patch().to(post::patch))
                    .route("/{id}", web::delete().to(post::delete)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::post().to(tag::create))
                    .route("", web::get().to(tag::list))
                    .route("/count", web::get().to(tag::count))
                    .route("/{id}", web::get().to(tag::get))
                    .route("/{id}", web::put().to(tag::replace))
                    .route("/{id}", web::patch().to(tag::patch))
                    .route("/{id}", web::delete().to(tag::delete)),
            )
            // Search routes
            .service(
                web::scope("/_search")
                    .route("/blogs", web::get().to(blog::search))
                    .route("/posts", web::get().to(post::search))
                    .route("/tags", web::get().to(tag::search)),
            ),
    );
}

/// Translate `?page=&size=&sort=field,dir` into a page request.
pub(crate) fn page_request(params: &PageParams) -> PageRequest {
    let mut page = PageRequest::of(
        params.page.unwrap_or(0),
        params.size.unwrap_or(PageRequest::DEFAULT_SIZE),
    );
    if let Some(sort) = params.sort.as_deref().and_then(parse_sort) {
        page = page.with_sort(sort);
    }
    page
}

fn parse_sort(raw: &str) -> Option<Sort> {
    let (field, dir) = match raw.split_once(',') {
        Some((field, dir)) => (field, dir),
        None => (raw, "asc"),
    };
    if field.is_empty() {
        return None;
    }
    let direction = if dir.eq_ignore_ascii_case("desc") {
        Direction::Desc
    } else {
        Direction::Asc
    };
    Some(Sort {
        field: field.to_string(),
        direction,
    })
}

/// Path/body id rules shared by replace and patch: the body id must match
/// the path id; an absent body id inherits the path id.
pub(crate) fn reconcile_ids<T: Entity>(path_id: &str, entity: &mut T) -> Result<(), AppError> {
    match entity.id().map(str::to_owned) {
        None => entity.set_id(path_id.to_string()),
        Some(body_id) if body_id != path_id => {
            return Err(AppError::from(DomainError::IdMismatch {
                path: path_id.to_string(),
                body: body_id,
            }));
        }
        Some(_) => {}
    }
    Ok(())
}
