//! Route handlers for `/api/v1`
//!
//! Extractor rejections are turned into the same `{error, message}` body as
//! domain errors: malformed query strings and bodies are validation errors,
//! a non-numeric person id is a missing person.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tinderbox_domain::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use tinderbox_domain::PageRequest;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::resources::{
    DataEnvelope, DislikeCreated, HealthReport, LikeCreated, Paginated, PersonResource,
};
use crate::context::AppContext;

type Ctx = State<Arc<AppContext>>;

#[derive(Debug, Deserialize)]
pub struct RecommendedQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LikedQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub user_id: Option<i64>,
}

/// `GET /people/recommended`
#[instrument(skip(ctx))]
pub async fn recommended(
    State(ctx): Ctx,
    query: Result<Query<RecommendedQuery>, QueryRejection>,
) -> Result<Json<Paginated<PersonResource>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let page = PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?;

    let people = ctx.ledger.list_recommended(query.user_id, page).await?;
    debug!(returned = people.items.len(), total = people.total, "recommended page served");
    Ok(Json(Paginated::from(people.map(PersonResource::from))))
}

/// `POST /people/{person_id}/like`
#[instrument(skip(ctx, body))]
pub async fn like(
    State(ctx): Ctx,
    person_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<SwipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LikeCreated>), ApiError> {
    let (user_id, person_id) = swipe_target(person_id, body)?;
    let like = ctx.ledger.record_like(user_id, person_id).await?;
    Ok((StatusCode::CREATED, Json(LikeCreated { message: "Person liked successfully", like })))
}

/// `POST /people/{person_id}/dislike`
#[instrument(skip(ctx, body))]
pub async fn dislike(
    State(ctx): Ctx,
    person_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<SwipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DislikeCreated>), ApiError> {
    let (user_id, person_id) = swipe_target(person_id, body)?;
    let dislike = ctx.ledger.record_dislike(user_id, person_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DislikeCreated { message: "Person disliked successfully", dislike }),
    ))
}

/// `GET /people/liked`
#[instrument(skip(ctx))]
pub async fn liked(
    State(ctx): Ctx,
    query: Result<Query<LikedQuery>, QueryRejection>,
) -> Result<Json<DataEnvelope<PersonResource>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let user_id = query.user_id.ok_or_else(user_id_required)?;

    let liked = ctx.ledger.list_liked(user_id).await?;
    Ok(Json(DataEnvelope { data: liked.into_iter().map(PersonResource::from).collect() }))
}

/// `GET /health`
pub async fn health(State(ctx): Ctx) -> (StatusCode, Json<HealthReport>) {
    if ctx.database_healthy().await {
        (StatusCode::OK, Json(HealthReport { status: "ok", database: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthReport { status: "degraded", database: "unavailable" }),
        )
    }
}

fn swipe_target(
    person_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<SwipeRequest>, JsonRejection>,
) -> Result<(i64, i64), ApiError> {
    let Path(person_id) = person_id.map_err(|_| ApiError::not_found("person not found"))?;
    let Json(body) = body.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let user_id = body.user_id.ok_or_else(user_id_required)?;
    Ok((user_id, person_id))
}

fn user_id_required() -> ApiError {
    ApiError::validation("The user id field is required.")
}
