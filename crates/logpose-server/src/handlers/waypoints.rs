//! Waypoint handlers.
//!
//! GET  /api/current      - active waypoint (public)
//! GET  /api/locations    - full list + active index (public)
//! POST /api/current      - set active index (admin)
//! POST /api/locations    - replace the list (admin)
//! POST /api/auth/verify  - check the admin secret without mutating anything
//!
//! Admin bodies are read as raw bytes and go through [`authorize`], which
//! judges the secret before the payload and ignores the content type.

use std::sync::Arc;

use axum::{body::Bytes, Extension, Json};
use logpose_core::{
    ports::WaypointStore,
    proto::{
        CurrentWaypointResponse, ReplaceWaypointsRequest, SetActiveRequest, SetActiveResponse,
        VerifyRequest, VerifyResponse, WaypointsResponse,
    },
};

use crate::auth::{authorize, AdminSecret};
use crate::error::AppError;

pub async fn get_current(
    Extension(store): Extension<Arc<dyn WaypointStore>>,
) -> Result<Json<CurrentWaypointResponse>, AppError> {
    let current = store.current().await?;
    Ok(Json(current.into()))
}

pub async fn list_waypoints(
    Extension(store): Extension<Arc<dyn WaypointStore>>,
) -> Result<Json<WaypointsResponse>, AppError> {
    let snapshot = store.all().await?;
    Ok(Json(snapshot.into()))
}

pub async fn set_current(
    Extension(store): Extension<Arc<dyn WaypointStore>>,
    Extension(secret): Extension<AdminSecret>,
    body: Bytes,
) -> Result<Json<SetActiveResponse>, AppError> {
    let req: SetActiveRequest = authorize(&secret, &body, "set-current")?;

    let index = req.index()?;
    let current = store.set_active(index).await?;
    tracing::info!(
        index = current.index,
        name = %current.location.name,
        "active waypoint changed"
    );
    Ok(Json(current.into()))
}

pub async fn replace_waypoints(
    Extension(store): Extension<Arc<dyn WaypointStore>>,
    Extension(secret): Extension<AdminSecret>,
    body: Bytes,
) -> Result<Json<WaypointsResponse>, AppError> {
    let req: ReplaceWaypointsRequest = authorize(&secret, &body, "replace-locations")?;

    let drafts = req.drafts()?;
    let snapshot = store.replace(drafts).await?;
    tracing::info!(
        count = snapshot.locations.len(),
        current_index = snapshot.current_index,
        "waypoints replaced"
    );
    Ok(Json(snapshot.into()))
}

pub async fn verify_secret(
    Extension(secret): Extension<AdminSecret>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, AppError> {
    let _: VerifyRequest = authorize(&secret, &body, "verify")?;
    Ok(Json(VerifyResponse { success: true }))
}
