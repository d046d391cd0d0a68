use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use uuid::Uuid;

use crate::api::rest::auth::AuthAgent;
use crate::error::AppError;
use crate::models::delivery::DeliveryReceipt;
use crate::models::package::GeoPoint;
use crate::service::completion::{complete_delivery, CompletionRequest};
use crate::state::AppState;

const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries/complete", post(complete))
        .layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES))
}

async fn complete(
    State(state): State<Arc<AppState>>,
    AuthAgent(agent_id): AuthAgent,
    mut multipart: Multipart,
) -> Result<Json<DeliveryReceipt>, AppError> {
    let mut package_id: Option<Uuid> = None;
    let mut lat: Option<f64> = None;
    let mut lng: Option<f64> = None;
    let mut photo: Option<Bytes> = None;
    let mut photo_name = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "package_id" => package_id = Some(parse_field("package_id", field).await?),
            "lat" => lat = Some(parse_field("lat", field).await?),
            "lng" => lng = Some(parse_field("lng", field).await?),
            "photo" => {
                photo_name = field.file_name().unwrap_or("photo.jpg").to_string();
                photo = Some(field.bytes().await.map_err(|err| {
                    AppError::BadRequest(format!("invalid photo upload: {err}"))
                })?);
            }
            _ => {}
        }
    }

    let request = CompletionRequest {
        package_id: require("package_id", package_id)?,
        agent_id,
        location: GeoPoint {
            lat: require("lat", lat)?,
            lng: require("lng", lng)?,
        },
        photo: require("photo", photo)?,
        photo_name,
    };

    let receipt = complete_delivery(&state, request).await?;
    Ok(Json(receipt))
}

async fn parse_field<T>(name: &str, field: axum::extract::multipart::Field<'_>) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid field {name}: {err}")))?;

    raw.parse::<T>()
        .map_err(|err| AppError::BadRequest(format!("invalid field {name}: {err}")))
}

fn require<T>(name: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing field {name}")))
}
