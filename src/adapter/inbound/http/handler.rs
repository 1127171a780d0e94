use std::convert::Infallible;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures_util::stream::{Stream, StreamExt, TryStreamExt};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::error::ApiError;
use super::server::AppState;
use crate::application::RelayOutcome;
use crate::domain::{BrandSummary, CarRecord};

pub(crate) async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandSummary>>, ApiError> {
    let brands = state.data.get_all_brands().try_collect().await?;
    Ok(Json(brands))
}

#[derive(Deserialize)]
pub(crate) struct CarsParams {
    brand: String,
}

pub(crate) async fn list_cars(
    State(state): State<AppState>,
    params: Result<Query<CarsParams>, QueryRejection>,
) -> Result<Json<Vec<CarRecord>>, ApiError> {
    let Query(params) = params?;
    let cars = state
        .data
        .get_cars_by_brand(&params.brand)
        .try_collect()
        .await?;
    Ok(Json(cars))
}

/// One `brand` event per first-seen brand. A backend error is sent as an
/// `error` event and closes the stream, as does server shutdown.
pub(crate) async fn stream_brands(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let brands = state.data.stream_brand_events()?;
    info!("Brand event subscriber connected");

    let events = brands.map(|item| {
        let event = match item {
            Ok(summary) => Event::default()
                .event("brand")
                .json_data(&summary)
                .unwrap_or_else(|err| Event::default().event("error").data(err.to_string())),
            Err(err) => {
                warn!(error = %err, "Brand event stream failed");
                Event::default().event("error").data(err.to_string())
            }
        };
        Ok(event)
    });
    let events = events.take_until(state.shutdown.cancelled_owned());

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

pub(crate) async fn relay(State(state): State<AppState>) -> Result<Json<RelayOutcome>, ApiError> {
    let outcome = state.relay.run().await?;
    Ok(Json(outcome))
}

pub(crate) async fn broadcast(State(state): State<AppState>) -> impl IntoResponse {
    drop(state.broadcaster.clone().spawn());
    (StatusCode::ACCEPTED, Json(json!({ "status": "started" })))
}

pub(crate) async fn health() -> &'static str {
    "ok"
}
