use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{GarmentItem, Recommendation, WeatherReading, WeatherSnapshot},
    services::assembler,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists the full wardrobe catalog
pub async fn get_wardrobe(State(state): State<AppState>) -> Json<Vec<GarmentItem>> {
    let catalog = state.catalog.read().await;
    Json(catalog.clone())
}

/// Adds a garment to the catalog after validating its attribute scores
pub async fn add_garment(
    State(state): State<AppState>,
    Json(item): Json<GarmentItem>,
) -> AppResult<(StatusCode, Json<GarmentItem>)> {
    item.validate()?;

    let mut catalog = state.catalog.write().await;
    if catalog.iter().any(|existing| existing.id == item.id) {
        return Err(AppError::InvalidInput(format!(
            "garment '{}' already exists in the wardrobe",
            item.id
        )));
    }
    catalog.push(item.clone());

    tracing::info!(item_id = %item.id, total = catalog.len(), "Garment added to wardrobe");

    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

/// Current conditions for a city
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> AppResult<Json<WeatherSnapshot>> {
    let snapshot = state.weather.current_weather(&params.city).await?;
    Ok(Json(snapshot))
}

/// Recommendation request: either a city to look up, or an inline weather
/// reading (which wins when both are present)
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub city: Option<String>,
    pub weather: Option<WeatherReading>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub city: Option<String>,
    pub conditions: Option<String>,
    pub recommendation: Recommendation,
}

/// Handler for the recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let (reading, city, conditions) = match (request.weather, request.city) {
        (Some(reading), _) => (reading, None, None),
        (None, Some(city)) => {
            let snapshot = state.weather.current_weather(&city).await?;
            (
                snapshot.reading,
                Some(snapshot.city),
                Some(snapshot.description),
            )
        }
        (None, None) => {
            return Err(AppError::InvalidInput(
                "either weather or city is required".to_string(),
            ));
        }
    };

    let catalog = state.catalog.read().await.clone();
    let recommendation = assembler::recommend_outfit(
        &catalog,
        &reading,
        state.history.as_ref(),
        state.style_score,
    )
    .await?;

    tracing::info!(
        recommendation_id = %recommendation.id,
        kind = ?recommendation.kind,
        match_percent = recommendation.match_percent,
        "Recommendation served"
    );

    Ok(Json(RecommendationResponse {
        city,
        conditions,
        recommendation,
    }))
}
