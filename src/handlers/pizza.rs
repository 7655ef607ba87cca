use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::serializer::{self, PizzaSummary};
use crate::models;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    use crate::schema::pizzas::dsl::*;

    let conn = &mut state.conn()?;
    let results = pizzas.select(models::Pizza::as_select()).load(conn)?;

    Ok(Json(
        results
            .iter()
            .map(serializer::serialize_pizza_summary)
            .collect(),
    ))
}
