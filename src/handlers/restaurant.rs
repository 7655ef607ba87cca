use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use diesel::prelude::*;
use diesel::result::Error::NotFound;
use tracing::instrument;

use crate::error::ApiError;
use crate::schema::{restaurant_pizzas, restaurants};
use crate::serializer::{self, RestaurantDetail, RestaurantSummary};
use crate::models;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let conn = &mut state.conn()?;
    let results = restaurants::table
        .select(models::Restaurant::as_select())
        .load(conn)?;

    Ok(Json(
        results
            .iter()
            .map(serializer::serialize_restaurant_summary)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its priced pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = crate::serializer::ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let conn = &mut state.conn()?;
    let restaurant = match restaurants::table
        .find(restaurant_id)
        .select(models::Restaurant::as_select())
        .first(conn)
    {
        Ok(restaurant) => restaurant,
        Err(NotFound) => return Err(ApiError::NotFound("Restaurant not found".to_string())),
        Err(err) => return Err(err.into()),
    };

    let associations = models::RestaurantPizza::belonging_to(&restaurant)
        .inner_join(crate::schema::pizzas::table)
        .select((
            models::RestaurantPizza::as_select(),
            models::Pizza::as_select(),
        ))
        .load::<(models::RestaurantPizza, models::Pizza)>(conn)?;

    Ok(Json(serializer::serialize_restaurant_detail(
        &restaurant,
        &associations,
    )))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its associations deleted"),
        (status = 404, description = "Restaurant not found", body = crate::serializer::ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let conn = &mut state.conn()?;

    conn.transaction::<_, ApiError, _>(|conn| {
        let restaurant = match restaurants::table
            .find(restaurant_id)
            .select(models::Restaurant::as_select())
            .first(conn)
        {
            Ok(restaurant) => restaurant,
            Err(NotFound) => return Err(ApiError::NotFound("Restaurant not found".to_string())),
            Err(err) => return Err(err.into()),
        };

        // SQLite only honors the schema-level cascade when the foreign_keys
        // pragma is set; the associations are deleted explicitly.
        diesel::delete(
            restaurant_pizzas::table
                .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
        )
        .execute(conn)?;
        diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;

        Ok(())
    })?;

    Ok(StatusCode::NO_CONTENT)
}
