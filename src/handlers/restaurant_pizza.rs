use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::schema::restaurant_pizzas;
use crate::serializer::{self, RestaurantPizzaCreated};
use crate::validation::{self, CreateRestaurantPizzaRequest};
use crate::models;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Association created", body = RestaurantPizzaCreated),
        (status = 400, description = "Validation failed", body = crate::serializer::ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantPizzaRequest>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), ApiError> {
    let conn = &mut state.conn()?;

    let (created, validated) = conn.transaction::<_, ApiError, _>(|conn| {
        let validated = validation::validate_create_association(conn, &payload)?;

        let new_association = models::NewRestaurantPizza {
            price: validated.price,
            pizza_id: validated.pizza.id,
            restaurant_id: validated.restaurant.id,
        };
        let created = diesel::insert_into(restaurant_pizzas::table)
            .values(&new_association)
            .get_result::<models::RestaurantPizza>(conn)?;

        Ok((created, validated))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serializer::serialize_restaurant_pizza_created(
            &created,
            &validated.pizza,
            &validated.restaurant,
        )),
    ))
}
