pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::response::Html;
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::{DbConnection, DbPool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub(crate) fn conn(&self) -> Result<DbConnection, ApiError> {
        self.pool
            .get()
            .map_err(|err| ApiError::Internal(format!("connection pool exhausted: {err}")))
    }
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Pizzeria Service</h1>")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::PizzaSummary,
            crate::serializer::RestaurantDetail,
            crate::serializer::RestaurantPizzaEntry,
            crate::serializer::RestaurantPizzaCreated,
            crate::validation::CreateRestaurantPizzaRequest,
            crate::serializer::ApiErrorResponse,
            crate::serializer::ValidationErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant listing, detail, and removal"),
        (name = "pizzas", description = "Pizza listing"),
        (name = "restaurant_pizzas", description = "Priced restaurant-pizza associations")
    ),
    info(
        title = "Pizzeria Service",
        description = "CRUD service for restaurants, pizzas, and their priced associations",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
