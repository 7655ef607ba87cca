use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaSummary {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-form ingredient description
    pub ingredients: String,
}

/// Restaurant with its priced associations, in insertion order.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

/// Create-association response, the only shape that nests both parents.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Collected rule violations
    pub errors: Vec<String>,
}

// Projections are fixed field whitelists. Nested shapes never recurse back
// into the parent's own collections: a PizzaSummary carries no restaurants,
// a RestaurantSummary carries no restaurant_pizzas.

pub fn serialize_restaurant_summary(restaurant: &models::Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza_summary(pizza: &models::Pizza) -> PizzaSummary {
    PizzaSummary {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_detail(
    restaurant: &models::Restaurant,
    associations: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetail {
    RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: associations
            .iter()
            .map(|(association, pizza)| RestaurantPizzaEntry {
                id: association.id,
                price: association.price,
                pizza_id: association.pizza_id,
                restaurant_id: association.restaurant_id,
                pizza: serialize_pizza_summary(pizza),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_created(
    association: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> RestaurantPizzaCreated {
    RestaurantPizzaCreated {
        id: association.id,
        price: association.price,
        pizza_id: association.pizza_id,
        restaurant_id: association.restaurant_id,
        pizza: serialize_pizza_summary(pizza),
        restaurant: serialize_restaurant_summary(restaurant),
    }
}
