use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;

use crate::handlers::AppState;
use crate::models;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::{ConnectionPragmas, MIGRATIONS};

/// State over a fresh in-memory database. The pool is capped at a single
/// connection because every `:memory:` connection opens its own database.
pub fn test_state() -> AppState {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .expect("Failed to create pool.");

    {
        let mut conn = pool.get().expect("Failed to check out connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");
    }

    AppState { pool }
}

pub fn seed_restaurant(state: &AppState, id: i32, name: &str, address: &str) -> models::Restaurant {
    let restaurant = models::Restaurant {
        id,
        name: name.to_string(),
        address: address.to_string(),
    };
    let conn = &mut state.pool.get().unwrap();
    diesel::insert_into(restaurants::table)
        .values(&restaurant)
        .execute(conn)
        .unwrap();
    restaurant
}

pub fn seed_pizza(state: &AppState, id: i32, name: &str, ingredients: &str) -> models::Pizza {
    let pizza = models::Pizza {
        id,
        name: name.to_string(),
        ingredients: ingredients.to_string(),
    };
    let conn = &mut state.pool.get().unwrap();
    diesel::insert_into(pizzas::table)
        .values(&pizza)
        .execute(conn)
        .unwrap();
    pizza
}

pub fn seed_association(state: &AppState, restaurant_id: i32, pizza_id: i32, price: i32) -> i32 {
    let conn = &mut state.pool.get().unwrap();
    let row: models::RestaurantPizza = diesel::insert_into(restaurant_pizzas::table)
        .values(&models::NewRestaurantPizza {
            price,
            pizza_id,
            restaurant_id,
        })
        .get_result(conn)
        .unwrap();
    row.id
}

pub fn association_count(state: &AppState) -> i64 {
    let conn = &mut state.pool.get().unwrap();
    restaurant_pizzas::table.count().get_result(conn).unwrap()
}
