use diesel::prelude::*;
use diesel::result::Error::NotFound;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models;
use crate::schema::{pizzas, restaurants};

pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

const MISSING_FIELDS: &str = "Missing required fields: price, pizza_id, restaurant_id.";
const PRICE_RANGE: &str = "Price must be a number between 1 and 30.";
const PIZZA_ID_TYPE: &str = "Pizza ID must be an integer.";
const RESTAURANT_ID_TYPE: &str = "Restaurant ID must be an integer.";

/// Body of POST /restaurant_pizzas. Fields are kept as raw JSON values so
/// that presence and type violations can all be collected instead of the
/// request failing on the first mismatch during deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub price: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub pizza_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub restaurant_id: Option<Value>,
}

/// A create request that passed every rule, with both referenced rows
/// already loaded for the response payload.
#[derive(Debug)]
pub struct ValidatedAssociation {
    pub price: i32,
    pub pizza: models::Pizza,
    pub restaurant: models::Restaurant,
}

fn as_integer(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|wide| i32::try_from(wide).ok())
}

/// Checks a create-association request against every business rule,
/// collecting all violations rather than stopping at the first. Type and
/// range rules apply only to fields that are present, and existence rules
/// only to well-typed ids, so each bad field reports exactly once.
pub fn validate_create_association(
    conn: &mut SqliteConnection,
    request: &CreateRestaurantPizzaRequest,
) -> Result<ValidatedAssociation, ApiError> {
    let mut errors = Vec::new();

    if request.price.is_none() || request.pizza_id.is_none() || request.restaurant_id.is_none() {
        errors.push(MISSING_FIELDS.to_string());
    }

    let price = request.price.as_ref().and_then(as_integer);
    if request.price.is_some()
        && !price.is_some_and(|value| (PRICE_MIN..=PRICE_MAX).contains(&value))
    {
        errors.push(PRICE_RANGE.to_string());
    }

    let pizza_id = request.pizza_id.as_ref().and_then(as_integer);
    if request.pizza_id.is_some() && pizza_id.is_none() {
        errors.push(PIZZA_ID_TYPE.to_string());
    }

    let restaurant_id = request.restaurant_id.as_ref().and_then(as_integer);
    if request.restaurant_id.is_some() && restaurant_id.is_none() {
        errors.push(RESTAURANT_ID_TYPE.to_string());
    }

    let pizza = match pizza_id {
        Some(wanted) => match pizzas::table
            .find(wanted)
            .select(models::Pizza::as_select())
            .first(conn)
        {
            Ok(pizza) => Some(pizza),
            Err(NotFound) => {
                errors.push(format!("Pizza with id {wanted} does not exist."));
                None
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    let restaurant = match restaurant_id {
        Some(wanted) => match restaurants::table
            .find(wanted)
            .select(models::Restaurant::as_select())
            .first(conn)
        {
            Ok(restaurant) => Some(restaurant),
            Err(NotFound) => {
                errors.push(format!("Restaurant with id {wanted} does not exist."));
                None
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    match (price, pizza, restaurant) {
        (Some(price), Some(pizza), Some(restaurant)) if errors.is_empty() => {
            Ok(ValidatedAssociation {
                price,
                pizza,
                restaurant,
            })
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support;

    fn request(body: Value) -> CreateRestaurantPizzaRequest {
        serde_json::from_value(body).unwrap()
    }

    fn validation_errors(result: Result<ValidatedAssociation, ApiError>) -> Vec<String> {
        match result {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    fn seeded_state() -> crate::handlers::AppState {
        let state = test_support::test_state();
        test_support::seed_restaurant(&state, 1, "Dough", "1 Main St");
        test_support::seed_pizza(&state, 1, "Cheese", "Dough, Cheese");
        state
    }

    #[test]
    fn accepts_valid_association() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        let validated = validate_create_association(
            conn,
            &request(json!({ "price": 10, "pizza_id": 1, "restaurant_id": 1 })),
        )
        .unwrap();

        assert_eq!(validated.price, 10);
        assert_eq!(validated.pizza.name, "Cheese");
        assert_eq!(validated.restaurant.name, "Dough");
    }

    #[test]
    fn accepts_price_boundaries() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        for price in [PRICE_MIN, PRICE_MAX] {
            let result = validate_create_association(
                conn,
                &request(json!({ "price": price, "pizza_id": 1, "restaurant_id": 1 })),
            );
            assert_eq!(result.unwrap().price, price);
        }
    }

    #[test]
    fn reports_missing_fields_once() {
        let state = test_support::test_state();
        let conn = &mut state.pool.get().unwrap();

        let errors = validation_errors(validate_create_association(conn, &request(json!({}))));

        assert_eq!(errors, vec![MISSING_FIELDS.to_string()]);
    }

    #[test]
    fn rejects_out_of_range_prices() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        for price in [0, 31, -5] {
            let errors = validation_errors(validate_create_association(
                conn,
                &request(json!({ "price": price, "pizza_id": 1, "restaurant_id": 1 })),
            ));
            assert_eq!(errors, vec![PRICE_RANGE.to_string()]);
        }
    }

    #[test]
    fn rejects_non_integer_price() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        for price in [json!("ten"), json!(10.5), json!(true)] {
            let errors = validation_errors(validate_create_association(
                conn,
                &request(json!({ "price": price, "pizza_id": 1, "restaurant_id": 1 })),
            ));
            assert_eq!(errors, vec![PRICE_RANGE.to_string()]);
        }
    }

    #[test]
    fn rejects_mistyped_ids() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        let errors = validation_errors(validate_create_association(
            conn,
            &request(json!({ "price": 10, "pizza_id": "1", "restaurant_id": [1] })),
        ));

        assert_eq!(
            errors,
            vec![PIZZA_ID_TYPE.to_string(), RESTAURANT_ID_TYPE.to_string()]
        );
    }

    #[test]
    fn reports_unknown_references_with_ids() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        let errors = validation_errors(validate_create_association(
            conn,
            &request(json!({ "price": 10, "pizza_id": 99, "restaurant_id": 42 })),
        ));

        assert_eq!(
            errors,
            vec![
                "Pizza with id 99 does not exist.".to_string(),
                "Restaurant with id 42 does not exist.".to_string(),
            ]
        );
    }

    #[test]
    fn collects_violations_across_rules() {
        let state = seeded_state();
        let conn = &mut state.pool.get().unwrap();

        let errors = validation_errors(validate_create_association(
            conn,
            &request(json!({ "price": 0, "pizza_id": "x", "restaurant_id": 77 })),
        ));

        assert_eq!(
            errors,
            vec![
                PRICE_RANGE.to_string(),
                PIZZA_ID_TYPE.to_string(),
                "Restaurant with id 77 does not exist.".to_string(),
            ]
        );
    }
}
