//! API route definitions.

use axum::{Router, middleware};
use serde::{Deserialize, Deserializer};

use crate::{AppState, middleware::auth_middleware};

pub mod assets;
pub mod auth;
pub mod budget_years;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod expenses;
pub mod funds;
pub mod health;
pub mod incomes;
pub mod settings;
pub mod tasks;
pub mod tithe;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Everything below is scoped to the bearer of an access token
    let protected_routes = Router::new()
        .merge(budget_years::routes())
        .merge(funds::routes())
        .merge(categories::routes())
        .merge(incomes::routes())
        .merge(expenses::routes())
        .merge(tithe::routes())
        .merge(debts::routes())
        .merge(tasks::routes())
        .merge(assets::routes())
        .merge(settings::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Query string carrying an optional budget year.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    /// Budget year to report on; the active one when absent.
    pub budget_year_id: Option<uuid::Uuid>,
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in patch bodies.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_double_option() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let cleared: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();

        assert_eq!(absent.note, None);
        assert_eq!(cleared.note, Some(None));
        assert_eq!(set.note, Some(Some("hi".to_string())));
    }
}
