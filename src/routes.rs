//! The `/recipes` routes and the service route table.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/recipes` | 200 `{"data": [...]}` | — |
//! | GET | `/recipes/{id}` | 200 recipe | 404 `{"message": "recipe not found"}` |
//! | POST | `/recipes` | 201 recipe | 400 on a malformed body |
//! | PUT | `/recipes/{id}` | 200 recipe | 404 / 400 |
//! | DELETE | `/recipes/{id}` | 204 | 404 |
//!
//! Create and update read `name` and `description` permissively: a missing
//! field, or a missing body, stores `null`.

use serde::{Serialize, de};
use serde_json::Value;

use crate::health;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{Recipe, RecipeInput, RecipeStore};

/// Builds the service's route table around `store`, health probes included.
pub fn router(store: RecipeStore) -> Router<RecipeStore> {
    Router::with_state(store)
        .on(Method::Get,    "/recipes",      list_recipes)
        .on(Method::Post,   "/recipes",      create_recipe)
        .on(Method::Get,    "/recipes/{id}", get_recipe)
        .on(Method::Put,    "/recipes/{id}", update_recipe)
        .on(Method::Delete, "/recipes/{id}", delete_recipe)
        .on(Method::Get,    "/healthz",      health::liveness)
        .on(Method::Get,    "/readyz",       health::readiness)
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Everything a recipe handler can fail with.
#[derive(Debug)]
pub enum RecipeError {
    /// No live recipe has the requested id.
    NotFound,
    /// The `{id}` segment is not a run of digits, so the route does not match.
    NoRoute,
    /// The body is present but is not a recipe payload.
    MalformedBody(serde_json::Error),
}

#[derive(Serialize)]
struct Message {
    message: String,
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                Status::NotFound,
                Json(Message { message: "recipe not found".to_owned() }),
            ).into_response(),
            Self::NoRoute => Response::status(Status::NotFound),
            Self::MalformedBody(e) => (
                Status::BadRequest,
                Json(Message { message: format!("malformed JSON body: {e}") }),
            ).into_response(),
        }
    }
}

#[derive(Serialize)]
struct Envelope {
    data: Vec<Recipe>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn list_recipes(_req: Request, store: RecipeStore) -> Json<Envelope> {
    Json(Envelope { data: store.list() })
}

async fn get_recipe(req: Request, store: RecipeStore) -> Result<Json<Recipe>, RecipeError> {
    let id = recipe_id(&req)?;
    store.get(id).map(Json).ok_or(RecipeError::NotFound)
}

async fn create_recipe(req: Request, store: RecipeStore) -> Result<(Status, Json<Recipe>), RecipeError> {
    let input = payload(&req)?;
    Ok((Status::Created, Json(store.create(input))))
}

async fn update_recipe(req: Request, store: RecipeStore) -> Result<Json<Recipe>, RecipeError> {
    let id = recipe_id(&req)?;
    if !store.contains(id) {
        return Err(RecipeError::NotFound);
    }
    let input = payload(&req)?;
    store.update(id, input).map(Json).ok_or(RecipeError::NotFound)
}

async fn delete_recipe(req: Request, store: RecipeStore) -> Result<Status, RecipeError> {
    let id = recipe_id(&req)?;
    store.delete(id).map(|_| Status::NoContent).ok_or(RecipeError::NotFound)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Parses `{id}` as an unsigned decimal. Signs and blanks do not match the
/// route; a digit run too large for `u64` matches but names no recipe.
fn recipe_id(req: &Request) -> Result<u64, RecipeError> {
    let raw = req.param("id").unwrap_or_default();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecipeError::NoRoute);
    }
    raw.parse().map_err(|_| RecipeError::NotFound)
}

/// An empty or whitespace-only body is an empty payload. Otherwise the body
/// must be a JSON object; its fields are taken as-is.
fn payload(req: &Request) -> Result<RecipeInput, RecipeError> {
    if req.body().iter().all(u8::is_ascii_whitespace) {
        return Ok(RecipeInput::default());
    }
    let value: Value = req.json().map_err(RecipeError::MalformedBody)?;
    if !value.is_object() {
        return Err(RecipeError::MalformedBody(de::Error::custom("expected a JSON object")));
    }
    serde_json::from_value(value).map_err(RecipeError::MalformedBody)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;
    use serde_json::json;

    use super::*;

    fn request(method: Method, path: &str, body: &str) -> Request {
        Request::new(method, path, Vec::new(), Bytes::from(body.to_owned()))
    }

    async fn call(app: &Router<RecipeStore>, method: Method, path: &str, body: &str) -> (StatusCode, Value) {
        let resp = app.handle(request(method, path, body)).await;
        let value = if resp.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&resp.body).unwrap()
        };
        (resp.status, value)
    }

    #[tokio::test]
    async fn lists_seed_recipes() {
        let app = router(RecipeStore::seeded());
        let (status, body) = call(&app, Method::Get, "/recipes", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": [
            {"id": 1, "name": "Egg Salad", "description": "This is a lovely egg salad recipe."},
            {"id": 2, "name": "Tomato Pasta", "description": "This is a lovely tomato pasta recipe."},
        ]}));
    }

    #[tokio::test]
    async fn chili_lifecycle() {
        let app = router(RecipeStore::seeded());

        let (status, created) =
            call(&app, Method::Post, "/recipes", r#"{"name":"Chili","description":"Spicy"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 3, "name": "Chili", "description": "Spicy"}));

        let (status, fetched) = call(&app, Method::Get, "/recipes/3", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) =
            call(&app, Method::Put, "/recipes/3", r#"{"name":"Chili Con Carne"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"id": 3, "name": "Chili Con Carne", "description": null}));

        let (status, body) = call(&app, Method::Delete, "/recipes/3", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = call(&app, Method::Get, "/recipes/3", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "recipe not found"}));
    }

    #[tokio::test]
    async fn missing_ids_get_the_not_found_envelope() {
        let app = router(RecipeStore::seeded());
        for method in [Method::Get, Method::Put, Method::Delete] {
            let (status, body) = call(&app, method, "/recipes/42", "{}").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(body, json!({"message": "recipe not found"}), "{method}");
        }
    }

    #[tokio::test]
    async fn non_numeric_ids_do_not_match_the_route() {
        let app = router(RecipeStore::seeded());
        for path in ["/recipes/abc", "/recipes/-1", "/recipes/+1", "/recipes/1.5"] {
            let resp = app.handle(request(Method::Get, path, "")).await;
            assert_eq!(resp.status, StatusCode::NOT_FOUND, "{path}");
            assert!(resp.body.is_empty(), "{path}");
        }
    }

    #[tokio::test]
    async fn create_without_body_stores_nulls() {
        let store = RecipeStore::seeded();
        let app = router(store.clone());
        let (status, created) = call(&app, Method::Post, "/recipes", "").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 3, "name": null, "description": null}));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_without_mutation() {
        let store = RecipeStore::seeded();
        let app = router(store.clone());
        let (status, body) = call(&app, Method::Post, "/recipes", "[1, 2]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("malformed JSON body"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn oversized_ids_get_the_not_found_envelope() {
        let app = router(RecipeStore::seeded());
        for (method, path) in [
            (Method::Get, "/recipes/99999999999999999999999"),
            (Method::Put, "/recipes/18446744073709551616"),
            (Method::Delete, "/recipes/18446744073709551616"),
        ] {
            let (status, body) = call(&app, method, path, "{}").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {path}");
            assert_eq!(body, json!({"message": "recipe not found"}), "{method} {path}");
        }
    }

    #[tokio::test]
    async fn non_string_fields_are_stored_as_sent() {
        let store = RecipeStore::seeded();
        let app = router(store.clone());

        let (status, created) =
            call(&app, Method::Post, "/recipes", r#"{"name":5,"description":"x"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 3, "name": 5, "description": "x"}));

        let (status, updated) = call(&app, Method::Put, "/recipes/1", r#"{"name":true}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"id": 1, "name": true, "description": null}));

        let (_, fetched) = call(&app, Method::Get, "/recipes/3", "").await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let app = router(RecipeStore::seeded());
        let (status, body) = call(&app, Method::Put, "/recipes/1", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("malformed JSON body"));
    }

    #[tokio::test]
    async fn update_on_missing_id_ignores_the_body() {
        let app = router(RecipeStore::seeded());
        let (status, body) = call(&app, Method::Put, "/recipes/9", "{not json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "recipe not found"}));
    }

    #[tokio::test]
    async fn delete_then_list_shrinks_by_one() {
        let app = router(RecipeStore::seeded());
        let (status, _) = call(&app, Method::Delete, "/recipes/1", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = call(&app, Method::Get, "/recipes", "").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["id"], 2);
    }

    #[tokio::test]
    async fn unregistered_method_lists_allowed_ones() {
        let app = router(RecipeStore::seeded());
        let resp = app.handle(request(Method::Patch, "/recipes/1", "")).await;
        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers, vec![("allow".to_owned(), "DELETE, GET, PUT".to_owned())]);
    }

    #[tokio::test]
    async fn health_probes_answer() {
        let app = router(RecipeStore::new());
        let resp = app.handle(request(Method::Get, "/healthz", "")).await;
        assert_eq!((resp.status, resp.body), (StatusCode::OK, b"ok".to_vec()));
        let resp = app.handle(request(Method::Get, "/readyz", "")).await;
        assert_eq!((resp.status, resp.body), (StatusCode::OK, b"ready".to_vec()));
    }
}
