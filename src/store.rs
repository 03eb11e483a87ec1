//! The in-memory recipe collection.
//!
//! [`RecipeStore`] is a cheap, clonable handle; every clone sees the same
//! collection. Each operation takes the lock once and never holds it across
//! an `.await`, so handlers can call it from any tokio worker.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A stored recipe. `name` and `description` hold whatever JSON the client
/// sent; `None` serializes as `null`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: Option<Value>,
    pub description: Option<Value>,
}

/// Create/update payload. Missing fields deserialize to `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecipeInput {
    pub name: Option<Value>,
    pub description: Option<Value>,
}

impl RecipeInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            description: Some(Value::String(description.into())),
        }
    }
}

struct Inner {
    recipes: Vec<Recipe>,
    next_id: u64,
}

/// Shared, insertion-ordered recipe collection.
#[derive(Clone)]
pub struct RecipeStore {
    inner: Arc<Mutex<Inner>>,
}

impl RecipeStore {
    /// An empty store; the first recipe created gets id `1`.
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { recipes: Vec::new(), next_id: 1 })) }
    }

    /// A store holding the two startup recipes, ids `1` and `2`.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.create(RecipeInput::new("Egg Salad", "This is a lovely egg salad recipe."));
        store.create(RecipeInput::new("Tomato Pasta", "This is a lovely tomato pasta recipe."));
        store
    }

    /// Every recipe, in insertion order.
    pub fn list(&self) -> Vec<Recipe> {
        self.lock().recipes.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().recipes.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<Recipe> {
        self.lock().recipes.iter().find(|r| r.id == id).cloned()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.lock().recipes.iter().any(|r| r.id == id)
    }

    /// Appends a new recipe and returns it.
    ///
    /// Ids come from a counter that only moves forward, so an id freed by
    /// [`delete`](Self::delete) is never handed out again.
    pub fn create(&self, input: RecipeInput) -> Recipe {
        let mut inner = self.lock();
        let recipe = Recipe {
            id: inner.next_id,
            name: input.name,
            description: input.description,
        };
        inner.next_id += 1;
        inner.recipes.push(recipe.clone());
        debug!(id = recipe.id, "recipe created");
        recipe
    }

    /// Overwrites both fields of recipe `id`, `None` included.
    pub fn update(&self, id: u64, input: RecipeInput) -> Option<Recipe> {
        let mut inner = self.lock();
        let recipe = inner.recipes.iter_mut().find(|r| r.id == id)?;
        recipe.name = input.name;
        recipe.description = input.description;
        debug!(id, "recipe updated");
        Some(recipe.clone())
    }

    /// Removes recipe `id` and returns it.
    pub fn delete(&self, id: u64) -> Option<Recipe> {
        let mut inner = self.lock();
        let index = inner.recipes.iter().position(|r| r.id == id)?;
        let removed = inner.recipes.remove(index);
        debug!(id, "recipe deleted");
        Some(removed)
    }

    // A panic inside one of the methods above cannot leave `Inner` half
    // written, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecipeStore {
    fn default() -> Self { Self::new() }
}
