mod file;
mod notifier;

pub use file::FileRecipeRepository;
pub use notifier::{ChangeNotifier, SubscriptionId};

use crate::error::Result;
use crate::model::Recipe;

/// Holder for a collection of recipes
///
/// Reads hand out clones, so callers can never change the held collection
/// without going through `delete`/`delete_at` (and the dirty flag).
pub trait RecipeRepository {
    /// Replace the collection with the contents of the backing store
    fn load(&mut self) -> Result<()>;

    /// Write the collection to the backing store
    fn save(&mut self) -> Result<()>;

    /// Copies of every recipe, sorted by name
    fn get_all(&self) -> Vec<Recipe>;

    /// Copy of the recipe at `index`
    fn get_at(&self, index: usize) -> Result<Recipe>;

    /// Remove the first recipe equal to `recipe`. Returns `false` if none matched.
    fn delete(&mut self, recipe: &Recipe) -> bool;

    /// Remove and return the recipe at `index`
    fn delete_at(&mut self, index: usize) -> Result<Recipe>;

    /// Register a callback run after every load or delete
    fn subscribe(&mut self, callback: Box<dyn FnMut()>) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Whether the collection changed since the last load or save
    fn is_modified(&self) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
