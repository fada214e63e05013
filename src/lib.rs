pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod view;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{FormatErrorKind, RecipeError, Result};
pub use model::{Ingredient, Recipe};
pub use repository::{ChangeNotifier, FileRecipeRepository, RecipeRepository, SubscriptionId};

/// Open the recipe file at `path` and load it.
///
/// # Example
/// ```no_run
/// use filed_recipes::{open, RecipeRepository};
///
/// let repository = open("App_Data/Recipes.txt")?;
/// for recipe in repository.get_all() {
///     println!("{}", recipe.name);
/// }
/// # Ok::<(), filed_recipes::RecipeError>(())
/// ```
pub fn open(path: impl Into<std::path::PathBuf>) -> Result<FileRecipeRepository> {
    let mut repository = FileRecipeRepository::new(path);
    repository.load()?;
    Ok(repository)
}
