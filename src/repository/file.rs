use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use super::{ChangeNotifier, RecipeRepository, SubscriptionId};
use crate::codec;
use crate::error::{RecipeError, Result};
use crate::model::Recipe;

/// Recipes kept in memory and persisted to a single text file
#[derive(Debug)]
pub struct FileRecipeRepository {
    path: PathBuf,
    recipes: Vec<Recipe>,
    is_modified: bool,
    notifier: ChangeNotifier,
}

impl FileRecipeRepository {
    /// Create an empty repository bound to `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recipes: Vec::new(),
            is_modified: false,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn index_error(&self, index: usize) -> RecipeError {
        RecipeError::IndexError {
            index,
            len: self.recipes.len(),
        }
    }
}

impl RecipeRepository for FileRecipeRepository {
    fn load(&mut self) -> Result<()> {
        debug!("Loading recipes from {}", self.path.display());

        let bytes = fs::read(&self.path).map_err(|e| RecipeError::storage(&self.path, e))?;
        let recipes = codec::decode(&bytes)
            .and_then(codec::parse)
            .inspect_err(|e| {
                warn!("Failed to parse {}: {}", self.path.display(), e);
            })?;

        info!(
            "Loaded {} recipes from {}",
            recipes.len(),
            self.path.display()
        );
        self.recipes = recipes;
        self.is_modified = false;
        self.notifier.notify();
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let text = codec::serialize(&self.recipes);

        // Write next to the target and rename over it, so a failure keeps the old file.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file =
            NamedTempFile::new_in(dir).map_err(|e| RecipeError::storage(&self.path, e))?;
        file.write_all(text.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| RecipeError::storage(&self.path, e))?;
        file.persist(&self.path)
            .map_err(|e| RecipeError::storage(&self.path, e.error))?;

        info!(
            "Saved {} recipes to {}",
            self.recipes.len(),
            self.path.display()
        );
        self.is_modified = false;
        Ok(())
    }

    fn get_all(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }

    fn get_at(&self, index: usize) -> Result<Recipe> {
        self.recipes
            .get(index)
            .cloned()
            .ok_or_else(|| self.index_error(index))
    }

    fn delete(&mut self, recipe: &Recipe) -> bool {
        match self.recipes.iter().position(|r| r == recipe) {
            Some(index) => {
                self.recipes.remove(index);
                info!("Deleted recipe '{}'", recipe.name);
                self.is_modified = true;
                self.notifier.notify();
                true
            }
            None => {
                debug!("No recipe matching '{}' to delete", recipe.name);
                false
            }
        }
    }

    fn delete_at(&mut self, index: usize) -> Result<Recipe> {
        if index >= self.recipes.len() {
            return Err(self.index_error(index));
        }

        let removed = self.recipes.remove(index);
        info!("Deleted recipe '{}' at index {}", removed.name, index);
        self.is_modified = true;
        self.notifier.notify();
        Ok(removed)
    }

    fn subscribe(&mut self, callback: Box<dyn FnMut()>) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn is_modified(&self) -> bool {
        self.is_modified
    }

    fn len(&self) -> usize {
        self.recipes.len()
    }
}
