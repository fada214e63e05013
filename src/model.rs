use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A single ingredient line: `amount;measure;name`.
///
/// All three fields are free-form text. `amount` is not checked to be a number,
/// so values like "1/2" or "a pinch" are kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub amount: String,
    pub measure: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(
        amount: impl Into<String>,
        measure: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            measure: measure.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.amount, &self.measure, &self.name]
            .into_iter()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// A recipe as stored in the recipe file.
///
/// Equality compares every field, so a clone handed out by the repository
/// still matches its original when passed back for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    /// Orders recipes by name, case-sensitive, byte-wise.
    pub fn cmp_by_name(&self, other: &Recipe) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Stable sort by name; recipes sharing a name keep their relative order.
pub fn sort_by_name(recipes: &mut [Recipe]) {
    recipes.sort_by(Recipe::cmp_by_name);
}
