//! Plain-text rendering of recipes for the terminal.

use crate::model::Recipe;

/// Render one recipe: a framed name, its ingredients and its numbered instructions.
pub fn render_recipe(recipe: &Recipe) -> String {
    let rule = "=".repeat(recipe.name.chars().count().max(1) + 2);
    let mut lines = vec![rule.clone(), format!(" {}", recipe.name), rule, String::new()];

    lines.push("Ingredients".to_string());
    lines.push("-----------".to_string());
    lines.extend(recipe.ingredients.iter().map(|i| i.to_string()));

    lines.push(String::new());
    lines.push("Instructions".to_string());
    lines.push("------------".to_string());
    lines.extend(
        recipe
            .instructions
            .iter()
            .enumerate()
            .map(|(n, step)| format!("{}. {}", n + 1, step)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render several recipes one after another, separated by a blank line.
pub fn render_recipes(recipes: &[Recipe]) -> String {
    recipes
        .iter()
        .map(render_recipe)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `index: name` line per recipe.
pub fn render_index(recipes: &[Recipe]) -> String {
    recipes
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}: {}\n", i, r.name))
        .collect()
}
