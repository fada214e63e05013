use filed_recipes::{view, AppConfig, FileRecipeRepository, RecipeError, RecipeRepository};
use log::{debug, info};
use std::env;

const USAGE: &str = "usage: filed-recipes <list | show [index] | delete <index> | json>";

fn parse_index(arg: Option<&String>) -> Result<usize, RecipeError> {
    let arg = arg.ok_or_else(|| RecipeError::UsageError(USAGE.to_string()))?;
    arg.parse()
        .map_err(|_| RecipeError::UsageError(format!("'{}' is not a recipe index", arg)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the command from command-line arguments
    let args: Vec<String> = env::args().collect();
    let command = args
        .get(1)
        .ok_or_else(|| RecipeError::UsageError(USAGE.to_string()))?;

    let config = AppConfig::load()?;
    debug!("Using recipe file {}", config.recipe_file.display());

    let mut repository = FileRecipeRepository::new(&config.recipe_file);
    repository.subscribe(Box::new(|| debug!("Recipe collection changed")));
    repository.load()?;

    match command.as_str() {
        "list" => print!("{}", view::render_index(&repository.get_all())),
        "show" => match args.get(2) {
            Some(_) => {
                let recipe = repository.get_at(parse_index(args.get(2))?)?;
                print!("{}", view::render_recipe(&recipe));
            }
            None => print!("{}", view::render_recipes(&repository.get_all())),
        },
        "delete" => {
            let removed = repository.delete_at(parse_index(args.get(2))?)?;
            repository.save()?;
            info!("Removed '{}'", removed.name);
            println!("Deleted {}", removed.name);
        }
        "json" => println!("{}", serde_json::to_string_pretty(&repository.get_all())?),
        _ => return Err(RecipeError::UsageError(USAGE.to_string()).into()),
    }

    Ok(())
}
