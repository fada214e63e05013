//! Reading and writing the section-tagged recipe format.
//!
//! A recipe file is a run of records, each made of three sections:
//!
//! ```text
//! [Recept]
//! Crepes
//! [Ingredienser]
//! 2;dl;flour
//! 3;;eggs
//! [Instruktioner]
//! Mix and fry
//! ```
//!
//! Records carry no terminator. A record ends where the next `[Recept]` line
//! starts, or at the end of the file.

use crate::error::{FormatErrorKind, RecipeError, Result};
use crate::model::{sort_by_name, Ingredient, Recipe};
use log::debug;

pub const SECTION_RECIPE: &str = "[Recept]";
pub const SECTION_INGREDIENTS: &str = "[Ingredienser]";
pub const SECTION_INSTRUCTIONS: &str = "[Instruktioner]";

const INGREDIENT_DELIMITER: char = ';';
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// How the next data line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadStatus {
    AwaitingRecord,
    ReadingName,
    ReadingIngredients,
    ReadingInstructions,
}

/// A record that has been opened by `[Recept]` but not yet closed.
struct PendingRecipe {
    recipe: Recipe,
    opened_at: usize,
}

impl PendingRecipe {
    fn finish(self, status: ReadStatus) -> Result<Recipe> {
        if status != ReadStatus::ReadingInstructions {
            return Err(RecipeError::format(
                self.opened_at,
                SECTION_RECIPE,
                FormatErrorKind::IncompleteRecord,
            ));
        }
        Ok(self.recipe)
    }
}

/// Check that raw file contents are UTF-8.
///
/// On failure the error points at the line holding the first bad byte.
pub fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let start = valid
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |i| i + 1);
        let end = bytes[start..]
            .iter()
            .position(|b| *b == b'\n')
            .map_or(bytes.len(), |i| start + i);
        let number = valid.iter().filter(|b| **b == b'\n').count() + 1;
        let content = String::from_utf8_lossy(&bytes[start..end]);

        RecipeError::format(
            number,
            content.trim_end_matches('\r'),
            FormatErrorKind::InvalidUtf8,
        )
    })
}

/// Parse the full text of a recipe file.
///
/// The recipes come back sorted by name. Blank lines are skipped, and so is a
/// leading byte-order mark. The first broken rule aborts the parse with a
/// `FormatError` naming the 1-based line.
pub fn parse(text: &str) -> Result<Vec<Recipe>> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut recipes = Vec::new();
    let mut status = ReadStatus::AwaitingRecord;
    let mut current: Option<PendingRecipe> = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;

        match line {
            SECTION_RECIPE => {
                if let Some(pending) = current.take() {
                    recipes.push(pending.finish(status)?);
                }
                current = Some(PendingRecipe {
                    recipe: Recipe::default(),
                    opened_at: number,
                });
                status = ReadStatus::ReadingName;
            }
            SECTION_INGREDIENTS => match (status, current.as_ref()) {
                (ReadStatus::ReadingName, Some(pending)) if !pending.recipe.name.is_empty() => {
                    status = ReadStatus::ReadingIngredients;
                }
                (ReadStatus::ReadingName, _) => {
                    return Err(RecipeError::format(
                        number,
                        line,
                        FormatErrorKind::MissingName,
                    ));
                }
                _ => {
                    return Err(RecipeError::format(
                        number,
                        line,
                        FormatErrorKind::MisplacedSection {
                            marker: SECTION_INGREDIENTS,
                        },
                    ));
                }
            },
            SECTION_INSTRUCTIONS => {
                if status != ReadStatus::ReadingIngredients {
                    return Err(RecipeError::format(
                        number,
                        line,
                        FormatErrorKind::MisplacedSection {
                            marker: SECTION_INSTRUCTIONS,
                        },
                    ));
                }
                status = ReadStatus::ReadingInstructions;
            }
            _ if line.trim().is_empty() => continue,
            _ => match (status, current.as_mut()) {
                (ReadStatus::AwaitingRecord, _) | (_, None) => {
                    return Err(RecipeError::format(
                        number,
                        line,
                        FormatErrorKind::DataBeforeRecord,
                    ));
                }
                (ReadStatus::ReadingName, Some(pending)) => {
                    if !pending.recipe.name.is_empty() {
                        return Err(RecipeError::format(
                            number,
                            line,
                            FormatErrorKind::UnexpectedNameLine,
                        ));
                    }
                    pending.recipe.name = line.to_string();
                }
                (ReadStatus::ReadingIngredients, Some(pending)) => {
                    let ingredient = parse_ingredient(line, number)?;
                    pending.recipe.ingredients.push(ingredient);
                }
                (ReadStatus::ReadingInstructions, Some(pending)) => {
                    pending.recipe.instructions.push(line.to_string());
                }
            },
        }
    }

    if let Some(pending) = current.take() {
        recipes.push(pending.finish(status)?);
    }

    sort_by_name(&mut recipes);
    debug!("Parsed {} recipes", recipes.len());
    Ok(recipes)
}

fn parse_ingredient(line: &str, number: usize) -> Result<Ingredient> {
    let fields: Vec<&str> = line.split(INGREDIENT_DELIMITER).collect();
    match fields.as_slice() {
        [amount, measure, name] => Ok(Ingredient::new(*amount, *measure, *name)),
        _ => Err(RecipeError::format(
            number,
            line,
            FormatErrorKind::MalformedIngredient {
                fields: fields.len(),
            },
        )),
    }
}

/// Write recipes in the order given, one line per field, every line ending in `\n`.
///
/// Empty sections still get their marker line.
pub fn serialize(recipes: &[Recipe]) -> String {
    let mut out = String::new();
    let mut push_line = |line: &str| {
        out.push_str(line);
        out.push('\n');
    };

    for recipe in recipes {
        push_line(SECTION_RECIPE);
        push_line(&recipe.name);
        push_line(SECTION_INGREDIENTS);
        for ingredient in &recipe.ingredients {
            push_line(&format!(
                "{}{d}{}{d}{}",
                ingredient.amount,
                ingredient.measure,
                ingredient.name,
                d = INGREDIENT_DELIMITER
            ));
        }
        push_line(SECTION_INSTRUCTIONS);
        for instruction in &recipe.instructions {
            push_line(instruction);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_reason(result: Result<Vec<Recipe>>) -> (usize, String, FormatErrorKind) {
        match result {
            Err(RecipeError::FormatError {
                line,
                content,
                reason,
            }) => (line, content, reason),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_single_record() {
        let text = "[Recept]\nCrepes\n[Ingredienser]\n2;dl;flour\n[Instruktioner]\nMix and fry\n";

        let recipes = parse(text).unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Crepes");
        assert_eq!(
            recipes[0].ingredients,
            vec![Ingredient::new("2", "dl", "flour")]
        );
        assert_eq!(recipes[0].instructions, vec!["Mix and fry"]);
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let text = "\u{FEFF}[Recept]\nCrepes\n[Ingredienser]\n2;dl;flour\n[Instruktioner]\nMix and fry\n";

        let recipes = parse(text).unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Crepes");
        assert_eq!(recipes[0].instructions, vec!["Mix and fry"]);
    }

    #[test]
    fn test_byte_order_mark_only_at_start() {
        let text = "[Recept]\nCrepes\n\u{FEFF}[Recept]\n";
        let (line, _, reason) = format_reason(parse(text));
        assert_eq!(line, 3);
        assert_eq!(reason, FormatErrorKind::UnexpectedNameLine);
    }

    #[test]
    fn test_decode_valid_utf8() {
        let bytes = "[Recept]\nKanelbullar\n".as_bytes();
        assert_eq!(decode(bytes).unwrap(), "[Recept]\nKanelbullar\n");
    }

    #[test]
    fn test_decode_reports_line_of_bad_byte() {
        // Latin-1 'ä' in "grädda"
        let bytes = b"[Recept]\nBullar\n[Ingredienser]\n[Instruktioner]\ngr\xE4dda\r\nServe\n";

        match decode(bytes) {
            Err(RecipeError::FormatError {
                line,
                content,
                reason,
            }) => {
                assert_eq!(line, 5);
                assert_eq!(content, "gr\u{FFFD}dda");
                assert_eq!(reason, FormatErrorKind::InvalidUtf8);
            }
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let text = "[Recept]\nToast\n[Ingredienser]\n1;slice;bread\n[Instruktioner]\nToast it";
        let recipes = parse(text).unwrap();
        assert_eq!(recipes[0].instructions, vec!["Toast it"]);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let text = "[Recept]\r\nToast\r\n[Ingredienser]\r\n1;slice;bread\r\n[Instruktioner]\r\nToast it\r\n";
        let recipes = parse(text).unwrap();
        assert_eq!(recipes[0].name, "Toast");
        assert_eq!(recipes[0].ingredients[0].name, "bread");
    }

    #[test]
    fn test_empty_sections_yield_empty_vectors() {
        let text = "[Recept]\nWater\n[Ingredienser]\n[Instruktioner]\n";
        let recipes = parse(text).unwrap();
        assert!(recipes[0].ingredients.is_empty());
        assert!(recipes[0].instructions.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "\n[Recept]\n\nSoup\n[Ingredienser]\n1;l;water\n\n2;st;carrots\n[Instruktioner]\n\nBoil\n\n";
        let recipes = parse(text).unwrap();
        assert_eq!(recipes[0].name, "Soup");
        assert_eq!(recipes[0].ingredients.len(), 2);
        assert_eq!(recipes[0].instructions, vec!["Boil"]);
    }

    #[test]
    fn test_instruction_punctuation_is_kept() {
        let text = "[Recept]\nSauce\n[Ingredienser]\n[Instruktioner]\nStir; then season, to taste.\n";
        let recipes = parse(text).unwrap();
        assert_eq!(recipes[0].instructions, vec!["Stir; then season, to taste."]);
    }

    #[test]
    fn test_ingredient_fields_may_be_empty() {
        let text = "[Recept]\nOmelette\n[Ingredienser]\n3;;eggs\n;;salt\n[Instruktioner]\n";
        let recipes = parse(text).unwrap();
        assert_eq!(
            recipes[0].ingredients,
            vec![Ingredient::new("3", "", "eggs"), Ingredient::new("", "", "salt")]
        );
    }

    #[test]
    fn test_records_are_sorted_by_name() {
        let text = "[Recept]\nWaffles\n[Ingredienser]\n[Instruktioner]\n\
                    [Recept]\nBread\n[Ingredienser]\n[Instruktioner]\n";
        let recipes = parse(text).unwrap();
        assert_eq!(recipes[0].name, "Bread");
        assert_eq!(recipes[1].name, "Waffles");
    }

    #[test]
    fn test_two_field_ingredient_is_rejected() {
        let text = "[Recept]\nCrepes\n[Ingredienser]\n2;dl\n[Instruktioner]\n";
        let (line, content, reason) = format_reason(parse(text));
        assert_eq!(line, 4);
        assert_eq!(content, "2;dl");
        assert_eq!(reason, FormatErrorKind::MalformedIngredient { fields: 2 });
    }

    #[test]
    fn test_four_field_ingredient_is_rejected() {
        let text = "[Recept]\nCrepes\n[Ingredienser]\n2;dl;flour;sifted\n[Instruktioner]\n";
        let (line, _, reason) = format_reason(parse(text));
        assert_eq!(line, 4);
        assert_eq!(reason, FormatErrorKind::MalformedIngredient { fields: 4 });
    }

    #[test]
    fn test_data_before_first_record() {
        let (line, content, reason) = format_reason(parse("Crepes\n[Recept]\n"));
        assert_eq!(line, 1);
        assert_eq!(content, "Crepes");
        assert_eq!(reason, FormatErrorKind::DataBeforeRecord);
    }

    #[test]
    fn test_ingredients_marker_before_record() {
        let (line, _, reason) = format_reason(parse("[Ingredienser]\n"));
        assert_eq!(line, 1);
        assert_eq!(
            reason,
            FormatErrorKind::MisplacedSection {
                marker: SECTION_INGREDIENTS
            }
        );
    }

    #[test]
    fn test_instructions_marker_before_ingredients() {
        let text = "[Recept]\nCrepes\n[Instruktioner]\nMix\n";
        let (line, _, reason) = format_reason(parse(text));
        assert_eq!(line, 3);
        assert_eq!(
            reason,
            FormatErrorKind::MisplacedSection {
                marker: SECTION_INSTRUCTIONS
            }
        );
    }

    #[test]
    fn test_repeated_ingredients_marker() {
        let text = "[Recept]\nCrepes\n[Ingredienser]\n[Ingredienser]\n";
        let (line, _, reason) = format_reason(parse(text));
        assert_eq!(line, 4);
        assert_eq!(
            reason,
            FormatErrorKind::MisplacedSection {
                marker: SECTION_INGREDIENTS
            }
        );
    }

    #[test]
    fn test_missing_name() {
        let (line, _, reason) = format_reason(parse("[Recept]\n\n[Ingredienser]\n"));
        assert_eq!(line, 3);
        assert_eq!(reason, FormatErrorKind::MissingName);
    }

    #[test]
    fn test_two_name_lines() {
        let (line, content, reason) = format_reason(parse("[Recept]\nCrepes\nThin ones\n"));
        assert_eq!(line, 3);
        assert_eq!(content, "Thin ones");
        assert_eq!(reason, FormatErrorKind::UnexpectedNameLine);
    }

    #[test]
    fn test_incomplete_record_before_next_record() {
        let text = "[Recept]\nCrepes\n[Ingredienser]\n2;dl;flour\n\
                    [Recept]\nBread\n[Ingredienser]\n[Instruktioner]\n";
        let (line, content, reason) = format_reason(parse(text));
        assert_eq!(line, 1);
        assert_eq!(content, SECTION_RECIPE);
        assert_eq!(reason, FormatErrorKind::IncompleteRecord);
    }

    #[test]
    fn test_incomplete_record_at_end_of_file() {
        let text = "[Recept]\nBread\n[Ingredienser]\n[Instruktioner]\n[Recept]\nCrepes\n";
        let (line, _, reason) = format_reason(parse(text));
        assert_eq!(line, 5);
        assert_eq!(reason, FormatErrorKind::IncompleteRecord);
    }

    #[test]
    fn test_serialize_layout() {
        let recipes = vec![Recipe::new("Crepes")
            .with_ingredient(Ingredient::new("2", "dl", "flour"))
            .with_instruction("Mix and fry")];

        assert_eq!(
            serialize(&recipes),
            "[Recept]\nCrepes\n[Ingredienser]\n2;dl;flour\n[Instruktioner]\nMix and fry\n"
        );
    }

    #[test]
    fn test_serialize_keeps_empty_sections() {
        let recipes = vec![Recipe::new("Water"), Recipe::new("Ice")];
        assert_eq!(
            serialize(&recipes),
            "[Recept]\nWater\n[Ingredienser]\n[Instruktioner]\n\
             [Recept]\nIce\n[Ingredienser]\n[Instruktioner]\n"
        );
    }

    #[test]
    fn test_serialize_nothing() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn test_parse_serialize_round_trip() {
        let text = "[Recept]\nBread\n[Ingredienser]\n5;dl;wheat flour\n1;tsk;salt\n[Instruktioner]\nKnead.\nBake at 225 degrees.\n\
                    [Recept]\nCrepes\n[Ingredienser]\n2;dl;flour\n[Instruktioner]\nMix and fry\n";
        assert_eq!(serialize(&parse(text).unwrap()), text);
    }
}
