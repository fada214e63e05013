use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or querying a recipe file
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The recipe file does not follow the section format
    #[error("Format error on line {line} ({content:?}): {reason}")]
    FormatError {
        line: usize,
        content: String,
        reason: FormatErrorKind,
    },

    /// The recipe file could not be read or written
    #[error("Storage error for {}: {source}", .path.display())]
    StorageError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Index outside the current collection
    #[error("Index {index} is out of range for {len} recipes")]
    IndexError { index: usize, len: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Bad command-line usage
    #[error("Usage error: {0}")]
    UsageError(String),
}

/// The format rule a line broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// A data line before the first `[Recept]` marker
    DataBeforeRecord,
    /// An ingredient line without exactly three `;`-separated fields
    MalformedIngredient { fields: usize },
    /// A second name line inside one record
    UnexpectedNameLine,
    /// `[Ingredienser]` reached before the record had a name
    MissingName,
    /// A section marker outside its place in the record
    MisplacedSection { marker: &'static str },
    /// A record closed before its instructions section
    IncompleteRecord,
    /// Bytes that are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::DataBeforeRecord => write!(f, "data before the first record"),
            FormatErrorKind::MalformedIngredient { fields } => write!(
                f,
                "ingredient must have 3 ';'-separated fields, found {}",
                fields
            ),
            FormatErrorKind::UnexpectedNameLine => {
                write!(f, "a recipe name must be a single line")
            }
            FormatErrorKind::MissingName => write!(f, "recipe has no name"),
            FormatErrorKind::MisplacedSection { marker } => {
                write!(f, "section {} is out of order", marker)
            }
            FormatErrorKind::IncompleteRecord => {
                write!(f, "record ends before its instructions section")
            }
            FormatErrorKind::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl RecipeError {
    pub(crate) fn format(line: usize, content: &str, reason: FormatErrorKind) -> Self {
        RecipeError::FormatError {
            line,
            content: content.to_string(),
            reason,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecipeError::StorageError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
