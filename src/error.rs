use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("spreadsheet {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read spreadsheet {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {} has no worksheet {sheet}", path.display())]
    MissingSheet { path: PathBuf, sheet: String },

    #[error("column '{0}' does not exist in the spreadsheet")]
    MissingColumn(String),

    #[error("no rows for well {0}")]
    EmptyEntity(String),

    #[error("selection '{0}' is not a number")]
    SelectionNotANumber(String),

    #[error("selection {choice} is outside 1..={len}")]
    SelectionOutOfRange { choice: String, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("embedding provider returned {got} vectors for {expected} inputs")]
    EmbeddingCount { expected: usize, got: usize },

    #[error("embedding dimension {got} does not match collection dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Message shown to the user before a controlled exit, for the errors
    /// caused by bad input rather than bad data or a failing dependency.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::MissingFile(path) => Some(format!(
                "El archivo {} no existe. Verifica la ruta.",
                path.display()
            )),
            Error::SelectionNotANumber(_) => {
                Some("Entrada inválida. Debes ingresar un número.".to_string())
            }
            Error::SelectionOutOfRange { .. } => Some("Selección inválida.".to_string()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_user_message_only_for_input_errors() {
        let missing = Error::MissingFile("datos.xlsx".into());
        assert_eq!(
            missing.user_message().unwrap(),
            "El archivo datos.xlsx no existe. Verifica la ruta."
        );
        assert!(Error::SelectionOutOfRange {
            choice: "0".into(),
            len: 2
        }
            .user_message()
            .is_some());
        assert!(Error::MissingColumn("well_legal_name".into())
            .user_message()
            .is_none());
        assert!(Error::EmptyEntity("A".into()).user_message().is_none());
    }
}
