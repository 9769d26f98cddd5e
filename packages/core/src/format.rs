//! The serialization format extension point.

use crate::model::Model;

/// Failure turning raw text into a model or back.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unexpected document shape: {message}")]
    Shape { message: String },

    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A concrete serialization format for string-backed data sources.
///
/// Implementations must satisfy the round-trip law: feeding the output of
/// `render` back into `parse` yields a model with the same key paths and
/// values.
///
/// # Example
///
/// ```rust
/// use persistence_core::{Format, FormatError, KeyPath, TreeModel};
///
/// /// One `key value` pair per line.
/// struct Lines;
///
/// impl Format for Lines {
///     type Model = TreeModel;
///
///     fn parse(&self, raw: &str) -> Result<TreeModel, FormatError> {
///         let mut model = TreeModel::new();
///         for (i, line) in raw.lines().enumerate() {
///             let (k, v) = line.split_once(' ').ok_or(FormatError::Syntax {
///                 line: i + 1,
///                 message: "missing value".to_string(),
///             })?;
///             let key = KeyPath::parse(k).map_err(|e| FormatError::Other(e.into()))?;
///             model.insert(key, v);
///         }
///         Ok(model)
///     }
///
///     fn render(&self, model: &TreeModel) -> Result<String, FormatError> {
///         Ok(model.iter().map(|(k, v)| format!("{} {}\n", k, v)).collect())
///     }
/// }
///
/// let model = Lines.parse("a.b 1\n").unwrap();
/// assert_eq!(Lines.render(&model).unwrap(), "a.b 1\n");
/// ```
pub trait Format: Send + Sync {
    type Model: Model;

    fn parse(&self, raw: &str) -> Result<Self::Model, FormatError>;

    fn render(&self, model: &Self::Model) -> Result<String, FormatError>;

    /// The document written when bootstrapping a missing file.
    fn blank(&self) -> String {
        String::new()
    }
}

impl<F: Format + ?Sized> Format for Box<F> {
    type Model = F::Model;

    fn parse(&self, raw: &str) -> Result<Self::Model, FormatError> {
        self.as_ref().parse(raw)
    }

    fn render(&self, model: &Self::Model) -> Result<String, FormatError> {
        self.as_ref().render(model)
    }

    fn blank(&self) -> String {
        self.as_ref().blank()
    }
}
