//! The commands `persist` understands.

use clap::Subcommand;

use persistence_core::{KeyPath, Store};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Source(#[from] persistence_core::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] persistence_http::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(#[from] persistence_core::KeyPathError),

    #[error("No value at {0}")]
    Missing(KeyPath),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Source(e) if e.is_read_only() => 2,
            _ => 1,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the value stored at KEY
    Get { key: String },
    /// Store VALUE at KEY
    Set { key: String, value: String },
    /// Remove KEY
    Unset { key: String },
    /// List every stored key
    Keys,
}

fn change_word(changed: bool) -> String {
    let word = if changed { "changed" } else { "unchanged" };
    word.to_string()
}

/// Run `command` against `store`, returning the text to print.
pub fn execute(store: &mut dyn Store, command: &Command) -> Result<String, CliError> {
    match command {
        Command::Get { key } => {
            let key = KeyPath::parse(key)?;
            match store.get(&key)? {
                Some(value) => Ok(value),
                None => Err(CliError::Missing(key)),
            }
        }
        Command::Set { key, value } => {
            let changed = store.set(&KeyPath::parse(key)?, Some(value))?;
            Ok(change_word(changed))
        }
        Command::Unset { key } => {
            let changed = store.set(&KeyPath::parse(key)?, None)?;
            Ok(change_word(changed))
        }
        Command::Keys => Ok(store
            .key_paths()?
            .iter()
            .map(KeyPath::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence_core::{Locator, SourceOptions};

    fn store_in(dir: &tempfile::TempDir, locator: &str) -> Box<dyn Store> {
        persistence_formats::connect(
            &Locator::parse(locator).unwrap(),
            &SourceOptions::with_root(dir.path()),
            None,
        )
        .unwrap()
    }

    fn set(key: &str, value: &str) -> Command {
        Command::Set {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn set_get_keys_unset() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, "json://data.json");

        assert_eq!(execute(store.as_mut(), &set("b.c", "2")).unwrap(), "changed");
        assert_eq!(execute(store.as_mut(), &set("a", "1")).unwrap(), "changed");
        assert_eq!(execute(store.as_mut(), &set("a", "1")).unwrap(), "unchanged");

        let get = Command::Get {
            key: "b.c".to_string(),
        };
        assert_eq!(execute(store.as_mut(), &get).unwrap(), "2");
        assert_eq!(execute(store.as_mut(), &Command::Keys).unwrap(), "a\nb.c");

        let unset = Command::Unset {
            key: "a".to_string(),
        };
        assert_eq!(execute(store.as_mut(), &unset).unwrap(), "changed");
        assert_eq!(execute(store.as_mut(), &unset).unwrap(), "unchanged");
    }

    #[test]
    fn missing_value_and_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, "ini://data.ini");

        let err = execute(
            store.as_mut(),
            &Command::Get {
                key: "nothing".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Missing(_)));
        assert_eq!(err.exit_code(), 1);

        let err = execute(store.as_mut(), &set("a..b", "x")).unwrap_err();
        assert!(matches!(err, CliError::InvalidKey(_)));
    }

    #[test]
    fn read_only_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, "readonly:ini://data.ini");

        let err = execute(store.as_mut(), &set("a", "1")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
