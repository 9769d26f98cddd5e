//! Behavioral flags attached to a data source at construction.

use std::fmt;

bitflags::bitflags! {
    /// The modifier set of a data source.
    ///
    /// Fixed before first use. `HTTP`/`HTTPS` sources must also carry
    /// `READ_ONLY`; [`Locator`](crate::Locator) adds it when parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const READ_ONLY = 0b0000_0001;
        const HTTP = 0b0000_0010;
        const HTTPS = 0b0000_0100;
        /// Re-read the backing resource before every operation.
        const TRANSIENT = 0b0000_1000;
        /// Ask the format for human-indented output.
        const PRETTY_PRINT = 0b0001_0000;
    }
}

impl Modifiers {
    /// Whether the source resolves to a remote resource.
    pub fn is_remote(&self) -> bool {
        self.intersects(Modifiers::HTTP | Modifiers::HTTPS)
    }

    /// Look up a modifier by its locator name, ignoring case.
    pub fn from_locator_name(name: &str) -> Option<Modifiers> {
        match name.to_ascii_lowercase().as_str() {
            "readonly" => Some(Modifiers::READ_ONLY),
            "http" => Some(Modifiers::HTTP),
            "https" => Some(Modifiers::HTTPS),
            "transient" => Some(Modifiers::TRANSIENT),
            "prettyprint" => Some(Modifiers::PRETTY_PRINT),
            _ => None,
        }
    }

    fn names(&self) -> Vec<&'static str> {
        [
            (Modifiers::READ_ONLY, "readonly"),
            (Modifiers::HTTP, "http"),
            (Modifiers::HTTPS, "https"),
            (Modifiers::TRANSIENT, "transient"),
            (Modifiers::PRETTY_PRINT, "prettyprint"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

/// Renders in locator prefix form, e.g. `readonly:http`.
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(":"))
    }
}
