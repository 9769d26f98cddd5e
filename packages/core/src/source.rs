//! String-serialized data sources.
//!
//! A [`StringDataSource`] keeps a whole document in memory as a model and
//! writes the entire document back on every change. Its lifecycle is two
//! explicit state machines, each advanced at most once (unless the source is
//! `TRANSIENT`, which drops the model before every operation):
//!
//! ```text
//! Unresolved --resolve--> Resolved(Target)
//! Unpopulated --load+parse--> Populated(Model)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result, Stage};
use crate::fetch::Fetch;
use crate::format::Format;
use crate::loader;
use crate::model::Model;
use crate::target::{self, Target};
use crate::traits::{Reader, Writer};
use crate::{KeyPath, Locator, Modifiers, SourceOptions};

#[derive(Debug)]
enum Resolution {
    Unresolved,
    Resolved(Target),
}

#[derive(Debug)]
enum Population<M> {
    Unpopulated,
    Populated(M),
}

/// A data source whose backing resource holds the model as one string.
///
/// # Example
///
/// ```rust,ignore
/// use persistence_core::{key, Locator, SourceOptions, StringDataSource};
/// use persistence_formats::IniFormat;
///
/// let locator = Locator::parse("ini://settings.ini")?;
/// let mut source = StringDataSource::new(locator, IniFormat, &SourceOptions::default());
///
/// source.set(&key!("server.motd"), Some("hello"))?;
/// assert_eq!(source.get(&key!("server.motd"))?.as_deref(), Some("hello"));
/// ```
pub struct StringDataSource<F: Format> {
    locator: Locator,
    uri: String,
    root: PathBuf,
    format: F,
    fetcher: Option<Arc<dyn Fetch>>,
    resolution: Resolution,
    population: Population<F::Model>,
}

impl<F: Format> StringDataSource<F> {
    /// Create a data source. Nothing is resolved or read until first use.
    pub fn new(locator: Locator, format: F, options: &SourceOptions) -> Self {
        StringDataSource {
            uri: locator.to_string(),
            locator,
            root: options.root.clone(),
            format,
            fetcher: None,
            resolution: Resolution::Unresolved,
            population: Population::Unpopulated,
        }
    }

    /// Use `fetcher` to read remote targets.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn modifiers(&self) -> Modifiers {
        self.locator.modifiers()
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    /// The resolved target, once resolution has happened.
    pub fn target(&self) -> Option<&Target> {
        match &self.resolution {
            Resolution::Resolved(target) => Some(target),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.population, Population::Populated(_))
    }

    /// Resolve the target if that has not happened yet.
    pub fn ensure_resolved(&mut self) -> Result<&Target> {
        if let Resolution::Unresolved = self.resolution {
            let target = target::resolve(&self.locator, &self.root)
                .map_err(|e| Error::persistence(&self.uri, Stage::Resolve, e))?;
            log::debug!("Resolved {} to {}", self.uri, target);
            self.resolution = Resolution::Resolved(target);
        }

        match &self.resolution {
            Resolution::Resolved(target) => Ok(target),
            Resolution::Unresolved => unreachable!("resolution was just performed"),
        }
    }

    /// Load and parse the model if that has not happened yet.
    ///
    /// Idempotent. A missing standalone file is created with the format's
    /// blank document.
    pub fn ensure_populated(&mut self) -> Result<()> {
        self.populated_model().map(|_| ())
    }

    fn populated_model(&mut self) -> Result<&mut F::Model> {
        if let Population::Unpopulated = self.population {
            self.ensure_resolved()?;
            let Resolution::Resolved(target) = &self.resolution else {
                unreachable!("resolution was just performed");
            };

            let format = &self.format;
            let raw = loader::load(
                &self.uri,
                target,
                || format.blank(),
                self.fetcher.as_deref(),
            )?;
            let model = format
                .parse(&raw)
                .map_err(|e| Error::persistence(&self.uri, Stage::Parse, e))?;
            self.population = Population::Populated(model);
        }

        match &mut self.population {
            Population::Populated(model) => Ok(model),
            Population::Unpopulated => unreachable!("population was just performed"),
        }
    }

    fn expire_if_transient(&mut self) {
        if self.modifiers().contains(Modifiers::TRANSIENT) {
            self.population = Population::Unpopulated;
        }
    }

    /// Read the value at `key`.
    pub fn get(&mut self, key: &KeyPath) -> Result<Option<String>> {
        self.expire_if_transient();
        Ok(self.populated_model()?.get(key).map(str::to_string))
    }

    /// All key paths in the model's enumeration order.
    pub fn key_paths(&mut self) -> Result<Vec<KeyPath>> {
        self.expire_if_transient();
        Ok(self.populated_model()?.key_paths())
    }

    /// Store `value` at `key` (or remove it for `None`) and write the whole
    /// document back.
    ///
    /// Returns `Ok(false)` without any I/O beyond population when the value
    /// is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the source resolves to a remote target but lacks
    /// `READ_ONLY`.
    pub fn set(&mut self, key: &KeyPath, value: Option<&str>) -> Result<bool> {
        if self.modifiers().contains(Modifiers::READ_ONLY) {
            log::warn!("Rejected write of {} to read only {}", key, self.uri);
            return Err(Error::ReadOnly {
                uri: self.uri.clone(),
            });
        }

        let uri = self.uri.clone();
        loader::reject_remote_sink(&uri, self.ensure_resolved()?);

        self.expire_if_transient();
        let model = self.populated_model()?;
        let old = model.get(key).map(str::to_string);
        if old.as_deref() == value {
            return Ok(false);
        }

        model.set(key, value.map(str::to_string));
        if let Err(e) = self.write_back() {
            // Keep the model in step with what is actually stored.
            if let Population::Populated(model) = &mut self.population {
                model.set(key, old);
            }
            return Err(e);
        }
        Ok(true)
    }

    fn write_back(&mut self) -> Result<()> {
        let (Resolution::Resolved(target), Population::Populated(model)) =
            (&self.resolution, &self.population)
        else {
            unreachable!("writes happen after population");
        };

        let raw = self
            .format
            .render(model)
            .map_err(|e| Error::persistence(&self.uri, Stage::Render, e))?;
        loader::store(&self.uri, target, &raw)
    }
}

impl<F: Format> Reader for StringDataSource<F> {
    fn get(&mut self, key: &KeyPath) -> Result<Option<String>> {
        StringDataSource::get(self, key)
    }

    fn key_paths(&mut self) -> Result<Vec<KeyPath>> {
        StringDataSource::key_paths(self)
    }
}

impl<F: Format> Writer for StringDataSource<F> {
    fn set(&mut self, key: &KeyPath, value: Option<&str>) -> Result<bool> {
        StringDataSource::set(self, key, value)
    }
}
