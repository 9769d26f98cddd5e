//! Caller-facing traits: Reader, Writer, Store.

use crate::{Error, KeyPath};

/// Read values by key path.
///
/// Reads take `&mut self` because the first read may populate the source.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Reader>`.
pub trait Reader: Send + Sync {
    /// Read the value at `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored at the key.
    /// * `Ok(Some(value))` - The stored value.
    /// * `Err(Error)` - The source could not be populated.
    fn get(&mut self, key: &KeyPath) -> Result<Option<String>, Error>;

    /// All key paths currently stored.
    fn key_paths(&mut self) -> Result<Vec<KeyPath>, Error>;
}

/// Write values by key path.
pub trait Writer: Send + Sync {
    /// Store `value` at `key`, or remove the key when `value` is `None`.
    ///
    /// Returns `Ok(false)` without touching the backing resource when the
    /// stored value already equals `value`.
    fn set(&mut self, key: &KeyPath, value: Option<&str>) -> Result<bool, Error>;
}

/// Combined read/write.
pub trait Store: Reader + Writer {}
impl<T: Reader + Writer> Store for T {}

impl<T: Reader + ?Sized> Reader for &mut T {
    fn get(&mut self, key: &KeyPath) -> Result<Option<String>, Error> {
        (*self).get(key)
    }

    fn key_paths(&mut self) -> Result<Vec<KeyPath>, Error> {
        (*self).key_paths()
    }
}

impl<T: Writer + ?Sized> Writer for &mut T {
    fn set(&mut self, key: &KeyPath, value: Option<&str>) -> Result<bool, Error> {
        (*self).set(key, value)
    }
}

impl<T: Reader + ?Sized> Reader for Box<T> {
    fn get(&mut self, key: &KeyPath) -> Result<Option<String>, Error> {
        self.as_mut().get(key)
    }

    fn key_paths(&mut self) -> Result<Vec<KeyPath>, Error> {
        self.as_mut().key_paths()
    }
}

impl<T: Writer + ?Sized> Writer for Box<T> {
    fn set(&mut self, key: &KeyPath, value: Option<&str>) -> Result<bool, Error> {
        self.as_mut().set(key, value)
    }
}
