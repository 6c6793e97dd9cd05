//! Contains the [`Readtable`] dispatch table and the extension seam macro authors register custom
//! lexical syntax through.

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::{char_stream::CharStream, error::Error, reader::Reader, token::Token};

/// Is a behavior registered for a dispatch character.
///
/// An action may consume any number of characters from the stream and either produces a token or
/// nothing (for skipped categories such as whitespace). Actions are shared read-only, so they must
/// be [`Send`] and [`Sync`]; any per-invocation state lives on the reader or the stream.
pub trait Action: Send + Sync {
    /// Invokes the action on the given reader and stream.
    ///
    /// # Errors
    /// Any [`Error`] returned here aborts the current read and surfaces to the caller of
    /// [`Reader::read`].
    fn invoke(&self, reader: &mut Reader, stream: &mut CharStream)
        -> Result<Option<Token>, Error>;
}

/// Is an opaque record pairing a dispatch key with its [`Action`].
#[derive(Clone)]
pub struct Entry {
    action: Arc<dyn Action>,
}

impl Entry {
    /// Creates a new entry wrapping the given action.
    #[must_use]
    pub fn new(action: Arc<dyn Action>) -> Self { Self { action } }

    /// Gets the action of the entry.
    #[must_use]
    pub fn action(&self) -> &Arc<dyn Action> { &self.action }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry").finish_non_exhaustive()
    }
}

/// Is a mapping from dispatch characters to [`Entry`]s, with an optional fallback entry for the
/// characters no explicit key covers.
///
/// A readtable is never mutated in place: [`Readtable::with_entry`] and
/// [`Readtable::with_default_entry`] return a new table with one binding overridden, so a table
/// already handed to readers can be shared read-only (including across threads) while extended
/// copies are layered on top of it.
#[derive(Debug, Clone, Default)]
pub struct Readtable {
    entries: HashMap<char, Entry>,
    default_entry: Option<Entry>,
}

impl Readtable {
    /// Creates an empty readtable with no entries and no fallback.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Gets the entry registered for `key`, falling back to the default entry.
    ///
    /// Returns [`None`] when neither exists; the reader reports that as a
    /// [`crate::error::NoReadtableEntry`] failure.
    #[must_use]
    pub fn get_entry(&self, key: char) -> Option<&Entry> {
        self.entries.get(&key).or(self.default_entry.as_ref())
    }

    /// Returns a new table identical to this one except for the entry registered at `key`.
    #[must_use]
    pub fn with_entry(&self, key: char, entry: Entry) -> Self {
        let mut table = self.clone();
        table.entries.insert(key, entry);
        table
    }

    /// Returns a new table identical to this one except for the fallback entry.
    #[must_use]
    pub fn with_default_entry(&self, entry: Entry) -> Self {
        let mut table = self.clone();
        table.default_entry = Some(entry);
        table
    }
}
