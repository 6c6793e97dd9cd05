//! Contains the [`Reader`] loop that sequences readtable dispatch over a character stream.

use getset::Getters;
use vesper_base::source_text::LocationInfo;

use crate::{
    char_stream::CharStream,
    default_readtable::default_readtable,
    error::{Error, NoReadtableEntry},
    readtable::Readtable,
    token::TokenNode,
};

/// Owns a [`Readtable`] and drives dispatch over a [`CharStream`] until exhaustion, accumulating
/// location-tagged token nodes.
///
/// A reader is exclusively owned by one reading session; the readtable it holds may be a shared
/// one, since dispatch never mutates it.
#[derive(Debug, Getters)]
pub struct Reader {
    /// Gets the readtable the reader dispatches through.
    #[get = "pub"]
    readtable: Readtable,

    location_info: Option<LocationInfo>,
}

impl Reader {
    /// Creates a new reader dispatching through the given readtable.
    #[must_use]
    pub fn new(readtable: Readtable) -> Self {
        Self {
            readtable,
            location_info: None,
        }
    }

    /// Creates a new reader dispatching through the standard lexical grammar.
    #[must_use]
    pub fn with_default_readtable() -> Self { Self::new(default_readtable().clone()) }

    /// Gets the reader's location cursor: the last observed true position of the stream.
    ///
    /// [`None`] until the first read begins.
    #[must_use]
    pub fn location_info(&self) -> Option<&LocationInfo> { self.location_info.as_ref() }

    /// Assigns the location cursor to the given values.
    ///
    /// Line-terminator entries call this after consuming their terminator sequence so that the
    /// cursor is already on the next line before the next dispatch. The update is a plain
    /// assignment of the stream's true offset/line/column values.
    pub fn update_location(&mut self, location_info: LocationInfo) {
        self.location_info = Some(location_info);
    }

    /// Reads the stream to exhaustion, returning the ordered sequence of located token nodes.
    ///
    /// Each iteration captures the location of the next unconsumed character, resolves the entry
    /// for it, and invokes the entry's action; actions that return a token contribute one node
    /// tagged with the captured location, actions that return nothing only advance the stream.
    ///
    /// The output lives in a vector local to this call, so an action building a grouped form may
    /// re-enter `read` on another stream without disturbing the outer accumulation.
    ///
    /// # Errors
    /// - [`Error::NoReadtableEntry`] - no entry nor fallback matches the next character.
    /// - Any error returned by an invoked action. No partial sequence is returned.
    pub fn read(&mut self, stream: &mut CharStream) -> Result<Vec<TokenNode>, Error> {
        let mut prefix = Vec::new();

        while let Some(key) = stream.peek() {
            let location_info = stream.location_info();
            self.update_location(location_info.clone());

            let entry = self.readtable.get_entry(key).cloned().ok_or_else(|| {
                Error::from(NoReadtableEntry {
                    location: location_info.clone(),
                    character: key,
                })
            })?;

            if let Some(token) = entry.action().invoke(self, stream)? {
                prefix.push(TokenNode::new(token, location_info));
            }
        }

        self.update_location(stream.location_info());

        Ok(prefix)
    }
}
