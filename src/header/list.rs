use std::iter::FromIterator;
use std::slice;

use http::header::HeaderMap;

use super::{eq_ascii, HeaderSource, Invalidation};
use crate::Result;

/// A single header, as kept in a [`HeaderList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    name: String,
    value: Vec<u8>,
}

impl HeaderEntry {
    /// Create a new entry.
    pub fn new<N: Into<String>, V: Into<Vec<u8>>>(name: N, value: V) -> HeaderEntry {
        HeaderEntry {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The header name, in the casing it was stored with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header value, exactly as it was received.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The header value, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// Whether this entry is named `name`, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        eq_ascii(&self.name, name)
    }
}

impl<N: Into<String>, V: Into<Vec<u8>>> From<(N, V)> for HeaderEntry {
    fn from((name, value): (N, V)) -> HeaderEntry {
        HeaderEntry::new(name, value)
    }
}

/// An ordered sequence of headers, as stored with a cached response.
///
/// Unlike a `HeaderMap`, entries keep their insertion order and original
/// casing, and any number of them may share a name. Lookups and removals
/// scan the list comparing names case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<HeaderEntry>,
}

impl HeaderList {
    /// Create an empty list.
    pub fn new() -> HeaderList {
        HeaderList::default()
    }

    /// Copy every header of a `HeaderMap` into a list, in iteration order.
    pub fn from_header_map(headers: &HeaderMap) -> HeaderList {
        headers
            .iter()
            .map(|(name, value)| HeaderEntry::new(name.as_str(), value.as_bytes()))
            .collect()
    }

    /// Add an entry to the end.
    pub fn push(&mut self, entry: HeaderEntry) {
        self.entries.push(entry);
    }

    /// The first entry named `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries.iter().find(|entry| entry.is(name))
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> slice::Iter<'_, HeaderEntry> {
        self.entries.iter()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unwrap the underlying entries.
    pub fn into_vec(self) -> Vec<HeaderEntry> {
        self.entries
    }
}

impl HeaderSource for HeaderList {
    const INVALIDATION: Invalidation = Invalidation::Recompute;

    fn first_header(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(HeaderEntry::value)
    }

    fn append(&mut self, name: &str, value: &str) -> Result<()> {
        self.push(HeaderEntry::new(name, value));
        Ok(())
    }

    fn remove_all(&mut self, name: &str) {
        self.entries.retain(|entry| !entry.is(name));
    }
}

impl From<Vec<HeaderEntry>> for HeaderList {
    fn from(entries: Vec<HeaderEntry>) -> HeaderList {
        HeaderList { entries }
    }
}

impl<E: Into<HeaderEntry>> FromIterator<E> for HeaderList {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> HeaderList {
        HeaderList {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<E: Into<HeaderEntry>> Extend<E> for HeaderList {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a HeaderEntry;
    type IntoIter = slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for HeaderList {
    type Item = HeaderEntry;
    type IntoIter = std::vec::IntoIter<HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
