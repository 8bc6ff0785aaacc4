//! Header names and the collections epoch headers live in.
//!
//! A date-valued *primary* header (`Date`, `Expires`, `Last-Modified`) is
//! paired with an *epoch* sidecar header that caches its parsed value as
//! milliseconds since the Unix epoch. The sidecar value is either a decimal
//! integer, or the empty string when the primary header was missing or could
//! not be parsed.
//!
//! Epoch headers are read and written through a [`HeaderSource`], implemented
//! here for `http::HeaderMap` and `http::Response`, and for the ordered
//! [`HeaderList`] used by stored records.

use crate::Result;

pub use self::list::{HeaderEntry, HeaderList};

mod list;
mod map;

/// `Date`
pub const DATE: &str = "Date";
/// `Expires`
pub const EXPIRES: &str = "Expires";
/// `Last-Modified`
pub const LAST_MODIFIED: &str = "Last-Modified";

/// `Date-Epoch`
pub const DATE_EPOCH: &str = "Date-Epoch";
/// `Expires-Epoch`
pub const EXPIRES_EPOCH: &str = "Expires-Epoch";
/// `Last-Modified-Epoch`
pub const LAST_MODIFIED_EPOCH: &str = "Last-Modified-Epoch";

/// How many kinds of epoch header exist.
pub const NUMBER_OF_EPOCH_HEADERS: usize = 3;

/// Every primary header paired with its epoch header.
pub const EPOCH_HEADERS: [EpochHeader; NUMBER_OF_EPOCH_HEADERS] = [
    EpochHeader::DATE,
    EpochHeader::EXPIRES,
    EpochHeader::LAST_MODIFIED,
];

/// A date-valued header and the epoch header caching its parsed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EpochHeader {
    name: &'static str,
    epoch_name: &'static str,
}

impl EpochHeader {
    /// `Date` / `Date-Epoch`
    pub const DATE: EpochHeader = EpochHeader {
        name: DATE,
        epoch_name: DATE_EPOCH,
    };

    /// `Expires` / `Expires-Epoch`
    pub const EXPIRES: EpochHeader = EpochHeader {
        name: EXPIRES,
        epoch_name: EXPIRES_EPOCH,
    };

    /// `Last-Modified` / `Last-Modified-Epoch`
    pub const LAST_MODIFIED: EpochHeader = EpochHeader {
        name: LAST_MODIFIED,
        epoch_name: LAST_MODIFIED_EPOCH,
    };

    /// The primary header name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The epoch header name.
    pub const fn epoch_name(&self) -> &'static str {
        self.epoch_name
    }
}

/// When an existing epoch header is believed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invalidation {
    /// An epoch header, once written, is authoritative.
    ///
    /// Used by message headers, which are inspected during a single
    /// request/response lifecycle and don't have their primary headers
    /// replaced underneath the sidecars.
    TrustExisting,
    /// Epoch headers are stripped and derived again whenever the collection
    /// is populated.
    ///
    /// Used by stored header lists, which get rebuilt when a record is
    /// updated and may carry sidecars computed from older primary values.
    Recompute,
}

/// A collection of headers that epoch headers can be cached in.
///
/// Header names are compared case-insensitively. Where a name appears more
/// than once, lookups see the first entry.
pub trait HeaderSource {
    /// The invalidation policy `DateHeaderCache::ensure_populated` applies.
    const INVALIDATION: Invalidation;

    /// The value of the first header named `name`.
    fn first_header(&self, name: &str) -> Option<&[u8]>;

    /// Add a header after any existing ones, without checking for duplicates.
    fn append(&mut self, name: &str, value: &str) -> Result<()>;

    /// Remove every header named `name`.
    fn remove_all(&mut self, name: &str);
}

impl<'a, S: HeaderSource + ?Sized> HeaderSource for &'a mut S {
    const INVALIDATION: Invalidation = S::INVALIDATION;

    fn first_header(&self, name: &str) -> Option<&[u8]> {
        (**self).first_header(name)
    }

    fn append(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).append(name, value)
    }

    fn remove_all(&mut self, name: &str) {
        (**self).remove_all(name)
    }
}

pub(crate) fn eq_ascii(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_headers_cover_every_kind() {
        assert_eq!(EPOCH_HEADERS.len(), NUMBER_OF_EPOCH_HEADERS);
        for header in EPOCH_HEADERS.iter() {
            assert_eq!(header.epoch_name(), format!("{}-Epoch", header.name()));
        }
    }

    #[test]
    fn eq_ascii_ignores_case() {
        assert!(eq_ascii("last-modified-epoch", LAST_MODIFIED_EPOCH));
        assert!(eq_ascii("DATE", DATE));
        assert!(!eq_ascii("Date", DATE_EPOCH));
    }
}
