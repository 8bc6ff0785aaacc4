#![doc(html_root_url = "https://docs.rs/epoch-headers/0.1.0")]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

//! # epoch-headers
//!
//! Cache freshness checks look at `Date`, `Expires` and `Last-Modified` over
//! and over for the same response. This crate parses each of them once, and
//! remembers the outcome in an *epoch header* stored with the other headers:
//! `Date-Epoch`, `Expires-Epoch` and `Last-Modified-Epoch` hold milliseconds
//! since the Unix epoch, or an empty value when there was no usable date.
//!
//! The [`DateHeaderCache`] works with any [`HeaderSource`]:
//!
//! - `http::HeaderMap` and `http::Response`, whose epoch headers are written
//!   once and trusted from then on.
//! - [`HeaderList`], the ordered form headers are stored in, whose epoch
//!   headers are recomputed whenever the list is populated.
//!
//! ## Optional Features
//!
//! - `tracing`: emit `tracing` events for cache hits, misses, and failures.
//! - `full`: enables all of the above.

#[macro_use]
mod trace;

pub use crate::cache::DateHeaderCache;
pub use crate::date::{DateParser, HttpDateParser, Timestamp};
pub use crate::error::{Error, Result};
pub use crate::header::{
    EpochHeader, HeaderEntry, HeaderList, HeaderSource, Invalidation, EPOCH_HEADERS,
    NUMBER_OF_EPOCH_HEADERS,
};

mod cache;
mod date;
pub mod error;
pub mod header;
