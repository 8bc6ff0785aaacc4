//! Memoized date header lookups.

use std::str;

use crate::date::{DateParser, HttpDateParser, Timestamp};
use crate::header::{
    EpochHeader, HeaderList, HeaderSource, Invalidation, DATE, DATE_EPOCH, EPOCH_HEADERS, EXPIRES,
    EXPIRES_EPOCH, LAST_MODIFIED, LAST_MODIFIED_EPOCH,
};
use crate::{Error, Result};

/// Reads `Date`, `Expires` and `Last-Modified`, caching each parsed value in
/// an epoch header next to it.
///
/// The first lookup of a kind parses the primary header and appends its
/// epoch header. Later lookups decode the epoch header and never parse
/// again, even when the first attempt found nothing usable.
///
/// `DateHeaderCache` holds no state besides its parser. The header
/// collections passed to it are mutated, so concurrent use of a single
/// collection has to be serialized by the caller.
///
/// # Example
///
/// ```
/// use epoch_headers::DateHeaderCache;
/// use http::header::{HeaderMap, HeaderValue, DATE};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(DATE, HeaderValue::from_static("Sun, 06 Nov 1994 08:49:37 GMT"));
///
/// let cache = DateHeaderCache::new();
/// let date = cache.get_date(&mut headers)?;
/// assert_eq!(date.map(|ts| ts.as_millis()), Some(784_111_777_000));
/// assert_eq!(headers["date-epoch"], "784111777000");
/// # Ok::<(), epoch_headers::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DateHeaderCache<P = HttpDateParser> {
    parser: P,
}

/// What an epoch header says about its primary header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cached {
    /// No epoch header yet.
    Uncached,
    /// The primary header parsed to this value.
    Present(Timestamp),
    /// The primary header is missing or malformed.
    Absent,
}

impl Cached {
    /// Decode the first `epoch_name` header of `source`.
    fn read<S: HeaderSource + ?Sized>(source: &S, epoch_name: &str) -> Result<Cached> {
        let raw = match source.first_header(epoch_name) {
            Some(raw) => raw,
            None => return Ok(Cached::Uncached),
        };
        if raw.is_empty() {
            return Ok(Cached::Absent);
        }
        let text = str::from_utf8(raw).map_err(|e| corrupt(epoch_name, e))?;
        text.parse::<i64>()
            .map(|millis| Cached::Present(Timestamp::from_millis(millis)))
            .map_err(|e| corrupt(epoch_name, e))
    }

    fn value(self) -> Option<Timestamp> {
        match self {
            Cached::Present(ts) => Some(ts),
            Cached::Uncached | Cached::Absent => None,
        }
    }
}

/// Append the outcome of parsing a primary header as an `epoch_name` header.
fn write_epoch<S: HeaderSource + ?Sized>(
    source: &mut S,
    epoch_name: &str,
    value: Option<Timestamp>,
) -> Result<()> {
    match value {
        Some(ts) => {
            let mut buf = itoa::Buffer::new();
            source.append(epoch_name, buf.format(ts.as_millis()))
        }
        None => source.append(epoch_name, ""),
    }
}

fn corrupt<E>(epoch_name: &str, cause: E) -> Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    warn!("corrupt epoch header {:?}", epoch_name);
    Error::new_corrupt_epoch(epoch_name, cause)
}

impl DateHeaderCache {
    /// Create a cache using the default HTTP-date parser.
    pub fn new() -> DateHeaderCache {
        DateHeaderCache::with_parser(HttpDateParser)
    }
}

impl<P: DateParser> DateHeaderCache<P> {
    /// Create a cache parsing dates with `parser`.
    pub fn with_parser(parser: P) -> DateHeaderCache<P> {
        DateHeaderCache { parser }
    }

    /// Get a reference to the parser.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// The `Date` of `source`, parsed at most once.
    pub fn get_date<S: HeaderSource + ?Sized>(&self, source: &mut S) -> Result<Option<Timestamp>> {
        self.resolve(source, DATE, DATE_EPOCH)
    }

    /// The `Expires` of `source`, parsed at most once.
    pub fn get_expires<S: HeaderSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<Timestamp>> {
        self.resolve(source, EXPIRES, EXPIRES_EPOCH)
    }

    /// The `Last-Modified` of `source`, parsed at most once.
    pub fn get_last_modified<S: HeaderSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<Timestamp>> {
        self.resolve(source, LAST_MODIFIED, LAST_MODIFIED_EPOCH)
    }

    /// Resolve the date in `header_name`, cached under `epoch_name`.
    ///
    /// An existing `epoch_name` header is decoded and returned as is: empty
    /// means there is no date. Otherwise `header_name` is parsed, and the
    /// outcome appended as a new `epoch_name` header, whether or not a date
    /// was found.
    ///
    /// # Errors
    ///
    /// Fails if the existing epoch header holds something other than an
    /// integer, or if the outcome can't be stored in `source`. A missing or
    /// malformed `header_name` is not an error, it resolves to `None`.
    pub fn resolve<S: HeaderSource + ?Sized>(
        &self,
        source: &mut S,
        header_name: &str,
        epoch_name: &str,
    ) -> Result<Option<Timestamp>> {
        match Cached::read(&*source, epoch_name)? {
            Cached::Uncached => {
                trace!("epoch header miss: {}", epoch_name);
                let value = self.parse_header(&*source, header_name);
                write_epoch(source, epoch_name, value)?;
                Ok(value)
            }
            hit => {
                trace!("epoch header hit: {}", epoch_name);
                Ok(hit.value())
            }
        }
    }

    /// Derive `epoch_name` from `header_name` again, ignoring any epoch
    /// header already present.
    ///
    /// Every `epoch_name` header is removed first, so exactly one remains
    /// afterwards, reflecting the current value of `header_name`.
    pub fn recompute<S: HeaderSource + ?Sized>(
        &self,
        source: &mut S,
        header_name: &str,
        epoch_name: &str,
    ) -> Result<Option<Timestamp>> {
        source.remove_all(epoch_name);
        let value = self.parse_header(&*source, header_name);
        write_epoch(source, epoch_name, value)?;
        Ok(value)
    }

    /// Make sure all epoch headers exist, before `source` is stored or sent
    /// somewhere that only reads them.
    ///
    /// Sources that trust existing epoch headers only fill in missing ones.
    /// Sources whose policy is [`Invalidation::Recompute`] have every epoch
    /// header rewritten.
    pub fn ensure_populated<S: HeaderSource + ?Sized>(&self, source: &mut S) -> Result<()> {
        for header in EPOCH_HEADERS.iter() {
            match S::INVALIDATION {
                Invalidation::TrustExisting => {
                    self.resolve(source, header.name(), header.epoch_name())?;
                }
                Invalidation::Recompute => {
                    self.recompute(source, header.name(), header.epoch_name())?;
                }
            }
        }
        Ok(())
    }

    /// Copy `headers` into a `HeaderList` with freshly computed epoch headers.
    ///
    /// Epoch headers already in `headers` are replaced, so the list is ready
    /// for [`read_cached`](DateHeaderCache::read_cached).
    pub fn materialize(&self, headers: &http::HeaderMap) -> Result<HeaderList> {
        let mut list = HeaderList::from_header_map(headers);
        for header in EPOCH_HEADERS.iter() {
            self.recompute(&mut list, header.name(), header.epoch_name())?;
        }
        Ok(list)
    }

    fn parse_header<S: HeaderSource + ?Sized>(
        &self,
        source: &S,
        header_name: &str,
    ) -> Option<Timestamp> {
        let raw = source.first_header(header_name)?;
        let parsed = match str::from_utf8(raw) {
            Ok(text) => self.parser.parse(text).map_err(|_e| {
                debug!("failed to parse {} header: {}", header_name, _e);
            }),
            Err(_) => {
                debug!("{} header is not utf-8", header_name);
                Err(())
            }
        };
        parsed.ok()
    }
}

impl<P> DateHeaderCache<P> {
    /// Decode `epoch_name` from a list whose epoch headers were populated
    /// when it was built.
    ///
    /// Nothing is parsed here.
    ///
    /// # Errors
    ///
    /// A missing or undecodable epoch header means the list didn't come
    /// through [`recompute`](DateHeaderCache::recompute) or
    /// [`ensure_populated`](DateHeaderCache::ensure_populated), and fails
    /// instead of falling back to parsing.
    pub fn read_cached(&self, headers: &HeaderList, epoch_name: &str) -> Result<Option<Timestamp>> {
        match Cached::read(headers, epoch_name)? {
            Cached::Uncached => {
                warn!("epoch header missing from populated list: {}", epoch_name);
                Err(Error::new_missing_epoch(epoch_name))
            }
            cached => Ok(cached.value()),
        }
    }

    /// The cached `Date` of a populated list.
    pub fn cached_date(&self, headers: &HeaderList) -> Result<Option<Timestamp>> {
        self.read_cached(headers, EpochHeader::DATE.epoch_name())
    }

    /// The cached `Expires` of a populated list.
    pub fn cached_expires(&self, headers: &HeaderList) -> Result<Option<Timestamp>> {
        self.read_cached(headers, EpochHeader::EXPIRES.epoch_name())
    }

    /// The cached `Last-Modified` of a populated list.
    pub fn cached_last_modified(&self, headers: &HeaderList) -> Result<Option<Timestamp>> {
        self.read_cached(headers, EpochHeader::LAST_MODIFIED.epoch_name())
    }
}
