//! Error and Result module.
use std::error::Error as StdError;
use std::fmt;

/// Result type often returned from methods that can have epoch-headers `Error`s.
pub type Result<T> = std::result::Result<T, Error>;

type Cause = Box<dyn StdError + Send + Sync>;

/// Represents errors that can occur reading or writing epoch headers.
///
/// A primary header that is missing or fails to parse is never an error; it
/// resolves to "no value". An `Error` means the sidecar headers this crate
/// owns were found in a state it never writes.
pub struct Error {
    inner: Box<ErrorImpl>,
}

struct ErrorImpl {
    kind: Kind,
    header: Option<Box<str>>,
    cause: Option<Cause>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Kind {
    /// A sidecar value was neither empty nor a decimal integer.
    CorruptEpoch,
    /// A sidecar was expected to be populated already, but wasn't.
    MissingEpoch,
    /// An adapter could not represent a header name or value.
    InvalidHeader,
}

impl Error {
    /// Returns true if a stored epoch value could not be decoded.
    pub fn is_corrupt_epoch(&self) -> bool {
        self.inner.kind == Kind::CorruptEpoch
    }

    /// Returns true if an epoch header was missing where it had to exist.
    pub fn is_missing_epoch(&self) -> bool {
        self.inner.kind == Kind::MissingEpoch
    }

    /// Returns true if a header name or value was rejected by the collection.
    pub fn is_invalid_header(&self) -> bool {
        self.inner.kind == Kind::InvalidHeader
    }

    /// The name of the header this error is about, if known.
    pub fn header_name(&self) -> Option<&str> {
        self.inner.header.as_deref()
    }

    /// Consumes the error, returning its cause.
    pub fn into_cause(self) -> Option<Box<dyn StdError + Sync + Send>> {
        self.inner.cause
    }

    pub(crate) fn new(kind: Kind, header: &str, cause: Option<Cause>) -> Error {
        Error {
            inner: Box::new(ErrorImpl {
                kind,
                header: Some(header.into()),
                cause,
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    pub(crate) fn new_corrupt_epoch<E: Into<Cause>>(header: &str, cause: E) -> Error {
        Error::new(Kind::CorruptEpoch, header, Some(cause.into()))
    }

    pub(crate) fn new_missing_epoch(header: &str) -> Error {
        Error::new(Kind::MissingEpoch, header, None)
    }

    pub(crate) fn new_invalid_header<E: Into<Cause>>(header: &str, cause: E) -> Error {
        Error::new(Kind::InvalidHeader, header, Some(cause.into()))
    }

    fn description(&self) -> &str {
        match self.inner.kind {
            Kind::CorruptEpoch => "epoch header holds an undecodable value",
            Kind::MissingEpoch => "epoch header was expected but not present",
            Kind::InvalidHeader => "invalid header name or value",
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Error");
        f.field("kind", &self.inner.kind);
        if let Some(ref header) = self.inner.header {
            f.field("header", header);
        }
        if let Some(ref cause) = self.inner.cause {
            f.field("cause", cause);
        }
        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())?;
        if let Some(ref header) = self.inner.header {
            write!(f, " ({})", header)?;
        }
        if let Some(ref cause) = self.inner.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| &**cause as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::mem;

    use super::*;

    #[test]
    fn error_size_of() {
        assert_eq!(mem::size_of::<Error>(), mem::size_of::<usize>());
    }

    #[test]
    fn corrupt_epoch_keeps_cause() {
        let cause = "abc".parse::<i64>().unwrap_err();
        let err = Error::new_corrupt_epoch("Date-Epoch", cause);
        assert!(err.is_corrupt_epoch());
        assert!(!err.is_missing_epoch());
        assert_eq!(err.header_name(), Some("Date-Epoch"));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "epoch header holds an undecodable value (Date-Epoch): invalid digit found in string"
        );
    }

    #[test]
    fn missing_epoch_has_no_cause() {
        let err = Error::new_missing_epoch("Expires-Epoch");
        assert_eq!(*err.kind(), Kind::MissingEpoch);
        assert!(err.source().is_none());
        assert!(err.into_cause().is_none());
    }
}
