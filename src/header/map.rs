use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Response;

use super::{HeaderSource, Invalidation};
use crate::{Error, Result};

impl HeaderSource for HeaderMap {
    const INVALIDATION: Invalidation = Invalidation::TrustExisting;

    fn first_header(&self, name: &str) -> Option<&[u8]> {
        // `HeaderMap` normalizes `&str` keys, so lookups ignore case
        self.get(name).map(HeaderValue::as_bytes)
    }

    fn append(&mut self, name: &str, value: &str) -> Result<()> {
        let key = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::new_invalid_header(name, e))?;
        let value = HeaderValue::from_str(value).map_err(|e| Error::new_invalid_header(name, e))?;
        HeaderMap::append(self, key, value);
        Ok(())
    }

    fn remove_all(&mut self, name: &str) {
        // drops every value stored under the name
        let _ = self.remove(name);
    }
}

impl<B> HeaderSource for Response<B> {
    const INVALIDATION: Invalidation = Invalidation::TrustExisting;

    fn first_header(&self, name: &str) -> Option<&[u8]> {
        self.headers().first_header(name)
    }

    fn append(&mut self, name: &str, value: &str) -> Result<()> {
        HeaderSource::append(self.headers_mut(), name, value)
    }

    fn remove_all(&mut self, name: &str) {
        self.headers_mut().remove_all(name)
    }
}

#[cfg(test)]
mod tests {
    use http::header::{HeaderMap, HeaderValue};
    use http::Response;

    use crate::header::{HeaderSource, DATE_EPOCH};

    #[test]
    fn first_header_ignores_case() {
        let mut headers = HeaderMap::new();
        headers.insert("date-epoch", HeaderValue::from_static("1"));
        headers.append("date-epoch", HeaderValue::from_static("2"));

        assert_eq!(headers.first_header(DATE_EPOCH), Some(&b"1"[..]));
        assert_eq!(headers.first_header("DATE-EPOCH"), Some(&b"1"[..]));
        assert_eq!(headers.first_header("Expires-Epoch"), None);
    }

    #[test]
    fn append_keeps_existing_values() {
        let mut headers = HeaderMap::new();
        HeaderSource::append(&mut headers, DATE_EPOCH, "1").unwrap();
        HeaderSource::append(&mut headers, DATE_EPOCH, "").unwrap();

        let values: Vec<_> = headers.get_all("date-epoch").iter().collect();
        assert_eq!(values, ["1", ""]);
    }

    #[test]
    fn append_rejects_invalid_name() {
        let mut headers = HeaderMap::new();
        let err = HeaderSource::append(&mut headers, "Date Epoch", "1").unwrap_err();
        assert!(err.is_invalid_header());
        assert!(headers.is_empty());
    }

    #[test]
    fn remove_all_drops_every_value() {
        let mut headers = HeaderMap::new();
        headers.append("date-epoch", HeaderValue::from_static("1"));
        headers.append("date-epoch", HeaderValue::from_static("2"));
        headers.remove_all("Date-Epoch");
        assert!(headers.is_empty());
    }

    #[test]
    fn response_delegates_to_headers() {
        let mut res = Response::new(());
        HeaderSource::append(&mut res, DATE_EPOCH, "7").unwrap();
        assert_eq!(res.first_header(DATE_EPOCH), Some(&b"7"[..]));
        assert_eq!(res.headers()["date-epoch"], "7");
    }
}
