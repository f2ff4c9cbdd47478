//! Ordered request parameters and their query string serialization.
//!
//! Parameter names are matched ASCII case-insensitively, since the services
//! treat `FORMAT` and `format` as the same key. The first spelling seen is
//! kept in the output.

use serde::Serialize;
use std::fmt;

/// Ordered `name=value` pairs with unique (case-insensitive) names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an existing entry in place or appending.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.pairs[idx].1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Builder-style [`RequestParams::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.pairs[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Apply every entry of `other` on top of `self` with [`RequestParams::set`].
    pub fn extend_overriding(&mut self, other: &RequestParams) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Serialize as `name=value&...` with percent-encoded names and values.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.pairs
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Merge the three parameter layers of a tile request.
///
/// Output order is the fixed protocol parameters, then computed per-tile
/// parameters, then any remaining pass-through parameters. A pass-through
/// value replaces a fixed value of the same name but never a computed one.
pub fn compose(
    fixed: &RequestParams,
    passthrough: &RequestParams,
    computed: &RequestParams,
) -> RequestParams {
    let mut params = fixed.clone();
    for (name, value) in passthrough.iter() {
        if params.contains(name) {
            params.set(name, value);
        }
    }
    params.extend_overriding(computed);
    for (name, value) in passthrough.iter() {
        if !params.contains(name) {
            params.set(name, value);
        }
    }
    params
}

/// A complete tile request: base endpoint plus ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub base_url: String,
    pub params: RequestParams,
}

impl RequestDescriptor {
    pub fn new(base_url: impl Into<String>, params: RequestParams) -> Self {
        Self {
            base_url: base_url.into(),
            params,
        }
    }

    /// The full request URL.
    ///
    /// The query string is joined with `?`, or with `&` when the base endpoint
    /// already carries a query.
    pub fn url(&self) -> String {
        let query = self.params.to_query_string();
        if query.is_empty() {
            return self.base_url.clone();
        }

        let separator = if self.base_url.ends_with('?') || self.base_url.ends_with('&') {
            ""
        } else if self.base_url.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{}{}{}", self.base_url, separator, query)
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = RequestParams::new()
            .with("KEY", "a")
            .with("FORMAT", "image/png")
            .with("URL", "file:///");
        params.set("format", "image/jpeg");

        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["KEY", "FORMAT", "URL"]);
        assert_eq!(params.get("FORMAT"), Some("image/jpeg"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_query_string_encoding() {
        let params = RequestParams::new()
            .with("layer", "Leisure 27700")
            .with("tileMatrix", "EPSG:27700:3")
            .with("BBOX", "500000,0,0,0");
        assert_eq!(
            params.to_query_string(),
            "layer=Leisure%2027700&tileMatrix=EPSG%3A27700%3A3&BBOX=500000%2C0%2C0%2C0"
        );
    }

    #[test]
    fn test_compose_precedence() {
        let fixed = RequestParams::new()
            .with("KEY", "k")
            .with("FORMAT", "image/png")
            .with("BBOX", "");
        let passthrough = RequestParams::new()
            .with("format", "image/jpeg")
            .with("bbox", "1,1,1,1")
            .with("TRANSPARENT", "true");
        let computed = RequestParams::new().with("BBOX", "500000,0,0,0");

        let merged = compose(&fixed, &passthrough, &computed);
        assert_eq!(merged.get("FORMAT"), Some("image/jpeg"));
        assert_eq!(merged.get("BBOX"), Some("500000,0,0,0"));
        assert_eq!(merged.get("TRANSPARENT"), Some("true"));
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_compose_order() {
        let fixed = RequestParams::new().with("key", "k").with("layer", "Leisure 27700");
        let passthrough = RequestParams::new()
            .with("style", "default")
            .with("layer", "Outdoor 27700");
        let computed = RequestParams::new().with("tileRow", "0").with("tileCol", "3");

        let merged = compose(&fixed, &passthrough, &computed);
        let names: Vec<_> = merged.names().collect();
        assert_eq!(names, vec!["key", "layer", "tileRow", "tileCol", "style"]);
        assert_eq!(merged.get("layer"), Some("Outdoor 27700"));
    }

    #[test]
    fn test_url_separator() {
        let params = RequestParams::new().with("a", "1");
        assert_eq!(
            RequestDescriptor::new("http://host/ts", params.clone()).url(),
            "http://host/ts?a=1"
        );
        assert_eq!(
            RequestDescriptor::new("http://host/ts?x=y", params.clone()).url(),
            "http://host/ts?x=y&a=1"
        );
        assert_eq!(
            RequestDescriptor::new("http://host/ts?", params.clone()).url(),
            "http://host/ts?a=1"
        );
        assert_eq!(
            RequestDescriptor::new("http://host/ts", RequestParams::new()).url(),
            "http://host/ts"
        );
    }

    #[test]
    fn test_from_iterator_dedupes() {
        let params: RequestParams = vec![("a", "1"), ("A", "2"), ("b", "3")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("2"));
    }
}
