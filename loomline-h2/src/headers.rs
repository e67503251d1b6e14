//! Ordered, case-insensitive header storage and the wire representation.
//!
//! `HeaderMap` is the caller-facing header set: names compare
//! case-insensitively, insertion order is preserved, and duplicate names are
//! allowed. Whether a set is a request header set or a trailer set is
//! structural (a request set contains `:method`, a trailer set does not).
//!
//! `HeaderField` is the wire-level name/value pair handed to the frame
//! encoder, names already lowercased.

/// Well-known header names used by the encode path.
pub mod name {
    pub const METHOD: &str = ":method";
    pub const SCHEME: &str = ":scheme";
    pub const AUTHORITY: &str = ":authority";
    pub const PATH: &str = ":path";
    pub const STATUS: &str = ":status";
    pub const USER_AGENT: &str = "user-agent";
    pub const CONNECTION: &str = "connection";
}

/// A single wire header name-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this is a pseudo-header (`:`-prefixed name).
    pub fn is_pseudo(&self) -> bool {
        self.name.first() == Some(&b':')
    }
}

/// Ordered collection of HTTP headers with case-insensitive names.
///
/// Multiple values for one name are allowed and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of header fields (counting duplicates).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a header, keeping any existing values for the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Set a header, replacing every existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.fields.push((name, value.into()));
    }

    /// First value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether any value exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Remove every value for `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.fields.len() != before
    }

    /// Iterate all fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Whether this is a request header set (`:method` present).
    ///
    /// A set without `:method` is a trailer set. The kind picks both the
    /// outbound transform and the failure classification.
    pub fn is_request(&self) -> bool {
        self.contains(name::METHOD)
    }

    /// Convert to the wire representation, lowercasing names and placing
    /// pseudo-headers before regular headers (RFC 7540 Section 8.1.2.1).
    /// Relative order within each group is insertion order.
    pub fn to_wire(&self) -> Vec<HeaderField> {
        let mut wire = Vec::with_capacity(self.fields.len());
        for (n, v) in &self.fields {
            if n.starts_with(':') {
                wire.push(HeaderField::new(n.to_ascii_lowercase(), v.as_bytes()));
            }
        }
        for (n, v) in &self.fields {
            if !n.starts_with(':') {
                wire.push(HeaderField::new(n.to_ascii_lowercase(), v.as_bytes()));
            }
        }
        wire
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        for (n, v) in iter {
            map.add(n, v);
        }
        map
    }
}

/// Whether a wire header vector already carries `name` (exact lowercase
/// match; wire names are lowercased by construction).
pub(crate) fn wire_contains(wire: &[HeaderField], name: &str) -> bool {
    wire.iter().any(|f| f.name == name.as_bytes())
}

/// Insert a pseudo-header at the end of the leading pseudo-header block so
/// pseudo-headers stay ahead of regular headers (RFC 7540 Section 8.1.2.1).
pub(crate) fn insert_pseudo(wire: &mut Vec<HeaderField>, field: HeaderField) {
    let at = wire.iter().position(|f| !f.is_pseudo()).unwrap_or(wire.len());
    wire.insert(at, field);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.add("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert!(headers.contains("Content-type"));
    }

    #[test]
    fn add_keeps_duplicates_set_replaces() {
        let mut headers = HeaderMap::new();
        headers.add("accept", "text/html");
        headers.add("Accept", "application/json");
        let values: Vec<_> = headers.get_all("accept").collect();
        assert_eq!(values, ["text/html", "application/json"]);

        headers.set("accept", "*/*");
        let values: Vec<_> = headers.get_all("accept").collect();
        assert_eq!(values, ["*/*"]);
    }

    #[test]
    fn method_presence_classifies_kind() {
        let request: HeaderMap = [(":method", "GET"), (":path", "/")].into_iter().collect();
        assert!(request.is_request());

        let trailers: HeaderMap = [("grpc-status", "0")].into_iter().collect();
        assert!(!trailers.is_request());
    }

    #[test]
    fn wire_conversion_lowercases_and_fronts_pseudo_headers() {
        let mut headers = HeaderMap::new();
        headers.add("X-Trace-Id", "abc");
        headers.add(":method", "POST");
        headers.add(":path", "/v1/items");

        let wire = headers.to_wire();
        assert_eq!(wire[0], HeaderField::new(b":method".as_slice(), b"POST".as_slice()));
        assert_eq!(wire[1], HeaderField::new(b":path".as_slice(), b"/v1/items".as_slice()));
        assert_eq!(wire[2], HeaderField::new(b"x-trace-id".as_slice(), b"abc".as_slice()));
    }

    #[test]
    fn remove_drops_all_values() {
        let mut headers = HeaderMap::new();
        headers.add("cookie", "a=1");
        headers.add("Cookie", "b=2");
        assert!(headers.remove("COOKIE"));
        assert!(!headers.contains("cookie"));
        assert!(!headers.remove("cookie"));
    }
}
