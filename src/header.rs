//! HTTP header names and the [`Headers`] collection.
//!
//! Header names are stored and compared as exact strings. Two names differing only in case are
//! two distinct entries; callers that need HTTP-style case folding normalize names before calling
//! [`Headers::set`]. The constants below use the canonical `Title-Case` spelling, which is what
//! this crate itself writes.

use std::collections::{hash_map, HashMap};

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $name:literal);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $konst: &str = $name;
        )+
    }
}

standard_headers! {
    /// Advertises which content types the client is able to understand.
    (ACCEPT, "Accept");

    /// Contains the credentials to authenticate a user agent with a server.
    (AUTHORIZATION, "Authorization");

    /// Indicates the media type of the request payload.
    ///
    /// Body encoding writes this header: JSON bodies only fill it in when absent, while raw, form
    /// and multipart bodies always replace it.
    (CONTENT_TYPE, "Content-Type");

    /// Identifies the software issuing the request.
    (USER_AGENT, "User-Agent");
}

/// A collection of header fields with unique names.
///
/// Setting a name that already exists replaces its value. Cloning produces an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    storage: HashMap<String, String>,
}

impl Headers {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or replaces a header value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.storage.insert(name.into(), value.into());
    }

    /// Chaining form of [`Headers::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value stored for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.storage.get(name).map(String::as_str)
    }

    /// Whether a value is stored for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.storage.contains_key(name)
    }

    /// Removes `name`, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.storage.remove(name)
    }

    /// Copies every entry of `other` into `self`, replacing values for names present in both.
    ///
    /// Entries of `self` that `other` does not name are left alone. The operation is not
    /// commutative: the argument always wins, so callers pick precedence through merge order.
    pub fn merge(&mut self, other: &Headers) {
        for (k, v) in &other.storage {
            self.storage.insert(k.clone(), v.clone());
        }
    }

    /// True when the collection has no items.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of stored headers.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Iterates over the entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Exports the headers as a plain map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.storage.clone()
    }

    /// Consumes the collection into a list sorted by name.
    pub(crate) fn into_sorted_vec(self) -> Vec<(String, String)> {
        let mut fields: Vec<_> = self.storage.into_iter().collect();
        fields.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Headers {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_iter()
    }
}

impl From<Headers> for HashMap<String, String> {
    fn from(headers: Headers) -> Self {
        headers.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_set_overwrites() {
        let mut h = Headers::new();
        assert!(h.is_empty());
        h.set("X-Trace", "1");
        h.set("X-Trace", "2");
        assert_eq!(h.len(), 1);
        assert_eq!(h.value("X-Trace"), Some("2"));
        assert_eq!(h.value("Missing"), None);
    }

    #[test]
    fn test_names_are_exact() {
        let h = headers(&[("Content-Type", "a"), ("content-type", "b")]);
        assert_eq!(h.len(), 2);
        assert_eq!(h.value("Content-Type"), Some("a"));
        assert_eq!(h.value("content-type"), Some("b"));
    }

    #[test]
    fn test_merge_argument_wins() {
        let mut a = headers(&[("A", "1"), ("Shared", "from-a")]);
        let b = headers(&[("B", "2"), ("Shared", "from-b")]);
        a.merge(&b);
        assert_eq!(a.value("A"), Some("1"));
        assert_eq!(a.value("B"), Some("2"));
        assert_eq!(a.value("Shared"), Some("from-b"));

        let mut b2 = b.clone();
        b2.merge(&headers(&[("A", "1"), ("Shared", "from-a")]));
        assert_eq!(b2.value("Shared"), Some("from-a"));
    }

    #[test]
    fn test_merge_idempotent() {
        let other = headers(&[("X", "1"), ("Y", "2")]);
        let mut once = headers(&[("X", "0"), ("Z", "3")]);
        once.merge(&other);
        let mut twice = once.clone();
        twice.merge(&other);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_commutes_for_disjoint_keys() {
        let a = headers(&[("A", "1")]);
        let b = headers(&[("B", "2")]);
        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_clones_are_independent() {
        let original = headers(&[("A", "1")]);
        let mut copy = original.clone();
        copy.set("A", "2");
        assert_eq!(original.value("A"), Some("1"));
        assert_eq!(copy.value("A"), Some("2"));
    }

    #[test]
    fn test_export() {
        let h = Headers::new().with(ACCEPT, "text/plain").with(USER_AGENT, "ua");
        let map = h.to_map();
        assert_eq!(map.get("Accept").map(String::as_str), Some("text/plain"));
        assert_eq!(
            h.into_sorted_vec(),
            vec![
                ("Accept".to_owned(), "text/plain".to_owned()),
                ("User-Agent".to_owned(), "ua".to_owned()),
            ]
        );
    }
}
