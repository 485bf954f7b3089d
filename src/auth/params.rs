//! Ordered request parameters and their canonical string form.
//!
//! Globitex signs parameters in the order the caller supplies them, so the
//! parameter set is an ordered sequence rather than a map. The same
//! `k1=v1&k2=v2` form is used unescaped for signature base strings and
//! form-urlencoded for the transmitted query string or body.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::form_urlencoded::byte_serialize;

/// A single key/value request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name
    pub key: String,
    /// Parameter value
    pub value: String,
}

impl Param {
    /// Create a new parameter.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered sequence of request parameters.
///
/// Order is significant: it determines the canonical string and therefore
/// every signature computed over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Param>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Param::new(key, value));
    }

    /// Builder-style variant of [`Params::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Value of the last parameter named `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// A copy of this set with every parameter named `key` removed.
    pub fn without(&self, key: &str) -> Self {
        Self(self.0.iter().filter(|p| p.key != key).cloned().collect())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }
}

impl From<Vec<Param>> for Params {
    fn from(params: Vec<Param>) -> Self {
        Self(params)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| Param::new(k, v)).collect())
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors produced while parsing a query string or form body into [`Params`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A segment was not exactly one `key=value` pair
    #[error("malformed parameter pair: {0:?}")]
    MalformedPair(String),

    /// A `%` was not followed by two hexadecimal digits
    #[error("invalid percent escape in {0:?}")]
    InvalidEscape(String),

    /// The decoded bytes were not valid UTF-8
    #[error("parameter is not valid UTF-8 once decoded: {0:?}")]
    InvalidUtf8(String),
}

/// Join parameters into `k1=v1&k2=v2&...`.
///
/// With `url_encode` set, keys and values are form-urlencoded first (spaces
/// become `+`). An empty parameter set yields an empty string.
pub fn stringify(params: &Params, url_encode: bool) -> String {
    let mut out = String::new();
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        if url_encode {
            out.extend(byte_serialize(param.key.as_bytes()));
            out.push('=');
            out.extend(byte_serialize(param.value.as_bytes()));
        } else {
            out.push_str(&param.key);
            out.push('=');
            out.push_str(&param.value);
        }
    }
    out
}

/// Parse a form-urlencoded query string or body back into ordered [`Params`].
///
/// Every `&`-separated segment must contain exactly one `=`, and percent
/// escapes must be well formed. An empty input yields an empty set.
pub fn parse_params(input: &str) -> Result<Params, ParamsError> {
    if input.is_empty() {
        return Ok(Params::new());
    }

    let mut params = Params::new();
    for segment in input.split('&') {
        let mut parts = segment.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParamsError::MalformedPair(segment.to_string()));
        };
        params.push(decode_component(key)?, decode_component(value)?);
    }
    Ok(params)
}

fn decode_component(raw: &str) -> Result<String, ParamsError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return Err(ParamsError::InvalidEscape(raw.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ParamsError::InvalidUtf8(raw.to_string()))
}
