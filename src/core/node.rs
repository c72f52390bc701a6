//! Purpose: Lazily classified JSON node with memoized object/array children.
//! Exports: `Node`, `Shape`.
//! Role: Navigation half of the accessor; leaf extraction lives in `core::scalar`.
//! Invariants: A node's span is parsed at most once per shape attempt; outcomes are memoized.
//! Invariants: An error node is terminal; every accessor returns its error unchanged.
//! Invariants: Navigation never mutates a node beyond its classification memo.
//! Notes: Each shape memo is a write-once `OnceLock`, so nodes can be shared across threads.

use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use std::sync::OnceLock;

use serde_json::value::RawValue;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::options::Options;
use crate::json::parse::{self, Span};

/// Classification a node has settled on so far.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    Unclassified,
    Object,
    Array,
    /// An object decode was attempted and failed; an array decode may still succeed.
    NotObject,
    /// An array decode was attempted and failed; an object decode may still succeed.
    NotArray,
    /// Neither shape applies: a scalar, or `null`.
    Scalar,
}

/// Outcome of each shape attempt; `Some(None)` records a failed attempt.
#[derive(Clone, Debug, Default)]
struct Memo {
    object: OnceLock<Option<HashMap<String, Span>>>,
    array: OnceLock<Option<Vec<Span>>>,
}

impl Memo {
    fn shape(&self) -> Shape {
        match (self.object.get(), self.array.get()) {
            (Some(Some(_)), _) => Shape::Object,
            (_, Some(Some(_))) => Shape::Array,
            (None, None) => Shape::Unclassified,
            (Some(None), None) => Shape::NotObject,
            (None, Some(None)) => Shape::NotArray,
            (Some(None), Some(None)) => Shape::Scalar,
        }
    }

    fn is_array(&self) -> bool {
        matches!(self.array.get(), Some(Some(_)))
    }

    fn is_object(&self) -> bool {
        matches!(self.object.get(), Some(Some(_)))
    }
}

#[derive(Clone, Debug)]
enum State {
    Value { span: Span, memo: Memo },
    Failed(Error),
}

/// One JSON value whose interpretation is deferred until an accessor asks for it.
///
/// Navigation (`get`, `index`) always returns a new node; failures come back as error
/// nodes so calls chain without intermediate checks:
///
/// ```
/// use lazyjson::Node;
///
/// let doc = Node::from_slice(br#"{"user":{"tags":["a","b"]}}"#);
/// let tag = doc.get("user").get("tags").index(1).string().unwrap();
/// assert_eq!(tag, "b");
/// ```
#[derive(Clone, Debug)]
pub struct Node {
    state: State,
}

impl Node {
    /// Decode one document from `reader` with default [`Options`].
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::from_reader_with(reader, &Options::default())
    }

    /// Decode one document from `reader`.
    ///
    /// Any failure (malformed JSON, I/O, empty stream) yields an error node.
    pub fn from_reader_with<R: Read>(reader: R, options: &Options) -> Self {
        match parse::read_span(reader, options.max_input_bytes, options.reject_trailing) {
            Ok(span) => {
                tracing::trace!(null = span.is_none(), "decoded root span");
                Self::from_span(span)
            }
            Err(err) => {
                tracing::debug!(error = %err, "root decode failed");
                Self::failed(decode_error(&err, "document"))
            }
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_reader(bytes)
    }

    pub(crate) fn from_span(span: Span) -> Self {
        Self::with_memo(span, Memo::default())
    }

    pub(crate) fn failed(err: Error) -> Self {
        Self {
            state: State::Failed(err),
        }
    }

    /// The sticky error this node carries, if any.
    pub fn err(&self) -> Option<&Error> {
        match &self.state {
            State::Failed(err) => Some(err),
            State::Value { .. } => None,
        }
    }

    pub fn shape(&self) -> Result<Shape> {
        let (_, memo) = self.parts()?;
        Ok(memo.shape())
    }

    /// True for `null`; a node that already holds object or array children is never null.
    pub fn is_null(&self) -> Result<bool> {
        let (span, memo) = self.parts()?;
        Ok(span.is_none() && !memo.is_object() && !memo.is_array())
    }

    /// The undecoded span, or `None` for `null`, after the sticky-error check.
    pub(crate) fn span(&self) -> Result<Option<&RawValue>> {
        let (span, _) = self.parts()?;
        Ok(span.as_deref())
    }

    /// Child node for `key`; classifies this node as an object on first use.
    pub fn get(&self, key: &str) -> Node {
        let found = self.object().and_then(|kvs| match kvs.get(key) {
            Some(child) => Ok(child.clone()),
            None => Err(Error::new(ErrorKind::NotFound).with_message(format!("key {key:?}"))),
        });
        match found {
            Ok(child) => Node::from_span(child),
            Err(err) => Node::failed(err),
        }
    }

    /// Child node at position `idx`; classifies this node as an array on first use.
    pub fn index(&self, idx: usize) -> Node {
        let found = self.array().and_then(|items| match items.get(idx) {
            Some(child) => Ok(child.clone()),
            None => Err(Error::new(ErrorKind::NotFound)
                .with_message(format!("index {idx} out of bounds (length={})", items.len()))),
        });
        match found {
            Ok(child) => Node::from_span(child),
            Err(err) => Node::failed(err),
        }
    }

    /// Re-decode this node as a self-contained object document.
    ///
    /// Unlike [`Node::get`], `null` here means "no fields": the result is an empty object
    /// node rather than an error. The returned node shares nothing with `self`.
    pub fn read_as_object(&self) -> Node {
        let span = match self.span() {
            Ok(span) => span,
            Err(err) => return Node::failed(err),
        };
        let Some(raw) = span else {
            return Node::with_object(None, HashMap::new());
        };
        match parse::object_spans(raw) {
            Ok(kvs) => Node::with_object(Some(raw.to_owned()), kvs),
            Err(err) => Node::failed(wrong_shape("object", Some(raw)).with_source(err)),
        }
    }

    /// [`Node::get`] followed by [`Node::read_as_object`].
    pub fn get_as_object(&self, key: &str) -> Node {
        self.get(key).read_as_object()
    }

    fn with_memo(span: Span, memo: Memo) -> Self {
        Self {
            state: State::Value { span, memo },
        }
    }

    fn with_object(span: Span, kvs: HashMap<String, Span>) -> Self {
        let memo = Memo {
            object: OnceLock::from(Some(kvs)),
            array: OnceLock::new(),
        };
        Self::with_memo(span, memo)
    }

    fn parts(&self) -> Result<(&Span, &Memo)> {
        match &self.state {
            State::Failed(err) => Err(err.clone()),
            State::Value { span, memo } => Ok((span, memo)),
        }
    }

    fn object(&self) -> Result<&HashMap<String, Span>> {
        let (span, memo) = self.parts()?;
        let kvs = memo.object.get_or_init(|| {
            if memo.is_array() {
                return None;
            }
            let Some(raw) = span else {
                tracing::trace!("null span cannot be classified");
                let _ = memo.array.set(None);
                return None;
            };
            classify_object(raw)
        });
        kvs.as_ref()
            .ok_or_else(|| wrong_shape("object", span.as_deref()))
    }

    fn array(&self) -> Result<&Vec<Span>> {
        let (span, memo) = self.parts()?;
        let items = memo.array.get_or_init(|| {
            if memo.is_object() {
                return None;
            }
            let Some(raw) = span else {
                tracing::trace!("null span cannot be classified");
                let _ = memo.object.set(None);
                return None;
            };
            classify_array(raw)
        });
        items
            .as_ref()
            .ok_or_else(|| wrong_shape("array", span.as_deref()))
    }
}

impl Default for Node {
    /// A well-formed `null` node.
    fn default() -> Self {
        Self::from_span(None)
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let node = Self::from_slice(s.as_bytes());
        match node.state {
            State::Failed(err) => Err(err),
            state => Ok(Self { state }),
        }
    }
}

fn classify_object(raw: &RawValue) -> Option<HashMap<String, Span>> {
    match parse::object_spans(raw) {
        Ok(kvs) => {
            tracing::trace!(keys = kvs.len(), "classified span as object");
            Some(kvs)
        }
        Err(err) => {
            tracing::trace!(error = %err, "span is not an object");
            None
        }
    }
}

fn classify_array(raw: &RawValue) -> Option<Vec<Span>> {
    match parse::array_spans(raw) {
        Ok(items) => {
            tracing::trace!(len = items.len(), "classified span as array");
            Some(items)
        }
        Err(err) => {
            tracing::trace!(error = %err, "span is not an array");
            None
        }
    }
}

pub(crate) fn decode_error(err: &serde_json::Error, context: &str) -> Error {
    Error::new(ErrorKind::Decode)
        .with_message(err.to_string())
        .with_hint(parse::hint_for_error(err, context))
}

fn wrong_shape(expected: &str, span: Option<&RawValue>) -> Error {
    Error::new(ErrorKind::WrongShape)
        .with_message(format!("expected {expected}, found {}", describe(span)))
}

fn describe(span: Option<&RawValue>) -> &'static str {
    let Some(raw) = span else {
        return "null";
    };
    match raw.get().as_bytes().first() {
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'"') => "string",
        Some(b't' | b'f') => "bool",
        _ => "number",
    }
}
