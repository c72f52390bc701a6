//! Purpose: Provide the span-level JSON decode entrypoints.
//! Exports: `Span`, `read_span`, `object_spans`, `array_spans`, `from_span`, failure categories.
//! Role: Decoder boundary that centralizes serde_json `RawValue` usage details.
//! Invariants: A JSON `null` anywhere a span is produced decodes to `None` (absent span).
//! Invariants: Spans are owned copies; no span borrows from the input stream.
//! Notes: Error mapping to node errors is done by callers so domain context stays explicit.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::value::RawValue;

/// One undecoded JSON value; `None` stands for `null`.
pub(crate) type Span = Option<Box<RawValue>>;

/// Decode exactly one value from `reader`.
///
/// Bytes after the value are left unread unless `reject_trailing` is set, in which case
/// anything but whitespace up to end of stream fails the decode.
pub(crate) fn read_span<R: Read>(
    reader: R,
    limit: Option<u64>,
    reject_trailing: bool,
) -> Result<Span, serde_json::Error> {
    match limit {
        Some(limit) => read_one(reader.take(limit), reject_trailing),
        None => read_one(reader, reject_trailing),
    }
}

fn read_one<R: Read>(reader: R, reject_trailing: bool) -> Result<Span, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let span = Span::deserialize(&mut de)?;
    if reject_trailing {
        de.end()?;
    }
    Ok(span)
}

pub(crate) fn object_spans(span: &RawValue) -> Result<HashMap<String, Span>, serde_json::Error> {
    serde_json::from_str(span.get())
}

pub(crate) fn array_spans(span: &RawValue) -> Result<Vec<Span>, serde_json::Error> {
    serde_json::from_str(span.get())
}

pub(crate) fn from_span<T: DeserializeOwned>(span: &RawValue) -> Result<T, serde_json::Error> {
    serde_json::from_str(span.get())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}",
        categorize_error(err).label()
    )
}
