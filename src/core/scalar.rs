// Leaf extraction: typed scalar reads straight off a node's span, no classification needed.
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::node::{Node, decode_error};
use crate::json::parse;

const PREVIEW_CHARS: usize = 64;

impl Node {
    /// The verbatim span text; empty for `null`.
    pub fn data(&self) -> Result<&str> {
        Ok(self.span()?.map_or("", RawValue::get))
    }

    /// Deserialize the span into `T`. `null` yields `Ok(None)` without touching the decoder.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let Some(raw) = self.span()? else {
            return Ok(None);
        };
        parse::from_span(raw)
            .map(Some)
            .map_err(|err| decode_error(&err, "read"))
    }

    /// The span as a dynamically typed value; `null` yields `Value::Null`.
    pub fn value(&self) -> Result<Value> {
        Ok(self.read::<Value>()?.unwrap_or(Value::Null))
    }

    pub fn string(&self) -> Result<String> {
        let Some(raw) = self.span()? else {
            return Ok(String::new());
        };
        if !raw.get().starts_with('"') {
            return Err(format_error("string", raw));
        }
        parse::from_span(raw).map_err(|err| format_error("string", raw).with_source(err))
    }

    pub fn bool(&self) -> Result<bool> {
        let Some(raw) = self.span()? else {
            return Ok(false);
        };
        match raw.get() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format_error("bool", raw)),
        }
    }

    pub fn int64(&self) -> Result<i64> {
        let Some(raw) = self.span()? else {
            return Ok(0);
        };
        raw.get()
            .parse::<i64>()
            .map_err(|err| format_error("int64", raw).with_source(err))
    }

    pub fn uint64(&self) -> Result<u64> {
        let Some(raw) = self.span()? else {
            return Ok(0);
        };
        raw.get()
            .parse::<u64>()
            .map_err(|err| format_error("uint64", raw).with_source(err))
    }

    pub fn float64(&self) -> Result<f64> {
        let Some(raw) = self.span()? else {
            return Ok(0.0);
        };
        let value = raw
            .get()
            .parse::<f64>()
            .map_err(|err| format_error("float64", raw).with_source(err))?;
        if !value.is_finite() {
            return Err(format_error("float64", raw).with_hint("value out of f64 range"));
        }
        Ok(value)
    }

    /// Like [`Node::int32`], but returns the twos-complement truncation alongside an
    /// overflow flag instead of failing.
    pub fn overflowing_int32(&self) -> Result<(i32, bool)> {
        let wide = self.int64()?;
        let narrow = wide as i32;
        Ok((narrow, i64::from(narrow) != wide))
    }

    pub fn overflowing_uint32(&self) -> Result<(u32, bool)> {
        let wide = self.uint64()?;
        let narrow = wide as u32;
        Ok((narrow, u64::from(narrow) != wide))
    }

    /// Platform word integer; the bound is `isize`, so it only narrows on 32-bit targets.
    pub fn overflowing_int(&self) -> Result<(isize, bool)> {
        let wide = self.int64()?;
        let narrow = wide as isize;
        Ok((narrow, narrow as i64 != wide))
    }

    /// Fails with `Overflow` outside the `i32` range; the error carries the truncated value.
    pub fn int32(&self) -> Result<i32> {
        match self.overflowing_int32()? {
            (value, false) => Ok(value),
            (value, true) => Err(overflow_error("int32", i64::from(value))),
        }
    }

    pub fn uint32(&self) -> Result<u32> {
        match self.overflowing_uint32()? {
            (value, false) => Ok(value),
            (value, true) => Err(overflow_error("uint32", i64::from(value))),
        }
    }

    pub fn int(&self) -> Result<isize> {
        match self.overflowing_int()? {
            (value, false) => Ok(value),
            (value, true) => Err(overflow_error("int", value as i64)),
        }
    }
}

fn format_error(target: &str, raw: &RawValue) -> Error {
    Error::new(ErrorKind::Format).with_message(format!("error parse {target}: {}", preview(raw)))
}

fn overflow_error(target: &str, truncated: i64) -> Error {
    Error::new(ErrorKind::Overflow)
        .with_message(format!("value does not fit {target}"))
        .with_truncated(truncated)
}

fn preview(raw: &RawValue) -> &str {
    let text = raw.get();
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
