// Document construction options: trailing-data policy and input size cap.

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub reject_trailing: bool,
    pub max_input_bytes: Option<u64>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            reject_trailing: false,
            max_input_bytes: None,
        }
    }

    /// Treat non-whitespace bytes after the root value as a decode failure.
    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }

    /// Stop reading the stream after `limit` bytes; a root value cut short fails to decode.
    pub fn max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
