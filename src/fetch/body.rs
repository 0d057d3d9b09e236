/// Response body assembled from streamed chunks.
///
/// Starts out explicitly empty and grows by appending each chunk in
/// receipt order. A response that delivers no chunks before the stream
/// ends yields the empty body, not a null-like sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body(Vec<u8>);

impl Body {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push_chunk(&mut self, chunk: &[u8]) {
        self.0.extend_from_slice(chunk);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode as UTF-8, replacing invalid sequences.
    pub fn into_text_lossy(self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl AsRef<[u8]> for Body {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
