//! Framework-independent request and response types.
//!
//! The endpoint wiring speaks plain `http` types so it can be exercised
//! without any web framework in the loop.

use std::fmt;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;

/// Inbound request with its body fully buffered.
pub type RawRequest = http::Request<Bytes>;

/// Outbound response; the body may still be streaming.
pub type RawResponse = http::Response<ResponseBody>;

/// Response body: either a complete buffer or a stream of chunks.
pub enum ResponseBody {
    Full(Bytes),
    Stream(BoxStream<'static, Result<Bytes, std::io::Error>>),
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self::Full(Bytes::new())
    }

    /// Wrap any byte stream, erasing its error type into `io::Error`.
    pub fn from_stream<S, E>(stream: S) -> Self
    where
        S: futures_util::Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Stream(stream.map(|chunk| chunk.map_err(std::io::Error::other)).boxed())
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Drain the body into a single buffer.
    pub async fn collect(self) -> Result<Bytes, std::io::Error> {
        match self {
            Self::Full(bytes) => Ok(bytes),
            Self::Stream(mut stream) => {
                let mut buf = Vec::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        Self::Full(bytes)
    }
}

impl From<String> for ResponseBody {
    fn from(s: String) -> Self {
        Self::Full(Bytes::from(s))
    }
}

impl From<&'static str> for ResponseBody {
    fn from(s: &'static str) -> Self {
        Self::Full(Bytes::from_static(s.as_bytes()))
    }
}
