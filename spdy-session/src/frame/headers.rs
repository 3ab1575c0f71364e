use http::HeaderMap;
use std::fmt;

use crate::frame::{Frame, StreamId};

/// Additional headers on an established stream.
#[derive(Clone, Eq, PartialEq)]
pub struct Headers {
    stream_id: StreamId,
    last: bool,
    invalid: bool,
    headers: HeaderMap,
}

impl Headers {
    pub fn new(stream_id: StreamId) -> Self {
        debug_assert!(!stream_id.is_zero());

        Headers {
            stream_id,
            last: false,
            invalid: false,
            headers: HeaderMap::new(),
        }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn set_last(&mut self, val: bool) {
        self.last = val;
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self) {
        self.invalid = true;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl From<Headers> for Frame {
    fn from(src: Headers) -> Self {
        Frame::Headers(src)
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Headers")
            .field("stream_id", &self.stream_id)
            .field("last", &self.last)
            .finish()
    }
}
