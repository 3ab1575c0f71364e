use std::fmt;

use crate::frame::{Frame, StreamId, StreamStatus};

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RstStream {
    stream_id: StreamId,
    status: StreamStatus,
}

impl RstStream {
    pub fn new(stream_id: StreamId, status: StreamStatus) -> Self {
        debug_assert!(!stream_id.is_zero());

        RstStream { stream_id, status }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }
}

impl From<RstStream> for Frame {
    fn from(src: RstStream) -> Self {
        Frame::RstStream(src)
    }
}

impl fmt::Debug for RstStream {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("RstStream")
            .field("stream_id", &self.stream_id)
            .field("status", &self.status)
            .finish()
    }
}
