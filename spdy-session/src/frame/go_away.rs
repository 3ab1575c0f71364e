use std::fmt;

use crate::frame::{Frame, SessionStatus, StreamId};

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct GoAway {
    last_good_stream_id: StreamId,
    status: SessionStatus,
}

impl GoAway {
    pub fn new(last_good_stream_id: StreamId, status: SessionStatus) -> Self {
        GoAway {
            last_good_stream_id,
            status,
        }
    }

    pub fn last_good_stream_id(&self) -> StreamId {
        self.last_good_stream_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

impl From<GoAway> for Frame {
    fn from(src: GoAway) -> Self {
        Frame::GoAway(src)
    }
}

impl fmt::Debug for GoAway {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("GoAway")
            .field("last_good_stream_id", &self.last_good_stream_id)
            .field("status", &self.status)
            .finish()
    }
}
