use std::fmt;

use crate::frame::{Frame, StreamId};

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct WindowUpdate {
    stream_id: StreamId,
    delta_window_size: i32,
}

impl WindowUpdate {
    pub fn new(stream_id: StreamId, delta_window_size: i32) -> Self {
        debug_assert!(!stream_id.is_zero());
        debug_assert!(delta_window_size >= 0, "delta must not be negative");

        WindowUpdate {
            stream_id,
            delta_window_size,
        }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn delta_window_size(&self) -> i32 {
        self.delta_window_size
    }
}

impl From<WindowUpdate> for Frame {
    fn from(src: WindowUpdate) -> Self {
        Frame::WindowUpdate(src)
    }
}

impl fmt::Debug for WindowUpdate {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("WindowUpdate")
            .field("stream_id", &self.stream_id)
            .field("delta", &self.delta_window_size)
            .finish()
    }
}
