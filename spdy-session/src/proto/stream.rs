use std::collections::VecDeque;

use crate::frame;
use crate::proto::{Window, WindowSize};

/// Per-stream record. The stream id is the key of the session table, not a
/// field here. A record with both sides closed is never stored.
#[derive(Debug)]
pub(crate) struct Stream {
    pub priority: u8,
    pub remote_closed: bool,
    pub local_closed: bool,
    pub received_reply: bool,
    pub send_window: Window,
    pub recv_window: Window,
    /// Most-negative value the receive window may legally reach after a
    /// locally-issued SETTINGS shrank the initial window before the peer
    /// observed it. Reset to zero when a WINDOW_UPDATE is emitted.
    pub recv_window_lower_bound: Window,
    pub pending_writes: VecDeque<frame::Data>,
}

impl Stream {
    pub fn new(
        priority: u8,
        remote_closed: bool,
        local_closed: bool,
        send_window: WindowSize,
        recv_window: WindowSize,
    ) -> Stream {
        Stream {
            priority,
            remote_closed,
            local_closed,
            received_reply: false,
            send_window: Window::new(send_window),
            recv_window: Window::new(recv_window),
            recv_window_lower_bound: Window::new(0),
            pending_writes: VecDeque::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.remote_closed && self.local_closed
    }
}
