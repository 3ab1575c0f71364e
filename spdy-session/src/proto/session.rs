use std::collections::BTreeMap;

use crate::frame::{self, StreamId};
use crate::proto::stream::Stream;
use crate::proto::{Window, WindowSize};

/// Ordered map of active streams plus the primitive stream mutations. Ids
/// are strictly increasing per initiator side, so id order is acceptance
/// order, which is what the SETTINGS window broadcast iterates in.
///
/// Lookups on absent ids report the stream as closed and its windows as -1,
/// so the handler's checks compose without an existence pre-check.
#[derive(Debug)]
pub(crate) struct Session {
    active: BTreeMap<StreamId, Stream>,
}

impl Session {
    pub fn new() -> Session {
        Session {
            active: BTreeMap::new(),
        }
    }

    pub fn active_streams(&self) -> usize {
        self.active.len()
    }

    pub fn no_active_streams(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_active(&self, id: StreamId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn active_ids(&self) -> Vec<StreamId> {
        self.active.keys().copied().collect()
    }

    /// Inserts a fresh stream. A stream born with both sides closed is
    /// accepted but never stored.
    pub fn accept_stream(
        &mut self,
        id: StreamId,
        priority: u8,
        remote_closed: bool,
        local_closed: bool,
        send_window: WindowSize,
        recv_window: WindowSize,
    ) {
        if remote_closed && local_closed {
            return;
        }
        tracing::trace!(
            "accept_stream; id={}; priority={}; send_window={}; recv_window={}",
            id,
            priority,
            send_window,
            recv_window
        );
        self.active.insert(
            id,
            Stream::new(priority, remote_closed, local_closed, send_window, recv_window),
        );
    }

    /// Removes the stream, returning how many queued writes were discarded
    /// with it.
    pub fn remove_stream(&mut self, id: StreamId) -> usize {
        match self.active.remove(&id) {
            Some(stream) => stream.pending_writes.len(),
            None => 0,
        }
    }

    pub fn close_remote_side(&mut self, id: StreamId) {
        if let Some(stream) = self.active.get_mut(&id) {
            stream.remote_closed = true;
            if stream.is_closed() {
                self.active.remove(&id);
            }
        }
    }

    pub fn close_local_side(&mut self, id: StreamId) {
        if let Some(stream) = self.active.get_mut(&id) {
            stream.local_closed = true;
            if stream.is_closed() {
                self.active.remove(&id);
            }
        }
    }

    pub fn is_remote_closed(&self, id: StreamId) -> bool {
        self.active.get(&id).map_or(true, |s| s.remote_closed)
    }

    pub fn is_local_closed(&self, id: StreamId) -> bool {
        self.active.get(&id).map_or(true, |s| s.local_closed)
    }

    pub fn priority(&self, id: StreamId) -> Option<u8> {
        self.active.get(&id).map(|s| s.priority)
    }

    pub fn has_received_reply(&self, id: StreamId) -> bool {
        self.active.get(&id).map_or(false, |s| s.received_reply)
    }

    pub fn set_received_reply(&mut self, id: StreamId) {
        if let Some(stream) = self.active.get_mut(&id) {
            stream.received_reply = true;
        }
    }

    pub fn send_window(&self, id: StreamId) -> WindowSize {
        self.active.get(&id).map_or(-1, |s| s.send_window.get())
    }

    pub fn recv_window(&self, id: StreamId) -> WindowSize {
        self.active.get(&id).map_or(-1, |s| s.recv_window.get())
    }

    pub fn recv_window_lower_bound(&self, id: StreamId) -> WindowSize {
        self.active
            .get(&id)
            .map_or(0, |s| s.recv_window_lower_bound.get())
    }

    pub fn send_window_would_overflow(&self, id: StreamId, delta: WindowSize) -> bool {
        self.active
            .get(&id)
            .map_or(false, |s| s.send_window.would_overflow(delta))
    }

    pub fn update_send_window(&mut self, id: StreamId, delta: WindowSize) -> WindowSize {
        match self.active.get_mut(&id) {
            Some(stream) => {
                stream.send_window += delta;
                tracing::trace!(
                    "update_send_window; id={}; delta={}; window={}",
                    id,
                    delta,
                    stream.send_window
                );
                stream.send_window.get()
            }
            None => -1,
        }
    }

    /// A positive delta means a WINDOW_UPDATE is being emitted for the
    /// stream, which also retires the lower bound.
    pub fn update_recv_window(&mut self, id: StreamId, delta: WindowSize) -> WindowSize {
        match self.active.get_mut(&id) {
            Some(stream) => {
                if delta > 0 {
                    stream.recv_window_lower_bound = Window::new(0);
                }
                stream.recv_window += delta;
                tracing::trace!(
                    "update_recv_window; id={}; delta={}; window={}",
                    id,
                    delta,
                    stream.recv_window
                );
                stream.recv_window.get()
            }
            None => -1,
        }
    }

    pub fn adjust_all_send_windows(&mut self, delta: WindowSize) {
        for (id, stream) in &mut self.active {
            stream.send_window += delta;
            tracing::trace!(
                "adjust send window; id={}; delta={}; window={}",
                id,
                delta,
                stream.send_window
            );
        }
    }

    pub fn adjust_all_recv_windows(&mut self, delta: WindowSize) {
        for (id, stream) in &mut self.active {
            stream.recv_window += delta;
            if delta < 0 {
                stream.recv_window_lower_bound = Window::new(delta);
            }
            tracing::trace!(
                "adjust recv window; id={}; delta={}; window={}",
                id,
                delta,
                stream.recv_window
            );
        }
    }

    pub fn put_pending_write(&mut self, id: StreamId, frame: frame::Data) -> bool {
        match self.active.get_mut(&id) {
            Some(stream) => {
                stream.pending_writes.push_back(frame);
                true
            }
            None => false,
        }
    }

    pub fn front_pending_write(&self, id: StreamId) -> Option<&frame::Data> {
        self.active.get(&id).and_then(|s| s.pending_writes.front())
    }

    pub fn pop_pending_write(&mut self, id: StreamId) -> Option<frame::Data> {
        self.active
            .get_mut(&id)
            .and_then(|s| s.pending_writes.pop_front())
    }

    /// Splits the first `at` bytes off the queue head into a new non-final
    /// frame, leaving the suffix queued. No byte is retained twice.
    pub fn split_front_pending_write(&mut self, id: StreamId, at: usize) -> Option<frame::Data> {
        self.active
            .get_mut(&id)
            .and_then(|s| s.pending_writes.front_mut())
            .map(|head| head.split_to(at))
    }

    pub fn pending_writes(&self, id: StreamId) -> usize {
        self.active.get(&id).map_or(0, |s| s.pending_writes.len())
    }
}
