use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::frame::{
    self, Frame, SessionStatus, StreamId, StreamStatus, SETTINGS_INITIAL_WINDOW_SIZE,
    SETTINGS_MAX_CONCURRENT_STREAMS,
};
use crate::proto::{
    RecvError, Session, UnsupportedVersion, UserError, WindowSize, DEFAULT_INITIAL_WINDOW_SIZE,
    SPDY_MAX_VERSION, SPDY_MIN_VERSION,
};

const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Which endpoint of the connection this session handles. Determines which
/// stream and ping ids are remote-initiated: client ids are odd, server ids
/// are even.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Peer {
    Client,
    Server,
}

impl Peer {
    pub fn is_server(&self) -> bool {
        *self == Peer::Server
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    version: u8,
    peer: Peer,
    drain_timeout: Duration,
}

impl Config {
    pub fn new(version: u8, peer: Peer) -> Config {
        Config {
            version,
            peer,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Upper bound on how long a graceful close waits for in-flight streams
    /// before the transport is closed anyway.
    pub fn drain_timeout(mut self, timeout: Duration) -> Config {
        self.drain_timeout = timeout;
        self
    }
}

/// What the embedding event loop should do with the transport.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CloseState {
    /// Keep the connection open.
    Open,
    /// GOAWAY issued, streams still draining.
    Draining,
    /// Flush the downstream queue, then close the transport.
    CloseTransport,
}

/// The session protocol driver.
///
/// Decoded frames enter through [`recv_frame`]/[`recv_batch`], application
/// frames through [`send_frame`]. Frames to deliver come back out of two
/// FIFO queues: [`poll_upstream`] (toward the application) and
/// [`poll_downstream`] (toward the encoder). Nothing blocks; writes that
/// cannot proceed under flow control are queued and emitted when credit
/// arrives.
///
/// All mutation is serialized through `&mut self`; the GOAWAY flags and the
/// ping counter are atomic so the read-only accessors take `&self`.
///
/// [`recv_frame`]: SessionHandler::recv_frame
/// [`recv_batch`]: SessionHandler::recv_batch
/// [`send_frame`]: SessionHandler::send_frame
/// [`poll_upstream`]: SessionHandler::poll_upstream
/// [`poll_downstream`]: SessionHandler::poll_downstream
#[derive(Debug)]
pub struct SessionHandler {
    session: Session,
    version: u8,
    peer: Peer,
    flow_control: bool,

    last_good_stream_id: StreamId,
    remote_concurrent_streams: u32,
    local_concurrent_streams: u32,
    max_concurrent_streams: u32,
    initial_send_window: WindowSize,
    initial_recv_window: WindowSize,

    pings: AtomicUsize,
    sent_goaway: AtomicBool,
    received_goaway: AtomicBool,

    draining: bool,
    drain_deadline: Option<Instant>,
    drain_timeout: Duration,
    close_transport: bool,

    upstream: VecDeque<Frame>,
    downstream: VecDeque<Frame>,
}

impl SessionHandler {
    pub fn new(config: Config) -> Result<SessionHandler, UnsupportedVersion> {
        if config.version < SPDY_MIN_VERSION || config.version > SPDY_MAX_VERSION {
            return Err(UnsupportedVersion(config.version));
        }

        Ok(SessionHandler {
            session: Session::new(),
            version: config.version,
            peer: config.peer,
            flow_control: config.version >= 3,
            last_good_stream_id: StreamId::ZERO,
            remote_concurrent_streams: 0,
            local_concurrent_streams: 0,
            max_concurrent_streams: 0,
            initial_send_window: DEFAULT_INITIAL_WINDOW_SIZE,
            initial_recv_window: DEFAULT_INITIAL_WINDOW_SIZE,
            pings: AtomicUsize::new(0),
            sent_goaway: AtomicBool::new(false),
            received_goaway: AtomicBool::new(false),
            draining: false,
            drain_deadline: None,
            drain_timeout: config.drain_timeout,
            close_transport: false,
            upstream: VecDeque::new(),
            downstream: VecDeque::new(),
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn peer(&self) -> Peer {
        self.peer
    }

    /// Next frame to deliver to the application, if any.
    pub fn poll_upstream(&mut self) -> Option<Frame> {
        self.upstream.pop_front()
    }

    /// Next frame to hand to the encoder, if any.
    pub fn poll_downstream(&mut self) -> Option<Frame> {
        self.downstream.pop_front()
    }

    pub fn last_good_stream_id(&self) -> StreamId {
        self.last_good_stream_id
    }

    pub fn active_streams(&self) -> usize {
        self.session.active_streams()
    }

    pub fn is_active(&self, id: StreamId) -> bool {
        self.session.is_active(id)
    }

    pub fn sent_goaway(&self) -> bool {
        self.sent_goaway.load(Ordering::SeqCst)
    }

    pub fn received_goaway(&self) -> bool {
        self.received_goaway.load(Ordering::SeqCst)
    }

    pub fn outstanding_pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    /// Remaining send credit on a stream, if it is active.
    pub fn send_window(&self, id: StreamId) -> Option<WindowSize> {
        if self.session.is_active(id) {
            Some(self.session.send_window(id))
        } else {
            None
        }
    }

    /// Remaining receive credit on a stream, if it is active.
    pub fn recv_window(&self, id: StreamId) -> Option<WindowSize> {
        if self.session.is_active(id) {
            Some(self.session.recv_window(id))
        } else {
            None
        }
    }

    /// Outbound DATA frames queued on a stream by flow control.
    pub fn pending_writes(&self, id: StreamId) -> usize {
        self.session.pending_writes(id)
    }

    /// Priority the stream was opened with, if it is active. A scheduler
    /// above the session may use this to order responses.
    pub fn stream_priority(&self, id: StreamId) -> Option<u8> {
        self.session.priority(id)
    }

    /// Feeds one decoded frame through the session.
    pub fn recv_frame(&mut self, frame: Frame) {
        self.recv_batch(::std::iter::once(frame));
    }

    /// Feeds a batch of decoded frames through the session, preserving
    /// receipt order upstream. A SYN_STREAM flushes everything buffered from
    /// the batch first, so no observer of `last_good_stream_id` can see it
    /// move before the frames it vouches for were delivered.
    pub fn recv_batch<I>(&mut self, frames: I)
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut out = Vec::new();
        for frame in frames {
            if let Frame::SynStream(..) = frame {
                self.flush_upstream(&mut out);
            }
            self.recv_inbound(frame, &mut out);
        }
        self.flush_upstream(&mut out);
    }

    /// A lower layer surfaced a session-fatal protocol error (for example a
    /// malformed wire frame the codec could not scope to a stream).
    pub fn recv_protocol_error(&mut self) {
        self.issue_session_error(SessionStatus::PROTOCOL_ERROR);
    }

    /// Validates an application frame and emits it downstream, possibly
    /// fragmented or deferred by flow control. A rejected write emits
    /// nothing and leaves the session unaffected.
    pub fn send_frame(&mut self, frame: Frame) -> Result<(), UserError> {
        match frame {
            Frame::Data(frame) => self.send_data(frame),
            Frame::SynStream(frame) => self.send_syn_stream(frame),
            Frame::SynReply(frame) => self.send_syn_reply(frame),
            Frame::RstStream(frame) => self.send_rst_stream(frame),
            Frame::Settings(frame) => self.send_settings(frame),
            Frame::Ping(frame) => self.send_ping(frame),
            Frame::GoAway(_) => Err(UserError::UnexpectedFrameType),
            Frame::Headers(frame) => self.send_headers(frame),
            Frame::WindowUpdate(_) => Err(UserError::UnexpectedFrameType),
        }
    }

    /// Requests a graceful close: GOAWAY with status OK, then transport
    /// close once every active stream has drained or the drain timeout
    /// passes, whichever comes first.
    pub fn close(&mut self, now: Instant) {
        self.send_goaway(SessionStatus::OK);
        if self.session.no_active_streams() {
            self.close_transport = true;
        } else if !self.draining {
            self.draining = true;
            self.drain_deadline = Some(now + self.drain_timeout);
        }
    }

    /// What the event loop should do with the transport at time `now`.
    pub fn poll_close(&mut self, now: Instant) -> CloseState {
        if !self.close_transport && self.draining {
            let expired = self.drain_deadline.map_or(false, |deadline| now >= deadline);
            if expired {
                tracing::debug!("drain timeout expired; forcing transport close");
                self.close_transport = true;
            }
        }

        if self.close_transport {
            CloseState::CloseTransport
        } else if self.draining {
            CloseState::Draining
        } else {
            CloseState::Open
        }
    }

    fn recv_inbound(&mut self, frame: Frame, out: &mut Vec<Frame>) {
        let res = match frame {
            Frame::Data(frame) => self.recv_data(frame, out),
            Frame::SynStream(frame) => self.recv_syn_stream(frame, out),
            Frame::SynReply(frame) => self.recv_syn_reply(frame, out),
            Frame::RstStream(frame) => self.recv_rst_stream(frame, out),
            Frame::Settings(frame) => self.recv_settings(frame, out),
            Frame::Ping(frame) => self.recv_ping(frame, out),
            Frame::GoAway(frame) => self.recv_goaway(frame, out),
            Frame::Headers(frame) => self.recv_headers(frame, out),
            Frame::WindowUpdate(frame) => self.recv_window_update(frame, out),
        };

        match res {
            Ok(()) => {}
            Err(RecvError::Stream { id, status }) => self.issue_stream_error(id, status, out),
            Err(RecvError::Session(status)) => self.issue_session_error(status),
        }
    }

    fn recv_data(&mut self, mut frame: frame::Data, out: &mut Vec<Frame>) -> Result<(), RecvError> {
        let id = frame.stream_id();

        if !self.session.is_active(id) {
            if id <= self.last_good_stream_id {
                proto_err!(stream: "DATA on closed stream {}", id);
                return Err(RecvError::Stream {
                    id,
                    status: StreamStatus::PROTOCOL_ERROR,
                });
            }
            if !self.sent_goaway() {
                proto_err!(stream: "DATA on stream {} which is not open", id);
                return Err(RecvError::Stream {
                    id,
                    status: StreamStatus::INVALID_STREAM,
                });
            }
            // data racing our GOAWAY; nothing to report
            return Ok(());
        }

        if self.session.is_remote_closed(id) {
            proto_err!(stream: "DATA on remote-half-closed stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::STREAM_ALREADY_CLOSED,
            });
        }

        if !self.remote_initiated(id) && !self.session.has_received_reply(id) {
            proto_err!(stream: "DATA on stream {} before SYN_REPLY", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::PROTOCOL_ERROR,
            });
        }

        if self.flow_control {
            let new_window = self
                .session
                .update_recv_window(id, -(frame.len() as WindowSize));

            if new_window < self.session.recv_window_lower_bound(id) {
                proto_err!(stream: "DATA on stream {} overran the receive window", id);
                return Err(RecvError::Stream {
                    id,
                    status: StreamStatus::FLOW_CONTROL_ERROR,
                });
            }

            // The window goes negative when the peer wrote before observing
            // our shrinking SETTINGS. The bytes are still owed to the
            // application, but in buffer-bounded slices.
            if new_window < 0 && self.initial_recv_window > 0 {
                while frame.len() > self.initial_recv_window as usize {
                    out.push(frame.split_to(self.initial_recv_window as usize).into());
                }
            }

            if new_window <= self.initial_recv_window / 2 && !frame.is_last() {
                let delta = self.initial_recv_window - new_window;
                if delta > 0 {
                    self.session.update_recv_window(id, delta);
                    self.downstream
                        .push_back(frame::WindowUpdate::new(id, delta).into());
                }
            }
        }

        if frame.is_last() {
            self.half_close_stream(id, true);
        }

        out.push(frame.into());
        Ok(())
    }

    fn recv_syn_stream(
        &mut self,
        frame: frame::SynStream,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        let id = frame.stream_id();

        if frame.is_invalid() || !self.remote_initiated(id) || self.session.is_active(id) {
            proto_err!(stream: "invalid SYN_STREAM on stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::PROTOCOL_ERROR,
            });
        }

        // ids are strictly increasing; going backwards kills the session
        if id <= self.last_good_stream_id {
            proto_err!(conn: "SYN_STREAM id {} <= last good id {}", id, self.last_good_stream_id);
            return Err(RecvError::Session(SessionStatus::PROTOCOL_ERROR));
        }

        let accepted = self.accept_stream(
            id,
            frame.priority(),
            frame.is_last(),
            frame.is_unidirectional(),
        );
        if !accepted {
            proto_err!(stream: "refused stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::REFUSED_STREAM,
            });
        }

        out.push(frame.into());
        Ok(())
    }

    fn recv_syn_reply(
        &mut self,
        frame: frame::SynReply,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        let id = frame.stream_id();

        if frame.is_invalid() || self.remote_initiated(id) || self.session.is_remote_closed(id) {
            proto_err!(stream: "invalid SYN_REPLY on stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::INVALID_STREAM,
            });
        }

        if self.session.has_received_reply(id) {
            proto_err!(stream: "duplicate SYN_REPLY on stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::STREAM_IN_USE,
            });
        }

        self.session.set_received_reply(id);

        if frame.is_last() {
            self.half_close_stream(id, true);
        }

        out.push(frame.into());
        Ok(())
    }

    // No reply is ever sent in response to RST_STREAM.
    fn recv_rst_stream(
        &mut self,
        frame: frame::RstStream,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        self.remove_stream(frame.stream_id());
        out.push(frame.into());
        Ok(())
    }

    fn recv_settings(
        &mut self,
        mut frame: frame::Settings,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        if let Some(max) = frame.get(SETTINGS_MAX_CONCURRENT_STREAMS) {
            self.update_concurrent_streams(max, true);
        }

        // Persistence is inconsistent with using SETTINGS to carry the
        // initial window size: drop values the sender claims were persisted
        // and strip requests to persist.
        if frame.is_persisted(SETTINGS_INITIAL_WINDOW_SIZE) {
            frame.remove(SETTINGS_INITIAL_WINDOW_SIZE);
        }
        frame.set_persist_value(SETTINGS_INITIAL_WINDOW_SIZE, false);

        if self.flow_control {
            if let Some(window) = frame.get(SETTINGS_INITIAL_WINDOW_SIZE) {
                self.update_initial_send_window(window as WindowSize);
            }
        }

        out.push(frame.into());
        Ok(())
    }

    fn recv_ping(&mut self, frame: frame::Ping, out: &mut Vec<Frame>) -> Result<(), RecvError> {
        if self.remote_initiated_ping(frame.id()) {
            // peer-originated ping: echo it back as soon as possible
            self.downstream.push_back(frame.into());
            return Ok(());
        }

        // Reply to one of ours. Uniqueness of ping ids is not enforced, so
        // only the outstanding count is checked.
        if self.pings.load(Ordering::SeqCst) == 0 {
            tracing::trace!("dropping PING reply {} with no ping outstanding", frame.id());
            return Ok(());
        }
        self.pings.fetch_sub(1, Ordering::SeqCst);

        out.push(frame.into());
        Ok(())
    }

    fn recv_goaway(&mut self, frame: frame::GoAway, out: &mut Vec<Frame>) -> Result<(), RecvError> {
        self.received_goaway.store(true, Ordering::SeqCst);
        out.push(frame.into());
        Ok(())
    }

    fn recv_headers(
        &mut self,
        frame: frame::Headers,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        let id = frame.stream_id();

        if frame.is_invalid() {
            proto_err!(stream: "invalid HEADERS on stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::PROTOCOL_ERROR,
            });
        }

        if self.session.is_remote_closed(id) {
            proto_err!(stream: "HEADERS on remote-half-closed stream {}", id);
            return Err(RecvError::Stream {
                id,
                status: StreamStatus::INVALID_STREAM,
            });
        }

        if frame.is_last() {
            self.half_close_stream(id, true);
        }

        out.push(frame.into());
        Ok(())
    }

    fn recv_window_update(
        &mut self,
        frame: frame::WindowUpdate,
        out: &mut Vec<Frame>,
    ) -> Result<(), RecvError> {
        if self.flow_control {
            let id = frame.stream_id();
            let delta = frame.delta_window_size();

            // the sender is done with the stream; credit is meaningless now
            if self.session.is_local_closed(id) {
                return Ok(());
            }

            if self.session.send_window_would_overflow(id, delta) {
                proto_err!(stream: "WINDOW_UPDATE overflows send window on stream {}", id);
                return Err(RecvError::Stream {
                    id,
                    status: StreamStatus::FLOW_CONTROL_ERROR,
                });
            }

            self.update_send_window_size(id, delta);
        }

        out.push(frame.into());
        Ok(())
    }

    fn send_data(&mut self, mut frame: frame::Data) -> Result<(), UserError> {
        let id = frame.stream_id();

        if self.session.is_local_closed(id) {
            return Err(UserError::ClosedStream);
        }

        if self.flow_control {
            let length = frame.len() as WindowSize;
            let window = self.session.send_window(id);

            if window <= 0 {
                // stalled: hold the whole frame until credit arrives
                tracing::trace!("queueing write on stalled stream {}; len={}", id, length);
                self.session.put_pending_write(id, frame);
                return Ok(());
            }

            if window < length {
                // Send what the credit covers now and queue the rest. The
                // window is pre-decremented before the frame goes downstream.
                self.session.update_send_window(id, -window);
                let partial = frame.split_to(window as usize);
                self.session.put_pending_write(id, frame);
                self.downstream.push_back(partial.into());
                return Ok(());
            }

            self.session.update_send_window(id, -length);
        }

        if frame.is_last() {
            self.half_close_stream(id, false);
        }

        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_syn_stream(&mut self, frame: frame::SynStream) -> Result<(), UserError> {
        let id = frame.stream_id();

        if self.remote_initiated(id) {
            return Err(UserError::InvalidStreamId);
        }

        let accepted = self.accept_stream(
            id,
            frame.priority(),
            frame.is_unidirectional(),
            frame.is_last(),
        );
        if !accepted {
            return Err(UserError::Rejected);
        }

        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_syn_reply(&mut self, frame: frame::SynReply) -> Result<(), UserError> {
        let id = frame.stream_id();

        if !self.remote_initiated(id) {
            return Err(UserError::InvalidStreamId);
        }
        if self.session.is_local_closed(id) {
            return Err(UserError::ClosedStream);
        }

        if frame.is_last() {
            self.half_close_stream(id, false);
        }

        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_rst_stream(&mut self, frame: frame::RstStream) -> Result<(), UserError> {
        self.remove_stream(frame.stream_id());
        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_settings(&mut self, mut frame: frame::Settings) -> Result<(), UserError> {
        if let Some(max) = frame.get(SETTINGS_MAX_CONCURRENT_STREAMS) {
            self.update_concurrent_streams(max, false);
        }

        if frame.is_persisted(SETTINGS_INITIAL_WINDOW_SIZE) {
            frame.remove(SETTINGS_INITIAL_WINDOW_SIZE);
        }
        frame.set_persist_value(SETTINGS_INITIAL_WINDOW_SIZE, false);

        if self.flow_control {
            if let Some(window) = frame.get(SETTINGS_INITIAL_WINDOW_SIZE) {
                self.update_initial_recv_window(window as WindowSize);
            }
        }

        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_ping(&mut self, frame: frame::Ping) -> Result<(), UserError> {
        if self.remote_initiated_ping(frame.id()) {
            return Err(UserError::InvalidPingId);
        }

        self.pings.fetch_add(1, Ordering::SeqCst);
        self.downstream.push_back(frame.into());
        Ok(())
    }

    fn send_headers(&mut self, frame: frame::Headers) -> Result<(), UserError> {
        let id = frame.stream_id();

        if self.session.is_local_closed(id) {
            return Err(UserError::ClosedStream);
        }

        if frame.is_last() {
            self.half_close_stream(id, false);
        }

        self.downstream.push_back(frame.into());
        Ok(())
    }

    /// Admission: the only path that both consults and mutates the
    /// session-wide state.
    fn accept_stream(
        &mut self,
        id: StreamId,
        priority: u8,
        remote_closed: bool,
        local_closed: bool,
    ) -> bool {
        // no new streams once GOAWAY was exchanged, in either direction
        if self.received_goaway() || self.sent_goaway() {
            return false;
        }

        let max = self.max_concurrent_streams;
        if max != 0 && self.session.active_streams() >= max as usize {
            return false;
        }

        self.session.accept_stream(
            id,
            priority,
            remote_closed,
            local_closed,
            self.initial_send_window,
            self.initial_recv_window,
        );
        if self.remote_initiated(id) {
            self.last_good_stream_id = id;
        }
        true
    }

    /// Applies `delta` of new send credit to a stream, then drains its
    /// pending writes in FIFO order while credit remains, fragmenting the
    /// head frame in place if the credit runs out mid-frame.
    fn update_send_window_size(&mut self, id: StreamId, delta: WindowSize) {
        let mut new_window = self.session.update_send_window(id, delta);

        while new_window > 0 {
            let head_len = match self.session.front_pending_write(id) {
                Some(head) => head.len() as WindowSize,
                None => break,
            };

            if new_window >= head_len {
                if let Some(frame) = self.session.pop_pending_write(id) {
                    new_window = self.session.update_send_window(id, -head_len);
                    if frame.is_last() {
                        self.half_close_stream(id, false);
                    }
                    self.downstream.push_back(frame.into());
                }
            } else {
                self.session.update_send_window(id, -new_window);
                if let Some(partial) = self.session.split_front_pending_write(id, new_window as usize)
                {
                    self.downstream.push_back(partial.into());
                }
                new_window = 0;
            }
        }
    }

    fn update_initial_send_window(&mut self, new_size: WindowSize) {
        let delta = new_size - self.initial_send_window;
        self.initial_send_window = new_size;
        self.session.adjust_all_send_windows(delta);

        // extra credit may unstall queued writes right away
        if delta > 0 {
            for id in self.session.active_ids() {
                self.update_send_window_size(id, 0);
            }
        }
    }

    fn update_initial_recv_window(&mut self, new_size: WindowSize) {
        let delta = new_size - self.initial_recv_window;
        self.initial_recv_window = new_size;
        self.session.adjust_all_recv_windows(delta);
    }

    fn update_concurrent_streams(&mut self, new_value: u32, remote: bool) {
        if remote {
            self.remote_concurrent_streams = new_value;
        } else {
            self.local_concurrent_streams = new_value;
        }

        let local_limit = self.local_concurrent_streams;
        let remote_limit = self.remote_concurrent_streams;
        // zero means unspecified on either side
        self.max_concurrent_streams = if local_limit == remote_limit {
            local_limit
        } else if local_limit == 0 {
            remote_limit
        } else if remote_limit == 0 {
            local_limit
        } else {
            local_limit.min(remote_limit)
        };
    }

    /// Removes the stream, emits RST_STREAM downstream, and notifies the
    /// application iff the remote side was still considered open.
    fn issue_stream_error(&mut self, id: StreamId, status: StreamStatus, out: &mut Vec<Frame>) {
        let notify = !self.session.is_remote_closed(id);
        self.remove_stream(id);

        let rst = frame::RstStream::new(id, status);
        self.downstream.push_back(rst.into());
        if notify {
            out.push(rst.into());
            self.flush_upstream(out);
        }
    }

    /// GOAWAY with the last good stream id, then transport close once the
    /// queued GOAWAY is flushed.
    fn issue_session_error(&mut self, status: SessionStatus) {
        self.send_goaway(status);
        self.close_transport = true;
    }

    fn send_goaway(&mut self, status: SessionStatus) {
        if !self.sent_goaway.swap(true, Ordering::SeqCst) {
            let frame = frame::GoAway::new(self.last_good_stream_id, status);
            self.downstream.push_back(frame.into());
        }
    }

    fn half_close_stream(&mut self, id: StreamId, remote: bool) {
        if remote {
            self.session.close_remote_side(id);
        } else {
            self.session.close_local_side(id);
        }
        self.maybe_close_when_drained();
    }

    fn remove_stream(&mut self, id: StreamId) {
        let discarded = self.session.remove_stream(id);
        if discarded > 0 {
            tracing::debug!("discarded {} queued writes on removed stream {}", discarded, id);
        }
        self.maybe_close_when_drained();
    }

    fn maybe_close_when_drained(&mut self) {
        if self.draining && self.session.no_active_streams() {
            self.close_transport = true;
        }
    }

    fn flush_upstream(&mut self, out: &mut Vec<Frame>) {
        self.upstream.extend(out.drain(..));
    }

    fn remote_initiated(&self, id: StreamId) -> bool {
        match self.peer {
            Peer::Server => id.is_client_initiated(),
            Peer::Client => id.is_server_initiated(),
        }
    }

    fn remote_initiated_ping(&self, id: u32) -> bool {
        let server_id = id % 2 == 0;
        match self.peer {
            Peer::Server => !server_id,
            Peer::Client => server_id,
        }
    }
}
