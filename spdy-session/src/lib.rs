//! SPDY session multiplexing.
//!
//! This crate sits between a framed SPDY codec (below) and application
//! handlers (above). It owns the lifecycle of every stream sharing one
//! transport connection, enforces the protocol's stream and session rules,
//! and implements per-stream windowed flow control.
//!
//! The crate is sans-I/O: typed frames go in through [`SessionHandler`],
//! and frames to be delivered come back out of two FIFO queues — one toward
//! the application, one toward the encoder. The embedding event loop feeds
//! decoded frames in and drains both queues after every call.
//!
//! ```
//! use spdy_session::frame::{StreamId, SynStream};
//! use spdy_session::{Config, Peer, SessionHandler};
//!
//! let mut session = SessionHandler::new(Config::new(3, Peer::Server)).unwrap();
//!
//! session.recv_frame(SynStream::new(StreamId::from(1)).into());
//!
//! while let Some(frame) = session.poll_upstream() {
//!     // hand `frame` to the application
//!     let _ = frame;
//! }
//! while let Some(frame) = session.poll_downstream() {
//!     // hand `frame` to the encoder
//!     let _ = frame;
//! }
//! ```

macro_rules! proto_err {
    (conn: $($msg:tt)+) => {
        tracing::debug!("session error PROTOCOL_ERROR -- {};", format_args!($($msg)+))
    };
    (stream: $($msg:tt)+) => {
        tracing::debug!("stream error -- {};", format_args!($($msg)+))
    };
}

pub mod frame;
mod proto;

pub use crate::proto::{
    CloseState, Config, Peer, SessionHandler, UnsupportedVersion, UserError, WindowSize,
    DEFAULT_INITIAL_WINDOW_SIZE, MAX_WINDOW_SIZE, SPDY_MAX_VERSION, SPDY_MIN_VERSION,
};
