use std::{error, fmt};

use crate::frame::{SessionStatus, StreamId, StreamStatus};

/// How an invalid inbound frame is scoped: to one stream (remove it and
/// emit RST_STREAM) or to the whole session (emit GOAWAY, then close the
/// transport).
#[derive(Debug)]
pub(crate) enum RecvError {
    Stream { id: StreamId, status: StreamStatus },
    Session(SessionStatus),
}

/// Rejection of an application write. The write emits nothing and the
/// session is unaffected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UserError {
    /// Frame on a stream whose local side is closed (or that is not active).
    ClosedStream,
    /// Stream id with the peer's parity for an operation that requires a
    /// locally-initiated id, or vice versa.
    InvalidStreamId,
    /// SYN_STREAM refused: GOAWAY exchanged or the concurrency cap reached.
    Rejected,
    /// PING id with the peer's parity.
    InvalidPingId,
    /// GOAWAY and WINDOW_UPDATE are managed by the session and must not be
    /// written by the application.
    UnexpectedFrameType,
}

impl error::Error for UserError {}

impl fmt::Display for UserError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use self::UserError::*;

        fmt.write_str(match *self {
            ClosedStream => "stream closed",
            InvalidStreamId => "invalid stream id",
            Rejected => "rejected",
            InvalidPingId => "invalid ping id",
            UnexpectedFrameType => "unexpected frame type",
        })
    }
}

/// The protocol version given at construction is outside the supported
/// range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnsupportedVersion(pub(crate) u8);

impl UnsupportedVersion {
    pub fn version(&self) -> u8 {
        self.0
    }
}

impl error::Error for UnsupportedVersion {}

impl fmt::Display for UnsupportedVersion {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "unsupported version: {}", self.0)
    }
}
