use std::fmt;

/// Status code carried by RST_STREAM.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct StreamStatus(u32);

/// Status code carried by GOAWAY.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct SessionStatus(u32);

impl StreamStatus {
    pub const PROTOCOL_ERROR: StreamStatus = StreamStatus(1);
    pub const INVALID_STREAM: StreamStatus = StreamStatus(2);
    pub const REFUSED_STREAM: StreamStatus = StreamStatus(3);
    pub const UNSUPPORTED_VERSION: StreamStatus = StreamStatus(4);
    pub const CANCEL: StreamStatus = StreamStatus(5);
    pub const INTERNAL_ERROR: StreamStatus = StreamStatus(6);
    pub const FLOW_CONTROL_ERROR: StreamStatus = StreamStatus(7);
    pub const STREAM_IN_USE: StreamStatus = StreamStatus(8);
    pub const STREAM_ALREADY_CLOSED: StreamStatus = StreamStatus(9);

    pub fn description(&self) -> &str {
        match self.0 {
            1 => "protocol error",
            2 => "invalid stream",
            3 => "refused stream",
            4 => "unsupported version",
            5 => "cancel",
            6 => "internal error",
            7 => "flow control error",
            8 => "stream in use",
            9 => "stream already closed",
            _ => "unknown stream status",
        }
    }
}

impl From<u32> for StreamStatus {
    fn from(src: u32) -> StreamStatus {
        StreamStatus(src)
    }
}

impl From<StreamStatus> for u32 {
    fn from(src: StreamStatus) -> u32 {
        src.0
    }
}

impl fmt::Debug for StreamStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.0 {
            1 => "PROTOCOL_ERROR",
            2 => "INVALID_STREAM",
            3 => "REFUSED_STREAM",
            4 => "UNSUPPORTED_VERSION",
            5 => "CANCEL",
            6 => "INTERNAL_ERROR",
            7 => "FLOW_CONTROL_ERROR",
            8 => "STREAM_IN_USE",
            9 => "STREAM_ALREADY_CLOSED",
            other => return write!(fmt, "StreamStatus({})", other),
        };
        fmt.write_str(name)
    }
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.description())
    }
}

impl SessionStatus {
    pub const OK: SessionStatus = SessionStatus(0);
    pub const PROTOCOL_ERROR: SessionStatus = SessionStatus(1);
    pub const INTERNAL_ERROR: SessionStatus = SessionStatus(2);

    pub fn description(&self) -> &str {
        match self.0 {
            0 => "ok",
            1 => "protocol error",
            2 => "internal error",
            _ => "unknown session status",
        }
    }
}

impl From<u32> for SessionStatus {
    fn from(src: u32) -> SessionStatus {
        SessionStatus(src)
    }
}

impl From<SessionStatus> for u32 {
    fn from(src: SessionStatus) -> u32 {
        src.0
    }
}

impl fmt::Debug for SessionStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.0 {
            0 => "OK",
            1 => "PROTOCOL_ERROR",
            2 => "INTERNAL_ERROR",
            other => return write!(fmt, "SessionStatus({})", other),
        };
        fmt.write_str(name)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.description())
    }
}
