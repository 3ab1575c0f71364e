use std::fmt;

mod data;
mod go_away;
mod headers;
mod ping;
mod rst_stream;
mod settings;
mod status;
mod stream_id;
mod syn_reply;
mod syn_stream;
mod window_update;

pub use data::Data;
pub use go_away::GoAway;
pub use headers::Headers;
pub use ping::Ping;
pub use rst_stream::RstStream;
pub use settings::{
    Settings, SETTINGS_CLIENT_CERTIFICATE_VECTOR_SIZE, SETTINGS_CURRENT_CWND,
    SETTINGS_DOWNLOAD_BANDWIDTH, SETTINGS_DOWNLOAD_RETRANS_RATE, SETTINGS_INITIAL_WINDOW_SIZE,
    SETTINGS_MAX_CONCURRENT_STREAMS, SETTINGS_ROUND_TRIP_TIME, SETTINGS_UPLOAD_BANDWIDTH,
};
pub use status::{SessionStatus, StreamStatus};
pub use stream_id::StreamId;
pub use syn_reply::SynReply;
pub use syn_stream::SynStream;
pub use window_update::WindowUpdate;

/// A typed SPDY frame, as produced by the decoder and consumed by the
/// encoder. The session layer dispatches on this exhaustively, so every
/// protocol rule is matched at compile time.
#[derive(Clone, Eq, PartialEq)]
pub enum Frame {
    Data(Data),
    SynStream(SynStream),
    SynReply(SynReply),
    RstStream(RstStream),
    Settings(Settings),
    Ping(Ping),
    GoAway(GoAway),
    Headers(Headers),
    WindowUpdate(WindowUpdate),
}

impl fmt::Debug for Frame {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use self::Frame::*;

        match *self {
            Data(ref frame) => fmt::Debug::fmt(frame, fmt),
            SynStream(ref frame) => fmt::Debug::fmt(frame, fmt),
            SynReply(ref frame) => fmt::Debug::fmt(frame, fmt),
            RstStream(ref frame) => fmt::Debug::fmt(frame, fmt),
            Settings(ref frame) => fmt::Debug::fmt(frame, fmt),
            Ping(ref frame) => fmt::Debug::fmt(frame, fmt),
            GoAway(ref frame) => fmt::Debug::fmt(frame, fmt),
            Headers(ref frame) => fmt::Debug::fmt(frame, fmt),
            WindowUpdate(ref frame) => fmt::Debug::fmt(frame, fmt),
        }
    }
}
