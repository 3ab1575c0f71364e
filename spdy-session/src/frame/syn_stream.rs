use http::HeaderMap;
use std::fmt;

use crate::frame::{Frame, StreamId};

/// Opens a stream. Carries the initiator's header block, the stream
/// priority, and the half-close flags.
#[derive(Clone, Eq, PartialEq)]
pub struct SynStream {
    stream_id: StreamId,
    associated_to: StreamId,
    priority: u8,
    slot: u8,
    flags: SynStreamFlags,
    invalid: bool,
    headers: HeaderMap,
}

#[derive(Copy, Clone, Eq, PartialEq, Default)]
struct SynStreamFlags(u8);

const FLAG_FIN: u8 = 0x01;
const FLAG_UNIDIRECTIONAL: u8 = 0x02;

impl SynStream {
    pub fn new(stream_id: StreamId) -> Self {
        debug_assert!(!stream_id.is_zero());

        SynStream {
            stream_id,
            associated_to: StreamId::ZERO,
            priority: 0,
            slot: 0,
            flags: SynStreamFlags::default(),
            invalid: false,
            headers: HeaderMap::new(),
        }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn associated_to(&self) -> StreamId {
        self.associated_to
    }

    pub fn set_associated_to(&mut self, id: StreamId) {
        self.associated_to = id;
    }

    /// 3-bit priority, 0 is highest.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: u8) {
        debug_assert!(priority <= 7, "priority is 3 bits: {}", priority);
        self.priority = priority & 0x07;
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn set_slot(&mut self, slot: u8) {
        self.slot = slot;
    }

    pub fn is_last(&self) -> bool {
        self.flags.0 & FLAG_FIN == FLAG_FIN
    }

    pub fn set_last(&mut self, val: bool) {
        if val {
            self.flags.0 |= FLAG_FIN;
        } else {
            self.flags.0 &= !FLAG_FIN;
        }
    }

    pub fn is_unidirectional(&self) -> bool {
        self.flags.0 & FLAG_UNIDIRECTIONAL == FLAG_UNIDIRECTIONAL
    }

    pub fn set_unidirectional(&mut self, val: bool) {
        if val {
            self.flags.0 |= FLAG_UNIDIRECTIONAL;
        } else {
            self.flags.0 &= !FLAG_UNIDIRECTIONAL;
        }
    }

    /// Set by the decoder when the header block failed to decompress.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self) {
        self.invalid = true;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl From<SynStream> for Frame {
    fn from(src: SynStream) -> Self {
        Frame::SynStream(src)
    }
}

impl fmt::Debug for SynStream {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("SynStream")
            .field("stream_id", &self.stream_id)
            .field("priority", &self.priority)
            .field("last", &self.is_last())
            .field("unidirectional", &self.is_unidirectional())
            .finish()
    }
}
