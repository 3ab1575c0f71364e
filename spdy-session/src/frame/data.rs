use bytes::Bytes;
use std::fmt;

use crate::frame::{Frame, StreamId};

#[derive(Clone, Eq, PartialEq)]
pub struct Data {
    stream_id: StreamId,
    data: Bytes,
    flags: DataFlags,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct DataFlags(u8);

const FLAG_FIN: u8 = 0x01;

impl Data {
    pub fn new(stream_id: StreamId, payload: Bytes) -> Self {
        debug_assert!(!stream_id.is_zero());

        Data {
            stream_id,
            data: payload,
            flags: DataFlags::default(),
        }
    }

    pub fn stream_id(&self) -> StreamId {
        self.stream_id
    }

    pub fn is_last(&self) -> bool {
        self.flags.is_fin()
    }

    pub fn set_last(&mut self, val: bool) {
        if val {
            self.flags.set_fin();
        } else {
            self.flags.unset_fin();
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn payload(&self) -> &Bytes {
        &self.data
    }

    pub fn into_payload(self) -> Bytes {
        self.data
    }

    /// Splits off the first `at` bytes into a new non-final frame on the
    /// same stream, leaving the remainder in `self`. The underlying buffer
    /// is shared, not copied.
    pub(crate) fn split_to(&mut self, at: usize) -> Data {
        Data {
            stream_id: self.stream_id,
            data: self.data.split_to(at),
            flags: DataFlags::default(),
        }
    }
}

impl From<Data> for Frame {
    fn from(src: Data) -> Self {
        Frame::Data(src)
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Data")
            .field("stream_id", &self.stream_id)
            .field("len", &self.data.len())
            .field("last", &self.is_last())
            .finish()
    }
}

impl DataFlags {
    fn is_fin(&self) -> bool {
        self.0 & FLAG_FIN == FLAG_FIN
    }

    fn set_fin(&mut self) {
        self.0 |= FLAG_FIN
    }

    fn unset_fin(&mut self) {
        self.0 &= !FLAG_FIN
    }
}

impl Default for DataFlags {
    fn default() -> Self {
        DataFlags(0)
    }
}
