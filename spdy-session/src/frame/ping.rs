use std::fmt;

use crate::frame::Frame;

/// PING carries a full 32-bit id, not a stream id. The id's parity encodes
/// the originator the same way stream ids do.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Ping {
    id: u32,
}

impl Ping {
    pub fn new(id: u32) -> Self {
        Ping { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl From<Ping> for Frame {
    fn from(src: Ping) -> Self {
        Frame::Ping(src)
    }
}

impl fmt::Debug for Ping {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Ping").field("id", &self.id).finish()
    }
}
