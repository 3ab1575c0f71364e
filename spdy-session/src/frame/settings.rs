use std::collections::BTreeMap;
use std::fmt;

use crate::frame::Frame;

pub const SETTINGS_UPLOAD_BANDWIDTH: u32 = 1;
pub const SETTINGS_DOWNLOAD_BANDWIDTH: u32 = 2;
pub const SETTINGS_ROUND_TRIP_TIME: u32 = 3;
pub const SETTINGS_MAX_CONCURRENT_STREAMS: u32 = 4;
pub const SETTINGS_CURRENT_CWND: u32 = 5;
pub const SETTINGS_DOWNLOAD_RETRANS_RATE: u32 = 6;
pub const SETTINGS_INITIAL_WINDOW_SIZE: u32 = 7;
pub const SETTINGS_CLIENT_CERTIFICATE_VECTOR_SIZE: u32 = 8;

const FLAG_PERSIST_VALUE: u8 = 0x01;
const FLAG_PERSISTED: u8 = 0x02;

/// A collection of id/value settings, each with its persistence flag bits.
#[derive(Clone, Eq, PartialEq, Default)]
pub struct Settings {
    entries: BTreeMap<u32, Setting>,
    clear_previously_persisted: bool,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct Setting {
    value: u32,
    flags: u8,
}

impl Settings {
    pub fn new() -> Self {
        Settings::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<u32> {
        self.entries.get(&id).map(|s| s.value)
    }

    pub fn set(&mut self, id: u32, value: u32) {
        self.entries
            .entry(id)
            .and_modify(|s| s.value = value)
            .or_insert(Setting { value, flags: 0 });
    }

    pub fn remove(&mut self, id: u32) {
        self.entries.remove(&id);
    }

    /// The sender asks the receiver to persist this value.
    pub fn is_persist_value(&self, id: u32) -> bool {
        self.entries
            .get(&id)
            .map_or(false, |s| s.flags & FLAG_PERSIST_VALUE != 0)
    }

    pub fn set_persist_value(&mut self, id: u32, persist: bool) {
        if let Some(s) = self.entries.get_mut(&id) {
            if persist {
                s.flags |= FLAG_PERSIST_VALUE;
            } else {
                s.flags &= !FLAG_PERSIST_VALUE;
            }
        }
    }

    /// The sender indicates this value was persisted from an earlier session.
    pub fn is_persisted(&self, id: u32) -> bool {
        self.entries
            .get(&id)
            .map_or(false, |s| s.flags & FLAG_PERSISTED != 0)
    }

    pub fn set_persisted(&mut self, id: u32, persisted: bool) {
        if let Some(s) = self.entries.get_mut(&id) {
            if persisted {
                s.flags |= FLAG_PERSISTED;
            } else {
                s.flags &= !FLAG_PERSISTED;
            }
        }
    }

    pub fn clear_previously_persisted(&self) -> bool {
        self.clear_previously_persisted
    }

    pub fn set_clear_previously_persisted(&mut self, val: bool) {
        self.clear_previously_persisted = val;
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }
}

impl From<Settings> for Frame {
    fn from(src: Settings) -> Self {
        Frame::Settings(src)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut f = fmt.debug_struct("Settings");
        for (id, s) in &self.entries {
            let name = match *id {
                SETTINGS_MAX_CONCURRENT_STREAMS => "max_concurrent_streams",
                SETTINGS_INITIAL_WINDOW_SIZE => "initial_window_size",
                _ => "setting",
            };
            f.field(name, &s.value);
        }
        f.finish()
    }
}
