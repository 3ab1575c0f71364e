mod error;
mod handler;
mod session;
mod stream;
mod window;

pub use error::{UnsupportedVersion, UserError};
pub use handler::{CloseState, Config, Peer, SessionHandler};

pub(crate) use error::RecvError;

use session::Session;
use window::Window;

pub type WindowSize = i32;

pub const MAX_WINDOW_SIZE: WindowSize = i32::MAX;
pub const DEFAULT_INITIAL_WINDOW_SIZE: WindowSize = 64 * 1024;

pub const SPDY_MIN_VERSION: u8 = 2;
pub const SPDY_MAX_VERSION: u8 = 3;
