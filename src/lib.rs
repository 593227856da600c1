//! Decoder for hex-encoded GT06 GPS tracker frames.
//!
//! A batch of hex lines is turned into one [`types::Record`] per line
//! (login, location, heartbeat or a failure placeholder) and grouped under
//! the first IMEI it carries.

pub mod decode_basics;
pub mod decode_batch;
pub mod decode_frame;
pub mod decode_gt06;
pub mod decode_line;
pub mod service;
pub mod types;

pub use decode_batch::{decode_batch, decode_flat};
pub use decode_line::decode_line;
pub use service::{handle_request, DecodeResponse, RequestLimits, ResponseMode};
pub use types::{BatchResult, DecodeError, Record, RequestError};
