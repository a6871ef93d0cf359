mod client_session;
mod coordinator;
mod message;
mod stroke_capture;
mod traits;
mod types;

pub use client_session::*;
pub use coordinator::*;
pub use message::*;
pub use stroke_capture::*;
pub use traits::*;
pub use types::*;

pub extern crate serde;
pub extern crate serde_json;
