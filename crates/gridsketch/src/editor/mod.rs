//! Interactive editing
//!
//! Tool modes and the session state that maps pointer gestures and typed
//! text onto diagram mutations.

mod mode;
mod session;

pub use mode::*;
pub use session::*;
