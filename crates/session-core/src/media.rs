//! Media streams owned outside the negotiation core

use std::fmt::Debug;

/// A captured or received media stream
///
/// Local streams belong to the caller. Remote streams are handed over by the
/// transport engine, and the session stops their tracks when it closes.
pub trait MediaStream: Debug + Send + Sync {
    /// Stream identifier as known to the transport engine
    fn id(&self) -> &str;

    /// Stop every track of the stream
    fn stop_tracks(&self);
}
