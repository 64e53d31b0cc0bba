use std::io::Write;

use crate::error::Result;

/// Opens a fresh byte stream to the controller.
///
/// Each command gets its own connection; the stream is dropped (and closed)
/// once the message is written.
pub trait Connector {
    type Stream: Write;

    fn connect(&self) -> Result<Self::Stream>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Stream = C::Stream;

    fn connect(&self) -> Result<Self::Stream> {
        (**self).connect()
    }
}
