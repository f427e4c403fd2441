use std::borrow::Cow;
use std::fmt::{Debug, Display};

/// Error types used throughout the `link_resolve` library.
///
/// Diagnostics such as multiple definitions or unresolved references are not
/// errors; they are part of a normal resolution run and flow through
/// [`LinkOutcome`](crate::LinkOutcome). An `Error` means the run itself could
/// not continue.
#[derive(Debug)]
pub enum Error {
    /// An error occurred while touching the filesystem.
    ///
    /// This error typically indicates issues such as:
    /// * Failing to create or remove the archive extraction workspace
    /// * Failing to list extracted archive members
    Io {
        /// A descriptive message about the I/O error.
        msg: Cow<'static, str>,
    },

    /// An external collaborator (symbol source or archive extractor)
    /// failed to launch or to produce readable output.
    ///
    /// Nothing partially resolved is trustworthy after this, so the whole
    /// resolution run is aborted.
    Collaborator {
        /// A descriptive message about the collaborator failure.
        msg: Cow<'static, str>,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io { msg } => write!(f, "I/O error: {msg}"),
            Error::Collaborator { msg } => write!(f, "collaborator error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Creates an I/O error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn io_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Io { msg: msg.into() }
}

/// Creates a collaborator-failure error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn collaborator_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Collaborator { msg: msg.into() }
}

pub type Result<T> = core::result::Result<T, Error>;
