// Copyright (c) 2022-2023 The MobileCoin Foundation

/// [ReviewSession][super::ReviewSession] errors
///
/// All variants are fatal to the active session: once returned, further
/// navigation calls fail with [`Error::InvalidState`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Malformed or truncated transaction
    #[cfg_attr(feature = "thiserror", error("transaction decoding failed"))]
    DecodeFailed = 0x01,

    /// Operation kind outside the supported table
    #[cfg_attr(feature = "thiserror", error("unsupported operation kind"))]
    UnsupportedOperation = 0x02,

    /// Formatter chain exceeded the provisioned stack depth
    #[cfg_attr(feature = "thiserror", error("formatter stack overflow"))]
    StackOverflow = 0x03,

    /// Invalid session state
    #[cfg_attr(feature = "thiserror", error("invalid session state"))]
    InvalidState = 0x04,

    /// Screen encoding failed
    #[cfg_attr(feature = "thiserror", error("screen encoding failed"))]
    EncodingFailed = 0x05,
}
