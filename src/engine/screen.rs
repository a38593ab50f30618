// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Review screen, one caption/value pair plus the operation position line

use emstr::EncodeStr;
use heapless::String;

use super::Error;

/// Maximum length of the operation position line ("Operation 100 of 100")
pub const SCREEN_POSITION_LEN: usize = 20;

/// Maximum caption length in bytes
pub const SCREEN_CAPTION_LEN: usize = 20;

/// Maximum rendered value length in bytes, sized for a full strkey encoded
/// public key with headroom for amount + asset code lines
pub const SCREEN_VALUE_LEN: usize = 88;

/// A single review screen
///
/// Only one screen exists per session; advancing or retreating re-renders
/// it in place. [`Step`][super::Step] hands the caller a copy.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Screen {
    pub(crate) position: String<SCREEN_POSITION_LEN>,
    pub(crate) caption: String<SCREEN_CAPTION_LEN>,
    pub(crate) value: String<SCREEN_VALUE_LEN>,
}

impl Screen {
    pub const fn new() -> Self {
        Self {
            position: String::new(),
            caption: String::new(),
            value: String::new(),
        }
    }

    /// Operation position line, empty for single-operation transactions
    /// and transaction-level screens
    pub fn position(&self) -> Option<&str> {
        match self.position.is_empty() {
            true => None,
            false => Some(self.position.as_str()),
        }
    }

    /// Screen caption
    pub fn caption(&self) -> &str {
        self.caption.as_str()
    }

    /// Rendered field value, may be empty for caption-only screens
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Clear all three lines
    pub(crate) fn clear(&mut self) {
        self.position.clear();
        self.caption.clear();
        self.value.clear();
    }

    pub(crate) fn set_caption(&mut self, caption: &str) -> Result<(), Error> {
        self.caption
            .push_str(caption)
            .map_err(|_| Error::EncodingFailed)
    }

    pub(crate) fn set_value(&mut self, value: &str) -> Result<(), Error> {
        self.value
            .push_str(value)
            .map_err(|_| Error::EncodingFailed)
    }

    /// Set the "Operation i of N" position line
    pub(crate) fn set_position(&mut self, index: u8, count: u8) -> Result<(), Error> {
        let mut buff = [0u8; SCREEN_POSITION_LEN];

        let n = emstr::write!(&mut buff[..], "Operation ", index, " of ", count)
            .map_err(|_| Error::EncodingFailed)?;

        let s = core::str::from_utf8(&buff[..n]).map_err(|_| Error::EncodingFailed)?;

        self.position.clear();
        self.position.push_str(s).map_err(|_| Error::EncodingFailed)
    }
}
