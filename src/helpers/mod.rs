// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Field rendering helpers
//!
//! Shared no-alloc encoders used by the formatter library. Helpers write
//! into a caller provided buffer and return the rendered `&str`, keeping
//! all storage on the caller's stack.

use emstr::EncodeStr;

use crate::engine::Error;
use crate::tx::{AccountFlags, Asset, Network};

pub mod strkey;

/// Stroops per whole asset unit
pub const AMOUNT_SCALAR: u64 = 10_000_000;

/// Leading characters kept by the default summary
pub const SUMMARY_HEAD: usize = 12;

/// Trailing characters kept by the default summary
pub const SUMMARY_TAIL: usize = 12;

fn complete(buff: &[u8], n: usize) -> Result<&str, Error> {
    core::str::from_utf8(buff.get(..n).ok_or(Error::EncodingFailed)?)
        .map_err(|_| Error::EncodingFailed)
}

/// Render a raw amount as a decimal with exactly seven fraction digits,
/// with an optional asset code suffix
///
/// `i64::MAX` renders as `[maximum]`, the sentinel for an unbounded
/// trust line limit.
pub fn fmt_amount<'a>(
    value: i64,
    code: Option<&str>,
    buff: &'a mut [u8],
) -> Result<&'a str, Error> {
    if value == i64::MAX {
        let n = emstr::write!(&mut buff[..], "[maximum]").map_err(|_| Error::EncodingFailed)?;
        return complete(buff, n);
    }

    let magnitude = value.unsigned_abs();
    let whole = magnitude / AMOUNT_SCALAR;
    let mut frac = magnitude % AMOUNT_SCALAR;

    let mut digits = [b'0'; 7];
    for d in digits.iter_mut().rev() {
        *d = b'0' + (frac % 10) as u8;
        frac /= 10;
    }
    let frac = core::str::from_utf8(&digits).map_err(|_| Error::EncodingFailed)?;

    let mut n = 0;
    if value < 0 {
        n += emstr::write!(&mut buff[n..], "-").map_err(|_| Error::EncodingFailed)?;
    }

    n += emstr::write!(&mut buff[n..], whole, ".", frac).map_err(|_| Error::EncodingFailed)?;

    if let Some(code) = code {
        n += emstr::write!(&mut buff[n..], " ", code).map_err(|_| Error::EncodingFailed)?;
    }

    complete(buff, n)
}

/// Render an unsigned integer
pub fn fmt_uint(value: u64, buff: &mut [u8]) -> Result<&str, Error> {
    let n = emstr::write!(&mut buff[..], value).map_err(|_| Error::EncodingFailed)?;
    complete(buff, n)
}

/// Render a signed integer
pub fn fmt_int(value: i64, buff: &mut [u8]) -> Result<&str, Error> {
    let n = emstr::write!(&mut buff[..], value).map_err(|_| Error::EncodingFailed)?;
    complete(buff, n)
}

/// Truncate a string to `head` leading and `tail` trailing characters
/// joined by `..`
///
/// Strings no longer than the summary itself pass through unchanged.
/// Boundaries are computed over characters so multi-byte input is never
/// split mid-codepoint.
pub fn summarize<'a>(
    s: &str,
    head: usize,
    tail: usize,
    buff: &'a mut [u8],
) -> Result<&'a str, Error> {
    let count = s.chars().count();

    if count <= head + tail + 2 {
        let n = emstr::write!(&mut buff[..], s).map_err(|_| Error::EncodingFailed)?;
        return complete(buff, n);
    }

    let head_end = s
        .char_indices()
        .nth(head)
        .map(|(i, _)| i)
        .ok_or(Error::EncodingFailed)?;
    let tail_start = s
        .char_indices()
        .nth(count - tail)
        .map(|(i, _)| i)
        .ok_or(Error::EncodingFailed)?;

    let n = emstr::write!(&mut buff[..], &s[..head_end], "..", &s[tail_start..])
        .map_err(|_| Error::EncodingFailed)?;

    complete(buff, n)
}

/// Render binary data as a summarized `0x` prefixed lowercase hex string
pub fn fmt_hex_summary<'a>(data: &[u8], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    const TABLE: &[u8; 16] = b"0123456789abcdef";

    // Sized for a 32-byte digest
    let mut hex = [0u8; 66];
    if data.len() * 2 + 2 > hex.len() {
        return Err(Error::EncodingFailed);
    }

    hex[0] = b'0';
    hex[1] = b'x';
    for (i, b) in data.iter().enumerate() {
        hex[2 + i * 2] = TABLE[(b >> 4) as usize];
        hex[3 + i * 2] = TABLE[(b & 0x0f) as usize];
    }

    let s = core::str::from_utf8(&hex[..2 + data.len() * 2]).map_err(|_| Error::EncodingFailed)?;

    summarize(s, SUMMARY_HEAD, SUMMARY_TAIL, buff)
}

/// Render a set of account authorization flags in wire bit order
pub fn fmt_flags(flags: u32, buff: &mut [u8]) -> Result<&str, Error> {
    let flags = AccountFlags::from_bits_truncate(flags);

    let mut n = 0;
    for (flag, name) in [
        (AccountFlags::AUTH_REQUIRED, "Auth required"),
        (AccountFlags::AUTH_REVOCABLE, "Auth revocable"),
        (AccountFlags::AUTH_IMMUTABLE, "Auth immutable"),
    ] {
        if !flags.contains(flag) {
            continue;
        }
        if n != 0 {
            n += emstr::write!(&mut buff[n..], ", ").map_err(|_| Error::EncodingFailed)?;
        }
        n += emstr::write!(&mut buff[n..], name).map_err(|_| Error::EncodingFailed)?;
    }

    complete(buff, n)
}

/// Render binary data as standard base64
pub fn fmt_base64<'a>(data: &[u8], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    use base64::Engine;

    let n = base64::engine::general_purpose::STANDARD
        .encode_slice(data, buff)
        .map_err(|_| Error::EncodingFailed)?;

    complete(buff, n)
}

/// Render an asset as its code, with a summarized issuer suffix for
/// alphanumeric assets
pub fn fmt_asset<'a>(asset: &Asset, network: Network, buff: &'a mut [u8]) -> Result<&'a str, Error> {
    let issuer = match asset.issuer() {
        Some(issuer) => issuer,
        None => {
            let n = emstr::write!(&mut buff[..], network.native_symbol())
                .map_err(|_| Error::EncodingFailed)?;
            return complete(buff, n);
        }
    };

    let mut key = [0u8; strkey::STRKEY_LEN];
    let key = strkey::encode_account(&issuer.0, &mut key)?;

    let mut summary = [0u8; 16];
    let summary = summarize(key, 3, 4, &mut summary)?;

    let n = emstr::write!(&mut buff[..], asset.code(network), "@", summary)
        .map_err(|_| Error::EncodingFailed)?;

    complete(buff, n)
}

/// Render a payment path as a comma separated list of asset codes
pub fn fmt_path<'a>(path: &[Asset], network: Network, buff: &'a mut [u8]) -> Result<&'a str, Error> {
    let mut n = 0;
    for (i, asset) in path.iter().enumerate() {
        if i != 0 {
            n += emstr::write!(&mut buff[n..], ", ").map_err(|_| Error::EncodingFailed)?;
        }
        n += emstr::write!(&mut buff[n..], asset.code(network)).map_err(|_| Error::EncodingFailed)?;
    }

    complete(buff, n)
}
