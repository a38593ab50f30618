// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Strkey encoding for 32-byte keys
//!
//! Payload layout is one version byte, the key, then a little-endian
//! CRC-16/XMODEM over both, base32 encoded to a fixed 56 characters
//! (35 bytes is a multiple of the base32 group size, so no padding is
//! ever emitted).

use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32;

use crate::engine::Error;

/// Encoded strkey length in characters
pub const STRKEY_LEN: usize = 56;

/// ed25519 account version byte, keys render with a leading 'G'
const VERSION_ACCOUNT: u8 = 6 << 3;

/// Pre-auth transaction hash version byte, leading 'T'
const VERSION_PRE_AUTH_TX: u8 = 19 << 3;

/// Hash(x) signer version byte, leading 'X'
const VERSION_HASH_X: u8 = 23 << 3;

const CHECKSUM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

fn encode<'a>(version: u8, key: &[u8; 32], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    let mut payload = [0u8; 35];
    payload[0] = version;
    payload[1..33].copy_from_slice(key);

    let crc = CHECKSUM.checksum(&payload[..33]);
    payload[33..35].copy_from_slice(&crc.to_le_bytes());

    let out = buff.get_mut(..STRKEY_LEN).ok_or(Error::EncodingFailed)?;
    BASE32.encode_mut(&payload, out);

    core::str::from_utf8(&buff[..STRKEY_LEN]).map_err(|_| Error::EncodingFailed)
}

/// Encode an ed25519 public key
pub fn encode_account<'a>(key: &[u8; 32], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    encode(VERSION_ACCOUNT, key, buff)
}

/// Encode a pre-auth transaction hash signer
pub fn encode_pre_auth_tx<'a>(hash: &[u8; 32], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    encode(VERSION_PRE_AUTH_TX, hash, buff)
}

/// Encode a hash(x) signer
pub fn encode_hash_x<'a>(hash: &[u8; 32], buff: &'a mut [u8]) -> Result<&'a str, Error> {
    encode(VERSION_HASH_X, hash, buff)
}
