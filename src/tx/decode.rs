// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Incremental signature-base decoder
//!
//! The reviewed buffer is the Stellar signature base: a 32-byte network id,
//! a big-endian envelope type tag, then the transaction XDR. The header is
//! decoded once at session start; operations are decoded one at a time as
//! the user pages forward, resuming from the byte offset of the previous
//! decode. Backward navigation restarts from offset zero and replays.
//!
//! Decoding is fail-closed: truncation, invalid tags, over-bound lengths
//! and non-UTF-8 text are all rejected rather than rendered. A field that
//! cannot be decoded is a field that cannot be reviewed.

use byteorder::{BigEndian, ByteOrder};
use heapless::{String, Vec};

use crate::engine::Error;

use super::{
    AccountId, Asset, AssetCode, Memo, Operation, OperationBody, OperationKind, Price,
    SetOptionsOp, Signer, SignerKey, TimeBounds, TxHeader, HOME_DOMAIN_LEN, MAX_PATH_LEN,
    MAX_TX_OPS, MEMO_TEXT_LEN, DATA_VALUE_LEN,
};

/// Envelope type tag for a classic transaction signature base
const ENVELOPE_TYPE_TX: u32 = 2;

/// Bounds-checked big-endian reader over the raw buffer
struct Reader<'a> {
    buff: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(buff: &'a [u8], offset: usize) -> Self {
        Self { buff, offset }
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let end = self.offset.checked_add(n).ok_or(Error::DecodeFailed)?;
        if end > self.buff.len() {
            return Err(Error::DecodeFailed);
        }

        let b = &self.buff[self.offset..end];
        self.offset = end;
        Ok(b)
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(BigEndian::read_u64(self.read_bytes(8)?))
    }

    fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    fn read_array32(&mut self) -> Result<[u8; 32], Error> {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.read_bytes(32)?);
        Ok(out)
    }

    /// Optional-field marker, strictly 0 or 1
    fn read_present(&mut self) -> Result<bool, Error> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::DecodeFailed),
        }
    }

    /// Variable-length opaque/string payload, four-byte aligned
    fn read_var_bytes(&mut self, max: usize) -> Result<&'a [u8], Error> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(Error::DecodeFailed);
        }

        let b = self.read_bytes(len)?;

        let pad = (4 - len % 4) % 4;
        if pad > 0 {
            self.read_bytes(pad)?;
        }

        Ok(b)
    }

    fn read_str(&mut self, max: usize) -> Result<&'a str, Error> {
        let b = self.read_var_bytes(max)?;
        core::str::from_utf8(b).map_err(|_| Error::DecodeFailed)
    }

    /// ed25519 account id, key-type tag then 32 bytes
    fn read_account_id(&mut self) -> Result<AccountId, Error> {
        if self.read_u32()? != 0 {
            return Err(Error::DecodeFailed);
        }
        Ok(AccountId(self.read_array32()?))
    }

    /// Fixed-width alphanumeric asset code, NUL-trimmed
    fn read_asset_code(&mut self, width: usize) -> Result<AssetCode, Error> {
        let b = self.read_bytes(width)?;
        let trimmed = match b.iter().position(|&c| c == 0) {
            Some(n) => &b[..n],
            None => b,
        };
        let s = core::str::from_utf8(trimmed).map_err(|_| Error::DecodeFailed)?;

        let mut code = AssetCode::new();
        code.push_str(s).map_err(|_| Error::DecodeFailed)?;
        Ok(code)
    }

    fn read_asset(&mut self) -> Result<Asset, Error> {
        match self.read_u32()? {
            0 => Ok(Asset::Native),
            1 => Ok(Asset::AlphaNum4 {
                code: self.read_asset_code(4)?,
                issuer: self.read_account_id()?,
            }),
            2 => Ok(Asset::AlphaNum12 {
                code: self.read_asset_code(12)?,
                issuer: self.read_account_id()?,
            }),
            _ => Err(Error::DecodeFailed),
        }
    }

    /// Rational price, denominator must be positive and numerator
    /// non-negative so the fixed-point conversion cannot misbehave
    fn read_price(&mut self) -> Result<Price, Error> {
        let n = self.read_i32()?;
        let d = self.read_i32()?;
        if n < 0 || d <= 0 {
            return Err(Error::DecodeFailed);
        }
        Ok(Price { n, d })
    }

    fn read_signer_key(&mut self) -> Result<SignerKey, Error> {
        match self.read_u32()? {
            0 => Ok(SignerKey::Ed25519(AccountId(self.read_array32()?))),
            1 => Ok(SignerKey::PreAuthTx(self.read_array32()?)),
            2 => Ok(SignerKey::HashX(self.read_array32()?)),
            _ => Err(Error::DecodeFailed),
        }
    }

    fn read_memo(&mut self) -> Result<Memo, Error> {
        match self.read_u32()? {
            0 => Ok(Memo::None),
            1 => {
                let s = self.read_str(MEMO_TEXT_LEN)?;
                let mut text = String::new();
                text.push_str(s).map_err(|_| Error::DecodeFailed)?;
                Ok(Memo::Text(text))
            }
            2 => Ok(Memo::Id(self.read_u64()?)),
            3 => Ok(Memo::Hash(self.read_array32()?)),
            4 => Ok(Memo::Return(self.read_array32()?)),
            _ => Err(Error::DecodeFailed),
        }
    }
}

/// Decode the signature-base prefix and transaction header, returning the
/// header and the offset of the first operation
pub fn decode_header(buff: &[u8]) -> Result<(TxHeader, usize), Error> {
    let mut r = Reader::new(buff, 0);

    let network_id = r.read_array32()?;
    let network = super::Network::from_id(&network_id);

    if r.read_u32()? != ENVELOPE_TYPE_TX {
        return Err(Error::DecodeFailed);
    }

    let source = r.read_account_id()?;
    let fee = r.read_u32()?;

    // Sequence number, decoded for position only
    r.read_i64()?;

    let time_bounds = match r.read_present()? {
        true => Some(TimeBounds {
            min_time: r.read_u64()?,
            max_time: r.read_u64()?,
        }),
        false => None,
    };

    let memo = r.read_memo()?;

    let op_count = r.read_u32()?;
    if op_count == 0 || op_count > MAX_TX_OPS as u32 {
        return Err(Error::DecodeFailed);
    }

    let header = TxHeader {
        network,
        source,
        fee,
        time_bounds,
        memo,
        op_count: op_count as u8,
    };

    Ok((header, r.offset))
}

/// Decode a single operation at `offset`, returning it with the offset of
/// the next operation
#[cfg_attr(feature = "noinline", inline(never))]
pub fn decode_operation(buff: &[u8], offset: usize) -> Result<(Operation, usize), Error> {
    let mut r = Reader::new(buff, offset);

    let source = match r.read_present()? {
        true => Some(r.read_account_id()?),
        false => None,
    };

    let kind = OperationKind::try_from(r.read_u32()?).map_err(|_| Error::UnsupportedOperation)?;

    let body = match kind {
        OperationKind::CreateAccount => OperationBody::CreateAccount {
            destination: r.read_account_id()?,
            starting_balance: r.read_i64()?,
        },
        OperationKind::Payment => OperationBody::Payment {
            destination: r.read_account_id()?,
            asset: r.read_asset()?,
            amount: r.read_i64()?,
        },
        OperationKind::PathPayment => {
            let send_asset = r.read_asset()?;
            let send_max = r.read_i64()?;
            let destination = r.read_account_id()?;
            let dest_asset = r.read_asset()?;
            let dest_amount = r.read_i64()?;

            let path_len = r.read_u32()? as usize;
            if path_len > MAX_PATH_LEN {
                return Err(Error::DecodeFailed);
            }
            let mut path = Vec::new();
            for _ in 0..path_len {
                path.push(r.read_asset()?).map_err(|_| Error::DecodeFailed)?;
            }

            OperationBody::PathPayment {
                send_asset,
                send_max,
                destination,
                dest_asset,
                dest_amount,
                path,
            }
        }
        OperationKind::ManageSellOffer => OperationBody::ManageSellOffer {
            selling: r.read_asset()?,
            buying: r.read_asset()?,
            amount: r.read_i64()?,
            price: r.read_price()?,
            offer_id: r.read_u64()?,
        },
        OperationKind::CreatePassiveSellOffer => OperationBody::CreatePassiveSellOffer {
            selling: r.read_asset()?,
            buying: r.read_asset()?,
            amount: r.read_i64()?,
            price: r.read_price()?,
        },
        OperationKind::SetOptions => {
            let mut op = SetOptionsOp::default();

            if r.read_present()? {
                op.inflation_dest = Some(r.read_account_id()?);
            }
            if r.read_present()? {
                op.clear_flags = r.read_u32()?;
            }
            if r.read_present()? {
                op.set_flags = r.read_u32()?;
            }
            if r.read_present()? {
                op.master_weight = Some(r.read_u32()?);
            }
            if r.read_present()? {
                op.low_threshold = Some(r.read_u32()?);
            }
            if r.read_present()? {
                op.medium_threshold = Some(r.read_u32()?);
            }
            if r.read_present()? {
                op.high_threshold = Some(r.read_u32()?);
            }
            if r.read_present()? {
                let s = r.read_str(HOME_DOMAIN_LEN)?;
                let mut domain = String::new();
                domain.push_str(s).map_err(|_| Error::DecodeFailed)?;
                op.home_domain = Some(domain);
            }
            if r.read_present()? {
                op.signer = Some(Signer {
                    key: r.read_signer_key()?,
                    weight: r.read_u32()?,
                });
            }

            OperationBody::SetOptions(op)
        }
        OperationKind::ChangeTrust => OperationBody::ChangeTrust {
            line: r.read_asset()?,
            limit: r.read_i64()?,
        },
        OperationKind::AllowTrust => {
            let trustor = r.read_account_id()?;
            let asset_code = match r.read_u32()? {
                1 => r.read_asset_code(4)?,
                2 => r.read_asset_code(12)?,
                _ => return Err(Error::DecodeFailed),
            };
            let authorize = r.read_present()?;

            OperationBody::AllowTrust {
                trustor,
                asset_code,
                authorize,
            }
        }
        OperationKind::AccountMerge => OperationBody::AccountMerge {
            destination: r.read_account_id()?,
        },
        OperationKind::Inflation => OperationBody::Inflation,
        OperationKind::ManageData => {
            let s = r.read_str(DATA_VALUE_LEN)?;
            let mut name = String::new();
            name.push_str(s).map_err(|_| Error::DecodeFailed)?;

            let value = match r.read_present()? {
                true => {
                    let b = r.read_var_bytes(DATA_VALUE_LEN)?;
                    Some(Vec::from_slice(b).map_err(|_| Error::DecodeFailed)?)
                }
                false => None,
            };

            OperationBody::ManageData { name, value }
        }
        OperationKind::BumpSequence => OperationBody::BumpSequence {
            bump_to: r.read_i64()?,
        },
        OperationKind::ManageBuyOffer => OperationBody::ManageBuyOffer {
            selling: r.read_asset()?,
            buying: r.read_asset()?,
            amount: r.read_i64()?,
            price: r.read_price()?,
            offer_id: r.read_u64()?,
        },
    };

    Ok((Operation { source, body }, r.offset))
}

/// Validate the transaction tail after the final operation: a zero
/// extension tag and nothing further
pub(crate) fn decode_tail(buff: &[u8], offset: usize) -> Result<(), Error> {
    let mut r = Reader::new(buff, offset);

    if r.read_u32()? != 0 {
        return Err(Error::DecodeFailed);
    }
    if r.offset != buff.len() {
        return Err(Error::DecodeFailed);
    }

    Ok(())
}
