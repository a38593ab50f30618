// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Decoded transaction model
//!
//! Types produced by the incremental [decoder][crate::tx::decode] and
//! consumed read-only by the formatter library. Sizes mirror the wire
//! bounds enforced at decode time, keeping every field in fixed storage.

use core::fmt::{self, Debug, Display};

use const_decoder::Decoder;
use heapless::{String, Vec};
use num_enum::TryFromPrimitive;
use sha2::{Digest as _, Sha256};
use strum::{EnumCount, EnumIter};

pub mod decode;

/// Maximum length of the raw signature base buffer
pub const MAX_TX_LEN: usize = 1120;

/// Maximum number of operations per transaction
pub const MAX_TX_OPS: u8 = 100;

/// Maximum intermediate assets in a path payment
pub const MAX_PATH_LEN: usize = 5;

/// Maximum memo text length in bytes
pub const MEMO_TEXT_LEN: usize = 28;

/// Maximum home domain length in bytes
pub const HOME_DOMAIN_LEN: usize = 32;

/// Maximum data entry name / value length in bytes
pub const DATA_VALUE_LEN: usize = 64;

/// Maximum asset code length in bytes
pub const ASSET_CODE_LEN: usize = 12;

/// Alphanumeric asset code, NUL-trimmed at decode
pub type AssetCode = String<ASSET_CODE_LEN>;

/// ed25519 account identifier
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct AccountId(pub [u8; 32]);

impl Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// SHA-256 of the raw signature base, the digest released on approval
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// Compute the hash over a raw signature base
    pub fn of(raw: &[u8]) -> Self {
        let mut h = Sha256::new();
        h.update(raw);
        Self(h.finalize().into())
    }
}

impl Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

const NETWORK_ID_PUBLIC: [u8; 32] =
    Decoder::Hex.decode(b"7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979");

const NETWORK_ID_TEST: [u8; 32] =
    Decoder::Hex.decode(b"cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472");

/// Network a transaction is bound to, recovered from the network id hash
/// leading the signature base
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumIter)]
pub enum Network {
    Public,
    Test,
    #[default]
    Unknown,
}

impl Network {
    /// Match a raw network id against the known network table
    pub fn from_id(id: &[u8; 32]) -> Self {
        if id == &NETWORK_ID_PUBLIC {
            Network::Public
        } else if id == &NETWORK_ID_TEST {
            Network::Test
        } else {
            Network::Unknown
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Network::Public => "Public",
            Network::Test => "Test",
            Network::Unknown => "Unknown",
        }
    }

    /// Native asset symbol, degraded when the network is not recognised
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Network::Unknown => "native",
            _ => "XLM",
        }
    }
}

/// Transaction validity window, Unix timestamps
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

/// Transaction memo
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Memo {
    #[default]
    None,
    Id(u64),
    Text(String<MEMO_TEXT_LEN>),
    Hash([u8; 32]),
    Return([u8; 32]),
}

/// Asset held or exchanged by an operation
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Asset {
    Native,
    AlphaNum4 { code: AssetCode, issuer: AccountId },
    AlphaNum12 { code: AssetCode, issuer: AccountId },
}

impl Asset {
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// Short display code, native assets use the network symbol
    pub fn code<'a>(&'a self, network: Network) -> &'a str {
        match self {
            Asset::Native => network.native_symbol(),
            Asset::AlphaNum4 { code, .. } => code.as_str(),
            Asset::AlphaNum12 { code, .. } => code.as_str(),
        }
    }

    /// Issuing account for alphanumeric assets
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Asset::Native => None,
            Asset::AlphaNum4 { issuer, .. } => Some(issuer),
            Asset::AlphaNum12 { issuer, .. } => Some(issuer),
        }
    }
}

/// Rational offer price
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

bitflags::bitflags! {
    /// Account authorization flags settable via SetOptions
    pub struct AccountFlags: u32 {
        const AUTH_REQUIRED = 0x01;
        const AUTH_REVOCABLE = 0x02;
        const AUTH_IMMUTABLE = 0x04;
    }
}

/// Signer key variants for SetOptions signer updates
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SignerKey {
    Ed25519(AccountId),
    PreAuthTx([u8; 32]),
    HashX([u8; 32]),
}

/// Signer descriptor, weight zero removes the signer
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

/// SetOptions payload, every field independently optional
///
/// Flag masks follow the wire convention of the original client: a zero
/// mask and an absent mask render identically, so both are stored as the
/// plain value.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: u32,
    pub set_flags: u32,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub medium_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String<HOME_DOMAIN_LEN>>,
    pub signer: Option<Signer>,
}

/// Operation kind discriminants as carried on the wire
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive, strum::Display, EnumCount, EnumIter,
)]
#[repr(u32)]
pub enum OperationKind {
    CreateAccount = 0,
    Payment = 1,
    PathPayment = 2,
    ManageSellOffer = 3,
    CreatePassiveSellOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
    BumpSequence = 11,
    ManageBuyOffer = 12,
}

/// Kind-specific operation payload
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum OperationBody {
    CreateAccount {
        destination: AccountId,
        starting_balance: i64,
    },
    Payment {
        destination: AccountId,
        asset: Asset,
        amount: i64,
    },
    PathPayment {
        send_asset: Asset,
        send_max: i64,
        destination: AccountId,
        dest_asset: Asset,
        dest_amount: i64,
        path: Vec<Asset, MAX_PATH_LEN>,
    },
    ManageSellOffer {
        selling: Asset,
        buying: Asset,
        amount: i64,
        price: Price,
        offer_id: u64,
    },
    CreatePassiveSellOffer {
        selling: Asset,
        buying: Asset,
        amount: i64,
        price: Price,
    },
    SetOptions(SetOptionsOp),
    ChangeTrust {
        line: Asset,
        limit: i64,
    },
    AllowTrust {
        trustor: AccountId,
        asset_code: AssetCode,
        authorize: bool,
    },
    AccountMerge {
        destination: AccountId,
    },
    #[default]
    Inflation,
    ManageData {
        name: String<DATA_VALUE_LEN>,
        value: Option<Vec<u8, DATA_VALUE_LEN>>,
    },
    BumpSequence {
        bump_to: i64,
    },
    ManageBuyOffer {
        selling: Asset,
        buying: Asset,
        amount: i64,
        price: Price,
        offer_id: u64,
    },
}

impl OperationBody {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationBody::CreateAccount { .. } => OperationKind::CreateAccount,
            OperationBody::Payment { .. } => OperationKind::Payment,
            OperationBody::PathPayment { .. } => OperationKind::PathPayment,
            OperationBody::ManageSellOffer { .. } => OperationKind::ManageSellOffer,
            OperationBody::CreatePassiveSellOffer { .. } => OperationKind::CreatePassiveSellOffer,
            OperationBody::SetOptions(_) => OperationKind::SetOptions,
            OperationBody::ChangeTrust { .. } => OperationKind::ChangeTrust,
            OperationBody::AllowTrust { .. } => OperationKind::AllowTrust,
            OperationBody::AccountMerge { .. } => OperationKind::AccountMerge,
            OperationBody::Inflation => OperationKind::Inflation,
            OperationBody::ManageData { .. } => OperationKind::ManageData,
            OperationBody::BumpSequence { .. } => OperationKind::BumpSequence,
            OperationBody::ManageBuyOffer { .. } => OperationKind::ManageBuyOffer,
        }
    }
}

/// One decoded operation
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Operation {
    /// Per-operation source account override
    pub source: Option<AccountId>,
    pub body: OperationBody,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        self.body.kind()
    }
}

/// Decoded transaction envelope fields, operations excluded
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TxHeader {
    pub network: Network,
    pub source: AccountId,
    pub fee: u32,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub op_count: u8,
}
