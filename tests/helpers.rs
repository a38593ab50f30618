// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Shared fixtures for review tests: an XDR signature-base builder and
//! traversal drivers

#![allow(unused)]

use stellar_review_core::engine::{ReviewSession, Step};
use stellar_review_core::screen::Screen;

/// SEP-23 sample ed25519 public key
pub const KEY_BYTES: [u8; 32] = [
    0x3f, 0x0c, 0x34, 0xbf, 0x93, 0xad, 0x0d, 0x99, 0x71, 0xd0, 0x4c, 0xcc, 0x90, 0xf7, 0x05,
    0x51, 0x1c, 0x83, 0x8a, 0xad, 0x97, 0x34, 0xa4, 0xa2, 0xfb, 0x0d, 0x7a, 0x03, 0xfc, 0x7f,
    0xe8, 0x9a,
];

/// Strkey encoding of [KEY_BYTES]
pub const KEY_STRKEY: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

pub fn test_network_id() -> [u8; 32] {
    hex::decode("cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472")
        .unwrap()
        .try_into()
        .unwrap()
}

pub fn init_logs() {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, simplelog::Config::default());
}

fn put_u32(v: &mut Vec<u8>, x: u32) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn put_i32(v: &mut Vec<u8>, x: i32) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn put_u64(v: &mut Vec<u8>, x: u64) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn put_i64(v: &mut Vec<u8>, x: i64) {
    v.extend_from_slice(&x.to_be_bytes());
}

fn put_account(v: &mut Vec<u8>, key: [u8; 32]) {
    put_u32(v, 0);
    v.extend_from_slice(&key);
}

/// Variable-length string/opaque, four-byte aligned
fn put_var(v: &mut Vec<u8>, b: &[u8]) {
    put_u32(v, b.len() as u32);
    v.extend_from_slice(b);
    let pad = (4 - b.len() % 4) % 4;
    v.extend_from_slice(&[0u8; 3][..pad]);
}

/// Fixed-width asset code, NUL padded
fn put_code(v: &mut Vec<u8>, code: &str, width: usize) {
    let mut b = vec![0u8; width];
    b[..code.len()].copy_from_slice(code.as_bytes());
    v.extend_from_slice(&b);
}

#[derive(Clone)]
pub enum AssetArg {
    Native,
    Alpha4(&'static str, [u8; 32]),
    Alpha12(&'static str, [u8; 32]),
}

fn put_asset(v: &mut Vec<u8>, asset: &AssetArg) {
    match asset {
        AssetArg::Native => put_u32(v, 0),
        AssetArg::Alpha4(code, issuer) => {
            put_u32(v, 1);
            put_code(v, code, 4);
            put_account(v, *issuer);
        }
        AssetArg::Alpha12(code, issuer) => {
            put_u32(v, 2);
            put_code(v, code, 12);
            put_account(v, *issuer);
        }
    }
}

/// Signature-base builder for review fixtures
pub struct TxBuilder {
    network: [u8; 32],
    source: [u8; 32],
    fee: u32,
    time_bounds: Option<(u64, u64)>,
    memo: Vec<u8>,
    ops: Vec<Vec<u8>>,
}

impl TxBuilder {
    /// Test network, no time bounds, no memo
    pub fn new() -> Self {
        let mut memo = Vec::new();
        put_u32(&mut memo, 0);

        Self {
            network: test_network_id(),
            source: [0x11; 32],
            fee: 100,
            time_bounds: None,
            memo,
            ops: Vec::new(),
        }
    }

    pub fn network(mut self, id: [u8; 32]) -> Self {
        self.network = id;
        self
    }

    pub fn source(mut self, key: [u8; 32]) -> Self {
        self.source = key;
        self
    }

    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    pub fn time_bounds(mut self, min: u64, max: u64) -> Self {
        self.time_bounds = Some((min, max));
        self
    }

    pub fn memo_text(mut self, text: &str) -> Self {
        self.memo.clear();
        put_u32(&mut self.memo, 1);
        put_var(&mut self.memo, text.as_bytes());
        self
    }

    pub fn memo_id(mut self, id: u64) -> Self {
        self.memo.clear();
        put_u32(&mut self.memo, 2);
        put_u64(&mut self.memo, id);
        self
    }

    pub fn memo_hash(mut self, hash: [u8; 32]) -> Self {
        self.memo.clear();
        put_u32(&mut self.memo, 3);
        self.memo.extend_from_slice(&hash);
        self
    }

    pub fn memo_return(mut self, hash: [u8; 32]) -> Self {
        self.memo.clear();
        put_u32(&mut self.memo, 4);
        self.memo.extend_from_slice(&hash);
        self
    }

    /// Append an operation without a source override
    pub fn op(mut self, body: Vec<u8>) -> Self {
        let mut v = Vec::new();
        put_u32(&mut v, 0);
        v.extend_from_slice(&body);
        self.ops.push(v);
        self
    }

    /// Append an operation with a source override
    pub fn op_with_source(mut self, source: [u8; 32], body: Vec<u8>) -> Self {
        let mut v = Vec::new();
        put_u32(&mut v, 1);
        put_account(&mut v, source);
        v.extend_from_slice(&body);
        self.ops.push(v);
        self
    }

    /// Assemble the signature base
    pub fn build(self) -> Vec<u8> {
        let mut v = Vec::new();

        v.extend_from_slice(&self.network);
        put_u32(&mut v, 2);

        put_account(&mut v, self.source);
        put_u32(&mut v, self.fee);
        put_i64(&mut v, 1);

        match self.time_bounds {
            Some((min, max)) => {
                put_u32(&mut v, 1);
                put_u64(&mut v, min);
                put_u64(&mut v, max);
            }
            None => put_u32(&mut v, 0),
        }

        v.extend_from_slice(&self.memo);

        put_u32(&mut v, self.ops.len() as u32);
        for op in &self.ops {
            v.extend_from_slice(op);
        }

        put_u32(&mut v, 0);

        v
    }
}

pub fn create_account(destination: [u8; 32], starting_balance: i64) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 0);
    put_account(&mut v, destination);
    put_i64(&mut v, starting_balance);
    v
}

pub fn payment(destination: [u8; 32], asset: AssetArg, amount: i64) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 1);
    put_account(&mut v, destination);
    put_asset(&mut v, &asset);
    put_i64(&mut v, amount);
    v
}

pub fn path_payment(
    send_asset: AssetArg,
    send_max: i64,
    destination: [u8; 32],
    dest_asset: AssetArg,
    dest_amount: i64,
    path: &[AssetArg],
) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 2);
    put_asset(&mut v, &send_asset);
    put_i64(&mut v, send_max);
    put_account(&mut v, destination);
    put_asset(&mut v, &dest_asset);
    put_i64(&mut v, dest_amount);
    put_u32(&mut v, path.len() as u32);
    for a in path {
        put_asset(&mut v, a);
    }
    v
}

pub fn manage_sell_offer(
    selling: AssetArg,
    buying: AssetArg,
    amount: i64,
    price: (i32, i32),
    offer_id: u64,
) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 3);
    put_asset(&mut v, &selling);
    put_asset(&mut v, &buying);
    put_i64(&mut v, amount);
    put_i32(&mut v, price.0);
    put_i32(&mut v, price.1);
    put_u64(&mut v, offer_id);
    v
}

pub fn create_passive_sell_offer(
    selling: AssetArg,
    buying: AssetArg,
    amount: i64,
    price: (i32, i32),
) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 4);
    put_asset(&mut v, &selling);
    put_asset(&mut v, &buying);
    put_i64(&mut v, amount);
    put_i32(&mut v, price.0);
    put_i32(&mut v, price.1);
    v
}

/// Optional SetOptions fields, `None` fields are encoded as absent
#[derive(Default)]
pub struct SetOptionsArgs {
    pub inflation_dest: Option<[u8; 32]>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub medium_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<&'static str>,
    /// Signer key type tag, raw key, weight
    pub signer: Option<(u32, [u8; 32], u32)>,
}

pub fn set_options(args: SetOptionsArgs) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 5);

    match args.inflation_dest {
        Some(dest) => {
            put_u32(&mut v, 1);
            put_account(&mut v, dest);
        }
        None => put_u32(&mut v, 0),
    }

    for flags in [args.clear_flags, args.set_flags] {
        match flags {
            Some(f) => {
                put_u32(&mut v, 1);
                put_u32(&mut v, f);
            }
            None => put_u32(&mut v, 0),
        }
    }

    for field in [
        args.master_weight,
        args.low_threshold,
        args.medium_threshold,
        args.high_threshold,
    ] {
        match field {
            Some(x) => {
                put_u32(&mut v, 1);
                put_u32(&mut v, x);
            }
            None => put_u32(&mut v, 0),
        }
    }

    match args.home_domain {
        Some(domain) => {
            put_u32(&mut v, 1);
            put_var(&mut v, domain.as_bytes());
        }
        None => put_u32(&mut v, 0),
    }

    match args.signer {
        Some((key_type, key, weight)) => {
            put_u32(&mut v, 1);
            put_u32(&mut v, key_type);
            v.extend_from_slice(&key);
            put_u32(&mut v, weight);
        }
        None => put_u32(&mut v, 0),
    }

    v
}

pub fn change_trust(line: AssetArg, limit: i64) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 6);
    put_asset(&mut v, &line);
    put_i64(&mut v, limit);
    v
}

pub fn allow_trust(trustor: [u8; 32], code: &str, authorize: bool) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 7);
    put_account(&mut v, trustor);
    if code.len() <= 4 {
        put_u32(&mut v, 1);
        put_code(&mut v, code, 4);
    } else {
        put_u32(&mut v, 2);
        put_code(&mut v, code, 12);
    }
    put_u32(&mut v, authorize as u32);
    v
}

pub fn account_merge(destination: [u8; 32]) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 8);
    put_account(&mut v, destination);
    v
}

pub fn inflation() -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 9);
    v
}

pub fn manage_data(name: &str, value: Option<&[u8]>) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 10);
    put_var(&mut v, name.as_bytes());
    match value {
        Some(b) => {
            put_u32(&mut v, 1);
            put_var(&mut v, b);
        }
        None => put_u32(&mut v, 0),
    }
    v
}

pub fn bump_sequence(bump_to: i64) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 11);
    put_i64(&mut v, bump_to);
    v
}

pub fn manage_buy_offer(
    selling: AssetArg,
    buying: AssetArg,
    amount: i64,
    price: (i32, i32),
    offer_id: u64,
) -> Vec<u8> {
    let mut v = Vec::new();
    put_u32(&mut v, 12);
    put_asset(&mut v, &selling);
    put_asset(&mut v, &buying);
    put_i64(&mut v, amount);
    put_i32(&mut v, price.0);
    put_i32(&mut v, price.1);
    put_u64(&mut v, offer_id);
    v
}

/// Walk a session forward from the current screen to the end, returning
/// every screen in order
pub fn collect_forward(s: &mut ReviewSession) -> Vec<Screen> {
    let mut screens = vec![s.current_screen().unwrap().clone()];
    loop {
        match s.advance().unwrap() {
            Step::Screen(screen) => screens.push(screen),
            Step::EndOfReview => return screens,
            Step::StartOfReview => panic!("retreat marker while advancing"),
        }
    }
}

/// Caption/value pairs of a screen list
pub fn pairs(screens: &[Screen]) -> Vec<(&str, &str)> {
    screens.iter().map(|s| (s.caption(), s.value())).collect()
}

/// Captions of a screen list
pub fn captions(screens: &[Screen]) -> Vec<&str> {
    screens.iter().map(|s| s.caption()).collect()
}
