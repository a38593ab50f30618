// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Field formatter library
//!
//! One [Formatter] variant per screen-producing step: thirteen operation
//! chain entry points with their follow-on screens, the transaction field
//! chain shown once after the final operation, and the hash-only fallback
//! pair. Each step renders exactly one caption/value pair into the
//! [Screen] and names its successor; optional fields that are absent skip
//! directly to the following step so no empty screens are shown and the
//! order among present fields never changes.
//!
//! Formatters read the decoded transaction only, all output goes through
//! the screen buffers and the returned [Outcome].

use crate::helpers::{
    fmt_amount, fmt_asset, fmt_base64, fmt_flags, fmt_hex_summary, fmt_int, fmt_path, fmt_uint,
    strkey, summarize, SUMMARY_HEAD, SUMMARY_TAIL,
};
use crate::tx::{
    Memo, Operation, OperationBody, OperationKind, Price, SetOptionsOp, SignerKey, TxHash,
    TxHeader,
};

use super::screen::{Screen, SCREEN_VALUE_LEN};
use super::Error;

/// Read-only transaction state passed to each formatter
pub(crate) struct FormatCtx<'a> {
    pub header: &'a TxHeader,
    pub op: &'a Operation,
    pub hash: &'a TxHash,
}

/// Result of invoking a formatter
pub(crate) enum Outcome {
    /// Screen written, successor to run on the next advance
    /// (`None` marks the end of the current element)
    Render(Option<Formatter>),
    /// Field absent, resolve to a later chain step without a screen
    Skip(Option<Formatter>),
}

/// Closed set of formatting steps
///
/// Successor links are hard-wired per the review chain tables, making the
/// full screen order for any transaction a pure function of its decoded
/// fields.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Formatter {
    // Transaction fields, shown once after the final operation
    Memo,
    Fee,
    Network,
    TimeBoundsFrom,
    TimeBoundsTo,
    TxSource,

    /// Per-operation source override, tail of every operation chain
    OpSource,

    // CreateAccount
    CreateAccount,
    StartingBalance,

    // Payment
    Payment,
    PaymentDestination,

    // PathPayment
    PathPayment,
    PathDestination,
    PathReceive,
    PathVia,

    // ManageSellOffer / CreatePassiveSellOffer share the buy/price/sell tail
    ManageOffer,
    CreatePassiveOffer,
    OfferBuy,
    OfferPrice,
    OfferSell,

    // ManageBuyOffer
    ManageBuyOffer,
    BuyOfferSell,
    BuyOfferPrice,
    BuyOfferBuy,

    // SetOptions, every step conditional on field presence
    InflationDest,
    ClearFlags,
    SetFlags,
    MasterWeight,
    LowThreshold,
    MediumThreshold,
    HighThreshold,
    HomeDomain,
    Signer,
    SignerKey,
    SignerWeight,

    // ChangeTrust
    ChangeTrust,
    TrustLimit,

    // AllowTrust
    AllowTrust,
    Trustor,

    // AccountMerge
    MergeAccount,
    MergeDestination,

    Inflation,

    // ManageData
    ManageData,
    DataValue,

    BumpSequence,

    // Hash-only review mode
    HashWarning,
    HashDetail,
}

impl Formatter {
    /// Chain entry point for an operation kind
    pub(crate) fn entry(kind: OperationKind) -> Self {
        match kind {
            OperationKind::CreateAccount => Formatter::CreateAccount,
            OperationKind::Payment => Formatter::Payment,
            OperationKind::PathPayment => Formatter::PathPayment,
            OperationKind::ManageSellOffer => Formatter::ManageOffer,
            OperationKind::CreatePassiveSellOffer => Formatter::CreatePassiveOffer,
            OperationKind::SetOptions => Formatter::InflationDest,
            OperationKind::ChangeTrust => Formatter::ChangeTrust,
            OperationKind::AllowTrust => Formatter::AllowTrust,
            OperationKind::AccountMerge => Formatter::MergeAccount,
            OperationKind::Inflation => Formatter::Inflation,
            OperationKind::ManageData => Formatter::ManageData,
            OperationKind::BumpSequence => Formatter::BumpSequence,
            OperationKind::ManageBuyOffer => Formatter::ManageBuyOffer,
        }
    }

    /// Render one screen (or skip an absent field) and name the successor
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(crate) fn exec(&self, ctx: &FormatCtx, screen: &mut Screen) -> Result<Outcome, Error> {
        let mut buff = [0u8; SCREEN_VALUE_LEN];
        let network = ctx.header.network;

        match self {
            Formatter::Memo => {
                match &ctx.header.memo {
                    Memo::Id(id) => {
                        screen.set_caption("Memo ID")?;
                        screen.set_value(fmt_uint(*id, &mut buff)?)?;
                    }
                    Memo::Text(text) => {
                        screen.set_caption("Memo Text")?;
                        screen.set_value(text.as_str())?;
                    }
                    Memo::Hash(hash) => {
                        screen.set_caption("Memo Hash")?;
                        screen.set_value(fmt_hex_summary(hash, &mut buff)?)?;
                    }
                    Memo::Return(hash) => {
                        screen.set_caption("Memo Return")?;
                        screen.set_value(fmt_hex_summary(hash, &mut buff)?)?;
                    }
                    Memo::None => {
                        screen.set_caption("Memo")?;
                        screen.set_value("[none]")?;
                    }
                }
                Ok(Outcome::Render(Some(Formatter::Fee)))
            }
            Formatter::Fee => {
                screen.set_caption("Fee")?;
                screen.set_value(fmt_amount(
                    ctx.header.fee as i64,
                    Some(network.native_symbol()),
                    &mut buff,
                )?)?;
                Ok(Outcome::Render(Some(Formatter::Network)))
            }
            Formatter::Network => {
                screen.set_caption("Network")?;
                screen.set_value(network.name())?;
                Ok(Outcome::Render(Some(Formatter::TimeBoundsFrom)))
            }
            Formatter::TimeBoundsFrom => match &ctx.header.time_bounds {
                Some(tb) => {
                    screen.set_caption("Time Bounds From")?;
                    screen.set_value(fmt_uint(tb.min_time, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::TimeBoundsTo)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::TxSource))),
            },
            Formatter::TimeBoundsTo => {
                let tb = ctx.header.time_bounds.as_ref().ok_or(Error::InvalidState)?;
                screen.set_caption("Time Bounds To")?;
                screen.set_value(fmt_uint(tb.max_time, &mut buff)?)?;
                Ok(Outcome::Render(Some(Formatter::TxSource)))
            }
            Formatter::TxSource => {
                screen.set_caption("Tx Source")?;
                screen.set_value(strkey::encode_account(&ctx.header.source.0, &mut buff)?)?;
                Ok(Outcome::Render(None))
            }

            Formatter::OpSource => match &ctx.op.source {
                Some(source) => {
                    screen.set_caption("Op Source")?;
                    screen.set_value(strkey::encode_account(&source.0, &mut buff)?)?;
                    Ok(Outcome::Render(None))
                }
                None => Ok(Outcome::Skip(None)),
            },

            Formatter::CreateAccount => match &ctx.op.body {
                OperationBody::CreateAccount { destination, .. } => {
                    screen.set_caption("Create Account")?;
                    screen.set_value(strkey::encode_account(&destination.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::StartingBalance)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::StartingBalance => match &ctx.op.body {
                OperationBody::CreateAccount {
                    starting_balance, ..
                } => {
                    screen.set_caption("Starting Balance")?;
                    screen.set_value(fmt_amount(
                        *starting_balance,
                        Some(network.native_symbol()),
                        &mut buff,
                    )?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::Payment => match &ctx.op.body {
                OperationBody::Payment { asset, amount, .. } => {
                    screen.set_caption("Send")?;
                    screen.set_value(fmt_amount(
                        *amount,
                        Some(asset.code(network)),
                        &mut buff,
                    )?)?;
                    Ok(Outcome::Render(Some(Formatter::PaymentDestination)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::PaymentDestination => match &ctx.op.body {
                OperationBody::Payment { destination, .. } => {
                    screen.set_caption("Destination")?;
                    screen.set_value(strkey::encode_account(&destination.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::PathPayment => match &ctx.op.body {
                OperationBody::PathPayment {
                    send_asset,
                    send_max,
                    ..
                } => {
                    screen.set_caption("Send Max")?;
                    screen.set_value(fmt_amount(
                        *send_max,
                        Some(send_asset.code(network)),
                        &mut buff,
                    )?)?;
                    Ok(Outcome::Render(Some(Formatter::PathDestination)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::PathDestination => match &ctx.op.body {
                OperationBody::PathPayment { destination, .. } => {
                    screen.set_caption("Destination")?;
                    screen.set_value(strkey::encode_account(&destination.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::PathReceive)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::PathReceive => match &ctx.op.body {
                OperationBody::PathPayment {
                    dest_asset,
                    dest_amount,
                    ..
                } => {
                    screen.set_caption("Receive")?;
                    screen.set_value(fmt_amount(
                        *dest_amount,
                        Some(dest_asset.code(network)),
                        &mut buff,
                    )?)?;
                    Ok(Outcome::Render(Some(Formatter::PathVia)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::PathVia => match &ctx.op.body {
                OperationBody::PathPayment { path, .. } if !path.is_empty() => {
                    screen.set_caption("Via")?;
                    screen.set_value(fmt_path(path, network, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                OperationBody::PathPayment { .. } => Ok(Outcome::Skip(Some(Formatter::OpSource))),
                _ => Err(Error::InvalidState),
            },

            Formatter::ManageOffer => {
                let (_, _, amount, _, offer_id) = sell_offer(ctx.op)?;
                if amount == 0 {
                    screen.set_caption("Remove Offer")?;
                    screen.set_value(fmt_uint(offer_id, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                } else {
                    if offer_id != 0 {
                        screen.set_caption("Change Offer")?;
                        screen.set_value(fmt_uint(offer_id, &mut buff)?)?;
                    } else {
                        screen.set_caption("Create Offer")?;
                        screen.set_value("Type Active")?;
                    }
                    Ok(Outcome::Render(Some(Formatter::OfferBuy)))
                }
            }
            Formatter::CreatePassiveOffer => {
                sell_offer(ctx.op)?;
                screen.set_caption("Create Offer")?;
                screen.set_value("Type Passive")?;
                Ok(Outcome::Render(Some(Formatter::OfferBuy)))
            }
            Formatter::OfferBuy => {
                let (_, buying, ..) = sell_offer(ctx.op)?;
                screen.set_caption("Buy")?;
                screen.set_value(fmt_asset(buying, network, &mut buff)?)?;
                Ok(Outcome::Render(Some(Formatter::OfferPrice)))
            }
            Formatter::OfferPrice => {
                let (_, buying, _, price, _) = sell_offer(ctx.op)?;
                screen.set_caption("Price")?;
                screen.set_value(fmt_amount(
                    price_amount(price),
                    Some(buying.code(network)),
                    &mut buff,
                )?)?;
                Ok(Outcome::Render(Some(Formatter::OfferSell)))
            }
            Formatter::OfferSell => {
                let (selling, _, amount, ..) = sell_offer(ctx.op)?;
                screen.set_caption("Sell")?;
                screen.set_value(fmt_amount(
                    amount,
                    Some(selling.code(network)),
                    &mut buff,
                )?)?;
                Ok(Outcome::Render(Some(Formatter::OpSource)))
            }

            Formatter::ManageBuyOffer => {
                let (_, _, amount, _, offer_id) = buy_offer(ctx.op)?;
                if amount == 0 {
                    screen.set_caption("Remove Offer")?;
                    screen.set_value(fmt_uint(offer_id, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                } else {
                    if offer_id != 0 {
                        screen.set_caption("Change Offer")?;
                        screen.set_value(fmt_uint(offer_id, &mut buff)?)?;
                    } else {
                        screen.set_caption("Create Offer")?;
                        screen.set_value("Type Active")?;
                    }
                    Ok(Outcome::Render(Some(Formatter::BuyOfferSell)))
                }
            }
            Formatter::BuyOfferSell => {
                let (selling, ..) = buy_offer(ctx.op)?;
                screen.set_caption("Sell")?;
                screen.set_value(fmt_asset(selling, network, &mut buff)?)?;
                Ok(Outcome::Render(Some(Formatter::BuyOfferPrice)))
            }
            Formatter::BuyOfferPrice => {
                let (selling, _, _, price, _) = buy_offer(ctx.op)?;
                screen.set_caption("Price")?;
                screen.set_value(fmt_amount(
                    price_amount(price),
                    Some(selling.code(network)),
                    &mut buff,
                )?)?;
                Ok(Outcome::Render(Some(Formatter::BuyOfferBuy)))
            }
            Formatter::BuyOfferBuy => {
                let (_, buying, amount, ..) = buy_offer(ctx.op)?;
                screen.set_caption("Buy")?;
                screen.set_value(fmt_amount(
                    amount,
                    Some(buying.code(network)),
                    &mut buff,
                )?)?;
                Ok(Outcome::Render(Some(Formatter::OpSource)))
            }

            Formatter::InflationDest => match &set_options(ctx.op)?.inflation_dest {
                Some(dest) => {
                    screen.set_caption("Inflation Dest")?;
                    screen.set_value(strkey::encode_account(&dest.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::ClearFlags)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::ClearFlags))),
            },
            Formatter::ClearFlags => match set_options(ctx.op)?.clear_flags {
                0 => Ok(Outcome::Skip(Some(Formatter::SetFlags))),
                flags => {
                    screen.set_caption("Clear Flags")?;
                    screen.set_value(fmt_flags(flags, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::SetFlags)))
                }
            },
            Formatter::SetFlags => match set_options(ctx.op)?.set_flags {
                0 => Ok(Outcome::Skip(Some(Formatter::MasterWeight))),
                flags => {
                    screen.set_caption("Set Flags")?;
                    screen.set_value(fmt_flags(flags, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::MasterWeight)))
                }
            },
            Formatter::MasterWeight => match set_options(ctx.op)?.master_weight {
                Some(weight) => {
                    screen.set_caption("Master Weight")?;
                    screen.set_value(fmt_uint(weight as u64, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::LowThreshold)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::LowThreshold))),
            },
            Formatter::LowThreshold => match set_options(ctx.op)?.low_threshold {
                Some(threshold) => {
                    screen.set_caption("Low Threshold")?;
                    screen.set_value(fmt_uint(threshold as u64, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::MediumThreshold)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::MediumThreshold))),
            },
            Formatter::MediumThreshold => match set_options(ctx.op)?.medium_threshold {
                Some(threshold) => {
                    screen.set_caption("Medium Threshold")?;
                    screen.set_value(fmt_uint(threshold as u64, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::HighThreshold)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::HighThreshold))),
            },
            Formatter::HighThreshold => match set_options(ctx.op)?.high_threshold {
                Some(threshold) => {
                    screen.set_caption("High Threshold")?;
                    screen.set_value(fmt_uint(threshold as u64, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::HomeDomain)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::HomeDomain))),
            },
            Formatter::HomeDomain => match &set_options(ctx.op)?.home_domain {
                Some(domain) => {
                    screen.set_caption("Home Domain")?;
                    screen.set_value(domain.as_str())?;
                    Ok(Outcome::Render(Some(Formatter::Signer)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::Signer))),
            },
            Formatter::Signer => match &set_options(ctx.op)?.signer {
                Some(signer) => {
                    screen.set_caption(match signer.weight {
                        0 => "Remove Signer",
                        _ => "Add Signer",
                    })?;
                    screen.set_value(match signer.key {
                        SignerKey::Ed25519(_) => "Type Public Key",
                        SignerKey::HashX(_) => "Type Hash(x)",
                        SignerKey::PreAuthTx(_) => "Type Pre-Auth",
                    })?;
                    Ok(Outcome::Render(Some(Formatter::SignerKey)))
                }
                None => Ok(Outcome::Skip(Some(Formatter::OpSource))),
            },
            Formatter::SignerKey => {
                let signer = set_options(ctx.op)?.signer.ok_or(Error::InvalidState)?;
                screen.set_caption("Signer Key")?;
                match &signer.key {
                    SignerKey::Ed25519(key) => {
                        screen.set_value(strkey::encode_account(&key.0, &mut buff)?)?;
                    }
                    SignerKey::HashX(hash) => {
                        let mut key = [0u8; strkey::STRKEY_LEN];
                        let key = strkey::encode_hash_x(hash, &mut key)?;
                        screen.set_value(summarize(key, SUMMARY_HEAD, SUMMARY_TAIL, &mut buff)?)?;
                    }
                    SignerKey::PreAuthTx(hash) => {
                        let mut key = [0u8; strkey::STRKEY_LEN];
                        let key = strkey::encode_pre_auth_tx(hash, &mut key)?;
                        screen.set_value(summarize(key, SUMMARY_HEAD, SUMMARY_TAIL, &mut buff)?)?;
                    }
                }
                Ok(Outcome::Render(Some(Formatter::SignerWeight)))
            }
            Formatter::SignerWeight => {
                let signer = set_options(ctx.op)?.signer.ok_or(Error::InvalidState)?;
                match signer.weight {
                    0 => Ok(Outcome::Skip(Some(Formatter::OpSource))),
                    weight => {
                        screen.set_caption("Weight")?;
                        screen.set_value(fmt_uint(weight as u64, &mut buff)?)?;
                        Ok(Outcome::Render(Some(Formatter::OpSource)))
                    }
                }
            }

            Formatter::ChangeTrust => match &ctx.op.body {
                OperationBody::ChangeTrust { line, limit } => {
                    screen.set_caption(match limit {
                        0 => "Remove Trust",
                        _ => "Change Trust",
                    })?;
                    screen.set_value(fmt_asset(line, network, &mut buff)?)?;
                    let next = match limit {
                        0 => Formatter::OpSource,
                        _ => Formatter::TrustLimit,
                    };
                    Ok(Outcome::Render(Some(next)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::TrustLimit => match &ctx.op.body {
                OperationBody::ChangeTrust { limit, .. } => {
                    screen.set_caption("Trust Limit")?;
                    screen.set_value(fmt_amount(*limit, None, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::AllowTrust => match &ctx.op.body {
                OperationBody::AllowTrust {
                    asset_code,
                    authorize,
                    ..
                } => {
                    screen.set_caption(match authorize {
                        true => "Allow Trust",
                        false => "Revoke Trust",
                    })?;
                    screen.set_value(asset_code.as_str())?;
                    Ok(Outcome::Render(Some(Formatter::Trustor)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::Trustor => match &ctx.op.body {
                OperationBody::AllowTrust { trustor, .. } => {
                    screen.set_caption("Account ID")?;
                    screen.set_value(strkey::encode_account(&trustor.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::MergeAccount => match &ctx.op.body {
                OperationBody::AccountMerge { .. } => {
                    // Merged account is the effective operation source
                    let source = ctx.op.source.as_ref().unwrap_or(&ctx.header.source);
                    screen.set_caption("Merge Account")?;
                    screen.set_value(strkey::encode_account(&source.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::MergeDestination)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::MergeDestination => match &ctx.op.body {
                OperationBody::AccountMerge { destination } => {
                    screen.set_caption("Destination")?;
                    screen.set_value(strkey::encode_account(&destination.0, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::Inflation => match &ctx.op.body {
                OperationBody::Inflation => {
                    screen.set_caption("Run Inflation")?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::ManageData => match &ctx.op.body {
                OperationBody::ManageData { name, value } => {
                    screen.set_caption(match value {
                        Some(_) => "Set Data",
                        None => "Remove Data",
                    })?;
                    screen.set_value(summarize(
                        name.as_str(),
                        SUMMARY_HEAD,
                        SUMMARY_TAIL,
                        &mut buff,
                    )?)?;
                    let next = match value {
                        Some(_) => Formatter::DataValue,
                        None => Formatter::OpSource,
                    };
                    Ok(Outcome::Render(Some(next)))
                }
                _ => Err(Error::InvalidState),
            },
            Formatter::DataValue => match &ctx.op.body {
                OperationBody::ManageData {
                    value: Some(value), ..
                } => {
                    screen.set_caption("Data Value")?;
                    let mut b64 = [0u8; SCREEN_VALUE_LEN];
                    let b64 = fmt_base64(value, &mut b64)?;
                    screen.set_value(summarize(b64, SUMMARY_HEAD, SUMMARY_TAIL, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::BumpSequence => match &ctx.op.body {
                OperationBody::BumpSequence { bump_to } => {
                    screen.set_caption("Bump Sequence")?;
                    screen.set_value(fmt_int(*bump_to, &mut buff)?)?;
                    Ok(Outcome::Render(Some(Formatter::OpSource)))
                }
                _ => Err(Error::InvalidState),
            },

            Formatter::HashWarning => {
                screen.set_caption("WARNING")?;
                screen.set_value("No details available")?;
                Ok(Outcome::Render(Some(Formatter::HashDetail)))
            }
            Formatter::HashDetail => {
                screen.set_caption("Hash")?;
                screen.set_value(fmt_hex_summary(&ctx.hash.0, &mut buff)?)?;
                Ok(Outcome::Render(None))
            }
        }
    }
}

/// Fixed-point conversion of a rational price, truncating
fn price_amount(price: Price) -> i64 {
    ((price.n as u64 * 10_000_000) / price.d as u64) as i64
}

fn set_options(op: &Operation) -> Result<&SetOptionsOp, Error> {
    match &op.body {
        OperationBody::SetOptions(v) => Ok(v),
        _ => Err(Error::InvalidState),
    }
}

/// Sell-side offer fields, shared by the active and passive variants
/// (a passive offer has no existing offer id)
fn sell_offer(op: &Operation) -> Result<(&crate::tx::Asset, &crate::tx::Asset, i64, Price, u64), Error> {
    match &op.body {
        OperationBody::ManageSellOffer {
            selling,
            buying,
            amount,
            price,
            offer_id,
        } => Ok((selling, buying, *amount, *price, *offer_id)),
        OperationBody::CreatePassiveSellOffer {
            selling,
            buying,
            amount,
            price,
        } => Ok((selling, buying, *amount, *price, 0)),
        _ => Err(Error::InvalidState),
    }
}

fn buy_offer(op: &Operation) -> Result<(&crate::tx::Asset, &crate::tx::Asset, i64, Price, u64), Error> {
    match &op.body {
        OperationBody::ManageBuyOffer {
            selling,
            buying,
            amount,
            price,
            offer_id,
        } => Ok((selling, buying, *amount, *price, *offer_id)),
        _ => Err(Error::InvalidState),
    }
}

#[cfg(test)]
mod test {
    use heapless::String;

    use crate::tx::{AccountId, Asset, Network, Signer};

    use super::*;

    fn ctx_parts() -> (TxHeader, TxHash) {
        let header = TxHeader {
            network: Network::Test,
            source: AccountId([0x11; 32]),
            op_count: 1,
            ..Default::default()
        };
        (header, TxHash([0xab; 32]))
    }

    /// Run a formatter against an operation, returning the rendered
    /// screen (if any) and the resolved outcome
    fn step(f: Formatter, op: &Operation) -> (Screen, Outcome) {
        let (header, hash) = ctx_parts();
        let ctx = FormatCtx {
            header: &header,
            op,
            hash: &hash,
        };

        let mut screen = Screen::new();
        let outcome = f.exec(&ctx, &mut screen).unwrap();
        (screen, outcome)
    }

    fn usd() -> Asset {
        let mut code = String::new();
        code.push_str("USD").unwrap();
        Asset::AlphaNum4 {
            code,
            issuer: AccountId([0x22; 32]),
        }
    }

    fn sell_offer_op(amount: i64, offer_id: u64) -> Operation {
        Operation {
            source: None,
            body: OperationBody::ManageSellOffer {
                selling: Asset::Native,
                buying: usd(),
                amount,
                price: Price { n: 3, d: 2 },
                offer_id,
            },
        }
    }

    #[test]
    fn offer_remove_change_create() {
        let (s, o) = step(Formatter::ManageOffer, &sell_offer_op(0, 42));
        assert_eq!(s.caption(), "Remove Offer");
        assert_eq!(s.value(), "42");
        assert!(matches!(o, Outcome::Render(Some(Formatter::OpSource))));

        let (s, o) = step(Formatter::ManageOffer, &sell_offer_op(100, 42));
        assert_eq!(s.caption(), "Change Offer");
        assert_eq!(s.value(), "42");
        assert!(matches!(o, Outcome::Render(Some(Formatter::OfferBuy))));

        let (s, o) = step(Formatter::ManageOffer, &sell_offer_op(100, 0));
        assert_eq!(s.caption(), "Create Offer");
        assert_eq!(s.value(), "Type Active");
        assert!(matches!(o, Outcome::Render(Some(Formatter::OfferBuy))));
    }

    #[test]
    fn offer_price_truncates() {
        // 3/2 of the buying asset, integer truncation
        let (s, _) = step(Formatter::OfferPrice, &sell_offer_op(100, 0));
        assert_eq!(s.caption(), "Price");
        assert_eq!(s.value(), "1.5000000 USD");

        let mut op = sell_offer_op(100, 0);
        if let OperationBody::ManageSellOffer { price, .. } = &mut op.body {
            *price = Price { n: 1, d: 3 };
        }
        let (s, _) = step(Formatter::OfferPrice, &op);
        assert_eq!(s.value(), "0.3333333 USD");
    }

    fn signer_op(weight: u32, key: SignerKey) -> Operation {
        Operation {
            source: None,
            body: OperationBody::SetOptions(SetOptionsOp {
                signer: Some(Signer { key, weight }),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn signer_add_remove() {
        let key = SignerKey::Ed25519(AccountId([0x33; 32]));

        let (s, o) = step(Formatter::Signer, &signer_op(5, key));
        assert_eq!(s.caption(), "Add Signer");
        assert_eq!(s.value(), "Type Public Key");
        assert!(matches!(o, Outcome::Render(Some(Formatter::SignerKey))));

        let (s, _) = step(Formatter::Signer, &signer_op(0, key));
        assert_eq!(s.caption(), "Remove Signer");

        // Zero weight skips the weight screen entirely
        let (_, o) = step(Formatter::SignerWeight, &signer_op(0, key));
        assert!(matches!(o, Outcome::Skip(Some(Formatter::OpSource))));

        let (s, o) = step(Formatter::SignerWeight, &signer_op(5, key));
        assert_eq!(s.caption(), "Weight");
        assert_eq!(s.value(), "5");
        assert!(matches!(o, Outcome::Render(Some(Formatter::OpSource))));
    }

    #[test]
    fn signer_key_labels() {
        let (s, _) = step(Formatter::Signer, &signer_op(1, SignerKey::HashX([0x44; 32])));
        assert_eq!(s.value(), "Type Hash(x)");

        let (s, _) = step(
            Formatter::Signer,
            &signer_op(1, SignerKey::PreAuthTx([0x44; 32])),
        );
        assert_eq!(s.value(), "Type Pre-Auth");
    }

    #[test]
    fn set_options_skips_absent_fields() {
        let op = Operation {
            source: None,
            body: OperationBody::SetOptions(SetOptionsOp {
                low_threshold: Some(1),
                high_threshold: Some(3),
                ..Default::default()
            }),
        };

        // Entry skips to the first present field
        let (_, o) = step(Formatter::InflationDest, &op);
        assert!(matches!(o, Outcome::Skip(Some(Formatter::ClearFlags))));

        let (s, o) = step(Formatter::LowThreshold, &op);
        assert_eq!(s.caption(), "Low Threshold");
        assert!(matches!(o, Outcome::Render(Some(Formatter::MediumThreshold))));

        let (_, o) = step(Formatter::MediumThreshold, &op);
        assert!(matches!(o, Outcome::Skip(Some(Formatter::HighThreshold))));
    }

    #[test]
    fn trust_line_limits() {
        let change = |limit| Operation {
            source: None,
            body: OperationBody::ChangeTrust { line: usd(), limit },
        };

        let (s, o) = step(Formatter::ChangeTrust, &change(100));
        assert_eq!(s.caption(), "Change Trust");
        assert!(s.value().starts_with("USD@G"));
        assert!(matches!(o, Outcome::Render(Some(Formatter::TrustLimit))));

        let (s, o) = step(Formatter::ChangeTrust, &change(0));
        assert_eq!(s.caption(), "Remove Trust");
        assert!(matches!(o, Outcome::Render(Some(Formatter::OpSource))));

        let (s, _) = step(Formatter::TrustLimit, &change(i64::MAX));
        assert_eq!(s.value(), "[maximum]");

        let (s, _) = step(Formatter::TrustLimit, &change(15_000_000));
        assert_eq!(s.value(), "1.5000000");
    }

    #[test]
    fn path_via_skipped_when_empty() {
        let mut op = Operation {
            source: None,
            body: OperationBody::PathPayment {
                send_asset: Asset::Native,
                send_max: 10,
                destination: AccountId([0x55; 32]),
                dest_asset: usd(),
                dest_amount: 20,
                path: heapless::Vec::new(),
            },
        };

        let (_, o) = step(Formatter::PathVia, &op);
        assert!(matches!(o, Outcome::Skip(Some(Formatter::OpSource))));

        if let OperationBody::PathPayment { path, .. } = &mut op.body {
            path.push(Asset::Native).unwrap();
            path.push(usd()).unwrap();
        }
        let (s, _) = step(Formatter::PathVia, &op);
        assert_eq!(s.caption(), "Via");
        assert_eq!(s.value(), "XLM, USD");
    }

    #[test]
    fn op_source_skips_when_absent() {
        let mut op = Operation {
            source: None,
            body: OperationBody::Inflation,
        };

        let (_, o) = step(Formatter::OpSource, &op);
        assert!(matches!(o, Outcome::Skip(None)));

        op.source = Some(AccountId([0x66; 32]));
        let (s, o) = step(Formatter::OpSource, &op);
        assert_eq!(s.caption(), "Op Source");
        assert_eq!(s.value().len(), 56);
        assert!(matches!(o, Outcome::Render(None)));
    }

    #[test]
    fn entry_covers_all_kinds() {
        use strum::IntoEnumIterator;

        for kind in OperationKind::iter() {
            // Every kind maps to a distinct chain entry
            let entry = Formatter::entry(kind);
            assert!(
                OperationKind::iter()
                    .filter(|k| Formatter::entry(*k) == entry)
                    .count()
                    == 1
            );
        }
    }
}
