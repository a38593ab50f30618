// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Stellar hardware wallet transaction review engine
//!
//! This provides a [ReviewSession][engine::ReviewSession] that paginates a
//! received transaction into a sequence of caption/value screens for user
//! approval on a memory constrained device, one screen resident at a time.
//!
//! The session consumes the Stellar signature base (network id, envelope
//! type tag, then the transaction XDR) as a single byte buffer and decodes
//! operations incrementally while the user pages through them, so memory
//! use is bounded by the largest single operation rather than the
//! transaction as a whole. Paging backward re-derives earlier screens by
//! re-decoding from the start of the buffer, trading time for memory.
//!
//! ## Reviewing a transaction
//!
//! 1. Call [`ReviewSession::begin_review`][engine::ReviewSession::begin_review]
//!    with the raw signature base and a [`ReviewMode`][engine::ReviewMode],
//!    this decodes the header and renders the first screen.
//! 2. Display [`current_screen`][engine::ReviewSession::current_screen] and
//!    drive [`advance`][engine::ReviewSession::advance] /
//!    [`retreat`][engine::ReviewSession::retreat] from user input, each
//!    returning a [`Step`][engine::Step] with the new screen or a boundary
//!    marker.
//! 3. When [`Step::EndOfReview`][engine::Step] has been reached, call
//!    [`approve`][engine::ReviewSession::approve] to obtain the
//!    [`TxHash`][tx::TxHash] for the signing backend, or
//!    [`reject`][engine::ReviewSession::reject] to discard the session.
//!
//! [`ReviewMode::HashOnly`][engine::ReviewMode] provides the fallback path
//! for transactions the host could not submit for structured review: a
//! warning screen and a digest summary, with no decoding at all.
//!
//! All screen text is rendered into fixed buffers, see [screen::Screen]
//! for bounds and [helpers] for the value encoders.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;

pub mod helpers;

pub mod tx;

pub use engine::screen;
