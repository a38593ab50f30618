// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction review session engine
//!
//! A [ReviewSession] owns one raw signature base and walks the user
//! through its screens one at a time. Forward motion follows the
//! formatter chain for the current element, entering the next element
//! when the chain runs out. Backward motion steps down the retained
//! chain, and crosses an element boundary by re-decoding the
//! transaction from offset zero up to the previous element and fast
//! forwarding to its final screen. Screen order is a pure function of
//! the raw bytes, so replays land on identical content.
//!
//! Approval is only offered once the walk has reached [Step::EndOfReview]
//! at least once, and releases the transaction hash for signing. Approve,
//! reject, and any internal failure all scrub the session buffers.

use heapless::Vec;
use strum::{Display, EnumIter, EnumString};
use zeroize::Zeroize;

use crate::tx::{decode, Operation, TxHash, TxHeader, MAX_TX_LEN};

mod chain;
use chain::Chain;
pub use chain::CHAIN_DEPTH;

mod error;
pub use error::Error;

mod format;
use format::{FormatCtx, Formatter, Outcome};

pub mod screen;
use screen::Screen;

/// Review session mode, chosen at session start
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, EnumIter)]
pub enum ReviewMode {
    /// Decode the transaction and present every field for review
    FullTransaction,
    /// Present only the transaction hash, prefixed with a warning
    HashOnly,
}

/// Review session lifecycle states
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, EnumIter)]
pub enum State {
    /// Session active, navigation and decision calls accepted
    Review,
    /// Transaction approved, hash released
    Approved,
    /// Transaction rejected by the user
    Rejected,
    /// Session failed, all further calls rejected
    Failed,
}

/// Review element the walk is currently in
///
/// Operations use one-based indices, `Operation(0)` marks the position
/// before the first operation. The transaction-level fields form a
/// single element shown once after the final operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Element {
    Operation(u8),
    Globals,
    Digest,
}

/// One navigation step result
#[derive(Clone, PartialEq, Debug)]
pub enum Step {
    /// Moved onto a screen
    Screen(Screen),
    /// Advanced past the final screen, approval now available
    EndOfReview,
    /// Retreated at the first screen, position unchanged
    StartOfReview,
}

/// Transaction review session
///
/// Holds the raw signature base plus the decoded header and the single
/// operation under review, so memory use is independent of the number of
/// operations in the transaction.
pub struct ReviewSession {
    state: State,
    mode: ReviewMode,

    /// Raw signature base, scrubbed when the session ends
    raw: Vec<u8, MAX_TX_LEN>,

    /// Hash over the raw signature base, released on approval
    hash: TxHash,

    header: TxHeader,

    /// Operation belonging to the current element
    op: Operation,

    /// Decode offset past the current operation
    offset: usize,

    element: Element,
    chain: Chain,
    screen: Screen,

    /// Set once the walk has reached the end, stays set across retreats
    seen_end: bool,

    /// Set while positioned past the final screen
    at_end: bool,
}

impl ReviewSession {
    /// Start a review over a raw signature base
    ///
    /// In [ReviewMode::FullTransaction] the header is decoded up front
    /// and the first screen rendered, malformed input fails here or on a
    /// later [advance][Self::advance] once the offending operation is
    /// reached.
    pub fn begin_review(raw: &[u8], mode: ReviewMode) -> Result<Self, Error> {
        let mut s = Self {
            state: State::Review,
            mode,
            raw: Vec::from_slice(raw).map_err(|_| Error::DecodeFailed)?,
            hash: TxHash::of(raw),
            header: TxHeader::default(),
            op: Operation::default(),
            offset: 0,
            element: Element::Operation(0),
            chain: Chain::new(),
            screen: Screen::new(),
            seen_end: false,
            at_end: false,
        };

        match mode {
            ReviewMode::HashOnly => {
                s.element = Element::Digest;
                s.chain.reset(Formatter::HashWarning);
                if !s.render_current()? {
                    return Err(Error::InvalidState);
                }
            }
            ReviewMode::FullTransaction => {
                let (header, offset) = decode::decode_header(&s.raw)?;

                #[cfg(feature = "log")]
                log::debug!(
                    "reviewing {} operation(s) on {} network",
                    header.op_count,
                    header.network.name()
                );

                s.header = header;
                s.offset = offset;

                match s.enter_next_element()? {
                    Step::Screen(_) => (),
                    _ => return Err(Error::InvalidState),
                }
            }
        }

        Ok(s)
    }

    /// Session state
    pub fn state(&self) -> State {
        self.state
    }

    /// Session mode
    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    /// Screen under review
    pub fn current_screen(&self) -> Result<&Screen, Error> {
        self.active()?;
        Ok(&self.screen)
    }

    /// Move to the next screen
    ///
    /// Returns [Step::EndOfReview] once past the final screen, repeated
    /// calls at the end are idempotent.
    pub fn advance(&mut self) -> Result<Step, Error> {
        self.active()?;
        let r = self.advance_inner();
        self.seal(r)
    }

    /// Move to the previous screen
    ///
    /// Returns [Step::StartOfReview] at the first screen, leaving the
    /// position unchanged.
    pub fn retreat(&mut self) -> Result<Step, Error> {
        self.active()?;
        let r = self.retreat_inner();
        self.seal(r)
    }

    /// Approve the transaction and release its hash
    ///
    /// Only available once the walk has reached [Step::EndOfReview],
    /// retreating afterwards does not withdraw the offer. Scrubs the
    /// session buffers.
    pub fn approve(&mut self) -> Result<TxHash, Error> {
        self.active()?;
        if !self.seen_end {
            return Err(Error::InvalidState);
        }

        let hash = self.hash;
        self.scrub();
        self.state = State::Approved;

        #[cfg(feature = "log")]
        log::info!("transaction approved");

        Ok(hash)
    }

    /// Reject the transaction, available at any point of the walk
    ///
    /// Scrubs the session buffers.
    pub fn reject(&mut self) -> Result<(), Error> {
        self.active()?;

        self.scrub();
        self.state = State::Rejected;

        #[cfg(feature = "log")]
        log::info!("transaction rejected");

        Ok(())
    }

    fn active(&self) -> Result<(), Error> {
        match self.state {
            State::Review => Ok(()),
            _ => Err(Error::InvalidState),
        }
    }

    /// Fail the session on any navigation error, scrubbing buffers
    fn seal(&mut self, r: Result<Step, Error>) -> Result<Step, Error> {
        if let Err(_e) = &r {
            #[cfg(feature = "log")]
            log::error!("review failed: {:?}", _e);

            self.scrub();
            self.state = State::Failed;
        }
        r
    }

    fn scrub(&mut self) {
        self.raw.as_mut_slice().zeroize();
        self.raw.clear();
        self.screen.clear();
        self.chain.clear();
        self.header = TxHeader::default();
        self.op = Operation::default();
    }

    fn advance_inner(&mut self) -> Result<Step, Error> {
        if self.chain.has_next() {
            self.chain.step_forward();
            if self.render_current()? {
                return Ok(Step::Screen(self.screen.clone()));
            }
        }
        self.enter_next_element()
    }

    fn retreat_inner(&mut self) -> Result<Step, Error> {
        // Retreating from past the end re-renders the final screen, its
        // formatter is still at the cursor
        if self.at_end {
            self.at_end = false;
            if self.render_current()? {
                return Ok(Step::Screen(self.screen.clone()));
            }
            return Err(Error::InvalidState);
        }

        if self.chain.step_back() {
            if self.render_current()? {
                return Ok(Step::Screen(self.screen.clone()));
            }
            return Err(Error::InvalidState);
        }

        self.enter_prev_element()
    }

    /// Decode the operation at the current offset as element `index`
    ///
    /// Decoding the final operation also validates the envelope tail.
    fn decode_next_op(&mut self, index: u8) -> Result<(), Error> {
        let (op, next) = decode::decode_operation(&self.raw, self.offset)?;
        if index == self.header.op_count {
            decode::decode_tail(&self.raw, next)?;
        }

        #[cfg(feature = "log")]
        log::debug!("operation {}: {}", index, op.kind());

        self.op = op;
        self.offset = next;
        self.element = Element::Operation(index);

        Ok(())
    }

    /// Run the formatter at the cursor, resolving skips in place
    ///
    /// Returns false when the element has no further screens.
    fn render_current(&mut self) -> Result<bool, Error> {
        loop {
            let f = match self.chain.current() {
                Some(f) => f,
                None => return Ok(false),
            };

            self.screen.clear();

            let ctx = FormatCtx {
                header: &self.header,
                op: &self.op,
                hash: &self.hash,
            };

            match f.exec(&ctx, &mut self.screen)? {
                Outcome::Skip(Some(next)) => self.chain.set_current(next),
                Outcome::Skip(None) => return Ok(false),
                Outcome::Render(next) => {
                    self.chain.push(next)?;

                    if let Element::Operation(index) = self.element {
                        if self.header.op_count > 1 {
                            self.screen.set_position(index, self.header.op_count)?;
                        }
                    }

                    return Ok(true);
                }
            }
        }
    }

    /// Enter the next element and render its first screen, passing over
    /// elements with no visible fields
    fn enter_next_element(&mut self) -> Result<Step, Error> {
        loop {
            match self.element {
                Element::Operation(index) if index < self.header.op_count => {
                    self.decode_next_op(index + 1)?;
                    self.chain.reset(Formatter::entry(self.op.kind()));
                    if self.render_current()? {
                        return Ok(Step::Screen(self.screen.clone()));
                    }
                }
                Element::Operation(_) => {
                    self.element = Element::Globals;
                    self.chain.reset(Formatter::Memo);
                    if self.render_current()? {
                        return Ok(Step::Screen(self.screen.clone()));
                    }
                }
                Element::Globals | Element::Digest => {
                    self.seen_end = true;
                    self.at_end = true;

                    #[cfg(feature = "log")]
                    log::debug!("end of review reached");

                    return Ok(Step::EndOfReview);
                }
            }
        }
    }

    /// Retreat across an element boundary onto the final screen of the
    /// nearest earlier element with visible fields
    ///
    /// Earlier elements are rebuilt by decoding from offset zero, the
    /// decode is deterministic so the replayed screens match the
    /// originals.
    fn enter_prev_element(&mut self) -> Result<Step, Error> {
        let origin = self.element;

        let mut target = match origin {
            Element::Operation(index) => index.saturating_sub(1),
            Element::Globals => self.header.op_count,
            Element::Digest => 0,
        };

        while target > 0 {
            self.replay_element(target)?;
            if self.render_current()? {
                self.seek_element_end()?;
                return Ok(Step::Screen(self.screen.clone()));
            }
            target -= 1;
        }

        self.restore_first(origin)?;
        Ok(Step::StartOfReview)
    }

    /// Re-decode from offset zero up to operation `target` and reset the
    /// chain to its entry formatter
    fn replay_element(&mut self, target: u8) -> Result<(), Error> {
        let (header, offset) = decode::decode_header(&self.raw)?;
        self.header = header;
        self.offset = offset;

        for index in 1..=target {
            self.decode_next_op(index)?;
        }

        self.chain.reset(Formatter::entry(self.op.kind()));
        Ok(())
    }

    /// Walk the chain forward to the final screen of the current element
    fn seek_element_end(&mut self) -> Result<(), Error> {
        while self.chain.has_next() {
            self.chain.step_forward();
            if !self.render_current()? {
                // Trailing step skipped, back up onto the final screen
                self.chain.step_back();
                self.render_current()?;
                break;
            }
        }
        Ok(())
    }

    /// Rebuild the first screen of `origin` after a failed boundary
    /// retreat clobbered the decoded state
    fn restore_first(&mut self, origin: Element) -> Result<(), Error> {
        match origin {
            Element::Operation(index) => self.replay_element(index)?,
            Element::Globals => {
                self.element = Element::Globals;
                self.chain.reset(Formatter::Memo);
            }
            Element::Digest => self.chain.reset(Formatter::HashWarning),
        }

        self.render_current()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RAW: &[u8] = b"not a decodable transaction";

    fn session() -> ReviewSession {
        ReviewSession::begin_review(RAW, ReviewMode::HashOnly).unwrap()
    }

    fn screen(step: Step) -> Screen {
        match step {
            Step::Screen(s) => s,
            other => panic!("expected screen, got {:?}", other),
        }
    }

    #[test]
    fn hash_only_screens() {
        let mut s = session();
        assert_eq!(s.state(), State::Review);
        assert_eq!(s.mode(), ReviewMode::HashOnly);

        assert_eq!(s.current_screen().unwrap().caption(), "WARNING");
        assert_eq!(s.current_screen().unwrap().value(), "No details available");
        assert_eq!(s.current_screen().unwrap().position(), None);

        let second = screen(s.advance().unwrap());
        assert_eq!(second.caption(), "Hash");
        assert!(second.value().starts_with("0x"));

        assert_eq!(s.advance().unwrap(), Step::EndOfReview);
        assert_eq!(s.advance().unwrap(), Step::EndOfReview);
    }

    #[test]
    fn retreat_walks_back() {
        let mut s = session();
        s.advance().unwrap();
        assert_eq!(s.advance().unwrap(), Step::EndOfReview);

        assert_eq!(screen(s.retreat().unwrap()).caption(), "Hash");
        assert_eq!(screen(s.retreat().unwrap()).caption(), "WARNING");

        // Retreating at the first screen holds position
        assert_eq!(s.retreat().unwrap(), Step::StartOfReview);
        assert_eq!(s.current_screen().unwrap().caption(), "WARNING");
    }

    #[test]
    fn replay_is_deterministic() {
        let mut s = session();
        let first = s.current_screen().unwrap().clone();
        let second = screen(s.advance().unwrap());

        s.advance().unwrap();
        assert_eq!(screen(s.retreat().unwrap()), second);
        assert_eq!(screen(s.retreat().unwrap()), first);
        assert_eq!(screen(s.advance().unwrap()), second);
    }

    #[test]
    fn approve_requires_end() {
        let mut s = session();
        assert_eq!(s.approve(), Err(Error::InvalidState));
        assert_eq!(s.state(), State::Review);

        s.advance().unwrap();
        s.advance().unwrap();

        assert_eq!(s.approve(), Ok(TxHash::of(RAW)));
        assert_eq!(s.state(), State::Approved);

        assert_eq!(s.advance(), Err(Error::InvalidState));
        assert_eq!(s.retreat(), Err(Error::InvalidState));
        assert!(s.current_screen().is_err());
    }

    #[test]
    fn approve_survives_retreat_from_end() {
        let mut s = session();
        s.advance().unwrap();
        s.advance().unwrap();
        s.retreat().unwrap();

        assert!(s.approve().is_ok());
    }

    #[test]
    fn reject_at_any_point() {
        let mut s = session();
        s.reject().unwrap();
        assert_eq!(s.state(), State::Rejected);

        assert_eq!(s.reject(), Err(Error::InvalidState));
        assert_eq!(s.approve(), Err(Error::InvalidState));
    }

    #[test]
    fn full_mode_rejects_garbage() {
        assert!(ReviewSession::begin_review(RAW, ReviewMode::FullTransaction).is_err());
    }

    #[test]
    fn oversized_input_rejected() {
        let raw = [0u8; MAX_TX_LEN + 1];
        assert_eq!(
            ReviewSession::begin_review(&raw, ReviewMode::HashOnly)
                .err()
                .unwrap(),
            Error::DecodeFailed
        );
    }

    #[test]
    fn state_display() {
        use core::str::FromStr;

        assert_eq!(State::Review.to_string(), "Review");
        assert_eq!(State::from_str("Approved"), Ok(State::Approved));
        assert_eq!(ReviewMode::HashOnly.to_string(), "HashOnly");
    }
}
