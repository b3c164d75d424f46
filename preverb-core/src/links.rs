//! Link identifier allocation and tentative verb↔preverb bindings
//!
//! The counter lives as long as the engine and is never reset between
//! sentences, so identifiers are unique across a whole document. A preverb
//! that is already connected can be taken over by a verb that is strictly
//! closer; the verb that loses it keeps its stale id until reconciliation.

use crate::token::{LinkId, LinkState, Token};
use tracing::debug;

/// Whether `token` can still be bound at `distance` tokens from a verb
///
/// Free tokens are eligible, and so are connected ones whose current partner
/// is strictly farther away.
pub fn is_eligible(token: &Token, distance: usize) -> bool {
    match token.link.state {
        LinkState::None => true,
        LinkState::Connected => token.link.distance() > distance,
        LinkState::Separated | LinkState::Prefixed => false,
    }
}

/// Outcome of a binding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The preverb was free
    Claimed(LinkId),
    /// The preverb was taken from a farther verb
    Reassigned {
        /// New identifier
        id: LinkId,
        /// Identifier the preverb carried before
        previous: LinkId,
    },
}

impl Binding {
    /// Identifier now shared by verb and preverb
    pub fn id(&self) -> LinkId {
        match self {
            Binding::Claimed(id) | Binding::Reassigned { id, .. } => *id,
        }
    }
}

/// Monotonic link-id counter owned by one engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAllocator {
    next: LinkId,
}

impl Default for LinkAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkAllocator {
    /// Start counting at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next identifier
    pub fn allocate(&mut self) -> LinkId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Identifier the next allocation will return
    pub fn peek(&self) -> LinkId {
        self.next
    }

    /// Restart counting at 1
    pub fn reset(&mut self) {
        self.next = 1;
    }

    /// Bind `verb` to a free `preverb` (buffer indices)
    ///
    /// Returns `None` when the preverb is not free.
    pub fn claim(&mut self, tokens: &mut [Token], verb: usize, preverb: usize) -> Option<LinkId> {
        if !tokens[preverb].is(LinkState::None) {
            return None;
        }
        let id = self.allocate();
        link_pair(tokens, verb, preverb, id);
        debug!(id, verb, preverb, "claimed preverb");
        Some(id)
    }

    /// Move a connected `preverb` over to `verb` if `verb` is strictly closer
    ///
    /// Returns the new and the previous identifier, or `None` when the
    /// current partner is at least as close.
    pub fn reassign(
        &mut self,
        tokens: &mut [Token],
        verb: usize,
        preverb: usize,
    ) -> Option<(LinkId, LinkId)> {
        let current = tokens[preverb].link;
        let previous = match (current.state, current.id) {
            (LinkState::Connected, Some(previous)) => previous,
            _ => return None,
        };
        if verb.abs_diff(preverb) >= current.distance() {
            return None;
        }
        let id = self.allocate();
        link_pair(tokens, verb, preverb, id);
        debug!(id, previous, verb, preverb, "reassigned preverb to closer verb");
        Some((id, previous))
    }

    /// Claim or reassign, whichever applies
    pub fn bind(&mut self, tokens: &mut [Token], verb: usize, preverb: usize) -> Option<Binding> {
        match tokens[preverb].link.state {
            LinkState::None => self.claim(tokens, verb, preverb).map(Binding::Claimed),
            LinkState::Connected => self
                .reassign(tokens, verb, preverb)
                .map(|(id, previous)| Binding::Reassigned { id, previous }),
            LinkState::Separated | LinkState::Prefixed => None,
        }
    }
}

fn link_pair(tokens: &mut [Token], verb: usize, preverb: usize, id: LinkId) {
    let verb_offset = verb as i32 - preverb as i32;

    let verb_link = &mut tokens[verb].link;
    verb_link.state = LinkState::Separated;
    verb_link.id = Some(id);
    verb_link.offset = verb_offset;

    let preverb_link = &mut tokens[preverb].link;
    preverb_link.state = LinkState::Connected;
    preverb_link.id = Some(id);
    preverb_link.offset = -verb_offset;
}
