//! Synchronous read calls into contract state.
//!
//! Every call either returns a value or a [`Revert`]. A revert is an ordinary
//! answer here: slate enumeration ends on one and the classification probes
//! treat one as "capability absent".

mod fixture;

pub use fixture::{FixtureLedger, SpellProbe};

use chief_types::{Address, Bytes, SlateId, Wad};
use thiserror::Error;

/// A read call that failed on the ledger side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("call reverted: {0}")]
pub struct Revert(pub String);

impl Revert {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

pub type CallResult<T> = Result<T, Revert>;

/// Read access to the chief and to candidate spell contracts.
pub trait GovernanceLedger: Send + Sync {
    /// `slates(slate, index)` on the chief; reverts past the last member.
    fn slate_member(&self, chief: &Address, slate: &SlateId, index: u64) -> CallResult<Address>;

    /// `deposits(voter)` on the chief.
    fn deposits(&self, chief: &Address, voter: &Address) -> CallResult<Wad>;

    /// `approvals(spell)` on the chief.
    fn approvals(&self, chief: &Address, spell: &Address) -> CallResult<Wad>;

    /// `votes(voter)` on the chief.
    fn votes(&self, chief: &Address, voter: &Address) -> CallResult<SlateId>;

    /// `pause()` on a candidate spell.
    fn spell_pause(&self, spell: &Address) -> CallResult<Address>;

    /// `whom()` on a candidate spell.
    fn spell_whom(&self, spell: &Address) -> CallResult<Address>;

    /// `data()` on a candidate spell.
    fn spell_data(&self, spell: &Address) -> CallResult<Bytes>;

    /// `MOM()` on a candidate spell.
    fn spell_mom(&self, spell: &Address) -> CallResult<Address>;
}
