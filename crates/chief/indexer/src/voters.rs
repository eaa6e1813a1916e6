//! Voter identity resolution.
//!
//! A sender is a vote proxy if one is stored under its address, otherwise an
//! address voter if one is stored, otherwise unknown. Only a lock registers
//! an unknown sender.

use chief_types::{ActionKind, Address, AddressVoter, ConversionResult, SlateId, VoteProxy, Wad};
use tracing::debug;

use crate::context::EventContext;
use crate::error::HandlerResult;

/// A resolved voter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voter {
    Proxy(VoteProxy),
    Address(AddressVoter),
}

impl Voter {
    pub fn address(&self) -> Address {
        match self {
            Voter::Proxy(proxy) => proxy.address,
            Voter::Address(voter) => voter.address,
        }
    }

    pub fn locked(&self) -> Wad {
        match self {
            Voter::Proxy(proxy) => proxy.locked,
            Voter::Address(voter) => voter.locked,
        }
    }

    pub fn voted_slate(&self) -> Option<SlateId> {
        match self {
            Voter::Proxy(proxy) => proxy.voted_slate,
            Voter::Address(voter) => voter.voted_slate,
        }
    }

    /// Add `delta` (negative on free) to the locked amount.
    pub fn adjust_locked(&mut self, delta: Wad) -> ConversionResult<()> {
        let locked = match self {
            Voter::Proxy(proxy) => &mut proxy.locked,
            Voter::Address(voter) => &mut voter.locked,
        };
        *locked = locked.try_add(delta)?;
        Ok(())
    }

    pub fn adopt(&mut self, slate: SlateId) {
        match self {
            Voter::Proxy(proxy) => proxy.voted_slate = Some(slate),
            Voter::Address(voter) => voter.voted_slate = Some(slate),
        }
    }

    pub fn save(&self, ctx: &mut EventContext<'_>) -> HandlerResult {
        match self {
            Voter::Proxy(proxy) => ctx.save(proxy),
            Voter::Address(voter) => ctx.save(voter),
        }
    }
}

/// Resolve `sender`, checking vote proxies first.
pub fn resolve(ctx: &EventContext<'_>, sender: &Address) -> HandlerResult<Option<Voter>> {
    let id = sender.to_hex();
    if let Some(proxy) = ctx.load::<VoteProxy>(&id)? {
        return Ok(Some(Voter::Proxy(proxy)));
    }
    Ok(ctx.load::<AddressVoter>(&id)?.map(Voter::Address))
}

/// Create an address voter holding `locked`, count it and audit the registration.
pub fn register(ctx: &mut EventContext<'_>, sender: Address, locked: Wad) -> HandlerResult<Voter> {
    let voter = AddressVoter {
        address: sender,
        locked,
        voted_slate: None,
        created_at: ctx.meta().timestamp,
    };
    ctx.save(&voter)?;
    ctx.info.count_addresses += 1;
    ctx.record(ActionKind::Voter {
        voter: sender,
        registry: None,
    })?;
    debug!(voter = %sender, "registered address voter");
    Ok(Voter::Address(voter))
}
