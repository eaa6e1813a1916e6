use chief_types::{ActionKind, Address, VoteProxy, VoterRegistry, Wad};
use tracing::debug;

use crate::context::EventContext;
use crate::error::{HandlerResult, SkipReason};

/// `LinkConfirmed(cold, hot, voteProxy)` from the vote proxy factory.
pub fn handle_link_confirmed(
    ctx: &mut EventContext<'_>,
    cold: Address,
    hot: Address,
    vote_proxy: Address,
) -> HandlerResult {
    if ctx.contains::<VoteProxy>(&vote_proxy.to_hex())? {
        return Err(SkipReason::DuplicateProxy { proxy: vote_proxy }.into());
    }

    let created_at = ctx.meta().timestamp;
    let registry = VoterRegistry {
        id: ctx.meta().key(),
        cold_address: cold,
        hot_address: hot,
        vote_proxy,
        created_at,
    };
    ctx.save(&registry)?;

    ctx.save(&VoteProxy {
        address: vote_proxy,
        owner: registry.id.clone(),
        locked: Wad::ZERO,
        voted_slate: None,
        created_at,
    })?;
    ctx.info.count_proxies += 1;

    ctx.record(ActionKind::Voter {
        voter: vote_proxy,
        registry: Some(registry.id),
    })?;
    debug!(proxy = %vote_proxy, cold = %cold, hot = %hot, "linked vote proxy");
    Ok(())
}
