//! DSChief log notes: lock, free, vote, etch and lift.

use chief_types::{ActionKind, Address, Slate, SlateId, Spell, Wad, Word};
use tracing::{info, warn};

use crate::context::EventContext;
use crate::delta::{apply_stake_change, apply_vote_delta, SlateDelta, StakeChange};
use crate::error::{HandlerResult, SkipReason};
use crate::slates::resolve_slate;
use crate::voters::{self, Voter};

pub fn handle_lock(ctx: &mut EventContext<'_>, guy: Address, foo: &Word) -> HandlerResult {
    let wad = Wad::from_word(foo, ctx.config().byte_order)?;

    let voter = match voters::resolve(ctx, &guy)? {
        Some(mut voter) => {
            voter.adjust_locked(wad)?;
            voter.save(ctx)?;
            voter
        }
        None => voters::register(ctx, guy, wad)?,
    };

    ctx.info.locked = ctx.info.locked.try_add(wad)?;
    ctx.info.count_lock += 1;
    ctx.record(ActionKind::Lock { sender: guy, wad })?;

    propagate(ctx, &voter, wad, StakeChange::Lock)
}

pub fn handle_free(ctx: &mut EventContext<'_>, guy: Address, foo: &Word) -> HandlerResult {
    let wad = Wad::from_word(foo, ctx.config().byte_order)?;

    let mut voter =
        voters::resolve(ctx, &guy)?.ok_or(SkipReason::UnknownVoter { voter: guy })?;
    if wad > voter.locked() {
        return Err(SkipReason::FreeExceedsLocked {
            voter: guy,
            locked: voter.locked(),
            wad,
        }
        .into());
    }
    voter.adjust_locked(-wad)?;
    voter.save(ctx)?;

    ctx.info.locked = ctx.info.locked.try_sub(wad)?;
    ctx.info.count_free += 1;
    ctx.record(ActionKind::Free { sender: guy, wad })?;

    propagate(ctx, &voter, wad, StakeChange::Free)
}

fn propagate(
    ctx: &mut EventContext<'_>,
    voter: &Voter,
    wad: Wad,
    change: StakeChange,
) -> HandlerResult {
    let Some(slate_id) = voter.voted_slate() else {
        return Ok(());
    };
    let slate = ctx
        .load::<Slate>(&slate_id.to_hex())?
        .ok_or(SkipReason::UnknownSlate { slate: slate_id })?;
    apply_stake_change(ctx, &slate, voter.address(), wad, change)
}

/// `vote(bytes32)`: the slate id travels in the note.
pub fn handle_vote(ctx: &mut EventContext<'_>, guy: Address, foo: &Word) -> HandlerResult {
    apply_vote(ctx, guy, SlateId(*foo))
}

/// `vote(address[])`: the chief already etched the slate; read back which one.
pub fn handle_vote_yays(ctx: &mut EventContext<'_>, guy: Address) -> HandlerResult {
    let chief = ctx.meta().address;
    let slate_id = ctx
        .ledger()
        .votes(&chief, &guy)
        .map_err(|revert| SkipReason::LedgerRead {
            call: "votes".to_string(),
            detail: revert.to_string(),
        })?;
    apply_vote(ctx, guy, slate_id)
}

fn apply_vote(ctx: &mut EventContext<'_>, guy: Address, slate_id: SlateId) -> HandlerResult {
    let chief = ctx.meta().address;
    let slate = resolve_slate(ctx, &chief, &slate_id)?;

    let mut voter =
        voters::resolve(ctx, &guy)?.ok_or(SkipReason::UnknownVoter { voter: guy })?;

    if let Ok(deposits) = ctx.ledger().deposits(&chief, &guy) {
        if deposits != voter.locked() {
            warn!(
                voter = %guy,
                deposits = %deposits,
                locked = %voter.locked(),
                "chief deposits disagree with indexed locked amount"
            );
            ctx.flag_deposit_drift();
        }
    }

    let previous = match voter.voted_slate() {
        None => None,
        Some(id) if id == slate_id => Some(slate.clone()),
        Some(id) => {
            let loaded = ctx.load::<Slate>(&id.to_hex())?;
            if loaded.is_none() {
                warn!(voter = %guy, slate = %id, "previous slate missing, treating it as empty");
            }
            loaded
        }
    };

    let delta = SlateDelta::between(previous.as_ref(), &slate);
    voter.adopt(slate_id);
    voter.save(ctx)?;

    let weight = voter.locked();
    apply_vote_delta(ctx, &delta, guy, weight)?;

    ctx.record(ActionKind::Vote {
        sender: guy,
        wad: weight,
        slate: slate_id,
        yays: slate.yays,
    })
}

pub fn handle_etch(ctx: &mut EventContext<'_>, slate_id: &SlateId) -> HandlerResult {
    let chief = ctx.meta().address;
    resolve_slate(ctx, &chief, slate_id)?;
    let sender = ctx.meta().from;
    ctx.record(ActionKind::Etch {
        sender,
        slate: *slate_id,
    })
}

pub fn handle_lift(ctx: &mut EventContext<'_>, guy: Address, foo: &Word) -> HandlerResult {
    let whom = foo.to_address(ctx.config().byte_order);
    let mut spell = ctx
        .load::<Spell>(&whom.to_hex())?
        .ok_or(SkipReason::UnknownSpell { spell: whom })?;

    let chief = ctx.meta().address;
    let approvals = match ctx.ledger().approvals(&chief, &whom) {
        Ok(approvals) => approvals,
        Err(revert) => {
            info!(spell = %whom, %revert, "approvals read failed, using indexed weight");
            spell.approvals
        }
    };

    spell.lifted = Some(ctx.meta().timestamp);
    spell.lifted_with = Some(approvals);
    ctx.save(&spell)?;

    ctx.info.hat = Some(whom);
    ctx.record(ActionKind::Lift {
        sender: guy,
        hat: whom,
    })
}
