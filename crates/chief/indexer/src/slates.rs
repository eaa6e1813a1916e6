//! Slate discovery.
//!
//! A slate's members are read one index at a time until the chief reverts.
//! Each new member is run through the classification cascade once; recognized
//! spells are created and queued for tracking. A stored slate is final.

use std::collections::BTreeSet;

use chief_types::{Address, Entity, Slate, SlateId, Spell};
use tracing::{debug, info};

use crate::classify::{classify, Classification};
use crate::context::EventContext;
use crate::error::HandlerResult;
use crate::tracking::TrackingRequest;

/// Make sure `slate_id` is stored, enumerating it on `chief` if it is new.
///
/// Returns the stored slate either way.
pub fn resolve_slate(
    ctx: &mut EventContext<'_>,
    chief: &Address,
    slate_id: &SlateId,
) -> HandlerResult<Slate> {
    if let Some(existing) = ctx.load::<Slate>(&slate_id.to_hex())? {
        return Ok(existing);
    }

    let mut yays = Vec::new();
    let mut probed = BTreeSet::new();
    let mut index = 0u64;
    while let Ok(member) = ctx.ledger().slate_member(chief, slate_id, index) {
        if probed.insert(member) {
            discover_member(ctx, &member)?;
        }
        yays.push(member);
        index += 1;
    }

    let slate = Slate {
        id: *slate_id,
        yays,
        created_at: ctx.meta().timestamp,
    };
    ctx.save(&slate)?;
    ctx.info.count_slates += 1;
    debug!(slate = %slate_id, members = slate.yays.len(), "resolved slate");
    Ok(slate)
}

fn discover_member(ctx: &mut EventContext<'_>, member: &Address) -> HandlerResult {
    if ctx.config().is_excluded(member) || ctx.contains::<Spell>(&member.to_hex())? {
        return Ok(());
    }

    let classification = classify(ctx.ledger(), ctx.config(), member);
    let Some(kind) = classification.spell_kind() else {
        return Ok(());
    };

    let mut spell = Spell::new(*member, kind, ctx.meta().timestamp);
    if let Classification::Direct { data } = classification {
        spell.data = data;
    }
    ctx.save(&spell)?;
    ctx.info.count_spells += 1;
    ctx.track(TrackingRequest {
        address: *member,
        kind,
    });
    info!(spell = %spell.entity_id(), %kind, "discovered spell");
    Ok(())
}
