use chief_types::{ActionKind, Address, Spell};
use tracing::info;

use crate::context::EventContext;
use crate::error::{HandlerResult, SkipReason};

/// `cast()` on a tracked spell. Approvals come from the configured chief,
/// since the event itself is emitted by the spell.
pub fn handle_cast(
    ctx: &mut EventContext<'_>,
    spell_address: Address,
    sender: Address,
) -> HandlerResult {
    let mut spell = ctx
        .load::<Spell>(&spell_address.to_hex())?
        .ok_or(SkipReason::UnknownSpell {
            spell: spell_address,
        })?;

    let chief = ctx.config().chief;
    let approvals = match ctx.ledger().approvals(&chief, &spell_address) {
        Ok(approvals) => approvals,
        Err(revert) => {
            info!(spell = %spell_address, %revert, "approvals read failed, using indexed weight");
            spell.approvals
        }
    };

    spell.casted = Some(ctx.meta().timestamp);
    spell.casted_with = Some(approvals);
    ctx.save(&spell)?;

    ctx.info.count_casted += 1;
    info!(spell = %spell_address, kind = %spell.kind, casted_with = %approvals, "spell cast");
    ctx.record(ActionKind::Cast {
        sender,
        spell: spell_address,
    })
}
