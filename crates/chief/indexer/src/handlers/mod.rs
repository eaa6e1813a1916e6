//! One handler per event kind. Handlers write only through the
//! [`EventContext`]; returning an error discards everything they staged.

pub mod chief;
pub mod polling;
pub mod proxy;
pub mod spell;
pub mod token;

use chief_types::EventPayload;

use crate::context::EventContext;
use crate::error::HandlerResult;

pub fn dispatch(ctx: &mut EventContext<'_>, payload: &EventPayload) -> HandlerResult {
    match payload {
        EventPayload::Lock { guy, foo } => chief::handle_lock(ctx, *guy, foo),
        EventPayload::Free { guy, foo } => chief::handle_free(ctx, *guy, foo),
        EventPayload::Vote { guy, foo } => chief::handle_vote(ctx, *guy, foo),
        EventPayload::VoteYays { guy } => chief::handle_vote_yays(ctx, *guy),
        EventPayload::Etch { slate } => chief::handle_etch(ctx, slate),
        EventPayload::Lift { guy, foo } => chief::handle_lift(ctx, *guy, foo),
        EventPayload::LinkConfirmed {
            cold,
            hot,
            vote_proxy,
        } => proxy::handle_link_confirmed(ctx, *cold, *hot, *vote_proxy),
        EventPayload::SpellCast { spell, sender } => spell::handle_cast(ctx, *spell, *sender),
        EventPayload::PollCreated {
            creator,
            block_created,
            poll_id,
            start_date,
            end_date,
            multi_hash,
            url,
        } => polling::handle_poll_created(
            ctx,
            polling::NewPoll {
                creator: *creator,
                block_created: *block_created,
                poll_id: *poll_id,
                start_date: *start_date,
                end_date: *end_date,
                multi_hash: multi_hash.clone(),
                url: url.clone(),
            },
        ),
        EventPayload::PollVoted {
            voter,
            poll_id,
            option_id,
        } => polling::handle_poll_vote(ctx, *voter, *poll_id, *option_id),
        EventPayload::PollWithdrawn {
            creator, poll_id, ..
        } => polling::handle_poll_withdrawn(ctx, *creator, *poll_id),
        EventPayload::TokenTransfer { from, to, value } => {
            token::handle_transfer(ctx, *from, *to, value)
        }
        EventPayload::TokenMint { guy, wad } => token::handle_mint(ctx, *guy, wad),
        EventPayload::TokenBurn { guy, wad } => token::handle_burn(ctx, *guy, wad),
    }
}
