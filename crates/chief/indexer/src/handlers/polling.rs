//! Polling emitter lifecycle: creation, votes and withdrawal.

use chief_types::{ActionKind, Address, Poll, PollId, PollVote};
use chrono::{DateTime, Utc};

use crate::context::EventContext;
use crate::error::{HandlerResult, SkipReason};

pub struct NewPoll {
    pub creator: Address,
    pub block_created: u64,
    pub poll_id: PollId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub multi_hash: String,
    pub url: String,
}

pub fn handle_poll_created(ctx: &mut EventContext<'_>, new: NewPoll) -> HandlerResult {
    if ctx.contains::<Poll>(&Poll::key(new.poll_id))? {
        return Err(SkipReason::DuplicatePoll {
            poll_id: new.poll_id,
        }
        .into());
    }

    let meta = ctx.meta();
    ctx.save(&Poll {
        poll_id: new.poll_id,
        creator: new.creator,
        block_created: new.block_created,
        start_date: new.start_date,
        end_date: new.end_date,
        multi_hash: new.multi_hash,
        url: new.url,
        votes_count: 0,
        timeline_count: 0,
        withdrawn: None,
        created_at: meta.timestamp,
        transaction_hash: meta.transaction_hash,
    })?;
    ctx.info.count_polls += 1;

    ctx.record(ActionKind::PollCreated {
        sender: meta.from,
        poll_id: new.poll_id,
    })
}

pub fn handle_poll_vote(
    ctx: &mut EventContext<'_>,
    voter: Address,
    poll_id: PollId,
    option: u64,
) -> HandlerResult {
    let meta = ctx.meta();
    let mut poll = ctx
        .load::<Poll>(&Poll::key(poll_id))?
        .ok_or(SkipReason::UnknownPoll { poll_id })?;
    if meta.timestamp > poll.end_date {
        return Err(SkipReason::LatePollVote { poll_id, voter }.into());
    }

    let vote = match ctx.load::<PollVote>(&PollVote::key(poll_id, &voter))? {
        Some(existing) => PollVote {
            option,
            voted_at: meta.timestamp,
            block_number: meta.block_number,
            transaction_hash: meta.transaction_hash,
            ..existing
        },
        None => {
            poll.votes_count += 1;
            PollVote {
                poll_id,
                voter,
                option,
                first_voted_at: meta.timestamp,
                voted_at: meta.timestamp,
                block_number: meta.block_number,
                transaction_hash: meta.transaction_hash,
            }
        }
    };
    poll.timeline_count += 1;
    ctx.save(&vote)?;
    ctx.save(&poll)?;

    ctx.record(ActionKind::PollVote {
        voter,
        poll_id,
        option,
    })
}

pub fn handle_poll_withdrawn(
    ctx: &mut EventContext<'_>,
    creator: Address,
    poll_id: PollId,
) -> HandlerResult {
    let mut poll = ctx
        .load::<Poll>(&Poll::key(poll_id))?
        .ok_or(SkipReason::UnknownPoll { poll_id })?;
    poll.withdrawn = Some(ctx.meta().timestamp);
    poll.timeline_count += 1;
    ctx.save(&poll)?;

    ctx.record(ActionKind::PollWithdrawn {
        sender: creator,
        poll_id,
    })
}
