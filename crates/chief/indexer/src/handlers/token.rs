//! Governance token (DSToken) balances.
//!
//! A transfer from the zero address is a mint and a transfer to it is a burn.
//! Every touched balance also gets a snapshot keyed by block timestamp.

use chief_types::{
    Account, AccountBalance, AccountBalanceSnapshot, Address, TokenEvent, TokenEventKind, Wad,
    Word,
};

use crate::context::EventContext;
use crate::error::HandlerResult;

pub fn handle_transfer(
    ctx: &mut EventContext<'_>,
    from: Address,
    to: Address,
    value: &Word,
) -> HandlerResult {
    if from.is_zero() {
        return handle_mint(ctx, to, value);
    }
    if to.is_zero() {
        return handle_burn(ctx, from, value);
    }

    let amount = Wad::from_word(value, ctx.config().byte_order)?;
    let event_id = record_event(
        ctx,
        amount,
        from,
        TokenEventKind::Transfer {
            source: from,
            destination: to,
        },
    )?;
    move_balance(ctx, from, -amount, &event_id)?;
    move_balance(ctx, to, amount, &event_id)
}

pub fn handle_mint(ctx: &mut EventContext<'_>, guy: Address, wad: &Word) -> HandlerResult {
    let amount = Wad::from_word(wad, ctx.config().byte_order)?;
    let minter = ctx.meta().from;
    let event_id = record_event(
        ctx,
        amount,
        minter,
        TokenEventKind::Mint {
            destination: guy,
            minter,
        },
    )?;
    move_balance(ctx, guy, amount, &event_id)
}

pub fn handle_burn(ctx: &mut EventContext<'_>, guy: Address, wad: &Word) -> HandlerResult {
    let amount = Wad::from_word(wad, ctx.config().byte_order)?;
    let sender = ctx.meta().from;
    let event_id = record_event(ctx, amount, sender, TokenEventKind::Burn { burner: guy })?;
    move_balance(ctx, guy, -amount, &event_id)
}

fn record_event(
    ctx: &mut EventContext<'_>,
    amount: Wad,
    sender: Address,
    kind: TokenEventKind,
) -> HandlerResult<String> {
    let meta = ctx.meta();
    let event = TokenEvent {
        id: meta.key(),
        token: meta.address,
        amount,
        sender,
        kind,
        block_number: meta.block_number,
        timestamp: meta.timestamp,
        transaction_hash: meta.transaction_hash,
    };
    ctx.save(&event)?;
    Ok(event.id)
}

fn move_balance(
    ctx: &mut EventContext<'_>,
    account: Address,
    delta: Wad,
    event_id: &str,
) -> HandlerResult {
    let meta = ctx.meta();
    let token = meta.address;

    if !ctx.contains::<Account>(&account.to_hex())? {
        ctx.save(&Account { address: account })?;
    }

    let balance_id = AccountBalance::key(&account, &token);
    let previous = ctx
        .load::<AccountBalance>(&balance_id)?
        .map(|balance| balance.amount)
        .unwrap_or(Wad::ZERO);
    let balance = AccountBalance {
        account,
        token,
        amount: previous.try_add(delta)?,
        block_number: meta.block_number,
        modified: meta.timestamp,
        transaction_hash: meta.transaction_hash,
    };
    ctx.save(&balance)?;

    ctx.save(&AccountBalanceSnapshot {
        id: AccountBalanceSnapshot::key(&balance_id, meta.timestamp),
        account,
        token,
        amount: balance.amount,
        block_number: meta.block_number,
        transaction_hash: meta.transaction_hash,
        timestamp: meta.timestamp,
        event: event_id.to_string(),
    })
}
