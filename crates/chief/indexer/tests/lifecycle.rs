mod common;

use chief_indexer::{Disposition, FixtureLedger, IndexerConfig, SkipReason, SpellProbe};
use chief_storage::{EntityStoreExt, QueryWindow};
use chief_types::{
    AccountBalance, AccountBalanceSnapshot, Action, ActionKind, Address, EventPayload, Poll,
    AddressVoter, PollVote, Spell, TokenEvent, TokenEventKind, Wad, Word,
};
use common::{addr, block_time, slate_id, units, wad_word, Harness};

fn harness_with_spell(spell: Address, approvals: Option<i64>) -> Harness {
    let slate = slate_id(1);
    let mom = IndexerConfig::default().governance_mom;
    let mut ledger = FixtureLedger::new()
        .with_slate(slate, vec![spell])
        .with_spell(spell, SpellProbe::direct(mom, None));
    if let Some(approvals) = approvals {
        ledger = ledger.with_approval(spell, units(approvals));
    }
    let mut h = Harness::new(ledger);
    h.lock(addr(0xa1), 25);
    h.vote(addr(0xa1), slate);
    h
}

#[test]
fn lift_records_weight_and_moves_the_hat() {
    let spell = addr(0x51);
    let mut h = harness_with_spell(spell, Some(80));

    let outcome = h.chief(EventPayload::Lift {
        guy: addr(0xa1),
        foo: Word::from_address(&spell),
    });
    assert_eq!(outcome, Disposition::Applied);

    let stored: Spell = h.load(&spell.to_hex()).unwrap();
    assert_eq!(stored.lifted_with, Some(units(80)));
    assert_eq!(stored.lifted, Some(block_time(h.block)));
    assert_eq!(h.info().hat, Some(spell));
    assert_eq!(h.info().last_block, h.block);
}

#[test]
fn lift_falls_back_to_indexed_weight_when_approvals_revert() {
    let spell = addr(0x51);
    let mut h = harness_with_spell(spell, None);

    h.chief(EventPayload::Lift {
        guy: addr(0xa1),
        foo: Word::from_address(&spell),
    });
    let stored: Spell = h.load(&spell.to_hex()).unwrap();
    assert_eq!(stored.lifted_with, Some(units(25)));
}

#[test]
fn lift_of_unknown_spell_is_skipped() {
    let mut h = Harness::new(FixtureLedger::new());
    let outcome = h.chief(EventPayload::Lift {
        guy: addr(0xa1),
        foo: Word::from_address(&addr(0x99)),
    });
    assert_eq!(
        outcome,
        Disposition::Skipped(SkipReason::UnknownSpell { spell: addr(0x99) })
    );
    assert_eq!(h.info().hat, None);
}

#[test]
fn cast_records_weight_and_counts() {
    let spell = addr(0x51);
    let mut h = harness_with_spell(spell, Some(70));

    let outcome = h.apply(
        spell,
        EventPayload::SpellCast {
            spell,
            sender: addr(0xa1),
        },
    );
    assert_eq!(outcome, Disposition::Applied);

    let stored: Spell = h.load(&spell.to_hex()).unwrap();
    assert_eq!(stored.casted_with, Some(units(70)));
    assert_eq!(stored.casted, Some(block_time(h.block)));
    assert_eq!(h.info().count_casted, 1);

    let actions: Vec<Action> = h.store.load_all(QueryWindow::all()).unwrap();
    assert!(actions
        .iter()
        .any(|action| matches!(action.kind, ActionKind::Cast { spell: s, .. } if s == spell)));
}

#[test]
fn cast_of_unknown_spell_is_skipped() {
    let mut h = Harness::new(FixtureLedger::new());
    let outcome = h.apply(
        addr(0x52),
        EventPayload::SpellCast {
            spell: addr(0x52),
            sender: addr(0xa1),
        },
    );
    assert!(matches!(
        outcome,
        Disposition::Skipped(SkipReason::UnknownSpell { .. })
    ));
    assert_eq!(h.info().count_casted, 0);
}

const POLLING: u8 = 0x90;

fn create_poll(h: &mut Harness, poll_id: u64, end_block: u64) -> Disposition {
    let start = h.block + 1;
    h.apply(
        addr(POLLING),
        EventPayload::PollCreated {
            creator: addr(0xc0),
            block_created: start,
            poll_id,
            start_date: block_time(start),
            end_date: block_time(end_block),
            multi_hash: "QmPollContent".to_string(),
            url: "https://vote.example.org/polling/1".to_string(),
        },
    )
}

fn poll_vote(h: &mut Harness, voter: Address, poll_id: u64, option_id: u64) -> Disposition {
    h.apply(
        addr(POLLING),
        EventPayload::PollVoted {
            voter,
            poll_id,
            option_id,
        },
    )
}

#[test]
fn poll_votes_count_voters_once_and_overwrite_choices() {
    let mut h = Harness::new(FixtureLedger::new());
    assert_eq!(create_poll(&mut h, 1, 500), Disposition::Applied);
    assert_eq!(h.info().count_polls, 1);

    let voter = addr(0xa1);
    poll_vote(&mut h, voter, 1, 2);
    let first_block = h.block;
    poll_vote(&mut h, voter, 1, 3);
    poll_vote(&mut h, addr(0xa2), 1, 1);

    let poll: Poll = h.load(&Poll::key(1)).unwrap();
    assert_eq!(poll.votes_count, 2);
    assert_eq!(poll.timeline_count, 3);

    let vote: PollVote = h.load(&PollVote::key(1, &voter)).unwrap();
    assert_eq!(vote.option, 3);
    assert_eq!(vote.first_voted_at, block_time(first_block));
    assert_eq!(vote.voted_at, block_time(first_block + 1));
}

#[test]
fn late_poll_vote_is_dropped() {
    let mut h = Harness::new(FixtureLedger::new());
    let end_block = h.block + 2;
    create_poll(&mut h, 4, end_block);
    h.block = end_block;

    let outcome = poll_vote(&mut h, addr(0xa1), 4, 1);
    assert!(matches!(
        outcome,
        Disposition::Skipped(SkipReason::LatePollVote { poll_id: 4, .. })
    ));
    let poll: Poll = h.load(&Poll::key(4)).unwrap();
    assert_eq!(poll.votes_count, 0);
    assert!(h.load::<PollVote>(&PollVote::key(4, &addr(0xa1))).is_none());
}

#[test]
fn vote_on_unknown_poll_is_dropped() {
    let mut h = Harness::new(FixtureLedger::new());
    assert_eq!(
        poll_vote(&mut h, addr(0xa1), 77, 1),
        Disposition::Skipped(SkipReason::UnknownPoll { poll_id: 77 })
    );
}

#[test]
fn duplicate_poll_creation_is_dropped() {
    let mut h = Harness::new(FixtureLedger::new());
    create_poll(&mut h, 5, 900);
    assert!(matches!(
        create_poll(&mut h, 5, 900),
        Disposition::Skipped(SkipReason::DuplicatePoll { poll_id: 5 })
    ));
    assert_eq!(h.info().count_polls, 1);
}

#[test]
fn withdrawal_marks_the_poll() {
    let mut h = Harness::new(FixtureLedger::new());
    create_poll(&mut h, 6, 900);

    let outcome = h.apply(
        addr(POLLING),
        EventPayload::PollWithdrawn {
            creator: addr(0xc0),
            poll_id: 6,
            block_withdrawn: h.block + 1,
        },
    );
    assert_eq!(outcome, Disposition::Applied);
    let poll: Poll = h.load(&Poll::key(6)).unwrap();
    assert_eq!(poll.withdrawn, Some(block_time(h.block)));
    assert_eq!(poll.timeline_count, 1);

    let missing = h.apply(
        addr(POLLING),
        EventPayload::PollWithdrawn {
            creator: addr(0xc0),
            poll_id: 60,
            block_withdrawn: h.block + 1,
        },
    );
    assert!(matches!(
        missing,
        Disposition::Skipped(SkipReason::UnknownPoll { poll_id: 60 })
    ));
}

const TOKEN: u8 = 0x4d;

fn balance(h: &Harness, account: Address) -> AccountBalance {
    h.load(&AccountBalance::key(&account, &addr(TOKEN))).unwrap()
}

#[test]
fn token_transfers_move_balances_and_snapshot_them() {
    let mut h = Harness::new(FixtureLedger::new());
    let (alice, bob) = (addr(0xa1), addr(0xb1));

    h.apply(
        addr(TOKEN),
        EventPayload::TokenMint {
            guy: alice,
            wad: wad_word(10),
        },
    );
    h.apply(
        addr(TOKEN),
        EventPayload::TokenTransfer {
            from: alice,
            to: bob,
            value: wad_word(4),
        },
    );
    h.apply(
        addr(TOKEN),
        EventPayload::TokenBurn {
            guy: bob,
            wad: wad_word(1),
        },
    );

    assert_eq!(balance(&h, alice).amount, units(6));
    assert_eq!(balance(&h, bob).amount, units(3));

    let snapshot_id = AccountBalanceSnapshot::key(
        &AccountBalance::key(&bob, &addr(TOKEN)),
        block_time(h.block),
    );
    let snapshot: AccountBalanceSnapshot = h.load(&snapshot_id).unwrap();
    assert_eq!(snapshot.amount, units(3));

    let events: Vec<TokenEvent> = h.store.load_all(QueryWindow::all()).unwrap();
    assert_eq!(events.len(), 3);
    assert!(events
        .iter()
        .any(|event| matches!(event.kind, TokenEventKind::Transfer { .. })));
}

#[test]
fn transfers_from_or_to_zero_are_mints_and_burns() {
    let mut h = Harness::new(FixtureLedger::new());
    let alice = addr(0xa1);

    h.apply(
        addr(TOKEN),
        EventPayload::TokenTransfer {
            from: Address::ZERO,
            to: alice,
            value: wad_word(5),
        },
    );
    h.apply(
        addr(TOKEN),
        EventPayload::TokenTransfer {
            from: alice,
            to: Address::ZERO,
            value: wad_word(2),
        },
    );

    assert_eq!(balance(&h, alice).amount, units(3));
    assert!(h
        .load::<AccountBalance>(&AccountBalance::key(&Address::ZERO, &addr(TOKEN)))
        .is_none());

    let events: Vec<TokenEvent> = h.store.load_all(QueryWindow::all()).unwrap();
    let kinds: Vec<&str> = events
        .iter()
        .map(|event| match event.kind {
            TokenEventKind::Mint { .. } => "mint",
            TokenEventKind::Burn { .. } => "burn",
            TokenEventKind::Transfer { .. } => "transfer",
        })
        .collect();
    assert!(kinds.contains(&"mint") && kinds.contains(&"burn"));
    assert!(!kinds.contains(&"transfer"));
}

#[test]
fn amounts_wider_than_128_bits_are_malformed() {
    let mut h = Harness::new(FixtureLedger::new());
    let mut raw = [0u8; 32];
    raw[0] = 1;
    let outcome = h.chief(EventPayload::Lock {
        guy: addr(0xa1),
        foo: Word(raw),
    });
    assert!(matches!(
        outcome,
        Disposition::Skipped(SkipReason::MalformedPayload(_))
    ));
    assert_eq!(h.info().count_addresses, 0);
}

fn max_amount() -> Word {
    Word::from_u128(i128::MAX as u128)
}

#[test]
fn lock_overflowing_the_aggregate_is_malformed() {
    let mut h = Harness::new(FixtureLedger::new());
    let (first, second) = (addr(0xa1), addr(0xa2));

    let opening = h.chief(EventPayload::Lock {
        guy: first,
        foo: max_amount(),
    });
    assert_eq!(opening, Disposition::Applied);

    let overflowing = h.chief(EventPayload::Lock {
        guy: second,
        foo: max_amount(),
    });
    assert!(matches!(
        overflowing,
        Disposition::Skipped(SkipReason::MalformedPayload(_))
    ));

    let info = h.info();
    assert_eq!(info.locked, Wad::from_raw(i128::MAX));
    assert_eq!(info.count_lock, 1);
    assert_eq!(info.count_addresses, 1);
    assert!(h.load::<AddressVoter>(&second.to_hex()).is_none());
}

#[test]
fn mint_overflowing_a_balance_is_malformed() {
    let mut h = Harness::new(FixtureLedger::new());
    let alice = addr(0xa1);

    h.apply(
        addr(TOKEN),
        EventPayload::TokenMint {
            guy: alice,
            wad: max_amount(),
        },
    );
    let outcome = h.apply(
        addr(TOKEN),
        EventPayload::TokenMint {
            guy: alice,
            wad: wad_word(1),
        },
    );
    assert!(matches!(
        outcome,
        Disposition::Skipped(SkipReason::MalformedPayload(_))
    ));
    assert_eq!(balance(&h, alice).amount, Wad::from_raw(i128::MAX));

    let events: Vec<TokenEvent> = h.store.load_all(QueryWindow::all()).unwrap();
    assert_eq!(events.len(), 1);
}
