//! Deterministic ledger backed by a JSON-loadable snapshot.

use std::collections::HashMap;

use chief_types::{Address, Bytes, SlateId, Wad};
use serde::{Deserialize, Serialize};

use super::{CallResult, GovernanceLedger, Revert};

/// Answers a candidate spell gives to the classification probes.
/// An absent answer reverts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellProbe {
    #[serde(default)]
    pub pause: Option<Address>,
    #[serde(default)]
    pub whom: Option<Address>,
    #[serde(default)]
    pub data: Option<Bytes>,
    #[serde(default)]
    pub mom: Option<Address>,
}

impl SpellProbe {
    pub fn paused(pause: Address) -> Self {
        Self {
            pause: Some(pause),
            ..Self::default()
        }
    }

    pub fn direct(mom: Address, data: Option<Bytes>) -> Self {
        Self {
            whom: Some(mom),
            data,
            ..Self::default()
        }
    }

    pub fn parameter(mom: Address) -> Self {
        Self {
            mom: Some(mom),
            ..Self::default()
        }
    }
}

/// Chief and spell state for replays and tests. Chief reads ignore the chief
/// address; a fixture describes a single chief.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureLedger {
    #[serde(default)]
    pub slates: HashMap<SlateId, Vec<Address>>,
    #[serde(default)]
    pub deposits: HashMap<Address, Wad>,
    #[serde(default)]
    pub approvals: HashMap<Address, Wad>,
    #[serde(default)]
    pub votes: HashMap<Address, SlateId>,
    #[serde(default)]
    pub spells: HashMap<Address, SpellProbe>,
}

impl FixtureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slate(mut self, slate: SlateId, members: Vec<Address>) -> Self {
        self.slates.insert(slate, members);
        self
    }

    pub fn with_deposit(mut self, voter: Address, wad: Wad) -> Self {
        self.deposits.insert(voter, wad);
        self
    }

    pub fn with_approval(mut self, spell: Address, wad: Wad) -> Self {
        self.approvals.insert(spell, wad);
        self
    }

    pub fn with_vote(mut self, voter: Address, slate: SlateId) -> Self {
        self.votes.insert(voter, slate);
        self
    }

    pub fn with_spell(mut self, spell: Address, probe: SpellProbe) -> Self {
        self.spells.insert(spell, probe);
        self
    }

    fn probe(&self, spell: &Address) -> CallResult<&SpellProbe> {
        self.spells
            .get(spell)
            .ok_or_else(|| Revert::new(format!("{spell} has no code")))
    }
}

impl GovernanceLedger for FixtureLedger {
    fn slate_member(&self, _chief: &Address, slate: &SlateId, index: u64) -> CallResult<Address> {
        let members = self
            .slates
            .get(slate)
            .ok_or_else(|| Revert::new(format!("slate {slate} is empty")))?;
        usize::try_from(index)
            .ok()
            .and_then(|index| members.get(index))
            .copied()
            .ok_or_else(|| Revert::new(format!("slate {slate} has no member {index}")))
    }

    fn deposits(&self, _chief: &Address, voter: &Address) -> CallResult<Wad> {
        Ok(self.deposits.get(voter).copied().unwrap_or(Wad::ZERO))
    }

    fn approvals(&self, _chief: &Address, spell: &Address) -> CallResult<Wad> {
        self.approvals
            .get(spell)
            .copied()
            .ok_or_else(|| Revert::new(format!("no approvals recorded for {spell}")))
    }

    fn votes(&self, _chief: &Address, voter: &Address) -> CallResult<SlateId> {
        self.votes
            .get(voter)
            .copied()
            .ok_or_else(|| Revert::new(format!("no vote recorded for {voter}")))
    }

    fn spell_pause(&self, spell: &Address) -> CallResult<Address> {
        self.probe(spell)?
            .pause
            .ok_or_else(|| Revert::new("pause()"))
    }

    fn spell_whom(&self, spell: &Address) -> CallResult<Address> {
        self.probe(spell)?.whom.ok_or_else(|| Revert::new("whom()"))
    }

    fn spell_data(&self, spell: &Address) -> CallResult<Bytes> {
        self.probe(spell)?
            .data
            .clone()
            .ok_or_else(|| Revert::new("data()"))
    }

    fn spell_mom(&self, spell: &Address) -> CallResult<Address> {
        self.probe(spell)?.mom.ok_or_else(|| Revert::new("MOM()"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chief_types::Word;

    #[test]
    fn slate_members_revert_past_the_end() {
        let slate = SlateId(Word::from_u128(1));
        let member = Address([1; 20]);
        let ledger = FixtureLedger::new().with_slate(slate, vec![member]);

        assert_eq!(ledger.slate_member(&Address::ZERO, &slate, 0), Ok(member));
        assert!(ledger.slate_member(&Address::ZERO, &slate, 1).is_err());
        assert!(ledger
            .slate_member(&Address::ZERO, &SlateId(Word::ZERO), 0)
            .is_err());
    }

    #[test]
    fn unknown_contracts_revert_every_probe() {
        let ledger = FixtureLedger::new();
        let target = Address([7; 20]);
        assert!(ledger.spell_pause(&target).is_err());
        assert!(ledger.spell_whom(&target).is_err());
        assert!(ledger.spell_mom(&target).is_err());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "slates": {
                "0x0000000000000000000000000000000000000000000000000000000000000001": [
                    "0x0000000000000000000000000000000000000001"
                ]
            },
            "deposits": { "0x00000000000000000000000000000000000000aa": "100" },
            "spells": {
                "0x0000000000000000000000000000000000000001": {
                    "whom": "0xf2c5369cffb8ea6284452b0326e326dbfdcb867c",
                    "data": "0xdeadbeef"
                }
            }
        }"#;
        let ledger: FixtureLedger = serde_json::from_str(json).unwrap();
        let voter = Address::parse_hex("0x00000000000000000000000000000000000000aa").unwrap();
        assert_eq!(
            ledger.deposits(&Address::ZERO, &voter),
            Ok(Wad::from_units(100))
        );
        let spell = Address::parse_hex("0x0000000000000000000000000000000000000001").unwrap();
        assert_eq!(ledger.spell_data(&spell).unwrap().to_hex(), "0xdeadbeef");
    }
}
