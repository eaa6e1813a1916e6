//! Spell classification cascade.
//!
//! Probes run in a fixed order and the first match wins:
//! 1. `pause()` equals the configured pause proxy: paused spell
//! 2. `whom()` equals the governance mom: direct spell, with its `data()`
//! 3. only when `whom()` reverted, `MOM()` equals the governance mom: parameter spell
//!
//! A `whom()` that answers with another address ends the cascade.

use chief_types::{Address, Bytes, SpellKind};
use tracing::trace;

use crate::config::IndexerConfig;
use crate::ledger::GovernanceLedger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NotRecognized,
    Paused,
    /// `data` is absent when the `data()` read reverted.
    Direct { data: Option<Bytes> },
    Parameter,
}

impl Classification {
    pub fn spell_kind(&self) -> Option<SpellKind> {
        match self {
            Classification::NotRecognized => None,
            Classification::Paused => Some(SpellKind::Paused),
            Classification::Direct { .. } => Some(SpellKind::Direct),
            Classification::Parameter => Some(SpellKind::Parameter),
        }
    }
}

/// Decide what `candidate` is. Has no side effects beyond ledger reads.
pub fn classify(
    ledger: &dyn GovernanceLedger,
    config: &IndexerConfig,
    candidate: &Address,
) -> Classification {
    if let Ok(pause) = ledger.spell_pause(candidate) {
        if pause == config.pause {
            return Classification::Paused;
        }
    }

    match ledger.spell_whom(candidate) {
        Ok(whom) if whom == config.governance_mom => Classification::Direct {
            data: ledger.spell_data(candidate).ok(),
        },
        Ok(whom) => {
            trace!(candidate = %candidate, whom = %whom, "whom() is not the governance mom");
            Classification::NotRecognized
        }
        Err(revert) => {
            trace!(candidate = %candidate, %revert, "whom() reverted, probing MOM()");
            match ledger.spell_mom(candidate) {
                Ok(mom) if mom == config.governance_mom => Classification::Parameter,
                _ => Classification::NotRecognized,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FixtureLedger, SpellProbe};

    fn candidate() -> Address {
        Address([0x51; 20])
    }

    fn classify_with(probe: SpellProbe) -> Classification {
        let ledger = FixtureLedger::new().with_spell(candidate(), probe);
        classify(&ledger, &IndexerConfig::default(), &candidate())
    }

    #[test]
    fn paused_wins_over_every_other_probe() {
        let config = IndexerConfig::default();
        let probe = SpellProbe {
            pause: Some(config.pause),
            whom: Some(config.governance_mom),
            data: None,
            mom: Some(config.governance_mom),
        };
        assert_eq!(classify_with(probe), Classification::Paused);
    }

    #[test]
    fn direct_captures_data() {
        let config = IndexerConfig::default();
        let data = Bytes(vec![0xde, 0xad]);
        let classification =
            classify_with(SpellProbe::direct(config.governance_mom, Some(data.clone())));
        assert_eq!(classification, Classification::Direct { data: Some(data) });
    }

    #[test]
    fn direct_without_data_keeps_data_absent() {
        let config = IndexerConfig::default();
        assert_eq!(
            classify_with(SpellProbe::direct(config.governance_mom, None)),
            Classification::Direct { data: None }
        );
    }

    #[test]
    fn wrong_pause_falls_through_to_whom() {
        let config = IndexerConfig::default();
        let probe = SpellProbe {
            pause: Some(Address([9; 20])),
            whom: Some(config.governance_mom),
            ..SpellProbe::default()
        };
        assert_eq!(classify_with(probe).spell_kind(), Some(SpellKind::Direct));
    }

    #[test]
    fn parameter_requires_whom_to_revert() {
        let config = IndexerConfig::default();
        assert_eq!(
            classify_with(SpellProbe::parameter(config.governance_mom)),
            Classification::Parameter
        );

        let answered = SpellProbe {
            whom: Some(Address([8; 20])),
            mom: Some(config.governance_mom),
            ..SpellProbe::default()
        };
        assert_eq!(classify_with(answered), Classification::NotRecognized);
    }

    #[test]
    fn plain_addresses_are_not_recognized() {
        let ledger = FixtureLedger::new();
        assert_eq!(
            classify(&ledger, &IndexerConfig::default(), &candidate()),
            Classification::NotRecognized
        );
    }
}
