use crate::Enhancement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UpgradeRarity {
    Common,
    Uncommon,
    Rare,
}

/// What a purchased upgrade does. One effect per definition; duplicate
/// purchases of the same id stack linearly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum UpgradeEffect {
    FlatBase { amount: i64 },
    /// Base bonus only when the snapshot holds exactly `junk` junk points.
    JunkCountBase { junk: i64, amount: i64 },
    StageBase { per_stage: i64 },
    /// Flat multiplier addition, applied before combination factors.
    MultBonus { amount: f64 },
    /// Three of a month on the floor multiplies x3 instead of x1.
    TripleClusterBoost,
    /// x2 while the floor holds zero lights.
    LightlessDouble,
    /// x2 while the floor holds zero junk.
    JunklessDouble,
    ExtraDiscard,
    /// Discard takes the selected card plus its immediate neighbors.
    WideDiscard,
    /// Discards shuffle back into the deck and pay base per card this round.
    RecycleDiscards { base_per_card: i64 },
    /// Each discard action feeds the round's multiplier accumulator.
    DiscardTempo { mult_per_discard: f64 },
    /// Consumed on round failure to retry the same stage.
    Revival,
    /// Stage init seeds no floor card.
    SuppressFloorSeed,
    /// Exposes the top of the draw stack as a preview.
    DeckPreview,
    /// After one grace replenishment per round, the hand is not refilled.
    StopReplenish,
    /// Hand capacity drops to the shrunk size.
    ShrinkHand,
    Enhance(Enhancement),
    RemoveCard,
    DuplicateCard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UpgradeCategory {
    Modifier,
    Enhance,
    Remove,
    Duplicate,
}

impl UpgradeEffect {
    pub fn category(self) -> UpgradeCategory {
        match self {
            UpgradeEffect::Enhance(_) => UpgradeCategory::Enhance,
            UpgradeEffect::RemoveCard => UpgradeCategory::Remove,
            UpgradeEffect::DuplicateCard => UpgradeCategory::Duplicate,
            _ => UpgradeCategory::Modifier,
        }
    }

    /// Card-targeted purchases need a chosen card id.
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            UpgradeEffect::Enhance(_) | UpgradeEffect::RemoveCard | UpgradeEffect::DuplicateCard
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeDef {
    pub id: String,
    pub name: String,
    pub rarity: UpgradeRarity,
    pub price: i64,
    pub effect: UpgradeEffect,
}

fn def(
    id: &str,
    name: &str,
    rarity: UpgradeRarity,
    price: i64,
    effect: UpgradeEffect,
) -> UpgradeDef {
    UpgradeDef {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        price,
        effect,
    }
}

/// The built-in upgrade pool the shop rolls offers from.
pub fn builtin_pool() -> Vec<UpgradeDef> {
    use UpgradeRarity::*;
    vec![
        def(
            "supply_cache",
            "Supply Cache",
            Common,
            4,
            UpgradeEffect::FlatBase { amount: 5 },
        ),
        def(
            "junk_collector",
            "Junk Collector",
            Uncommon,
            6,
            UpgradeEffect::JunkCountBase { junk: 7, amount: 10 },
        ),
        def(
            "climber",
            "Climber",
            Uncommon,
            6,
            UpgradeEffect::StageBase { per_stage: 2 },
        ),
        def(
            "whetstone",
            "Whetstone",
            Common,
            5,
            UpgradeEffect::MultBonus { amount: 0.5 },
        ),
        def(
            "triple_stack",
            "Triple Stack",
            Uncommon,
            7,
            UpgradeEffect::TripleClusterBoost,
        ),
        def(
            "moonless",
            "Moonless",
            Rare,
            8,
            UpgradeEffect::LightlessDouble,
        ),
        def("sweeper", "Sweeper", Rare, 8, UpgradeEffect::JunklessDouble),
        def(
            "spare_pocket",
            "Spare Pocket",
            Common,
            4,
            UpgradeEffect::ExtraDiscard,
        ),
        def(
            "broad_sweep",
            "Broad Sweep",
            Uncommon,
            6,
            UpgradeEffect::WideDiscard,
        ),
        def(
            "reincarnation",
            "Reincarnation",
            Rare,
            8,
            UpgradeEffect::RecycleDiscards { base_per_card: 2 },
        ),
        def(
            "grudge",
            "Grudge",
            Uncommon,
            6,
            UpgradeEffect::DiscardTempo {
                mult_per_discard: 0.5,
            },
        ),
        def(
            "phoenix_feather",
            "Phoenix Feather",
            Rare,
            10,
            UpgradeEffect::Revival,
        ),
        def(
            "clean_slate",
            "Clean Slate",
            Common,
            4,
            UpgradeEffect::SuppressFloorSeed,
        ),
        def(
            "foresight",
            "Foresight",
            Common,
            4,
            UpgradeEffect::DeckPreview,
        ),
        def("drought", "Drought", Uncommon, 5, UpgradeEffect::StopReplenish),
        def(
            "tight_grip",
            "Tight Grip",
            Uncommon,
            5,
            UpgradeEffect::ShrinkHand,
        ),
        def(
            "scarlet_brush",
            "Scarlet Brush",
            Common,
            3,
            UpgradeEffect::Enhance(Enhancement::Scarlet),
        ),
        def(
            "azure_brush",
            "Azure Brush",
            Common,
            3,
            UpgradeEffect::Enhance(Enhancement::Azure),
        ),
        def(
            "jade_brush",
            "Jade Brush",
            Common,
            3,
            UpgradeEffect::Enhance(Enhancement::Jade),
        ),
        def(
            "amethyst_brush",
            "Amethyst Brush",
            Uncommon,
            4,
            UpgradeEffect::Enhance(Enhancement::Amethyst),
        ),
        def(
            "gilded_brush",
            "Gilded Brush",
            Uncommon,
            4,
            UpgradeEffect::Enhance(Enhancement::Gilded),
        ),
        def("expunge", "Expunge", Common, 3, UpgradeEffect::RemoveCard),
        def("mirror", "Mirror", Uncommon, 6, UpgradeEffect::DuplicateCard),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeInstance {
    pub id: String,
    pub effect: UpgradeEffect,
    /// Set once a one-shot upgrade (revival) has fired.
    pub consumed: bool,
}

/// The active-upgrades multiset. Consumed instances stay in the list for
/// bookkeeping but stop contributing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveUpgrades {
    pub items: Vec<UpgradeInstance>,
}

impl ActiveUpgrades {
    pub fn add(&mut self, def: &UpgradeDef) {
        self.items.push(UpgradeInstance {
            id: def.id.clone(),
            effect: def.effect,
            consumed: false,
        });
    }

    pub fn live(&self) -> impl Iterator<Item = &UpgradeInstance> {
        self.items.iter().filter(|item| !item.consumed)
    }

    pub fn has(&self, pred: impl Fn(&UpgradeEffect) -> bool) -> bool {
        self.live().any(|item| pred(&item.effect))
    }

    pub fn count(&self, pred: impl Fn(&UpgradeEffect) -> bool) -> usize {
        self.live().filter(|item| pred(&item.effect)).count()
    }

    pub fn extra_discards(&self) -> u8 {
        self.count(|e| matches!(e, UpgradeEffect::ExtraDiscard)) as u8
    }

    pub fn wide_discard(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::WideDiscard))
    }

    /// Total base paid per reincarnated card, summed across instances.
    pub fn recycle_base(&self) -> Option<i64> {
        let mut total = 0i64;
        let mut any = false;
        for item in self.live() {
            if let UpgradeEffect::RecycleDiscards { base_per_card } = item.effect {
                total += base_per_card;
                any = true;
            }
        }
        any.then_some(total)
    }

    pub fn discard_tempo(&self) -> f64 {
        self.live()
            .filter_map(|item| match item.effect {
                UpgradeEffect::DiscardTempo { mult_per_discard } => Some(mult_per_discard),
                _ => None,
            })
            .sum()
    }

    pub fn suppress_floor_seed(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::SuppressFloorSeed))
    }

    pub fn deck_preview(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::DeckPreview))
    }

    pub fn stop_replenish(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::StopReplenish))
    }

    pub fn shrink_hand(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::ShrinkHand))
    }

    pub fn revival_held(&self) -> bool {
        self.has(|e| matches!(e, UpgradeEffect::Revival))
    }

    /// Consumes one held revival, returning whether one was available.
    pub fn take_revival(&mut self) -> bool {
        for item in &mut self.items {
            if !item.consumed && matches!(item.effect, UpgradeEffect::Revival) {
                item.consumed = true;
                return true;
            }
        }
        false
    }
}
