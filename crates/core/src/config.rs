use crate::UpgradeRarity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityWeight {
    pub rarity: UpgradeRarity,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRule {
    pub offer_slots: u8,
    pub reroll_base: i64,
    pub reroll_step: i64,
    pub rarity_weights: Vec<RarityWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRule {
    pub starting_gold: i64,
    /// Interest paid at round success is gold / divisor, floored.
    pub interest_divisor: i64,
    /// Repeating reward cycle indexed by (stage - 1) % 3.
    pub stage_rewards: [i64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    pub junk_point: i64,
    pub scarlet_bonus: i64,
    pub azure_hand_bonus: i64,
    pub jade_floor_bonus: i64,
    pub amethyst_discard_mult: f64,
    pub gilded_gold: i64,
    /// Legacy single-hand variant floors the base at 1; the run variant
    /// leaves small bases alone.
    pub base_floor_one: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCaps {
    pub revivals: usize,
    pub removals: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub hand_capacity: usize,
    pub shrunk_hand_capacity: usize,
    pub base_discards: u8,
    /// Distinct floor months that end the round.
    pub floor_month_cap: usize,
    pub stage_one_target: i64,
    pub target_growth: f64,
    pub economy: EconomyRule,
    pub shop: ShopRule,
    pub scoring: ScoringRules,
    pub caps: CategoryCaps,
}

impl GameConfig {
    pub fn standard() -> Self {
        Self {
            hand_capacity: 5,
            shrunk_hand_capacity: 4,
            base_discards: 4,
            floor_month_cap: 5,
            stage_one_target: 25,
            target_growth: 1.3,
            economy: EconomyRule {
                starting_gold: 10,
                interest_divisor: 5,
                stage_rewards: [4, 5, 6],
            },
            shop: ShopRule {
                offer_slots: 4,
                reroll_base: 2,
                reroll_step: 1,
                rarity_weights: vec![
                    RarityWeight {
                        rarity: UpgradeRarity::Common,
                        weight: 60,
                    },
                    RarityWeight {
                        rarity: UpgradeRarity::Uncommon,
                        weight: 30,
                    },
                    RarityWeight {
                        rarity: UpgradeRarity::Rare,
                        weight: 10,
                    },
                ],
            },
            scoring: ScoringRules {
                junk_point: 1,
                scarlet_bonus: 4,
                azure_hand_bonus: 8,
                jade_floor_bonus: 8,
                amethyst_discard_mult: 0.5,
                gilded_gold: 1,
                base_floor_one: false,
            },
            caps: CategoryCaps {
                revivals: 1,
                removals: 8,
                duplicates: 8,
            },
        }
    }

    pub fn next_target(&self, target: i64) -> i64 {
        (target as f64 * self.target_growth).floor() as i64
    }

    pub fn stage_reward(&self, stage: u32) -> i64 {
        self.economy.stage_rewards[((stage.saturating_sub(1)) % 3) as usize]
    }
}
