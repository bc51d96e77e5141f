use crate::{RngState, ShopRule, UpgradeDef, UpgradeRarity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopOffer {
    pub id: String,
    pub name: String,
    pub rarity: UpgradeRarity,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopState {
    pub offers: Vec<ShopOffer>,
    pub reroll_cost: i64,
}

impl ShopState {
    /// Rolls a fresh shop. `banned` holds ids whose category is at its cap;
    /// within one roll the same id is never offered twice.
    pub fn generate(
        rule: &ShopRule,
        pool: &[UpgradeDef],
        rng: &mut RngState,
        banned: &HashSet<String>,
    ) -> Self {
        Self {
            offers: roll_offers(rule, pool, rng, banned),
            reroll_cost: rule.reroll_base,
        }
    }

    pub fn reroll(
        &mut self,
        rule: &ShopRule,
        pool: &[UpgradeDef],
        rng: &mut RngState,
        banned: &HashSet<String>,
    ) {
        self.offers = roll_offers(rule, pool, rng, banned);
        self.reroll_cost += rule.reroll_step;
    }

    pub fn take(&mut self, index: usize) -> Option<ShopOffer> {
        if index < self.offers.len() {
            Some(self.offers.remove(index))
        } else {
            None
        }
    }
}

fn roll_offers(
    rule: &ShopRule,
    pool: &[UpgradeDef],
    rng: &mut RngState,
    banned: &HashSet<String>,
) -> Vec<ShopOffer> {
    let mut offers = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();
    for _ in 0..rule.offer_slots {
        let Some(rarity) = pick_weighted_rarity(&rule.rarity_weights, rng) else {
            continue;
        };
        let candidates: Vec<&UpgradeDef> = pool
            .iter()
            .filter(|def| {
                def.rarity == rarity && !banned.contains(&def.id) && !taken.contains(&def.id)
            })
            .collect();
        if let Some(index) = rng.pick_index(candidates.len()) {
            let def = candidates[index];
            taken.insert(def.id.clone());
            offers.push(ShopOffer {
                id: def.id.clone(),
                name: def.name.clone(),
                rarity: def.rarity,
                price: def.price,
            });
        }
    }
    offers
}

fn pick_weighted_rarity(
    weights: &[crate::RarityWeight],
    rng: &mut RngState,
) -> Option<UpgradeRarity> {
    let total: u32 = weights.iter().map(|entry| entry.weight).sum();
    if total == 0 {
        return None;
    }
    let mut roll = (rng.next_u64() % total as u64) as u32;
    for entry in weights {
        if roll < entry.weight {
            return Some(entry.rarity);
        }
        roll -= entry.weight;
    }
    None
}
