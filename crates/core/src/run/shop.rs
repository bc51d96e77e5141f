use super::*;
use crate::*;

impl RunState {
    /// Opens the shop after a cleared round. Re-entering shows the same
    /// offers.
    pub fn enter_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::RoundOver {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.state.outcome != Some(RoundOutcome::Cleared) {
            return Err(RunError::RoundNotCleared);
        }
        if self.shop.is_none() {
            let banned = self.banned_ids();
            self.shop = Some(ShopState::generate(
                &self.config.shop,
                &self.pool,
                &mut self.rng,
                &banned,
            ));
        }
        self.state.phase = Phase::Shop;
        if let Some(shop) = self.shop.as_ref() {
            events.push(Event::ShopEntered {
                offers: shop.offers.len(),
                reroll_cost: shop.reroll_cost,
            });
        }
        Ok(())
    }

    pub fn reroll_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Shop {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        let cost = self
            .shop
            .as_ref()
            .ok_or(RunError::ShopNotAvailable)?
            .reroll_cost;
        if self.state.gold < cost {
            return Err(RunError::NotEnoughGold);
        }
        self.state.gold -= cost;
        let banned = self.banned_ids();
        let reroll_cost = match self.shop.as_mut() {
            Some(shop) => {
                shop.reroll(&self.config.shop, &self.pool, &mut self.rng, &banned);
                shop.reroll_cost
            }
            None => return Err(RunError::ShopNotAvailable),
        };
        events.push(Event::ShopRerolled {
            cost,
            reroll_cost,
            gold: self.state.gold,
        });
        Ok(())
    }

    /// Buys one shop offer. Card-targeted upgrades (enhance, remove,
    /// duplicate) take the chosen card id in `target`. Validation runs
    /// before any mutation so a rejection leaves the run untouched.
    pub fn purchase_upgrade(
        &mut self,
        index: usize,
        target: Option<u32>,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        if self.state.phase != Phase::Shop {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        let offer = self
            .shop
            .as_ref()
            .ok_or(RunError::ShopNotAvailable)?
            .offers
            .get(index)
            .cloned()
            .ok_or(RunError::InvalidOfferIndex)?;
        let def = self
            .pool
            .iter()
            .find(|def| def.id == offer.id)
            .cloned()
            .ok_or(RunError::InvalidOfferIndex)?;
        if self.state.gold < offer.price {
            return Err(RunError::NotEnoughGold);
        }
        if self.category_capped(&def.effect) {
            return Err(RunError::CategoryCapReached);
        }
        let target = self.validate_target(&def.effect, target)?;

        self.state.gold -= offer.price;
        if let Some(shop) = self.shop.as_mut() {
            shop.take(index);
        }
        match def.effect {
            UpgradeEffect::Enhance(kind) => {
                // Later purchases overwrite an existing enhancement.
                if let Some(card_id) = target {
                    self.enhancements.insert(card_id, kind);
                }
            }
            UpgradeEffect::RemoveCard => {
                if let Some(card_id) = target {
                    self.removed.insert(card_id);
                }
            }
            UpgradeEffect::DuplicateCard => {
                if let Some(card_id) = target {
                    self.duplicated.push(card_id);
                }
            }
            _ => self.upgrades.add(&def),
        }
        events.push(Event::UpgradePurchased {
            id: def.id,
            cost: offer.price,
            gold: self.state.gold,
        });
        Ok(())
    }

    fn validate_target(
        &self,
        effect: &UpgradeEffect,
        target: Option<u32>,
    ) -> Result<Option<u32>, RunError> {
        if !effect.needs_target() {
            return Ok(None);
        }
        let card_id = target.ok_or(RunError::InvalidSelection)?;
        let eligible = match effect {
            UpgradeEffect::Enhance(_) => self.composition_ids().contains(&card_id),
            UpgradeEffect::RemoveCard | UpgradeEffect::DuplicateCard => {
                self.catalog.contains(card_id) && !self.removed.contains(&card_id)
            }
            _ => true,
        };
        if !eligible {
            return Err(RunError::NoEligibleCard);
        }
        Ok(Some(card_id))
    }

    fn category_capped(&self, effect: &UpgradeEffect) -> bool {
        match effect.category() {
            UpgradeCategory::Remove => self.removed.len() >= self.config.caps.removals,
            UpgradeCategory::Duplicate => self.duplicated.len() >= self.config.caps.duplicates,
            UpgradeCategory::Enhance => false,
            // The only capped modifier is the one-shot revival.
            UpgradeCategory::Modifier => {
                matches!(effect, UpgradeEffect::Revival)
                    && self.upgrades.count(|e| matches!(e, UpgradeEffect::Revival))
                        >= self.config.caps.revivals
            }
        }
    }

    fn banned_ids(&self) -> std::collections::HashSet<String> {
        self.pool
            .iter()
            .filter(|def| self.category_capped(&def.effect))
            .map(|def| def.id.clone())
            .collect()
    }
}
