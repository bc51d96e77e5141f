use super::*;
use crate::*;

impl RunState {
    /// Begins the run's first stage. Later stages start through
    /// `advance_stage`.
    pub fn start_stage(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Setup {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        self.init_stage(events);
        Ok(())
    }

    /// Success path: next stage with a grown target. Failure path: consume
    /// a held revival and retry the stage, or reset the whole run.
    pub fn advance_stage(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        match (self.state.phase, self.state.outcome) {
            (Phase::Shop, _) | (Phase::RoundOver, Some(RoundOutcome::Cleared)) => {
                self.shop = None;
                self.state.stage += 1;
                self.state.target = self.config.next_target(self.state.target);
                events.push(Event::StageAdvanced {
                    stage: self.state.stage,
                    target: self.state.target,
                });
                self.init_stage(events);
                Ok(())
            }
            (Phase::RoundOver, Some(RoundOutcome::Failed)) => {
                if self.upgrades.take_revival() {
                    events.push(Event::RevivalUsed {
                        stage: self.state.stage,
                    });
                } else {
                    self.reset_run(events);
                }
                self.init_stage(events);
                Ok(())
            }
            _ => Err(RunError::RoundNotOver),
        }
    }

    /// Rebuilds deck/hand/floor for the current stage: catalog minus
    /// removals plus duplicated copies, shuffled, dealt.
    pub(crate) fn init_stage(&mut self, events: &mut EventBus) {
        self.shop = None;
        self.deck = self.build_deck();
        self.deck.shuffle(&mut self.rng);
        self.hand.clear();
        self.floor.clear();
        self.state.reset_round();
        let discards = self
            .config
            .base_discards
            .saturating_add(self.upgrades.extra_discards());
        self.state.discards_left = discards;
        self.state.discards_max = discards;

        self.hand = self.deck.draw_cards(self.hand_capacity());
        if !self.upgrades.suppress_floor_seed() {
            if let Some(card) = self.deck.draw_one() {
                self.floor.place(card);
            }
        }
        self.state.phase = Phase::Play;
        events.push(Event::StageStarted {
            stage: self.state.stage,
            target: self.state.target,
            discards,
            hand: self.hand.len(),
        });
        self.evaluate(events);
    }

    fn build_deck(&mut self) -> Deck {
        let mut cards: Vec<Card> = self
            .catalog
            .cards()
            .iter()
            .filter(|card| !self.removed.contains(&card.id))
            .copied()
            .collect();
        for (slot, original) in self.duplicated.iter().enumerate() {
            if let Some(card) = self.catalog.card(*original) {
                cards.push(Card {
                    id: DUPLICATE_ID_BASE + slot as u32,
                    ..card
                });
            }
        }
        Deck::from_cards(cards)
    }

    pub(crate) fn finish_round(&mut self, events: &mut EventBus) {
        let success = self.state.total >= self.state.target;
        self.state.outcome = Some(if success {
            RoundOutcome::Cleared
        } else {
            RoundOutcome::Failed
        });
        self.state.phase = Phase::RoundOver;
        events.push(Event::RoundEnded {
            success,
            total: self.state.total,
            target: self.state.target,
        });
        if success {
            self.award_gold(events);
        }
    }

    fn award_gold(&mut self, events: &mut EventBus) {
        let interest = if self.config.economy.interest_divisor > 0 {
            self.state.gold.max(0) / self.config.economy.interest_divisor
        } else {
            0
        };
        let gilded = self
            .hand
            .iter()
            .chain(self.floor.cards.iter())
            .filter(|card| self.enhancements.get(&card.id) == Some(&Enhancement::Gilded))
            .count() as i64;
        let enhanced = gilded * self.config.scoring.gilded_gold;
        let stage_bonus = self.config.stage_reward(self.state.stage);
        let total = interest + enhanced + stage_bonus;
        self.state.gold += total;
        events.push(Event::GoldEarned {
            interest,
            enhanced,
            stage_bonus,
            total,
        });
    }

    /// Full reset to run-start defaults; the designed failure transition,
    /// not an error path.
    pub(crate) fn reset_run(&mut self, events: &mut EventBus) {
        self.state = GameState::new(
            self.config.stage_one_target,
            self.config.economy.starting_gold,
        );
        self.upgrades = ActiveUpgrades::default();
        self.enhancements.clear();
        self.removed.clear();
        self.duplicated.clear();
        self.shop = None;
        events.push(Event::RunReset {
            stage: self.state.stage,
        });
    }
}
