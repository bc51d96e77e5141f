use crate::{
    ActiveUpgrades, Card, CardKind, Enhancement, RibbonColor, ScoringRules, UpgradeEffect,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How many tens complete the ten parade.
const TEN_PARADE_MIN: u8 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub base: i64,
    pub mult: f64,
}

impl Score {
    pub fn total(&self) -> i64 {
        (self.base as f64 * self.mult).floor() as i64
    }
}

/// Named combinations. Announced at most once per round; scoring itself
/// re-evaluates every one of them on every call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComboKind {
    FiveLights,
    FourLights,
    ThreeLights,
    RainThreeLights,
    RedRibbons,
    BlueRibbons,
    GreenRibbons,
    Godori,
    TenParade,
    MoonlessFloor,
    SpotlessFloor,
}

impl ComboKind {
    pub const ALL: [ComboKind; 11] = [
        ComboKind::FiveLights,
        ComboKind::FourLights,
        ComboKind::ThreeLights,
        ComboKind::RainThreeLights,
        ComboKind::RedRibbons,
        ComboKind::BlueRibbons,
        ComboKind::GreenRibbons,
        ComboKind::Godori,
        ComboKind::TenParade,
        ComboKind::MoonlessFloor,
        ComboKind::SpotlessFloor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComboKind::FiveLights => "five lights",
            ComboKind::FourLights => "four lights",
            ComboKind::ThreeLights => "three lights",
            ComboKind::RainThreeLights => "rain three lights",
            ComboKind::RedRibbons => "red ribbons",
            ComboKind::BlueRibbons => "blue ribbons",
            ComboKind::GreenRibbons => "green ribbons",
            ComboKind::Godori => "godori",
            ComboKind::TenParade => "ten parade",
            ComboKind::MoonlessFloor => "moonless floor",
            ComboKind::SpotlessFloor => "spotless floor",
        }
    }

    /// Descriptor evaluation: a hit carries the combination's base points
    /// and its multiplicative factor.
    fn evaluate(self, buckets: &Buckets, input: &ScoreInput) -> Option<ComboHit> {
        match self {
            ComboKind::FiveLights => (buckets.lights >= 5).then_some(ComboHit::new(15, 15.0)),
            ComboKind::FourLights => (buckets.lights == 4).then_some(ComboHit::new(4, 4.0)),
            ComboKind::ThreeLights => {
                (buckets.lights == 3 && !buckets.rain_light).then_some(ComboHit::new(3, 3.0))
            }
            ComboKind::RainThreeLights => {
                (buckets.lights == 3 && buckets.rain_light).then_some(ComboHit::new(2, 2.0))
            }
            ComboKind::RedRibbons => ribbon_triple(buckets, RibbonColor::Red),
            ComboKind::BlueRibbons => ribbon_triple(buckets, RibbonColor::Blue),
            ComboKind::GreenRibbons => ribbon_triple(buckets, RibbonColor::Green),
            ComboKind::Godori => (buckets.bird_months == 0b111).then_some(ComboHit::new(5, 5.0)),
            ComboKind::TenParade => {
                if buckets.tens >= TEN_PARADE_MIN {
                    let over = (buckets.tens - 4) as i64;
                    Some(ComboHit::new(over, over as f64))
                } else {
                    None
                }
            }
            ComboKind::MoonlessFloor => {
                let active = input
                    .upgrades
                    .has(|e| matches!(e, UpgradeEffect::LightlessDouble));
                let lightless = !input.floor.iter().any(|card| card.is_light());
                (active && lightless).then_some(ComboHit::new(0, 2.0))
            }
            ComboKind::SpotlessFloor => {
                let active = input
                    .upgrades
                    .has(|e| matches!(e, UpgradeEffect::JunklessDouble));
                let junkless = !input.floor.iter().any(|card| card.is_junk());
                (active && junkless).then_some(ComboHit::new(0, 2.0))
            }
        }
    }
}

fn ribbon_triple(buckets: &Buckets, color: RibbonColor) -> Option<ComboHit> {
    (buckets.ribbons[color.index()] >= 3).then_some(ComboHit::new(3, 3.0))
}

struct ComboHit {
    base: i64,
    mult: f64,
}

impl ComboHit {
    fn new(base: i64, mult: f64) -> Self {
        Self { base, mult }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: Score,
    pub total: i64,
    pub combos: Vec<ComboKind>,
    pub junk: i64,
}

/// Everything a single evaluation reads. The function below is pure:
/// identical inputs produce identical outputs.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub hand: &'a [Card],
    pub floor: &'a [Card],
    pub enhancements: &'a HashMap<u32, Enhancement>,
    pub upgrades: &'a ActiveUpgrades,
    pub stage: u32,
    pub reincarnated: u32,
    pub discard_mult: f64,
}

#[derive(Default)]
struct Buckets {
    lights: u8,
    rain_light: bool,
    tens: u8,
    /// Bitmask over the three godori bird months.
    bird_months: u8,
    ribbons: [u8; 3],
    junk: i64,
    enhancement_base: i64,
}

pub fn score(input: &ScoreInput, rules: &ScoringRules) -> ScoreBreakdown {
    let buckets = classify(input, rules);

    let mut combos = Vec::new();
    let mut combo_base = 0i64;
    let mut combo_mult = 1.0f64;
    for kind in ComboKind::ALL {
        if let Some(hit) = kind.evaluate(&buckets, input) {
            combo_base += hit.base;
            combo_mult *= hit.mult;
            combos.push(kind);
        }
    }

    let mut base = buckets.junk * rules.junk_point
        + buckets.enhancement_base
        + upgrade_base(input, buckets.junk)
        + combo_base;
    if rules.base_floor_one {
        base = base.max(1);
    }

    // Flat additions land before the multiplicative factors.
    let mut mult = 1.0 + flat_mult(input);
    mult *= cluster_mult(input.floor, input.upgrades);
    mult *= combo_mult;

    let score = Score { base, mult };
    let total = score.total();
    ScoreBreakdown {
        score,
        total,
        combos,
        junk: buckets.junk,
    }
}

/// Buckets every held card once per physical instance (hand and floor
/// dedupe by id). Dual-junk counts as two junk; each sake cup counts as a
/// ten when that lifts the ten bucket to the parade, else as two junk.
fn classify(input: &ScoreInput, rules: &ScoringRules) -> Buckets {
    let mut buckets = Buckets::default();
    let mut seen: HashSet<u32> = HashSet::new();
    let mut sake_cups = 0u8;

    let hand = input.hand.iter().map(|card| (card, true));
    let floor = input.floor.iter().map(|card| (card, false));
    for (card, in_hand) in hand.chain(floor) {
        if !seen.insert(card.id) {
            continue;
        }
        match card.kind {
            CardKind::Light => {
                buckets.lights += 1;
                if card.is_rain_light() {
                    buckets.rain_light = true;
                }
            }
            CardKind::Ten => {
                buckets.tens += 1;
                if let Some(bit) = bird_bit(card) {
                    buckets.bird_months |= bit;
                }
            }
            CardKind::Ribbon(color) => buckets.ribbons[color.index()] += 1,
            CardKind::Junk => buckets.junk += 1,
            CardKind::DualJunk => buckets.junk += 2,
            CardKind::SakeCup => sake_cups += 1,
        }
        match input.enhancements.get(&card.id).copied() {
            Some(Enhancement::Scarlet) => buckets.enhancement_base += rules.scarlet_bonus,
            Some(Enhancement::Azure) if in_hand => {
                buckets.enhancement_base += rules.azure_hand_bonus
            }
            Some(Enhancement::Jade) if !in_hand => {
                buckets.enhancement_base += rules.jade_floor_bonus
            }
            _ => {}
        }
    }

    // Greedy local classification, preserved as documented: the cup joins
    // the ten bucket only when that completes the parade.
    for _ in 0..sake_cups {
        if buckets.tens + 1 >= TEN_PARADE_MIN {
            buckets.tens += 1;
        } else {
            buckets.junk += 2;
        }
    }

    buckets
}

fn bird_bit(card: &Card) -> Option<u8> {
    if !card.is_godori_bird() {
        return None;
    }
    crate::GODORI_MONTHS
        .iter()
        .position(|&month| month == card.month)
        .map(|position| 1 << position)
}

fn upgrade_base(input: &ScoreInput, junk: i64) -> i64 {
    let mut base = 0i64;
    for item in input.upgrades.live() {
        base += match item.effect {
            UpgradeEffect::FlatBase { amount } => amount,
            UpgradeEffect::JunkCountBase { junk: want, amount } if junk == want => amount,
            UpgradeEffect::StageBase { per_stage } => per_stage * input.stage as i64,
            UpgradeEffect::RecycleDiscards { base_per_card } => {
                base_per_card * input.reincarnated as i64
            }
            _ => 0,
        };
    }
    base
}

fn flat_mult(input: &ScoreInput) -> f64 {
    let mut flat = input.discard_mult;
    for item in input.upgrades.live() {
        if let UpgradeEffect::MultBonus { amount } = item.effect {
            flat += amount;
        }
    }
    flat
}

/// Floor-only same-month clustering. Each month contributes its factor;
/// factors across months multiply together.
fn cluster_mult(floor: &[Card], upgrades: &ActiveUpgrades) -> f64 {
    let mut counts: HashMap<u8, u32> = HashMap::new();
    for card in floor {
        *counts.entry(card.month).or_insert(0) += 1;
    }
    let triple_boost = upgrades.has(|e| matches!(e, UpgradeEffect::TripleClusterBoost));
    let mut mult = 1.0;
    for count in counts.into_values() {
        mult *= cluster_factor(count, triple_boost);
    }
    mult
}

fn cluster_factor(count: u32, triple_boost: bool) -> f64 {
    match count {
        0 | 1 => 1.0,
        2 => 2.0,
        3 => {
            if triple_boost {
                3.0
            } else {
                1.0
            }
        }
        4 => 5.0,
        5 => 10.0,
        _ => {
            // 6 -> x20, every card past 6 doubles again.
            let mut factor = 20.0;
            for _ in 6..count {
                factor *= 2.0;
            }
            factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_factor_table() {
        assert_eq!(cluster_factor(1, false), 1.0);
        assert_eq!(cluster_factor(2, false), 2.0);
        assert_eq!(cluster_factor(3, false), 1.0);
        assert_eq!(cluster_factor(3, true), 3.0);
        assert_eq!(cluster_factor(4, false), 5.0);
        assert_eq!(cluster_factor(5, false), 10.0);
        assert_eq!(cluster_factor(6, false), 20.0);
        assert_eq!(cluster_factor(7, false), 40.0);
        assert_eq!(cluster_factor(8, false), 80.0);
    }
}
