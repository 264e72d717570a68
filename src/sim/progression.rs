//! Experience, leveling, the upgrade catalog and evolutions
//!
//! Leveling is a simple loop over a growing requirement. Each level offers
//! three distinct cards from the catalog; picking one applies its effect once
//! and may unlock an evolution when two related upgrades have been taken
//! often enough.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::{MAX_SHIELD, UPGRADE_CHOICES, XP_NEED_GROWTH, XP_NEED_STEP, XP_START_NEED};

/// Identifier of an upgrade card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeId {
    FireRate,
    Damage,
    Multishot,
    Pierce,
    MoveSpeed,
    MaxHp,
    Magnet,
    BulletSpeed,
    Shield,
}

impl UpgradeId {
    /// Catalog entry for this id
    pub fn definition(&self) -> &'static UpgradeDefinition {
        // Every id has exactly one catalog entry.
        CATALOG
            .iter()
            .find(|u| u.id == *self)
            .unwrap_or(&CATALOG[0])
    }
}

/// A static upgrade card
#[derive(Debug)]
pub struct UpgradeDefinition {
    pub id: UpgradeId,
    pub title: &'static str,
    pub description: &'static str,
    /// Stat change applied once when the card is picked
    pub apply: fn(&mut Player),
}

/// Every upgrade the player can be offered
pub static CATALOG: [UpgradeDefinition; 9] = [
    UpgradeDefinition {
        id: UpgradeId::FireRate,
        title: "Swift Brush",
        description: "+20% fire rate",
        apply: |p: &mut Player| p.fire_rate *= 1.2,
    },
    UpgradeDefinition {
        id: UpgradeId::Damage,
        title: "Heavy Ink",
        description: "+25% damage",
        apply: |p: &mut Player| p.bullet_damage *= 1.25,
    },
    UpgradeDefinition {
        id: UpgradeId::Multishot,
        title: "Twin Strokes",
        description: "+1 projectile",
        apply: |p: &mut Player| p.bullet_count += 1,
    },
    UpgradeDefinition {
        id: UpgradeId::Pierce,
        title: "Piercing Script",
        description: "+1 pierce",
        apply: |p: &mut Player| p.pierce += 1,
    },
    UpgradeDefinition {
        id: UpgradeId::MoveSpeed,
        title: "Light Steps",
        description: "+12% move speed",
        apply: |p: &mut Player| p.speed *= 1.12,
    },
    UpgradeDefinition {
        id: UpgradeId::MaxHp,
        title: "Ink Vitality",
        description: "+20 max HP (heal 20)",
        apply: |p: &mut Player| {
            p.hp_max += 20.0;
            p.heal(20.0);
        },
    },
    UpgradeDefinition {
        id: UpgradeId::Magnet,
        title: "Relic Pull",
        description: "+35 pickup radius",
        apply: |p: &mut Player| p.magnet += 35.0,
    },
    UpgradeDefinition {
        id: UpgradeId::BulletSpeed,
        title: "Sharper Current",
        description: "+18% projectile speed",
        apply: |p: &mut Player| p.bullet_speed *= 1.18,
    },
    UpgradeDefinition {
        id: UpgradeId::Shield,
        title: "Xuanwu Aegis",
        description: "Gain 1 shield charge (auto-refresh)",
        apply: |p: &mut Player| {
            p.grant_shield(1);
            p.shield_timer = 0.0;
        },
    },
];

/// One-time combo bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Evolution {
    /// Multishot 3 + Pierce 2
    Trident,
    /// Fire rate 3 + Damage 3
    Cutter,
    /// Magnet 2 + Shield 2
    Vortex,
}

impl Evolution {
    pub const ALL: [Evolution; 3] = [Evolution::Trident, Evolution::Cutter, Evolution::Vortex];

    /// Pick counts required to unlock
    pub fn requirements(&self) -> [(UpgradeId, u32); 2] {
        match self {
            Evolution::Trident => [(UpgradeId::Multishot, 3), (UpgradeId::Pierce, 2)],
            Evolution::Cutter => [(UpgradeId::FireRate, 3), (UpgradeId::Damage, 3)],
            Evolution::Vortex => [(UpgradeId::Magnet, 2), (UpgradeId::Shield, 2)],
        }
    }

    fn apply(&self, p: &mut Player) {
        match self {
            Evolution::Trident => {
                p.bullet_count += 2;
                p.bullet_spread *= 0.75;
                p.bullet_damage *= 1.15;
            }
            Evolution::Cutter => {
                p.fire_rate *= 1.35;
                p.bullet_speed *= 1.2;
                p.pierce += 1;
            }
            Evolution::Vortex => {
                p.magnet += 120.0;
                p.grant_shield(1);
            }
        }
    }
}

/// Leveling and upgrade bookkeeping for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    /// XP collected toward the next level
    pub xp: f32,
    /// XP required for the next level
    pub xp_needed: u32,
    /// Times each upgrade was picked
    pub picks: BTreeMap<UpgradeId, u32>,
    /// Evolutions already granted
    pub evolved: BTreeSet<Evolution>,
    /// Cards on offer while leveling up
    pub choices: Option<Vec<UpgradeId>>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0.0,
            xp_needed: XP_START_NEED,
            picks: BTreeMap::new(),
            evolved: BTreeSet::new(),
            choices: None,
        }
    }

    /// Requirement that follows `need`
    pub fn next_requirement(need: u32) -> u32 {
        (need as f32 * XP_NEED_GROWTH + XP_NEED_STEP).floor() as u32
    }

    /// Add XP and return the levels reached, in order
    pub fn add_xp(&mut self, amount: f32) -> Vec<u32> {
        self.xp += amount.max(0.0);
        let mut reached = Vec::new();
        while self.xp >= self.xp_needed as f32 {
            self.xp -= self.xp_needed as f32;
            self.level += 1;
            self.xp_needed = Self::next_requirement(self.xp_needed);
            reached.push(self.level);
        }
        reached
    }

    /// Progress toward the next level in [0, 1]
    pub fn xp_fraction(&self) -> f32 {
        (self.xp / self.xp_needed as f32).clamp(0.0, 1.0)
    }

    pub fn pick_count(&self, id: UpgradeId) -> u32 {
        self.picks.get(&id).copied().unwrap_or(0)
    }

    /// Shield charges that regenerate: one per shield pick, up to the cap
    pub fn shield_cap(&self) -> u32 {
        self.pick_count(UpgradeId::Shield).min(MAX_SHIELD)
    }

    /// Draw distinct cards from the catalog and put them on offer
    pub fn roll_choices<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[UpgradeId] {
        let mut pool: Vec<UpgradeId> = CATALOG.iter().map(|u| u.id).collect();
        let mut out = Vec::with_capacity(UPGRADE_CHOICES);
        while out.len() < UPGRADE_CHOICES && !pool.is_empty() {
            let i = rng.random_range(0..pool.len());
            out.push(pool.remove(i));
        }
        self.choices.insert(out)
    }

    /// Apply the card at `index` of the current offer.
    ///
    /// Returns `None` (and changes nothing) when nothing is on offer or the
    /// index is out of range. Otherwise returns the chosen id and any
    /// evolutions it unlocked.
    pub fn choose(
        &mut self,
        index: usize,
        player: &mut Player,
    ) -> Option<(UpgradeId, Vec<Evolution>)> {
        let id = *self.choices.as_ref()?.get(index)?;
        self.choices = None;
        let evolutions = self.apply_upgrade(id, player);
        Some((id, evolutions))
    }

    /// Apply one upgrade directly and evaluate evolutions
    pub fn apply_upgrade(&mut self, id: UpgradeId, player: &mut Player) -> Vec<Evolution> {
        (id.definition().apply)(player);
        *self.picks.entry(id).or_insert(0) += 1;
        self.check_evolutions(player)
    }

    /// Grant every evolution whose requirements are met and that has not
    /// fired yet this run
    pub fn check_evolutions(&mut self, player: &mut Player) -> Vec<Evolution> {
        let mut unlocked = Vec::new();
        for evo in Evolution::ALL {
            if self.evolved.contains(&evo) {
                continue;
            }
            let ready = evo
                .requirements()
                .iter()
                .all(|&(id, n)| self.pick_count(id) >= n);
            if ready {
                self.evolved.insert(evo);
                evo.apply(player);
                unlocked.push(evo);
            }
        }
        unlocked
    }
}
