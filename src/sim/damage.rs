//! Body damage and game over
//!
//! Every missed shot strikes one body zone. Zones are a set: a zone is
//! credited at most once per life and nothing is removed until reset.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::BodyPart;

/// How missed shots pick a zone and which hits are fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamagePolicy {
    /// Random among unhit zones, head last. Only a head hit is fatal.
    #[default]
    HeadOnly,
    /// Superseded: random among unhit zones. A repeat on head or torso,
    /// both arms, or every zone hit ends the game.
    Symmetric,
}

/// Outcome of crediting a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Zone added, still alive
    Wounded(BodyPart),
    /// Zone was already hit; nothing changed
    Repeat(BodyPart),
    /// This hit ended the game
    Fatal(BodyPart),
    /// Game already over, hit ignored
    AlreadyOver,
    /// No zone could be credited (bad zone list); hit dropped
    Dropped,
}

/// Accumulated damage for one life
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Damage {
    policy: DamagePolicy,
    zones: Vec<BodyPart>,
    hit: BTreeSet<BodyPart>,
    last_hit: Option<BodyPart>,
    killing_blow: Option<BodyPart>,
}

impl Default for Damage {
    fn default() -> Self {
        Self::new(DamagePolicy::default())
    }
}

impl Damage {
    pub fn new(policy: DamagePolicy) -> Self {
        Self::with_zones(policy, BodyPart::ALL.to_vec())
    }

    pub fn with_zones(policy: DamagePolicy, zones: Vec<BodyPart>) -> Self {
        Self {
            policy,
            zones,
            hit: BTreeSet::new(),
            last_hit: None,
            killing_blow: None,
        }
    }

    pub fn policy(&self) -> DamagePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DamagePolicy) {
        self.policy = policy;
    }

    pub fn hit_zones(&self) -> &BTreeSet<BodyPart> {
        &self.hit
    }

    pub fn is_game_over(&self) -> bool {
        self.killing_blow.is_some()
    }

    pub fn killing_blow(&self) -> Option<BodyPart> {
        self.killing_blow
    }

    /// Clear for a new life
    pub fn reset(&mut self) {
        self.hit.clear();
        self.last_hit = None;
        self.killing_blow = None;
    }

    /// A shot got through: pick a zone per policy and credit it
    pub fn register_miss<R: Rng>(&mut self, rng: &mut R) -> DamageOutcome {
        if self.is_game_over() {
            return DamageOutcome::AlreadyOver;
        }
        if self.zones.is_empty() {
            log::error!("No damage zones configured; dropping hit");
            return DamageOutcome::Dropped;
        }

        let unhit: Vec<BodyPart> = self
            .zones
            .iter()
            .copied()
            .filter(|z| !self.hit.contains(z))
            .collect();

        let candidates: Vec<BodyPart> = match self.policy {
            DamagePolicy::HeadOnly => {
                let body: Vec<BodyPart> =
                    unhit.iter().copied().filter(|z| *z != BodyPart::Head).collect();
                if body.is_empty() { unhit } else { body }
            }
            DamagePolicy::Symmetric => unhit,
        };

        if candidates.is_empty() {
            return match self.policy {
                DamagePolicy::Symmetric => {
                    // Every zone taken: the last credited zone is the killing blow
                    let last = self.last_hit.unwrap_or(self.zones[0]);
                    log::info!("All body zones hit");
                    self.killing_blow = Some(last);
                    DamageOutcome::Fatal(last)
                }
                DamagePolicy::HeadOnly => {
                    log::error!(
                        "No creditable damage zone left (zones: {:?}); dropping hit",
                        self.zones
                    );
                    DamageOutcome::Dropped
                }
            };
        }

        let zone = candidates[rng.random_range(0..candidates.len())];
        self.apply_hit(zone)
    }

    /// Credit a specific zone
    pub fn apply_hit(&mut self, zone: BodyPart) -> DamageOutcome {
        if self.is_game_over() {
            return DamageOutcome::AlreadyOver;
        }

        let repeat = !self.hit.insert(zone);
        self.last_hit = Some(zone);
        log::debug!("Zone hit: {} (repeat: {})", zone, repeat);

        if self.is_fatal(zone, repeat) {
            self.killing_blow = Some(zone);
            log::info!(
                "Game over by {}. Hits: {:?}",
                zone,
                self.hit.iter().map(BodyPart::as_str).collect::<Vec<_>>()
            );
            return DamageOutcome::Fatal(zone);
        }

        if repeat {
            DamageOutcome::Repeat(zone)
        } else {
            DamageOutcome::Wounded(zone)
        }
    }

    fn is_fatal(&self, zone: BodyPart, repeat: bool) -> bool {
        match self.policy {
            DamagePolicy::HeadOnly => zone == BodyPart::Head,
            DamagePolicy::Symmetric => match zone {
                BodyPart::Head | BodyPart::Torso => repeat,
                BodyPart::LeftArm | BodyPart::RightArm => {
                    self.hit.contains(&BodyPart::LeftArm) && self.hit.contains(&BodyPart::RightArm)
                }
                BodyPart::LeftLeg | BodyPart::RightLeg => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_head_only_spares_head_until_last() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut damage = Damage::new(DamagePolicy::HeadOnly);
        for i in 0..5 {
            let outcome = damage.register_miss(&mut rng);
            assert!(matches!(outcome, DamageOutcome::Wounded(z) if z != BodyPart::Head));
            assert_eq!(damage.hit_zones().len(), i + 1);
            assert!(!damage.is_game_over());
        }
        assert_eq!(damage.register_miss(&mut rng), DamageOutcome::Fatal(BodyPart::Head));
        assert_eq!(damage.killing_blow(), Some(BodyPart::Head));
        assert_eq!(damage.register_miss(&mut rng), DamageOutcome::AlreadyOver);
        assert_eq!(damage.hit_zones().len(), 6);
    }

    #[test]
    fn test_head_only_direct_head_hit_is_fatal() {
        let mut damage = Damage::new(DamagePolicy::HeadOnly);
        assert_eq!(damage.apply_hit(BodyPart::Torso), DamageOutcome::Wounded(BodyPart::Torso));
        assert_eq!(damage.apply_hit(BodyPart::Torso), DamageOutcome::Repeat(BodyPart::Torso));
        assert_eq!(damage.apply_hit(BodyPart::Head), DamageOutcome::Fatal(BodyPart::Head));
    }

    #[test]
    fn test_empty_zone_list_drops_hit() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut damage = Damage::with_zones(DamagePolicy::HeadOnly, Vec::new());
        assert_eq!(damage.register_miss(&mut rng), DamageOutcome::Dropped);
        assert!(!damage.is_game_over());
        assert!(damage.hit_zones().is_empty());
    }

    #[test]
    fn test_headless_zone_list_exhausted_drops_hit() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut damage =
            Damage::with_zones(DamagePolicy::HeadOnly, vec![BodyPart::LeftLeg, BodyPart::RightLeg]);
        damage.register_miss(&mut rng);
        damage.register_miss(&mut rng);
        assert_eq!(damage.register_miss(&mut rng), DamageOutcome::Dropped);
        assert!(!damage.is_game_over());
    }

    #[test]
    fn test_reset_clears() {
        let mut damage = Damage::new(DamagePolicy::HeadOnly);
        damage.apply_hit(BodyPart::Head);
        damage.reset();
        assert!(!damage.is_game_over());
        assert!(damage.hit_zones().is_empty());
    }

    #[test]
    fn test_superseded_symmetric_repeat_head_is_fatal_once() {
        let mut damage = Damage::new(DamagePolicy::Symmetric);
        assert_eq!(damage.apply_hit(BodyPart::Head), DamageOutcome::Wounded(BodyPart::Head));
        assert_eq!(damage.apply_hit(BodyPart::Head), DamageOutcome::Fatal(BodyPart::Head));
        assert_eq!(damage.apply_hit(BodyPart::Head), DamageOutcome::AlreadyOver);
        assert_eq!(damage.killing_blow(), Some(BodyPart::Head));
    }

    #[test]
    fn test_superseded_symmetric_both_arms_fatal() {
        let mut damage = Damage::new(DamagePolicy::Symmetric);
        assert_eq!(damage.apply_hit(BodyPart::LeftLeg), DamageOutcome::Wounded(BodyPart::LeftLeg));
        assert_eq!(damage.apply_hit(BodyPart::LeftArm), DamageOutcome::Wounded(BodyPart::LeftArm));
        assert_eq!(damage.apply_hit(BodyPart::RightArm), DamageOutcome::Fatal(BodyPart::RightArm));
    }

    #[test]
    fn test_superseded_symmetric_all_zones_hit_ends_game() {
        let mut rng = Pcg32::seed_from_u64(9);
        let legs = vec![BodyPart::LeftLeg, BodyPart::RightLeg];
        let mut damage = Damage::with_zones(DamagePolicy::Symmetric, legs);
        damage.register_miss(&mut rng);
        damage.register_miss(&mut rng);
        assert!(matches!(damage.register_miss(&mut rng), DamageOutcome::Fatal(_)));
    }

    proptest! {
        #[test]
        fn prop_hit_set_is_a_set(zones in proptest::collection::vec(0usize..6, 0..30)) {
            // Skip the head so nothing is fatal under HeadOnly
            let mut damage = Damage::new(DamagePolicy::HeadOnly);
            for z in zones {
                let zone = BodyPart::ALL[z];
                if zone == BodyPart::Head {
                    continue;
                }
                let before = damage.hit_zones().clone();
                damage.apply_hit(zone);
                if before.contains(&zone) {
                    prop_assert_eq!(damage.hit_zones().len(), before.len());
                } else {
                    prop_assert_eq!(damage.hit_zones().len(), before.len() + 1);
                }
            }
        }
    }
}
