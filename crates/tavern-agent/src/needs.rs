//! Homeostatic needs and the coarse drives they feed.
//!
//! Grounded on `needs.py`: a `Need` decays linearly with time and exposes an
//! urgency function the goal-maintenance step (§A.4.4 of `AgentKernel`)
//! reads every tick; a `Drive` aggregates urgency across the needs it
//! satisfies into a single activation scalar.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tavern_types::NeedKind;

/// Decay rate, in level-per-hour, for each need kind absent a config
/// override (§A.6 `needs.decay_rates`).
#[must_use]
pub const fn default_decay_rate(kind: NeedKind) -> f64 {
    match kind {
        NeedKind::Hunger => 0.04,
        NeedKind::Thirst => 0.06,
        NeedKind::Rest => 0.03,
        NeedKind::Safety => 0.01,
        NeedKind::Health => 0.01,
        NeedKind::Belonging => 0.015,
        NeedKind::Achievement => 0.01,
        NeedKind::Autonomy => 0.01,
        NeedKind::Competence => 0.01,
        NeedKind::Curiosity => 0.02,
        NeedKind::Respect => 0.01,
        NeedKind::Intimacy => 0.012,
        NeedKind::Purpose => 0.008,
    }
}

/// Default urgency/critical thresholds for a need kind.
#[must_use]
pub const fn default_thresholds(kind: NeedKind) -> (f64, f64) {
    match kind {
        NeedKind::Hunger | NeedKind::Thirst => (0.4, 0.15),
        NeedKind::Rest => (0.35, 0.1),
        NeedKind::Safety | NeedKind::Health => (0.3, 0.1),
        _ => (0.3, 0.1),
    }
}

/// The weight used in the overall-wellbeing weighted average.
///
/// Physiological needs weigh more heavily than psychological ones.
#[must_use]
pub const fn wellbeing_weight(kind: NeedKind) -> f64 {
    match kind {
        NeedKind::Hunger | NeedKind::Rest => 1.5,
        NeedKind::Safety | NeedKind::Health => 2.0,
        _ => 1.0,
    }
}

/// A single homeostatic need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Need {
    /// Which need this is.
    pub kind: NeedKind,
    /// Current satisfaction level, in `[0, 1]`. `1.0` is fully satisfied.
    pub level: f64,
    /// Decay rate, level lost per game hour.
    pub decay_per_hour: f64,
    /// Level below which the need becomes urgent.
    pub urgency_threshold: f64,
    /// Level below which the need becomes critical.
    pub critical_threshold: f64,
    /// Absolute game time this need was last updated.
    pub last_updated: f64,
}

impl Need {
    /// Construct a need at the given level using default decay/thresholds
    /// for its kind.
    #[must_use]
    pub fn new(kind: NeedKind, level: f64) -> Self {
        let (urgency_threshold, critical_threshold) = default_thresholds(kind);
        Self {
            kind,
            level: level.clamp(0.0, 1.0),
            decay_per_hour: default_decay_rate(kind),
            urgency_threshold,
            critical_threshold,
            last_updated: 0.0,
        }
    }

    /// Decay this need linearly over `dt_hours` of elapsed game time.
    ///
    /// **Invariant:** `0 <= level <= 1` always holds afterward (§A.4.2).
    pub fn update(&mut self, dt_hours: f64, now: f64) {
        let decayed = self.level - self.decay_per_hour * dt_hours;
        self.level = decayed.clamp(0.0, 1.0);
        self.last_updated = now;
    }

    /// Raise the level by `amount`, clamped to `1.0`.
    pub fn satisfy(&mut self, amount: f64) {
        self.level = (self.level + amount).clamp(0.0, 1.0);
    }

    /// Whether this need currently requires attention.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.level < self.urgency_threshold
    }

    /// Whether this need has crossed into critical territory.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.level < self.critical_threshold
    }

    /// Normalized pressure this need exerts, in `[0, 1]`.
    ///
    /// Zero once `level >= urgency_threshold`; otherwise
    /// `1 - level / urgency_threshold`.
    #[must_use]
    pub fn get_urgency(&self) -> f64 {
        if self.level >= self.urgency_threshold || self.urgency_threshold <= 0.0 {
            0.0
        } else {
            (1.0 - self.level / self.urgency_threshold).clamp(0.0, 1.0)
        }
    }
}

/// The full set of physiological and psychological needs an agent tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    needs: BTreeMap<NeedKind, Need>,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            needs: NeedKind::ALL.iter().map(|&kind| (kind, Need::new(kind, 1.0))).collect(),
        }
    }
}

impl Needs {
    /// A fresh set of needs, all at full satisfaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The need of the given kind. Every `NeedKind` has an entry by
    /// construction; if one is somehow absent a fresh, fully-satisfied need
    /// of that kind is returned instead (and not stored).
    #[must_use]
    pub fn get(&self, kind: NeedKind) -> Need {
        self.needs.get(&kind).cloned().unwrap_or_else(|| Need::new(kind, 1.0))
    }

    /// Mutable access to the need of the given kind, inserting a default if
    /// absent.
    pub fn get_mut(&mut self, kind: NeedKind) -> &mut Need {
        self.needs.entry(kind).or_insert_with(|| Need::new(kind, 1.0))
    }

    /// Decay every need by `dt_hours`.
    pub fn update_all(&mut self, dt_hours: f64, now: f64) {
        for need in self.needs.values_mut() {
            need.update(dt_hours, now);
        }
    }

    /// Iterate over needs currently marked urgent.
    pub fn urgent(&self) -> impl Iterator<Item = &Need> {
        self.needs.values().filter(|need| need.is_urgent())
    }

    /// All needs, in a fixed kind order.
    pub fn all(&self) -> impl Iterator<Item = &Need> {
        self.needs.values()
    }

    /// Weighted-average wellbeing across all needs, in `[0, 1]`. Observable
    /// only; does not feed back into any mutation.
    #[must_use]
    pub fn get_overall_wellbeing(&self) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for need in self.needs.values() {
            let weight = wellbeing_weight(need.kind);
            weighted_sum += need.level * weight;
            weight_total += weight;
        }
        if weight_total <= 0.0 {
            1.0
        } else {
            weighted_sum / weight_total
        }
    }
}

/// A coarse motivation activated by the urgency of the needs it satisfies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    /// Name of the drive, e.g. `"survival"`.
    pub name: String,
    /// Baseline intensity, in `[0, 1]`.
    pub intensity: f64,
    /// Which need kinds this drive is satisfied by.
    pub satisfies_needs: Vec<NeedKind>,
}

impl Drive {
    /// Construct a drive, clamping `intensity` into `[0, 1]`.
    #[must_use]
    pub fn new(name: impl Into<String>, intensity: f64, satisfies_needs: Vec<NeedKind>) -> Self {
        Self {
            name: name.into(),
            intensity: intensity.clamp(0.0, 1.0),
            satisfies_needs,
        }
    }

    /// Activation = `intensity * (0.3 + 0.7 * mean(urgency of satisfies_needs))`.
    #[must_use]
    pub fn get_activation(&self, needs: &Needs) -> f64 {
        if self.satisfies_needs.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .satisfies_needs
            .iter()
            .map(|&kind| needs.get(kind).get_urgency())
            .sum();
        let mean_urgency = total / self.satisfies_needs.len() as f64;
        self.intensity * (0.3 + 0.7 * mean_urgency)
    }
}

/// The six standard drives, mirroring `needs.py::create_standard_drives`.
#[must_use]
pub fn create_standard_drives() -> Vec<Drive> {
    vec![
        Drive::new(
            "survival",
            0.9,
            vec![
                NeedKind::Hunger,
                NeedKind::Thirst,
                NeedKind::Rest,
                NeedKind::Safety,
                NeedKind::Health,
            ],
        ),
        Drive::new("achievement", 0.6, vec![NeedKind::Achievement, NeedKind::Competence]),
        Drive::new("affiliation", 0.6, vec![NeedKind::Belonging, NeedKind::Intimacy]),
        Drive::new("autonomy", 0.5, vec![NeedKind::Autonomy]),
        Drive::new("exploration", 0.5, vec![NeedKind::Curiosity]),
        Drive::new("purpose", 0.6, vec![NeedKind::Purpose, NeedKind::Respect]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_never_escapes_zero() {
        let mut need = Need::new(NeedKind::Hunger, 0.05);
        need.update(10.0, 10.0);
        assert!(need.level >= 0.0);
        assert_eq!(need.level, 0.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut need = Need::new(NeedKind::Hunger, 0.6);
        need.update(0.0, 5.0);
        assert_eq!(need.level, 0.6);
    }

    #[test]
    fn urgency_matches_spec_formula() {
        let mut need = Need::new(NeedKind::Hunger, 1.0);
        need.urgency_threshold = 0.4;
        need.level = 0.2;
        assert!((need.get_urgency() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn satisfy_clamps_at_one() {
        let mut need = Need::new(NeedKind::Hunger, 0.9);
        need.satisfy(0.5);
        assert_eq!(need.level, 1.0);
    }

    #[test]
    fn drive_activation_scales_with_urgency() {
        let mut needs = Needs::new();
        needs.get_mut(NeedKind::Hunger).level = 0.0;
        needs.get_mut(NeedKind::Hunger).urgency_threshold = 0.4;
        let drive = Drive::new("survival", 1.0, vec![NeedKind::Hunger]);
        let activation = drive.get_activation(&needs);
        assert!((activation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn standard_drives_cover_named_set() {
        let drives = create_standard_drives();
        assert_eq!(drives.len(), 6);
        assert!(drives.iter().any(|drive| drive.name == "survival"));
    }

    #[test]
    fn wellbeing_weights_physiological_needs_more() {
        let needs = Needs::new();
        assert_eq!(needs.get_overall_wellbeing(), 1.0);
    }
}
