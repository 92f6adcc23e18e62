use serde::{Deserialize, Serialize};

use crate::data::{EffectMagnitudeDuration, IngredientMagnitudeDuration, MagnitudeDuration};

/// Most ingredients a single potion can combine.
pub const MAX_INGREDIENTS: usize = 3;

/// One ingredient of a candidate and the desired effects it was recorded
/// as contributing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Ingredient name.
    pub ingredient: String,
    /// Desired effects this ingredient contributes, in the order recorded.
    pub contributions: Vec<EffectMagnitudeDuration>,
}

impl Member {
    fn new(ingredient: &str, effect: &str, magnitude: f64, duration: f64) -> Self {
        Self {
            ingredient: ingredient.to_string(),
            contributions: vec![EffectMagnitudeDuration {
                effect: effect.to_string(),
                magnitude,
                duration,
            }],
        }
    }

    fn record(&mut self, effect: &str, magnitude: f64, duration: f64) {
        match self.contributions.iter_mut().find(|c| c.effect == effect) {
            Some(existing) => {
                existing.magnitude = magnitude;
                existing.duration = duration;
            }
            None => self.contributions.push(EffectMagnitudeDuration {
                effect: effect.to_string(),
                magnitude,
                duration,
            }),
        }
    }
}

/// A tentative combination of ingredients.
///
/// Members keep insertion order: the two seeding ingredients first, then
/// any ingredient added while extending. Branching a candidate always
/// clones it, so a sibling branch is never affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    members: Vec<Member>,
}

impl Candidate {
    /// Seeds a candidate from two distinct producers of `effect`.
    #[must_use]
    pub fn pair(
        effect: &str,
        first: &IngredientMagnitudeDuration,
        second: &IngredientMagnitudeDuration,
    ) -> Self {
        Self {
            members: vec![
                Member::new(&first.ingredient, effect, first.magnitude, first.duration),
                Member::new(&second.ingredient, effect, second.magnitude, second.duration),
            ],
        }
    }

    /// Returns a copy of this candidate with `producer` added as a new
    /// member contributing `effect`.
    #[must_use]
    pub fn extended_with(&self, effect: &str, producer: &IngredientMagnitudeDuration) -> Self {
        let mut next = self.clone();
        next.members.push(Member::new(
            &producer.ingredient,
            effect,
            producer.magnitude,
            producer.duration,
        ));
        next
    }

    /// Records `effect` on an existing member. Unknown members are ignored.
    pub fn record(&mut self, ingredient: &str, effect: &str, magnitude: f64, duration: f64) {
        if let Some(member) = self.members.iter_mut().find(|m| m.ingredient == ingredient) {
            member.record(effect, magnitude, duration);
        }
    }

    /// Number of distinct ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the candidate has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if no more ingredients can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_INGREDIENTS
    }

    /// Returns true if `ingredient` is a member.
    #[must_use]
    pub fn contains(&self, ingredient: &str) -> bool {
        self.members.iter().any(|m| m.ingredient == ingredient)
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Member ingredient names in insertion order.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|m| m.ingredient.as_str())
    }

    /// Recorded strength of `effect` on `ingredient`.
    #[must_use]
    pub fn contribution(&self, ingredient: &str, effect: &str) -> Option<MagnitudeDuration> {
        self.members
            .iter()
            .find(|m| m.ingredient == ingredient)?
            .contributions
            .iter()
            .find(|c| c.effect == effect)
            .map(|c| MagnitudeDuration::new(c.magnitude, c.duration))
    }

    /// Number of members recorded as contributing `effect`.
    #[must_use]
    pub fn contributors(&self, effect: &str) -> usize {
        self.members
            .iter()
            .filter(|m| m.contributions.iter().any(|c| c.effect == effect))
            .count()
    }

    /// Member names sorted, identifying the combination regardless of the
    /// order it was built in.
    #[must_use]
    pub fn key(&self) -> Vec<&str> {
        let mut key: Vec<&str> = self.ingredients().collect();
        key.sort_unstable();
        key
    }

    /// Member names joined with `" + "`.
    #[must_use]
    pub fn label(&self) -> String {
        self.ingredients().collect::<Vec<_>>().join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imd(ingredient: &str, magnitude: f64, duration: f64) -> IngredientMagnitudeDuration {
        IngredientMagnitudeDuration {
            ingredient: ingredient.to_string(),
            magnitude,
            duration,
        }
    }

    #[test]
    fn test_pair_records_effect_on_both() {
        let c = Candidate::pair("Slow", &imd("Deathbell", 50.0, 5.0), &imd("River Betty", 50.0, 5.0));
        assert_eq!(c.len(), 2);
        assert_eq!(c.contributors("Slow"), 2);
        assert_eq!(c.label(), "Deathbell + River Betty");
        assert_eq!(c.contribution("Deathbell", "Slow"), Some(MagnitudeDuration::new(50.0, 5.0)));
    }

    #[test]
    fn test_extension_does_not_touch_parent() {
        let parent = Candidate::pair("Slow", &imd("Deathbell", 50.0, 5.0), &imd("River Betty", 50.0, 5.0));
        let mut child = parent.extended_with("Damage Health", &imd("Nightshade", 1.0, 0.0));
        child.record("Deathbell", "Damage Health", 1.5, 0.0);

        assert_eq!(parent.len(), 2);
        assert!(!parent.contains("Nightshade"));
        assert!(parent.contribution("Deathbell", "Damage Health").is_none());

        assert_eq!(child.len(), 3);
        assert!(child.is_full());
        assert_eq!(child.contributors("Damage Health"), 2);
    }

    #[test]
    fn test_record_overwrites_repeated_effect() {
        let mut c = Candidate::pair("Slow", &imd("Deathbell", 50.0, 5.0), &imd("River Betty", 50.0, 5.0));
        c.record("Deathbell", "Slow", 60.0, 5.0);
        assert_eq!(c.members()[0].contributions.len(), 1);
        assert_eq!(c.contribution("Deathbell", "Slow"), Some(MagnitudeDuration::new(60.0, 5.0)));
    }

    #[test]
    fn test_key_ignores_build_order() {
        let a = Candidate::pair("Slow", &imd("River Betty", 1.0, 1.0), &imd("Deathbell", 1.0, 1.0));
        let b = Candidate::pair("Slow", &imd("Deathbell", 1.0, 1.0), &imd("River Betty", 1.0, 1.0));
        assert_eq!(a.key(), b.key());
        assert_ne!(a.label(), b.label());
    }
}
