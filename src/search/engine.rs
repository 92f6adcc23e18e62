//! Effects → ingredient combinations.
//!
//! The search walks the desired effects one at a time. The first effect
//! seeds every pair of its producers; each later effect either keeps,
//! drops, or branches every surviving candidate. A candidate survives a
//! step only if at least two of its members produce that effect.

use std::collections::HashSet;

use crate::index::EffectIndex;

use super::candidate::{Candidate, MAX_INGREDIENTS};

/// All pairs `(i, j)`, `i` before `j`, of the producers of `effect`.
fn seed(index: &EffectIndex, effect: &str) -> Vec<Candidate> {
    let producers = index.ingredients_for(effect);
    let mut candidates = Vec::new();
    for (i, first) in producers.iter().enumerate() {
        for second in &producers[i + 1..] {
            candidates.push(Candidate::pair(effect, first, second));
        }
    }
    candidates
}

/// Applies one more desired effect to every candidate.
fn extend(index: &EffectIndex, candidates: Vec<Candidate>, effect: &str) -> Vec<Candidate> {
    let producers = index.ingredients_for(effect);
    let mut next = Vec::with_capacity(candidates.len());

    for mut candidate in candidates {
        let mut matches = 0usize;
        for producer in producers {
            if candidate.contains(&producer.ingredient) {
                candidate.record(&producer.ingredient, effect, producer.magnitude, producer.duration);
                matches += 1;
            }
        }

        match matches {
            0 => {}
            1 if candidate.is_full() => {}
            1 => {
                for producer in producers {
                    if !candidate.contains(&producer.ingredient) {
                        next.push(candidate.extended_with(effect, producer));
                    }
                }
            }
            // Already satisfied: the same candidate carries on.
            _ => next.push(candidate),
        }
    }

    next
}

/// Drops candidates whose member set was already produced by another
/// branch, keeping the first.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.key().into_iter().map(str::to_string).collect()))
        .collect()
}

/// Panics if a surviving candidate breaks the stacking rule. A violation
/// is a defect in the search, never a property of the input.
fn assert_invariants<S: AsRef<str>>(candidates: &[Candidate], desired_effects: &[S]) {
    for candidate in candidates {
        assert!(
            (2..=MAX_INGREDIENTS).contains(&candidate.len()),
            "candidate [{}] has {} ingredients, expected 2..={MAX_INGREDIENTS}",
            candidate.label(),
            candidate.len()
        );
        for effect in desired_effects {
            let effect = effect.as_ref();
            assert!(
                candidate.contributors(effect) >= 2,
                "candidate [{}] does not stack effect '{effect}'",
                candidate.label()
            );
        }
    }
}

/// Finds every combination of 2–3 ingredients in which each of
/// `desired_effects` is produced by at least two members.
///
/// The result is ordered by discovery: seeding order for the first effect,
/// then producer order for each extension. Combinations reached through
/// more than one branch appear once, so a walk that reaches the same
/// triple from two seeds yields one candidate for it, not two. An empty
/// `desired_effects` yields an empty result; so does any effect no
/// ingredient produces.
#[must_use]
pub fn search_candidates<S: AsRef<str>>(index: &EffectIndex, desired_effects: &[S]) -> Vec<Candidate> {
    let Some((first, rest)) = desired_effects.split_first() else {
        return Vec::new();
    };

    let mut candidates = seed(index, first.as_ref());
    tracing::trace!(effect = first.as_ref(), candidates = candidates.len(), "seeded candidates");

    for effect in rest {
        if candidates.is_empty() {
            break;
        }
        candidates = extend(index, candidates, effect.as_ref());
        tracing::trace!(effect = effect.as_ref(), candidates = candidates.len(), "extended candidates");
    }

    let candidates = dedupe(candidates);
    assert_invariants(&candidates, desired_effects);

    tracing::debug!(
        effects = desired_effects.len(),
        candidates = candidates.len(),
        "candidate search finished"
    );
    candidates
}
