//! Turning a [`FeatureSet`] into a personality profile
//!
//! Scoring is table driven: [`rules`] holds the feature predicates and the
//! trait deltas they contribute, [`description`] the phrase for each trait
//! and intensity, and [`usecases`] the recommendations derived from the
//! final trait vector.
mod description;
mod rules;
mod traits;
mod usecases;

pub use traits::{Trait, TraitVector};

use indexmap::IndexSet;
use serde::Serialize;

use crate::FeatureSet;

/// How many of the strongest positive traits are reported
const DOMINANT_TRAITS: usize = 3;

/// The emotional profile of a font
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalityProfile {
    /// Every trait, clamped to [-2, 2]
    pub traits: TraitVector,
    /// A sentence describing the font's character
    pub description: String,
    /// Up to three strongest positive traits, strongest first
    pub dominant_traits: Vec<(Trait, f64)>,
    /// Recommended uses, in rule order
    pub suitable_for: IndexSet<&'static str>,
    /// Discouraged uses, in rule order
    pub less_suitable_for: IndexSet<&'static str>,
}

impl PersonalityProfile {
    /// Score a feature set
    ///
    /// Missing or unknown records simply contribute nothing, so a profile
    /// always exists.
    pub fn from_features(features: &FeatureSet) -> Self {
        let mut traits = TraitVector::default();
        for rule in rules::TRAIT_RULES {
            if (rule.applies)(features) {
                log::trace!("Personality rule '{}' applies", rule.name);
                for (t, delta) in rule.deltas {
                    traits.add(*t, *delta);
                }
            }
        }
        traits.clamp();

        let mut dominant_traits: Vec<(Trait, f64)> =
            traits.iter().filter(|(_, v)| *v > 0.0).collect();
        // Stable, so ties keep declaration order
        dominant_traits.sort_by(|a, b| b.1.total_cmp(&a.1));
        dominant_traits.truncate(DOMINANT_TRAITS);

        let (suitable_for, less_suitable_for) = usecases::recommend(&traits, features);
        PersonalityProfile {
            description: description::describe(&traits),
            traits,
            dominant_traits,
            suitable_for,
            less_suitable_for,
        }
    }
}
