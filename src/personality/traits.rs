use indexmap::IndexMap;
use serde::Serialize;

/// Lower and upper bound of every trait value
pub const TRAIT_RANGE: (f64, f64) = (-2.0, 2.0);

/// An emotional trait a font can project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    /// Seriousness and ceremony
    Formality,
    /// Approachability
    Friendliness,
    /// Weight and assurance
    Strength,
    /// Refinement and polish
    Elegance,
    /// Artistic, unconventional character
    Creativity,
    /// Contemporary rather than traditional feel
    Modernity,
    /// Whimsy and fun
    Playfulness,
    /// Reliability
    Trustworthiness,
    /// Business-like competence
    Professionalism,
    /// Human, inviting feel
    Warmth,
    /// Energy and movement
    Dynamism,
}

impl Trait {
    /// All traits in declaration order
    pub const ALL: [Trait; 11] = [
        Trait::Formality,
        Trait::Friendliness,
        Trait::Strength,
        Trait::Elegance,
        Trait::Creativity,
        Trait::Modernity,
        Trait::Playfulness,
        Trait::Trustworthiness,
        Trait::Professionalism,
        Trait::Warmth,
        Trait::Dynamism,
    ];

    /// The snake_case name used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Formality => "formality",
            Trait::Friendliness => "friendliness",
            Trait::Strength => "strength",
            Trait::Elegance => "elegance",
            Trait::Creativity => "creativity",
            Trait::Modernity => "modernity",
            Trait::Playfulness => "playfulness",
            Trait::Trustworthiness => "trustworthiness",
            Trait::Professionalism => "professionalism",
            Trait::Warmth => "warmth",
            Trait::Dynamism => "dynamism",
        }
    }
}

impl std::fmt::Display for Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for each of the eleven traits, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraitVector(IndexMap<Trait, f64>);

impl Default for TraitVector {
    fn default() -> Self {
        TraitVector(Trait::ALL.iter().map(|t| (*t, 0.0)).collect())
    }
}

impl TraitVector {
    /// The score of one trait
    pub fn get(&self, t: Trait) -> f64 {
        self.0.get(&t).copied().unwrap_or_default()
    }

    /// Every trait with its score, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        self.0.iter().map(|(t, v)| (*t, *v))
    }

    pub(crate) fn add(&mut self, t: Trait, delta: f64) {
        *self.0.entry(t).or_default() += delta;
    }

    pub(crate) fn clamp(&mut self) {
        for value in self.0.values_mut() {
            *value = value.clamp(TRAIT_RANGE.0, TRAIT_RANGE.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vector_order_and_clamp() {
        let mut v = TraitVector::default();
        v.add(Trait::Warmth, 3.5);
        v.add(Trait::Formality, -2.5);
        v.add(Trait::Strength, 1.0);
        v.clamp();
        assert_eq!(v.get(Trait::Warmth), 2.0);
        assert_eq!(v.get(Trait::Formality), -2.0);
        assert_eq!(v.get(Trait::Strength), 1.0);
        let order: Vec<Trait> = v.iter().map(|(t, _)| t).collect();
        assert_eq!(order, Trait::ALL.to_vec());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(TraitVector::default()).unwrap_or_default();
        assert_eq!(json["dynamism"], 0.0);
        assert_eq!(json.as_object().map(|o| o.len()), Some(11));
    }
}
