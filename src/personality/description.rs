use super::{Trait, TraitVector};

const BALANCED: &str =
    "This font has a balanced personality without strongly pronounced characteristics.";

/// Phrases for each trait: strong, mild, strongly negative, mildly negative
static PHRASES: &[(Trait, [&str; 4])] = &[
    (
        Trait::Formality,
        [
            "projects considerable formality and seriousness",
            "has a somewhat formal character",
            "has a very casual and informal character",
            "has a relaxed, casual feel",
        ],
    ),
    (
        Trait::Friendliness,
        [
            "has a welcoming and approachable quality",
            "appears friendly and accessible",
            "may appear somewhat cold or distant",
            "has a slightly reserved quality",
        ],
    ),
    (
        Trait::Strength,
        [
            "projects considerable strength and confidence",
            "conveys stability and assurance",
            "appears delicate and light",
            "has a somewhat gentle character",
        ],
    ),
    (
        Trait::Elegance,
        [
            "exudes sophistication and elegance",
            "has a refined, polished quality",
            "has a deliberately unrefined, raw quality",
            "prioritizes function over aesthetic refinement",
        ],
    ),
    (
        Trait::Creativity,
        [
            "is highly creative and expressive",
            "shows creative character",
            "is very conventional and practical",
            "has a straightforward, no-nonsense quality",
        ],
    ),
    (
        Trait::Modernity,
        [
            "has a very contemporary, modern aesthetic",
            "feels current and up-to-date",
            "has a distinctly traditional or classical feel",
            "has somewhat traditional characteristics",
        ],
    ),
    (
        Trait::Playfulness,
        [
            "is playful and fun",
            "has a touch of playfulness",
            "is very serious and businesslike",
            "maintains a certain seriousness",
        ],
    ),
    (
        Trait::Trustworthiness,
        [
            "conveys a strong sense of trust and reliability",
            "appears trustworthy and dependable",
            "may appear untrustworthy or deceptive",
            "has a slightly untrustworthy quality",
        ],
    ),
    (
        Trait::Professionalism,
        [
            "exudes professionalism and competence",
            "appears professional and polished",
            "may appear unprofessional or amateurish",
            "has a slightly unprofessional quality",
        ],
    ),
    (
        Trait::Warmth,
        [
            "conveys a warm and inviting atmosphere",
            "appears warm and friendly",
            "may appear cold or distant",
            "has a slightly cold quality",
        ],
    ),
    (
        Trait::Dynamism,
        [
            "conveys energy and movement",
            "appears dynamic and lively",
            "may appear static or unchanging",
            "has a slightly static quality",
        ],
    ),
];

fn phrase(t: Trait, value: f64) -> Option<&'static str> {
    let (_, phrases) = PHRASES.iter().find(|(candidate, _)| *candidate == t)?;
    let index = if value > 1.0 {
        0
    } else if value > 0.0 {
        1
    } else if value < -1.0 {
        2
    } else if value < 0.0 {
        3
    } else {
        return None;
    };
    Some(phrases[index])
}

pub(crate) fn describe(traits: &TraitVector) -> String {
    let phrases: Vec<&str> = traits.iter().filter_map(|(t, v)| phrase(t, v)).collect();
    match phrases.as_slice() {
        [] => BALANCED.to_string(),
        [only] => format!("This font {only}."),
        [first, second] => format!("This font {first} and {second}."),
        [init @ .., last] => format!("This font {}, and {last}.", init.join(", ")),
    }
}
