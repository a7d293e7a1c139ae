use indexmap::IndexSet;

use super::{Trait, TraitVector};
use crate::{ContrastBand, FeatureSet, FontStyle, WeightBand};

struct UseCaseRule {
    applies: fn(&TraitVector, &FeatureSet) -> bool,
    suitable: &'static [&'static str],
    less_suitable: &'static [&'static str],
}

fn text_weight(features: &FeatureSet) -> bool {
    matches!(
        features.weight(),
        Some(WeightBand::Regular | WeightBand::Medium)
    )
}

static USE_CASE_RULES: &[UseCaseRule] = &[
    UseCaseRule {
        applies: |t, _| t.get(Trait::Formality) > 1.0 && t.get(Trait::Elegance) > 0.0,
        suitable: &[
            "Formal invitations",
            "Luxury branding",
            "High-end restaurant menus",
            "Wedding stationery",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Formality) > 0.0 && t.get(Trait::Modernity) > 0.0,
        suitable: &[
            "Corporate communications",
            "Business websites",
            "Professional reports",
            "Legal documents",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Friendliness) > 1.0 && t.get(Trait::Playfulness) > 0.0,
        suitable: &[
            "Children's books",
            "Casual brand messaging",
            "Greeting cards",
            "Informal invitations",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Creativity) > 1.0 && t.get(Trait::Playfulness) > 0.0,
        suitable: &[
            "Creative agency branding",
            "Art exhibition materials",
            "Entertainment industry",
            "Festival promotions",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Modernity) > 1.0 && t.get(Trait::Strength) > 0.0,
        suitable: &[
            "Tech company branding",
            "Sports marketing",
            "Modern advertising",
            "App interfaces",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Elegance) > 1.0 && t.get(Trait::Creativity) > 0.0,
        suitable: &[
            "Fashion branding",
            "Beauty product packaging",
            "Lifestyle magazines",
            "Boutique marketing",
        ],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Formality) > 1.0 && t.get(Trait::Elegance) > 1.0,
        suitable: &[],
        less_suitable: &[
            "Casual social media posts",
            "Children's content",
            "Playful advertising",
        ],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Playfulness) > 1.0 && t.get(Trait::Creativity) > 1.0,
        suitable: &[],
        less_suitable: &[
            "Legal documents",
            "Academic papers",
            "Medical information",
            "Financial reports",
        ],
    },
    UseCaseRule {
        applies: |t, _| t.get(Trait::Modernity) < -1.0 && t.get(Trait::Creativity) < -1.0,
        suitable: &[],
        less_suitable: &[
            "Tech startups",
            "Modern digital interfaces",
            "Youth-oriented brands",
        ],
    },
    UseCaseRule {
        applies: |_, f| f.style() == Some(FontStyle::Serif) && text_weight(f),
        suitable: &["Long-form reading", "Book typography", "News publications"],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |_, f| f.style() == Some(FontStyle::SansSerif) && text_weight(f),
        suitable: &["User interfaces", "Signage", "Information design"],
        less_suitable: &[],
    },
    UseCaseRule {
        applies: |_, f| f.style() == Some(FontStyle::Script),
        suitable: &["Wedding invitations", "Certificates", "Greeting cards"],
        less_suitable: &[
            "Long paragraphs of text",
            "Small size applications",
            "Technical documentation",
        ],
    },
    UseCaseRule {
        applies: |_, f| f.style() == Some(FontStyle::Decorative),
        suitable: &["Headlines", "Logo design", "Short display text"],
        less_suitable: &[
            "Body text",
            "Long-form content",
            "Small size applications",
        ],
    },
    UseCaseRule {
        applies: |_, f| {
            f.style() == Some(FontStyle::Serif)
                && matches!(f.contrast(), Some(ContrastBand::High | ContrastBand::Extreme))
        },
        suitable: &["Editorial design", "Magazine publications", "Book covers"],
        less_suitable: &[],
    },
];

/// Suitable and less suitable uses, each de-duplicated in rule order
pub(crate) fn recommend(
    traits: &TraitVector,
    features: &FeatureSet,
) -> (IndexSet<&'static str>, IndexSet<&'static str>) {
    let mut suitable = IndexSet::new();
    let mut less_suitable = IndexSet::new();
    for rule in USE_CASE_RULES {
        if (rule.applies)(traits, features) {
            suitable.extend(rule.suitable.iter().copied());
            less_suitable.extend(rule.less_suitable.iter().copied());
        }
    }
    (suitable, less_suitable)
}
