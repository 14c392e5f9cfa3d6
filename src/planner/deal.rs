/// Score every deal starts from before any cue is applied
pub const BASE_DEAL_SCORE: f64 = 5.0;

/// Upper bound of a deal score
pub const MAX_DEAL_SCORE: f64 = 10.0;

/// Price tokens from cheapest tier down. Only the first match applies.
const PRICE_TIERS: [(&str, f64); 5] = [
    ("$1", 3.0),
    ("$2", 3.0),
    ("$3", 2.0),
    ("$4", 1.0),
    ("$5", 1.0),
];

/// Each keyword present adds 1 point
const VALUE_KEYWORDS: [&str; 5] = ["happy hour", "half off", "draft", "50 cent", "pitcher"];

/// Each keyword present adds half a point
const PREMIUM_KEYWORDS: [&str; 3] = ["wine", "cocktail", "premium"];

#[derive(Debug, Clone, PartialEq)]
pub struct DealCue {
    pub label: String, // e.g. "Price $1", "Value: draft"
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealScore {
    pub score: f64,
    pub cues: Vec<DealCue>,
}

/// Derive a 0-10 attractiveness score from a deal's text.
///
/// Price tokens are matched case-sensitively, keywords case-insensitively.
/// Empty text scores exactly the base.
pub fn score_deal(text: &str) -> f64 {
    score_deal_detailed(text).score
}

/// Same as [`score_deal`] but also reports which cues matched
pub fn score_deal_detailed(text: &str) -> DealScore {
    let mut score = BASE_DEAL_SCORE;
    let mut cues = Vec::new();

    if let Some((token, bonus)) = PRICE_TIERS.iter().find(|(token, _)| text.contains(*token)) {
        score += *bonus;
        cues.push(DealCue {
            label: format!("Price {}", token),
            delta: *bonus,
        });
    }

    let lowered = text.to_lowercase();

    for keyword in VALUE_KEYWORDS {
        if lowered.contains(keyword) {
            score += 1.0;
            cues.push(DealCue {
                label: format!("Value: {}", keyword),
                delta: 1.0,
            });
        }
    }

    for keyword in PREMIUM_KEYWORDS {
        if lowered.contains(keyword) {
            score += 0.5;
            cues.push(DealCue {
                label: format!("Premium: {}", keyword),
                delta: 0.5,
            });
        }
    }

    DealScore {
        score: score.min(MAX_DEAL_SCORE),
        cues,
    }
}
