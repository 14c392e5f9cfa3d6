use super::engine::{ScoredBar, Style};

/// Ratings at or above this count as one of the user's favourites
const TOP_RATING: u8 = 8;

/// Deal scores at or above this are called out when budget focus is on
const GREAT_DEAL_SCORE: f64 = 7.0;

const FALLBACK_REASON: &str = "Solid choice for your route";

/// One-line justification for a stop at `position` in a route of
/// `route_len` stops. Purely descriptive: never affects scoring.
pub fn reason_for(
    stop: &ScoredBar,
    position: usize,
    route_len: usize,
    style: Style,
    budget_focus: bool,
) -> String {
    reasons_for(stop, position, route_len, style, budget_focus).remove(0)
}

/// Every justification that applies, most important first. Never empty.
///
/// The position clause comes first: starter for the first stop, finale for
/// the last stop of a multi-stop route, mid-night stop otherwise. Rating,
/// deal and style clauses follow. The fallback is only used when nothing
/// else applies, which needs a position outside the route.
pub fn reasons_for(
    stop: &ScoredBar,
    position: usize,
    route_len: usize,
    style: Style,
    budget_focus: bool,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(reason) = position_reason(stop, position, route_len) {
        reasons.push(reason.to_string());
    }

    if stop.rating >= TOP_RATING {
        reasons.push(format!("High personal rating ({}/10)", stop.rating));
    }

    if budget_focus && stop.deal_score >= GREAT_DEAL_SCORE {
        reasons.push(format!("Great deal value ({:.1}/10)", stop.deal_score));
    }

    if style == Style::AdventureMix {
        reasons.push("A wildcard pick to keep things interesting".to_string());
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}

fn position_reason(stop: &ScoredBar, position: usize, route_len: usize) -> Option<&'static str> {
    if position >= route_len {
        return None;
    }

    if position == 0 {
        if stop.rating >= TOP_RATING {
            Some("Perfect starter - one of your top-rated bars")
        } else {
            Some("Great way to kick off the night")
        }
    } else if position == route_len - 1 {
        Some("Perfect finale to your night out")
    } else {
        Some("Excellent mid-night stop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(rating: u8, deal_score: f64) -> ScoredBar {
        ScoredBar {
            bar: "Test Bar".to_string(),
            deal: "".to_string(),
            rating,
            deal_score,
            total_score: 0.0,
        }
    }

    #[test]
    fn test_first_stop_top_rated() {
        assert_eq!(
            reason_for(&scored(9, 5.0), 0, 3, Style::Optimized, false),
            "Perfect starter - one of your top-rated bars"
        );
        assert_eq!(
            reason_for(&scored(8, 5.0), 0, 3, Style::Optimized, false),
            "Perfect starter - one of your top-rated bars"
        );
    }

    #[test]
    fn test_first_stop_regular() {
        assert_eq!(
            reason_for(&scored(7, 5.0), 0, 3, Style::Optimized, false),
            "Great way to kick off the night"
        );
    }

    #[test]
    fn test_single_stop_route_is_a_starter() {
        assert_eq!(
            reason_for(&scored(4, 5.0), 0, 1, Style::Optimized, false),
            "Great way to kick off the night"
        );
    }

    #[test]
    fn test_middle_and_final_stops() {
        assert_eq!(
            reason_for(&scored(9, 5.0), 1, 4, Style::Optimized, false),
            "Excellent mid-night stop"
        );
        assert_eq!(
            reason_for(&scored(9, 5.0), 2, 4, Style::Optimized, false),
            "Excellent mid-night stop"
        );
        assert_eq!(
            reason_for(&scored(2, 5.0), 3, 4, Style::Optimized, false),
            "Perfect finale to your night out"
        );
    }

    #[test]
    fn test_supplementary_clauses_follow_position() {
        let reasons = reasons_for(&scored(9, 8.5), 1, 3, Style::AdventureMix, true);
        assert_eq!(
            reasons,
            vec![
                "Excellent mid-night stop".to_string(),
                "High personal rating (9/10)".to_string(),
                "Great deal value (8.5/10)".to_string(),
                "A wildcard pick to keep things interesting".to_string(),
            ]
        );
    }

    #[test]
    fn test_deal_clause_needs_budget_focus() {
        let reasons = reasons_for(&scored(5, 9.0), 1, 3, Style::Optimized, false);
        assert_eq!(reasons, vec!["Excellent mid-night stop".to_string()]);
    }

    #[test]
    fn test_supplementary_clause_surfaces_without_position() {
        assert_eq!(
            reason_for(&scored(10, 5.0), 5, 3, Style::Optimized, false),
            "High personal rating (10/10)"
        );
    }

    #[test]
    fn test_fallback_when_nothing_applies() {
        assert_eq!(
            reason_for(&scored(5, 5.0), 0, 0, Style::HighRatedOnly, false),
            FALLBACK_REASON
        );
    }
}
