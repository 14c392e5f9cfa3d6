use super::deal::{score_deal, BASE_DEAL_SCORE};
use super::error::RouteError;
use super::reasons::reasons_for;
use super::tips::tips_for;
use crate::specials::Special;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Lowest and highest rating a user can give a bar
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

/// User interest per bar name
pub type Ratings = HashMap<String, u8>;

/// Selection policy controlling how rating and deal score combine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Rating plus half the deal score
    #[default]
    Optimized,
    /// Rating alone, weighted x1.5
    HighRatedOnly,
    /// Rating, a little deal score and a random bonus of up to 2 points
    AdventureMix,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Optimized, Style::HighRatedOnly, Style::AdventureMix];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Optimized => "Optimized",
            Style::HighRatedOnly => "High-Rated Only",
            Style::AdventureMix => "Adventure Mix",
        }
    }

    /// Next style in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Style::Optimized => Style::HighRatedOnly,
            Style::HighRatedOnly => Style::AdventureMix,
            Style::AdventureMix => Style::Optimized,
        }
    }
}

/// Parameters of one route request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub num_stops: usize,
    pub style: Style,
    pub budget_focus: bool,
}

impl Default for RouteRequest {
    fn default() -> Self {
        Self {
            num_stops: 3,
            style: Style::Optimized,
            budget_focus: false,
        }
    }
}

/// A candidate bar with its scores, only alive while a route is built
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBar {
    pub bar: String,
    pub deal: String,
    pub rating: u8,
    pub deal_score: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub bar: String,
    pub deal: String,
    pub rating: u8,
    pub deal_score: f64,
    pub score: f64,
    pub reason: String,
    /// Secondary justifications, shown in detailed views
    pub highlights: Vec<String>,
}

/// Bars to visit in order. Position in `stops` is the visiting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub stops: Vec<RouteStop>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteStop> {
        self.stops.iter()
    }
}

/// A finished route together with its advisory tips
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub route: Route,
    pub tips: Vec<String>,
}

/// Score every distinct bar in the day's specials and sort by total score,
/// highest first. Ties keep first-seen order. When a bar appears more than
/// once, its first special is used.
///
/// `rng` is only drawn from for [`Style::AdventureMix`], once per candidate
/// in first-seen order.
///
/// # Errors
///
/// Returns [`RouteError::MissingRating`] or [`RouteError::RatingOutOfRange`]
/// for the first candidate whose rating is absent or outside 1..=10.
pub fn rank_candidates<R: Rng>(
    specials_for_day: &[Special],
    ratings: &Ratings,
    style: Style,
    budget_focus: bool,
    rng: &mut R,
) -> Result<Vec<ScoredBar>, RouteError> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for special in specials_for_day {
        if !seen.insert(special.bar.as_str()) {
            continue;
        }

        let rating = *ratings.get(&special.bar).ok_or_else(|| RouteError::MissingRating {
            bar: special.bar.clone(),
        })?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(RouteError::RatingOutOfRange {
                bar: special.bar.clone(),
                rating,
            });
        }

        let deal_score = if budget_focus {
            score_deal(&special.deal)
        } else {
            BASE_DEAL_SCORE
        };

        let rating_f = f64::from(rating);
        let total_score = match style {
            Style::HighRatedOnly => rating_f * 1.5,
            Style::AdventureMix => rating_f + deal_score * 0.3 + rng.gen_range(0.0..2.0),
            Style::Optimized => rating_f + deal_score * 0.5,
        };

        candidates.push(ScoredBar {
            bar: special.bar.clone(),
            deal: special.deal.clone(),
            rating,
            deal_score,
            total_score,
        });
    }

    // sort_by is stable, so equal scores stay in first-seen order
    candidates.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(candidates)
}

/// Build a route of `request.num_stops` bars from one day's specials.
///
/// Every distinct bar in `specials_for_day` must have a rating. If fewer
/// distinct bars exist than stops requested the route is empty, which the
/// caller reports as "not enough bars".
///
/// # Errors
///
/// See [`rank_candidates`]; additionally [`RouteError::NoStops`] when zero
/// stops are requested.
pub fn build_route<R: Rng>(
    specials_for_day: &[Special],
    ratings: &Ratings,
    request: &RouteRequest,
    rng: &mut R,
) -> Result<Route, RouteError> {
    if request.num_stops == 0 {
        return Err(RouteError::NoStops);
    }

    let ranked = rank_candidates(
        specials_for_day,
        ratings,
        request.style,
        request.budget_focus,
        rng,
    )?;

    if ranked.len() < request.num_stops {
        return Ok(Route::default());
    }

    let route_len = request.num_stops;
    let stops = ranked
        .into_iter()
        .take(route_len)
        .enumerate()
        .map(|(position, scored)| {
            let mut reasons = reasons_for(
                &scored,
                position,
                route_len,
                request.style,
                request.budget_focus,
            );
            let reason = reasons.remove(0);
            RouteStop {
                bar: scored.bar,
                deal: scored.deal,
                rating: scored.rating,
                deal_score: scored.deal_score,
                score: scored.total_score,
                reason,
                highlights: reasons,
            }
        })
        .collect();

    Ok(Route { stops })
}

/// Build a route and the tips that go with it
pub fn plan_night<R: Rng>(
    specials_for_day: &[Special],
    ratings: &Ratings,
    request: &RouteRequest,
    rng: &mut R,
) -> Result<Plan, RouteError> {
    let route = build_route(specials_for_day, ratings, request, rng)?;
    let tips = tips_for(&route, request.style, request.budget_focus);
    Ok(Plan { route, tips })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specials::Day;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn special(bar: &str, deal: &str) -> Special {
        Special::new(bar, Day::Friday, deal)
    }

    fn ratings(pairs: &[(&str, u8)]) -> Ratings {
        pairs.iter().map(|(b, r)| (b.to_string(), *r)).collect()
    }

    fn request(num_stops: usize, style: Style, budget_focus: bool) -> RouteRequest {
        RouteRequest {
            num_stops,
            style,
            budget_focus,
        }
    }

    #[test]
    fn test_friday_scenario_optimized_with_budget() {
        let specials = vec![special("A", "$1 Beer"), special("B", "Wine night")];
        let ratings = ratings(&[("A", 9), ("B", 3)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(2, Style::Optimized, true),
            &mut rng,
        )
        .unwrap();

        assert_eq!(route.len(), 2);
        assert_eq!(route.stops[0].bar, "A");
        assert_eq!(route.stops[0].deal_score, 8.0);
        assert_eq!(route.stops[0].score, 13.0);
        assert_eq!(route.stops[1].bar, "B");
        assert_eq!(route.stops[1].deal_score, 5.5);
        assert_eq!(route.stops[1].score, 5.75);
    }

    #[test]
    fn test_optimized_without_budget_uses_neutral_deal_score() {
        let specials = vec![
            special("A", "$1 drafts, happy hour"),
            special("B", "nothing"),
            special("C", "Half off wine"),
        ];
        let ratings = ratings(&[("A", 4), ("B", 7), ("C", 6)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(3, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();

        for stop in route.iter() {
            assert_eq!(stop.deal_score, 5.0);
            assert_eq!(stop.score, f64::from(stop.rating) + 2.5);
        }
        let order: Vec<&str> = route.iter().map(|s| s.bar.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_high_rated_only_ignores_deals() {
        let specials = vec![special("Cheap", "$1 drafts, happy hour"), special("Fave", "")];
        let ratings = ratings(&[("Cheap", 5), ("Fave", 6)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(2, Style::HighRatedOnly, true),
            &mut rng,
        )
        .unwrap();

        assert_eq!(route.stops[0].bar, "Fave");
        assert_eq!(route.stops[0].score, 9.0);
        assert_eq!(route.stops[1].score, 7.5);
    }

    #[test]
    fn test_takes_top_n_in_score_order() {
        let specials = vec![
            special("A", ""),
            special("B", ""),
            special("C", ""),
            special("D", ""),
        ];
        let ratings = ratings(&[("A", 2), ("B", 9), ("C", 5), ("D", 7)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(2, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();

        let order: Vec<&str> = route.iter().map(|s| s.bar.as_str()).collect();
        assert_eq!(order, vec!["B", "D"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let specials = vec![special("Z", ""), special("M", ""), special("A", "")];
        let ratings = ratings(&[("Z", 6), ("M", 6), ("A", 6)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(3, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();

        let order: Vec<&str> = route.iter().map(|s| s.bar.as_str()).collect();
        assert_eq!(order, vec!["Z", "M", "A"]);
    }

    #[test]
    fn test_too_few_bars_gives_empty_route() {
        let specials = vec![special("A", ""), special("B", "")];
        let ratings = ratings(&[("A", 5), ("B", 5)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(3, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn test_empty_day_gives_empty_route() {
        let mut rng = StdRng::seed_from_u64(1);
        let route = build_route(
            &[],
            &Ratings::new(),
            &request(1, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn test_duplicate_bar_counts_once_first_special_wins() {
        let specials = vec![
            special("A", "$1 drafts"),
            special("A", "Trivia"),
            special("B", ""),
        ];
        let ratings = ratings(&[("A", 5), ("B", 5)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(2, Style::Optimized, true),
            &mut rng,
        )
        .unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route.stops[0].bar, "A");
        assert_eq!(route.stops[0].deal, "$1 drafts");

        // Two distinct bars cannot fill three stops
        let short = build_route(
            &specials,
            &ratings,
            &request(3, Style::Optimized, true),
            &mut rng,
        )
        .unwrap();
        assert!(short.is_empty());
    }

    #[test]
    fn test_missing_rating_fails_loudly() {
        let specials = vec![special("A", ""), special("B", "")];
        let ratings = ratings(&[("A", 5)]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = build_route(
            &specials,
            &ratings,
            &request(1, Style::Optimized, false),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, RouteError::MissingRating { bar: "B".to_string() });
    }

    #[test]
    fn test_missing_rating_checked_even_when_route_would_be_empty() {
        let specials = vec![special("A", "")];
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_route(
            &specials,
            &Ratings::new(),
            &request(5, Style::Optimized, false),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::MissingRating { .. }));
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let specials = vec![special("A", "")];
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_route(
            &specials,
            &ratings(&[("A", 11)]),
            &request(1, Style::Optimized, false),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RouteError::RatingOutOfRange {
                bar: "A".to_string(),
                rating: 11
            }
        );
    }

    #[test]
    fn test_zero_stops_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_route(
            &[special("A", "")],
            &ratings(&[("A", 5)]),
            &request(0, Style::Optimized, false),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, RouteError::NoStops);
    }

    #[test]
    fn test_adventure_mix_scores_within_bonus_window() {
        let specials = vec![
            special("A", "$1 drafts"),
            special("B", "Wine night"),
            special("C", ""),
            special("D", "happy hour"),
        ];
        let ratings = ratings(&[("A", 3), ("B", 8), ("C", 5), ("D", 6)]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ranked =
                rank_candidates(&specials, &ratings, Style::AdventureMix, true, &mut rng).unwrap();
            for bar in &ranked {
                let floor = f64::from(bar.rating) + bar.deal_score * 0.3;
                assert!(bar.total_score >= floor, "{:?}", bar);
                assert!(bar.total_score < floor + 2.0, "{:?}", bar);
            }
        }
    }

    #[test]
    fn test_adventure_mix_reproducible_with_same_seed() {
        let specials = vec![
            special("A", ""),
            special("B", ""),
            special("C", ""),
            special("D", ""),
        ];
        let ratings = ratings(&[("A", 5), ("B", 5), ("C", 6), ("D", 6)]);
        let req = request(3, Style::AdventureMix, false);

        let first = build_route(&specials, &ratings, &req, &mut StdRng::seed_from_u64(42)).unwrap();
        let second =
            build_route(&specials, &ratings, &req, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_route_sorted_descending() {
        let specials: Vec<Special> = (1..=8)
            .map(|i| special(&format!("Bar {}", i), if i % 2 == 0 { "$2 drafts" } else { "" }))
            .collect();
        let ratings: Ratings = (1..=8u8).map(|i| (format!("Bar {}", i), i)).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for style in Style::ALL {
            let route =
                build_route(&specials, &ratings, &request(5, style, true), &mut rng).unwrap();
            assert_eq!(route.len(), 5);
            for pair in route.stops.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn test_stops_carry_reasons() {
        let specials = vec![special("A", ""), special("B", ""), special("C", "")];
        let ratings = ratings(&[("A", 9), ("B", 6), ("C", 4)]);
        let mut rng = StdRng::seed_from_u64(1);

        let route = build_route(
            &specials,
            &ratings,
            &request(3, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();

        assert_eq!(route.stops[0].reason, "Perfect starter - one of your top-rated bars");
        assert_eq!(route.stops[0].highlights, vec!["High personal rating (9/10)"]);
        assert_eq!(route.stops[1].reason, "Excellent mid-night stop");
        assert_eq!(route.stops[2].reason, "Perfect finale to your night out");
    }

    #[test]
    fn test_plan_night_includes_tips() {
        let specials = vec![special("A", "Happy Hour all night")];
        let ratings = ratings(&[("A", 7)]);
        let mut rng = StdRng::seed_from_u64(1);

        let plan = plan_night(
            &specials,
            &ratings,
            &request(1, Style::Optimized, false),
            &mut rng,
        )
        .unwrap();
        assert_eq!(plan.route.len(), 1);
        assert!(plan.tips.len() >= 3);
    }

    #[test]
    fn test_style_cycle() {
        assert_eq!(Style::Optimized.next(), Style::HighRatedOnly);
        assert_eq!(Style::AdventureMix.next(), Style::Optimized);
    }
}
