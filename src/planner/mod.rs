pub mod deal;
pub mod engine;
pub mod error;
pub mod reasons;
pub mod tips;
pub mod validation;

pub use deal::{score_deal, score_deal_detailed, DealCue, DealScore};
pub use engine::{
    build_route, plan_night, rank_candidates, Plan, Ratings, Route, RouteRequest, RouteStop,
    ScoredBar, Style, MAX_RATING, MIN_RATING,
};
pub use error::RouteError;
pub use reasons::{reason_for, reasons_for};
pub use tips::tips_for;
pub use validation::{parse_rating_arg, validate_ratings};
