use super::engine::{Route, Style};

pub const SAFETY_TIP: &str = "Use a ride-share or pick a designated driver - never drink and drive";
pub const HYDRATION_TIP: &str = "Stay hydrated - alternate every drink with a glass of water";

pub const OPTIMIZED_TIP: &str = "This route balances your favorite bars with the best deals";
pub const HIGH_RATED_TIP: &str = "You're only hitting your favorite spots tonight";
pub const ADVENTURE_TIP: &str = "Expect a few surprises - this route mixes favorites with wildcards";

pub const BUDGET_TIPS: [&str; 2] = [
    "Arrive early - most happy hour prices end before the late crowd shows up",
    "Set a spending limit before you head out and bring cash",
];

pub const PACING_TIP: &str = "Pace yourself - four or more stops makes for a long night";
pub const HAPPY_HOUR_TIP: &str = "Check happy hour times before you go - they often end early in the evening";
pub const DRAFT_TIP: &str = "Ask about rotating drafts and local brews on tap";

/// Routes at least this long get the pacing tip
const PACING_STOP_COUNT: usize = 4;

/// Advisory tips for a finished route, in display order.
///
/// Always starts with the safety and hydration tips, so the list is never
/// empty. Each condition contributes at most once.
pub fn tips_for(route: &Route, style: Style, budget_focus: bool) -> Vec<String> {
    let mut tips = vec![SAFETY_TIP.to_string(), HYDRATION_TIP.to_string()];

    let style_tip = match style {
        Style::Optimized => OPTIMIZED_TIP,
        Style::HighRatedOnly => HIGH_RATED_TIP,
        Style::AdventureMix => ADVENTURE_TIP,
    };
    tips.push(style_tip.to_string());

    if budget_focus {
        tips.extend(BUDGET_TIPS.iter().map(|t| t.to_string()));
    }

    if route.len() >= PACING_STOP_COUNT {
        tips.push(PACING_TIP.to_string());
    }

    let all_deals = route
        .iter()
        .map(|stop| stop.deal.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if all_deals.contains("happy hour") {
        tips.push(HAPPY_HOUR_TIP.to_string());
    }
    if all_deals.contains("draft") {
        tips.push(DRAFT_TIP.to_string());
    }

    tips
}
