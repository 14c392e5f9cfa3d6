use crate::config::Config;
use crate::planner::{plan_night, Plan, Ratings, RouteError, RouteRequest, MAX_RATING, MIN_RATING};
use crate::specials::{Day, Special, SpecialsTable};
use crate::tui::theme::ThemeColors;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Starting rating for unrated bars when the config has none, like a slider at its midpoint
const SLIDER_START: u8 = 5;

/// Longest route the dashboard lets you ask for
const MAX_STOPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    ByDay,
    ByBar,
    Stats,
    Route,
}

impl View {
    pub const ALL: [View; 4] = [View::ByDay, View::ByBar, View::Stats, View::Route];

    pub fn title(&self) -> &'static str {
        match self {
            View::ByDay => "By Day",
            View::ByBar => "By Bar",
            View::Stats => "Summary Stats",
            View::Route => "Route Planner",
        }
    }

    pub fn index(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    StopBreakdown,
}

pub struct App {
    pub table: SpecialsTable,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub today: Day,
    /// None shows every day
    pub day_filter: Option<Day>,
    /// None shows every bar
    pub bar_filter: Option<String>,
    pub ratings: Ratings,
    pub request: RouteRequest,
    pub plan: Result<Plan, RouteError>,
    pub rng: StdRng,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(
        table: SpecialsTable,
        config: &Config,
        today: Day,
        seed: Option<u64>,
        theme: ThemeColors,
    ) -> Self {
        let start_rating = config.default_rating.unwrap_or(SLIDER_START);
        let ratings: Ratings = table
            .bars()
            .into_iter()
            .map(|bar| (bar, start_rating))
            .collect();

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut app = Self {
            table,
            table_state: ratatui::widgets::TableState::default(),
            current_view: View::ByDay,
            input_mode: InputMode::Normal,
            today,
            day_filter: Some(today),
            bar_filter: None,
            ratings,
            request: RouteRequest {
                num_stops: config.route.stops.max(1),
                style: config.route.style,
                budget_focus: config.route.budget_focus,
            },
            plan: Ok(Plan {
                route: Default::default(),
                tips: Vec::new(),
            }),
            rng,
            flash_message: None,
            should_quit: false,
            theme,
        };
        app.replan();
        app.reset_selection();
        app
    }

    /// Day the route planner works on: the day filter, or today when showing all days
    pub fn route_day(&self) -> Day {
        self.day_filter.unwrap_or(self.today)
    }

    /// Specials shown in the By Day and By Bar views
    pub fn filtered_specials(&self) -> Vec<&Special> {
        let mut specials = self.table.filter(self.day_filter, self.bar_filter.as_deref());
        if self.current_view == View::ByBar {
            specials.sort_by(|a, b| a.bar.cmp(&b.bar).then_with(|| a.day.cmp(&b.day)));
        }
        specials
    }

    /// One special per distinct bar on the route day, first one wins
    pub fn route_candidates(&self) -> Vec<&Special> {
        let mut seen = std::collections::HashSet::new();
        self.table
            .specials()
            .iter()
            .filter(|s| s.day == self.route_day())
            .filter(|s| seen.insert(s.bar.as_str()))
            .collect()
    }

    /// Rows in the current view's selectable table
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::ByDay | View::ByBar => self.filtered_specials().len(),
            View::Stats => self.table.summary().per_bar.len(),
            View::Route => self.route_candidates().len(),
        }
    }

    pub fn next_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn reset_selection(&mut self) {
        if self.row_count() == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    /// Bar name of the selected row in the Route view
    pub fn selected_route_bar(&self) -> Option<String> {
        if self.current_view != View::Route {
            return None;
        }
        let candidates = self.route_candidates();
        self.table_state
            .selected()
            .and_then(|i| candidates.get(i).map(|s| s.bar.clone()))
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Cycle through the tabs
    pub fn next_view(&mut self) {
        let idx = (self.current_view.index() + 1) % View::ALL.len();
        self.current_view = View::ALL[idx];
        self.reset_selection();
    }

    /// Cycle the day filter: All Days, Monday .. Sunday
    pub fn next_day(&mut self) {
        self.day_filter = match self.day_filter {
            None => Some(Day::Monday),
            Some(Day::Sunday) => None,
            Some(day) => Some(day.next()),
        };
        self.after_day_change();
    }

    pub fn previous_day(&mut self) {
        self.day_filter = match self.day_filter {
            None => Some(Day::Sunday),
            Some(Day::Monday) => None,
            Some(day) => Some(day.previous()),
        };
        self.after_day_change();
    }

    fn after_day_change(&mut self) {
        self.replan();
        self.reset_selection();
    }

    /// Cycle the bar filter: All Bars, then each bar alphabetically
    pub fn next_bar_filter(&mut self) {
        let bars = self.table.bars();
        self.bar_filter = match &self.bar_filter {
            None => bars.first().cloned(),
            Some(current) => bars
                .iter()
                .position(|b| b == current)
                .and_then(|i| bars.get(i + 1).cloned()),
        };
        self.reset_selection();
    }

    pub fn clear_bar_filter(&mut self) {
        self.bar_filter = None;
        self.reset_selection();
    }

    /// Nudge the selected bar's rating, staying within 1-10
    pub fn adjust_selected_rating(&mut self, delta: i8) {
        let Some(bar) = self.selected_route_bar() else {
            return;
        };
        let current = self.ratings.get(&bar).copied().unwrap_or(SLIDER_START);
        let updated = (current as i16 + delta as i16).clamp(MIN_RATING as i16, MAX_RATING as i16) as u8;
        if updated != current {
            self.ratings.insert(bar, updated);
            self.replan();
        }
    }

    pub fn cycle_style(&mut self) {
        self.request.style = self.request.style.next();
        self.replan();
        self.show_flash(format!("Style: {}", self.request.style.label()));
    }

    pub fn change_stops(&mut self, delta: i64) {
        let updated = (self.request.num_stops as i64 + delta).clamp(1, MAX_STOPS as i64) as usize;
        if updated != self.request.num_stops {
            self.request.num_stops = updated;
            self.replan();
        }
    }

    pub fn toggle_budget_focus(&mut self) {
        self.request.budget_focus = !self.request.budget_focus;
        self.replan();
        let state = if self.request.budget_focus { "on" } else { "off" };
        self.show_flash(format!("Budget focus {}", state));
    }

    /// Draw fresh random bonuses (only changes Adventure Mix routes)
    pub fn reroll(&mut self) {
        self.replan();
        self.show_flash("Rerolled route".to_string());
    }

    /// Rebuild the route for the current day and settings
    pub fn replan(&mut self) {
        let specials = self.table.for_day(self.route_day());
        self.plan = plan_night(&specials, &self.ratings, &self.request, &mut self.rng);
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_popup(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show the breakdown of the selected bar (Route view only)
    pub fn show_stop_breakdown(&mut self) {
        if self.selected_route_bar().is_some() {
            self.input_mode = InputMode::StopBreakdown;
        }
    }
}
