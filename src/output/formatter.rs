use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::planner::{Route, RouteRequest};
use crate::specials::{Day, PivotRow, Special, SummaryStats};

/// Width of the text bars in the summary counts
const COUNT_BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit deal text into whatever is left of the terminal line after `used` columns
fn fit_deal(deal: &str, used: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > used + 10 => truncate_text(deal, width - used),
        Some(_) => truncate_text(deal, 20),
        None => deal.to_string(),
    }
}

/// Format a route score with at most two decimals ("13", "5.75", "8.5")
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.2}", score);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn day_header(day: Day, use_colors: bool) -> String {
    let text = format!("{} {} Specials", day.emoji(), day);
    if use_colors {
        text.bold().blue().to_string()
    } else {
        text
    }
}

/// Specials grouped under one header per day, Monday first.
/// `specials` is expected to be sorted by day then bar.
pub fn format_day_listing(specials: &[&Special], use_colors: bool) -> String {
    if specials.is_empty() {
        return "No specials found.".to_string();
    }

    let bar_width = specials.iter().map(|s| s.bar.chars().count()).max().unwrap_or(0);
    let mut sections = Vec::new();

    for day in Day::ALL {
        let day_specials: Vec<&&Special> = specials.iter().filter(|s| s.day == day).collect();
        if day_specials.is_empty() {
            continue;
        }

        let mut lines = vec![day_header(day, use_colors)];
        for special in day_specials {
            let bar = format!("{:<width$}", special.bar, width = bar_width);
            let deal = fit_deal(&special.deal, bar_width + 6);
            if use_colors {
                lines.push(format!("  {}  {}", bar.bold(), deal));
            } else {
                lines.push(format!("  {}  {}", bar, deal));
            }
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

/// Specials grouped under one header per bar, alphabetical, days in week order
pub fn format_bar_listing(specials: &[&Special], use_colors: bool) -> String {
    if specials.is_empty() {
        return "No specials found.".to_string();
    }

    let mut bars: Vec<&str> = specials.iter().map(|s| s.bar.as_str()).collect();
    bars.sort();
    bars.dedup();

    bars.iter()
        .map(|bar| {
            let header = format!("🏪 {}", bar);
            let mut lines = vec![if use_colors {
                header.bold().blue().to_string()
            } else {
                header
            }];

            let mut bar_specials: Vec<&&Special> =
                specials.iter().filter(|s| s.bar == *bar).collect();
            bar_specials.sort_by_key(|s| s.day);

            for special in bar_specials {
                let day = format!("{:<9}", special.day.name());
                let deal = fit_deal(&special.deal, 13);
                if use_colors {
                    lines.push(format!("  {}  {}", day.bold(), deal));
                } else {
                    lines.push(format!("  {}  {}", day, deal));
                }
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn count_bar(count: usize, max: usize) -> String {
    let filled = if max > 0 {
        ((count as f64 / max as f64) * COUNT_BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "█".repeat(filled)
}

/// Key metrics followed by per-day and per-bar counts with text bars
pub fn format_summary(stats: &SummaryStats, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let metrics = [
        ("Total Bars", stats.total_bars.to_string()),
        ("Total Specials", stats.total_specials.to_string()),
        ("Days Covered", stats.days_covered.to_string()),
        ("Avg Specials/Bar", format!("{:.1}", stats.avg_specials_per_bar)),
    ];
    for (label, value) in metrics {
        if use_colors {
            lines.push(format!("{:<17} {}", label, value.bold()));
        } else {
            lines.push(format!("{:<17} {}", label, value));
        }
    }

    lines.push(String::new());
    lines.push("Specials by Day".to_string());
    let max_day = stats.per_day.iter().map(|(_, c)| *c).max().unwrap_or(0);
    for (day, count) in &stats.per_day {
        let bar = count_bar(*count, max_day);
        if use_colors {
            lines.push(format!("  {:<9} {:>3} {}", day.name(), count, bar.green()));
        } else {
            lines.push(format!("  {:<9} {:>3} {}", day.name(), count, bar));
        }
    }

    lines.push(String::new());
    lines.push("Specials by Bar".to_string());
    let name_width = stats
        .per_bar
        .iter()
        .map(|(bar, _)| bar.chars().count())
        .max()
        .unwrap_or(0);
    let max_bar = stats.per_bar.iter().map(|(_, c)| *c).max().unwrap_or(0);
    for (bar, count) in &stats.per_bar {
        let text_bar = count_bar(*count, max_bar);
        if use_colors {
            lines.push(format!(
                "  {:<width$} {:>3} {}",
                bar,
                count,
                text_bar.magenta(),
                width = name_width
            ));
        } else {
            lines.push(format!(
                "  {:<width$} {:>3} {}",
                bar,
                count,
                text_bar,
                width = name_width
            ));
        }
    }

    lines.join("\n")
}

/// Bar x day grid marking which days each bar runs a special
pub fn format_pivot(rows: &[PivotRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let name_width = rows
        .iter()
        .map(|r| r.bar.chars().count())
        .max()
        .unwrap_or(0)
        .max(3);

    let header_days: Vec<String> = Day::ALL.iter().map(|d| d.name()[..3].to_string()).collect();
    let header = format!("{:<width$}  {}", "Bar", header_days.join("  "), width = name_width);

    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for row in rows {
        let marks: Vec<String> = row
            .deals
            .iter()
            .map(|deal| {
                let mark = if deal.is_some() { " ● " } else { " · " };
                if use_colors && deal.is_some() {
                    mark.green().to_string()
                } else {
                    mark.to_string()
                }
            })
            .collect();
        lines.push(format!(
            "{:<width$}  {}",
            row.bar,
            marks.join("  "),
            width = name_width
        ));
    }

    lines.join("\n")
}

/// One-line description of a route request
pub fn format_route_header(day: Day, request: &RouteRequest) -> String {
    let budget = if request.budget_focus { ", budget focus" } else { "" };
    format!(
        "{} {} route: {} stops, {}{}",
        day.emoji(),
        day,
        request.num_stops,
        request.style.label(),
        budget
    )
}

/// Numbered route stops. Each stop shows score, bar and deal, with the
/// reason on the next line. `detailed` adds ratings, deal scores and
/// secondary reasons.
pub fn format_route(route: &Route, use_colors: bool, detailed: bool) -> String {
    if route.is_empty() {
        return "No route.".to_string();
    }

    let bar_width = route.iter().map(|s| s.bar.chars().count()).max().unwrap_or(0);
    let score_width = 6;

    route
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", format_score(stop.score), width = score_width);
            let bar = format!("{:<width$}", stop.bar, width = bar_width);
            let deal = fit_deal(&stop.deal, 3 + 1 + score_width + 2 + bar_width + 2);

            let mut lines = if use_colors {
                vec![
                    format!("{} {}  {}  {}", index_str.dimmed(), score_str.bold(), bar.bold(), deal),
                    format!("    {}", stop.reason.italic()),
                ]
            } else {
                vec![
                    format!("{} {}  {}  {}", index_str, score_str, bar, deal),
                    format!("    {}", stop.reason),
                ]
            };

            if detailed {
                lines.push(format!(
                    "    rating {}/10, deal score {:.1}",
                    stop.rating, stop.deal_score
                ));
                for highlight in &stop.highlights {
                    lines.push(format!("    + {}", highlight));
                }
            }

            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bulleted tips list under a heading
pub fn format_tips(tips: &[String], use_colors: bool) -> String {
    let heading = if use_colors {
        "Tips".bold().to_string()
    } else {
        "Tips".to_string()
    };

    let mut lines = vec![heading];
    lines.extend(tips.iter().map(|tip| format!("  - {}", tip)));
    lines.join("\n")
}

/// Format a route as tab-separated values for scripting
/// Columns: position, score, bar, deal, reason (no headers, no colors)
pub fn format_route_tsv(route: &Route) -> String {
    route
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                idx + 1,
                format_score(stop.score),
                stop.bar,
                stop.deal,
                stop.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
