use crate::output::{format_score, truncate_text};
use crate::planner::{score_deal, score_deal_detailed, MAX_RATING};
use crate::tui::app::{App, InputMode, View};
use crate::tui::theme::ThemeColors;
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let theme = app.theme.clone();

    // Layout: Title(1) + Tabs(1) + Filters(1) + Content(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Filter line
        Constraint::Fill(1),   // View content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app, &theme);
    render_tabs(frame, chunks[1], app, &theme);
    render_filters(frame, chunks[2], app, &theme);
    match app.current_view {
        View::ByDay | View::ByBar => render_specials_table(frame, chunks[3], app, &theme),
        View::Stats => render_stats(frame, chunks[3], app, &theme),
        View::Route => render_route_view(frame, chunks[3], app, &theme),
    }
    render_status_bar(frame, chunks[4], app, &theme);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &theme),
        InputMode::StopBreakdown => render_breakdown_popup(frame, app, &theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let title = "🍺 Bar Hop";
    let today = format!("Today is {} {}", app.today.emoji(), app.today);
    let padding_len = (area.width as usize).saturating_sub(title.chars().count() + today.chars().count() + 2);

    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(today, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(theme.tab_inactive_style)
        .highlight_style(theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let day = match app.day_filter {
        Some(day) => format!("{} {}", day.emoji(), day),
        None => "All Days".to_string(),
    };
    let bar = app.bar_filter.clone().unwrap_or_else(|| "All Bars".to_string());

    let line = Line::from(vec![
        Span::styled("Day: ", Style::default().fg(theme.muted)),
        Span::raw(day),
        Span::styled("  Bar: ", Style::default().fg(theme.muted)),
        Span::raw(bar),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_specials_table(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    let by_bar = app.current_view == View::ByBar;
    let specials = app.filtered_specials();

    if specials.is_empty() {
        let empty_msg = Paragraph::new("No specials match these filters").alignment(Alignment::Center);
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = specials
        .iter()
        .enumerate()
        .map(|(idx, special)| {
            let day = format!("{} {}", special.day.emoji(), special.day);
            let deal_score = score_deal(&special.deal);
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            let (first, second) = if by_bar {
                (special.bar.clone(), day)
            } else {
                (day, special.bar.clone())
            };

            Row::new(vec![
                Cell::from(first),
                Cell::from(second),
                Cell::from(special.deal.clone()),
                Cell::from(format_score(deal_score))
                    .style(Style::default().fg(theme.score_color(deal_score, 10.0))),
            ])
            .style(row_style)
        })
        .collect();

    let header = if by_bar {
        ["Bar", "Day", "Deal", "Value"]
    } else {
        ["Day", "Bar", "Deal", "Value"]
    };

    let widths = [
        Constraint::Length(16),
        Constraint::Length(24),
        Constraint::Fill(1),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme.header_style).bottom_margin(1))
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    let stats = app.table.summary();

    let columns = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(area);
    let left = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(columns[0]);

    let metric = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), Style::default().fg(theme.muted)),
            Span::styled(value, Style::default().bold()),
        ])
    };
    let metrics = Paragraph::new(vec![
        metric("Total Bars", stats.total_bars.to_string()),
        metric("Total Specials", stats.total_specials.to_string()),
        metric("Days Covered", format!("{}/7", stats.days_covered)),
        metric("Avg Specials per Bar", format!("{:.1}", stats.avg_specials_per_bar)),
    ])
    .block(Block::bordered().title(" Summary "));
    frame.render_widget(metrics, left[0]);

    let bars: Vec<Bar> = stats
        .per_day
        .iter()
        .map(|(day, count)| {
            let bar = Bar::default()
                .value(*count as u64)
                .label(Line::from(&day.name()[..3]));
            if *day == app.today {
                bar.style(Style::default().fg(theme.accent))
            } else {
                bar.style(Style::default().fg(theme.title_color))
            }
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::bordered().title(" Specials per Day "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .value_style(Style::default().fg(theme.muted).reversed());
    frame.render_widget(chart, left[1]);

    let rows: Vec<Row> = stats
        .per_bar
        .iter()
        .enumerate()
        .map(|(idx, (bar, count))| {
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(bar.clone()), Cell::from(count.to_string())]).style(row_style)
        })
        .collect();
    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(8)])
        .header(Row::new(["Bar", "Specials"]).style(theme.header_style))
        .block(Block::bordered().title(" Specials per Bar "))
        .row_highlight_style(theme.row_selected);
    frame.render_stateful_widget(table, columns[1], &mut app.table_state);
}

fn render_route_view(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
    render_ratings_table(frame, columns[0], app, theme);
    render_plan(frame, columns[1], app, theme);
}

fn render_ratings_table(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    let day = app.route_day();
    let block = Block::bordered().title(format!(" Rate {}'s bars ", day));
    let candidates = app.route_candidates();

    if candidates.is_empty() {
        let msg = Paragraph::new(format!("No specials on {}", day))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let rows: Vec<Row> = candidates
        .iter()
        .map(|special| {
            let rating = app.ratings.get(&special.bar).copied().unwrap_or(0);
            let mut rating_spans = vec![Span::styled(
                format!("{:>2} ", rating),
                Style::default().fg(theme.score_color(rating as f64, MAX_RATING as f64)),
            )];
            rating_spans.extend(rating_bar(rating, theme).spans);
            Row::new(vec![
                Cell::from(truncate_text(&special.bar, 22)),
                Cell::from(Line::from(rating_spans)),
                Cell::from(format_score(score_deal(&special.deal))),
            ])
        })
        .collect();

    let widths = [Constraint::Fill(1), Constraint::Length(14), Constraint::Length(6)];
    let table = Table::new(rows, widths)
        .header(
            Row::new(["Bar", "Rating", "Deal"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .block(block)
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_plan(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let request = &app.request;
    let budget = if request.budget_focus { ", budget focus" } else { "" };
    let title = format!(
        " {} stops, {}{} ",
        request.num_stops,
        request.style.label(),
        budget
    );
    let block = Block::bordered().title(title);

    let mut lines = Vec::new();
    match &app.plan {
        Err(e) => {
            lines.push(Line::from(Span::styled(
                format!("Can't plan a route: {}", e),
                Style::default().fg(theme.flash_error),
            )));
        }
        Ok(plan) if plan.route.is_empty() => {
            lines.push(Line::from(Span::styled(
                format!(
                    "Not enough bars with specials on {} for {} stops",
                    app.route_day(),
                    request.num_stops
                ),
                Style::default().fg(theme.muted),
            )));
        }
        Ok(plan) => {
            let max_score = plan.route.iter().map(|s| s.score).fold(0.0_f64, f64::max);
            for (idx, stop) in plan.route.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}. ", idx + 1), Style::default().fg(theme.index_color)),
                    Span::styled(stop.bar.clone(), Style::default().bold()),
                    Span::raw("  "),
                    Span::styled(
                        format_score(stop.score),
                        Style::default().fg(theme.score_color(stop.score, max_score)),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("   "),
                    Span::raw(stop.deal.clone()),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("   "),
                    Span::styled(stop.reason.clone(), Style::default().fg(theme.muted).italic()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Tips", theme.header_style)));
            for tip in &plan.tips {
                lines.push(Line::from(vec![
                    Span::styled("  - ", Style::default().fg(theme.accent)),
                    Span::raw(tip.clone()),
                ]));
            }
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} specials", app.table.len());

        let hints: Vec<(&str, &str)> = match app.current_view {
            View::Route => vec![
                ("j/k", ":bar "),
                ("+/-", ":rate "),
                ("n/N", ":stops "),
                ("s", ":style "),
                ("$", ":budget "),
                ("r", ":reroll "),
                ("Enter", ":why "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            _ => vec![
                ("j/k", ":nav "),
                ("Tab", ":view "),
                ("d/D", ":day "),
                ("f", ":bar "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(count, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn rating_bar(rating: u8, theme: &ThemeColors) -> Line<'static> {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    let color = theme.score_color(rating as f64, MAX_RATING as f64);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }
    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Why a bar scored the way it did, and where it sits in the route
fn render_breakdown_popup(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let Some(bar) = app.selected_route_bar() else {
        return;
    };
    let candidates = app.route_candidates();
    let Some(special) = candidates.iter().find(|s| s.bar == bar) else {
        return;
    };

    let detail = score_deal_detailed(&special.deal);
    let rating = app.ratings.get(&bar).copied().unwrap_or(0);

    let label = |text: &str| Span::styled(format!("{:<12}", text), Style::default().fg(theme.muted));
    let mut lines = vec![
        Line::from(vec![label("Deal"), Span::raw(special.deal.clone())]),
        Line::from(vec![label("Rating"), Span::raw(format!("{}/10", rating))]),
        Line::from(vec![label("Deal value"), Span::raw(format!("{}/10", format_score(detail.score)))]),
    ];
    if detail.cues.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no price or keyword cues",
            Style::default().fg(theme.muted),
        )));
    }
    for cue in &detail.cues {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("+{}", format_score(cue.delta)), Style::default().fg(theme.score_high)),
            Span::raw(format!(" {}", cue.label)),
        ]));
    }
    lines.push(Line::from(""));

    let stop = app.plan.as_ref().ok().and_then(|plan| {
        plan.route
            .iter()
            .enumerate()
            .find(|(_, stop)| stop.bar == bar)
    });
    match stop {
        Some((idx, stop)) => {
            lines.push(Line::from(vec![
                label("Stop"),
                Span::raw(format!("#{} scoring {}", idx + 1, format_score(stop.score))),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(stop.reason.clone(), Style::default().italic()),
            ]));
            for highlight in &stop.highlights {
                lines.push(Line::from(vec![
                    Span::styled("  + ", Style::default().fg(theme.accent)),
                    Span::raw(highlight.clone()),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Not on tonight's route",
            Style::default().fg(theme.muted),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc/Enter to close, j/k for other bars",
        Style::default().fg(theme.muted),
    )));

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(60, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", bar), theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup_area,
    );
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let entries = [
        ("j / Down", "Move down"),
        ("k / Up", "Move up"),
        ("Tab", "Next view"),
        ("d / D", "Next / previous day (or all days)"),
        ("f / F", "Cycle bar filter / clear it"),
        ("+ / -", "Rate selected bar (Route view)"),
        ("n / N", "More / fewer stops"),
        ("s", "Cycle route style"),
        ("$", "Toggle budget focus"),
        ("r", "Reroll the wildcard bonuses"),
        ("Enter / b", "Explain selected bar"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", keys), Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    let popup_area = centered_rect_fixed(56, help_lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(Paragraph::new(help_lines).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::specials::{Day, Special, SpecialsTable};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn sample_app() -> App {
        let table = SpecialsTable::new(vec![
            Special::new("Alpha", Day::Friday, "$1 wells"),
            Special::new("Beta", Day::Friday, "Trivia night"),
        ]);
        App::new(table, &Config::default(), Day::Friday, Some(3), ThemeColors::dark())
    }

    #[test]
    fn test_draw_every_view() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for _ in 0..View::ALL.len() {
            terminal.draw(|frame| draw(frame, &mut app)).unwrap();
            app.next_view();
        }
    }

    #[test]
    fn test_route_view_shows_shortfall() {
        let mut app = sample_app();
        app.current_view = View::Route;
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Not enough bars"));
    }

    #[test]
    fn test_rating_bar_width() {
        let theme = ThemeColors::dark();
        let line = rating_bar(7, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.chars().count(), 10);
        assert_eq!(text.chars().filter(|c| *c == '█').count(), 7);
    }

    #[test]
    fn test_tiny_terminal() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }
}
