use anyhow::Result;
use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use tui_big_text::{BigText, PixelSize};

use crate::{
    app::App,
    model::{hex_digits, LiveMatch, MatchResult, OddsChange, OddsEntry, Player, Side, Theme},
};

// Quadrant pixels draw each glyph 4 columns wide.
const BIG_GLYPH_WIDTH: u16 = 4;
const DIM: Color = Color::DarkGray;
const LIVE_RED: Color = Color::Red;

#[derive(Debug, Clone, Copy)]
struct Palette {
    primary: Color,
    accent: Color,
    background: Color,
}

impl Palette {
    fn new(theme: &Theme) -> Self {
        Self {
            primary: parse_color(&theme.primary),
            accent: parse_color(&theme.accent),
            background: parse_color(&theme.background),
        }
    }
}

fn parse_color(color: &str) -> Color {
    if let Some(hex) = hex_digits(color) {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = Palette::new(&app.fixtures.tournament.theme);
    let size = f.area();
    f.render_widget(Block::default().bg(palette.background), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Nav
            Constraint::Length(8),  // Hero
            Constraint::Min(17),    // Countdown + Live | Results
            Constraint::Length(9),  // Odds | Stats
            Constraint::Length(2),  // Footer
        ])
        .split(size);

    draw_nav(f, app, chunks[0], palette);
    draw_hero(f, app, chunks[1], palette);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(8)])
        .split(middle[0]);

    draw_countdown(f, app, left[0], palette);
    draw_live(f, app, left[1], palette);
    draw_results(f, app, middle[1], palette);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);

    draw_odds(f, app, bottom[0], palette);
    draw_stats(f, app, bottom[1], palette);
    draw_footer(f, app, chunks[4], palette);
}

/// Draws one frame off-screen and returns it as plain text, one line per row.
pub fn render_snapshot(app: &mut App, width: u16, height: u16) -> Result<String> {
    render_to_string(width, height, |f| ui(f, app))
}

fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(draw)?;
    Ok(buffer_to_string(terminal.backend().buffer()))
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn flag_prefix(flag: &str, show_flags: bool) -> String {
    if show_flags {
        format!("{} ", flag)
    } else {
        String::new()
    }
}

fn seed_suffix(player: &Player) -> String {
    player.seed.map(|s| format!(" ({})", s)).unwrap_or_default()
}

fn name_with_seed(player: &Player) -> String {
    format!("{}{}", player.name, seed_suffix(player))
}

fn draw_nav(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let tournament = &app.fixtures.tournament;

    let brand = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(palette.primary)),
        Span::styled(tournament.brand.as_str(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(Paragraph::new(brand), area);

    let links = format!("{}  ", tournament.nav_links.join("   "));
    let links_p = Paragraph::new(links)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Right);
    f.render_widget(links_p, area);
}

fn draw_hero(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let tournament = &app.fixtures.tournament;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Banner
            Constraint::Length(4), // Headline
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Tagline
        ])
        .split(area);

    let banner = Paragraph::new(format!(" {} ", tournament.banner))
        .style(Style::default().fg(palette.primary).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(banner, chunks[1]);

    // Every headline word but the last is white; the last one takes the theme colours.
    let last = tournament.headline.len().saturating_sub(1);
    let words: Vec<Span> = tournament
        .headline
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let style = if i == last {
                Style::default().fg(palette.primary)
            } else {
                Style::default().fg(Color::White)
            };
            let text = if i == last { word.clone() } else { format!("{} ", word) };
            Span::styled(text, style)
        })
        .collect();

    let headline_len = tournament.headline.join(" ").chars().count();
    if (chunks[2].width as usize) < headline_len.saturating_mul(BIG_GLYPH_WIDTH as usize) {
        let headline_p = Paragraph::new(vec![Line::from(""), Line::from(words)])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(headline_p, chunks[2]);
    } else {
        let headline = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .lines(vec![Line::from(words)])
            .alignment(Alignment::Center)
            .build();
        f.render_widget(headline, chunks[2]);
    }

    let tagline = Paragraph::new(tournament.tagline.as_str())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(tagline, chunks[4]);
}

fn draw_countdown(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let tournament = &app.fixtures.tournament;
    let block = Block::default()
        .title(Line::from(format!(" {} ", tournament.final_heading)).centered())
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(4), // Digits
            Constraint::Length(1), // Labels
        ])
        .split(inner_area);

    let subtitle = Paragraph::new(tournament.final_subtitle.as_str())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[0]);

    let digits = app.remaining.digits();
    let cell_width = 2 * BIG_GLYPH_WIDTH + 2;

    if chunks[2].width < 3 * cell_width {
        let plain = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                app.remaining.to_string(),
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(plain, chunks[2]);
        let labels = Paragraph::new("HRS MIN SEC")
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center);
        f.render_widget(labels, chunks[3]);
        return;
    }

    let columns = [
        Constraint::Min(0),
        Constraint::Length(cell_width),
        Constraint::Length(cell_width),
        Constraint::Length(cell_width),
        Constraint::Min(0),
    ];
    let digit_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(chunks[2]);
    let label_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(chunks[3]);

    for (i, (value, label)) in digits.iter().zip(["HRS", "MIN", "SEC"]).enumerate() {
        let big = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(palette.primary))
            .lines(vec![value.clone().into()])
            .alignment(Alignment::Center)
            .build();
        f.render_widget(big, digit_cells[i + 1]);

        let label_p = Paragraph::new(label)
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center);
        f.render_widget(label_p, label_cells[i + 1]);
    }
}

fn live_row(live: &LiveMatch, side: Side, name_width: usize, show_flags: bool, palette: Palette) -> Line<'static> {
    let player = live.player(side);
    let serving = live.serving() == side;

    let marker = if serving {
        Span::styled(" ● ", Style::default().fg(palette.primary))
    } else {
        Span::raw("   ")
    };
    let name_style = if serving {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        marker,
        Span::raw(flag_prefix(&player.flag, show_flags)),
        Span::styled(format!("{:<width$}", name_with_seed(player), width = name_width), name_style),
    ];

    let last_set = live.sets.len().saturating_sub(1);
    for (i, set) in live.sets.iter().enumerate() {
        let style = if i == last_set {
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{:>3}", set.games(side)), style));
    }

    spans.push(Span::styled("  │", Style::default().fg(DIM)));
    spans.push(Span::styled(
        format!("{:>4}", live.current_game().points(side).value()),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));

    Line::from(spans)
}

fn draw_live(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let live = &app.fixtures.live;

    let block = Block::default()
        .title(Span::styled(" ● LIVE ", Style::default().fg(LIVE_RED).add_modifier(Modifier::BOLD)))
        .title(Line::from(format!(" {} ", live.status)).right_aligned().fg(Color::Gray))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary));

    let name_width = Side::BOTH
        .iter()
        .map(|side| name_with_seed(live.player(*side)).chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let lines = vec![
        Line::from(""),
        live_row(live, Side::Player1, name_width, app.show_flags, palette),
        Line::from(""),
        live_row(live, Side::Player2, name_width, app.show_flags, palette),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} · {}", live.court, live.round),
            Style::default().fg(DIM),
        )),
    ];

    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

fn result_item(result: &MatchResult, show_flags: bool, palette: Palette) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::styled(result.round.clone(), Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", result.court), Style::default().fg(DIM)),
    ])];

    for side in Side::BOTH {
        let player = result.player(side);
        let won = result.winner == side;
        let name_style = if won {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };

        let mut spans = vec![
            Span::raw(format!("  {}", flag_prefix(&player.flag, show_flags))),
            Span::styled(player.name.clone(), name_style),
            Span::styled(seed_suffix(player), Style::default().fg(DIM)),
        ];
        if won {
            spans.push(Span::styled(" ✓", Style::default().fg(palette.primary)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("  {}", result.score),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect, palette: Palette) {
    let items: Vec<ListItem> = app
        .fixtures
        .results
        .iter()
        .map(|result| result_item(result, app.show_flags, palette))
        .collect();

    let results_list = List::new(items)
        .block(
            Block::default()
                .title(" RECENT RESULTS ")
                .title(Line::from(" j/k ").right_aligned().fg(DIM))
                .borders(Borders::ALL),
        )
        .highlight_symbol("▌")
        .highlight_style(Style::default().bg(Color::Rgb(26, 58, 92)));

    f.render_stateful_widget(results_list, area, &mut app.results_state);
}

fn odds_line(rank: usize, entry: &OddsEntry, name_width: usize, show_flags: bool, palette: Palette) -> Line<'static> {
    let change_color = match entry.change {
        OddsChange::Up => Color::Green,
        OddsChange::Down => Color::Red,
        OddsChange::Same => DIM,
    };

    Line::from(vec![
        Span::styled(format!(" #{:<3}", rank), Style::default().fg(DIM)),
        Span::raw(flag_prefix(&entry.flag, show_flags)),
        Span::styled(
            format!("{:<width$}", entry.name, width = name_width),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{:<8}", entry.country), Style::default().fg(DIM)),
        Span::styled(format!("{} ", entry.change.arrow()), Style::default().fg(change_color)),
        Span::styled(
            format!("{:.2}", entry.odds),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to win", Style::default().fg(DIM)),
    ])
}

fn draw_odds(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let tournament = &app.fixtures.tournament;
    let odds = &app.fixtures.odds;

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" ★ ", Style::default().fg(palette.accent)),
            Span::styled("CHAMPIONSHIP ODDS ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]))
        .borders(Borders::ALL);

    let name_width = odds.iter().map(|o| o.name.chars().count()).max().unwrap_or(0) + 2;

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", tournament.odds_subtitle),
        Style::default().fg(Color::Gray),
    ))];
    lines.extend(
        odds.iter()
            .enumerate()
            .map(|(i, entry)| odds_line(i + 1, entry, name_width, app.show_flags, palette)),
    );
    lines.push(Line::from(Span::styled(
        format!(" {}", tournament.odds_disclaimer),
        Style::default().fg(DIM),
    )));

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let block = Block::default().title(" TOURNAMENT ").borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let stats = &app.fixtures.tournament.stats;
    if stats.is_empty() {
        return;
    }

    let per_row = stats.len().div_ceil(2).max(1);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(inner_area);

    for (row_idx, row_stats) in stats.chunks(per_row).enumerate().take(2) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(rows[row_idx]);

        for (cell, stat) in cells.iter().zip(row_stats) {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    stat.value.as_str(),
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(stat.label.as_str(), Style::default().fg(Color::Gray))),
            ])
            .alignment(Alignment::Center);
            f.render_widget(p, *cell);
        }
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let tournament = &app.fixtures.tournament;

    let lines = vec![
        Line::from(vec![
            Span::styled(" ● ", Style::default().fg(palette.primary)),
            Span::styled(tournament.footer_brand.as_str(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(format!("    {}", tournament.footer_links.join("  ")), Style::default().fg(DIM)),
        ]),
        Line::from(Span::styled(
            " q quit · j/k results · f flags",
            Style::default().fg(DIM),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
