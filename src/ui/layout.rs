use {
    super::{
        renderer::{format_remaining, format_source, notice_style, status_fg, truncate},
        terminal::UiState,
    },
    crate::{dashboard::DashboardView, inventory::metrics::TABLE_COLUMNS},
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Sparkline, Table, Wrap},
        Frame,
    },
};

const NO_DATA: &str = "No data available. Please check your data source.";
const NO_MATCH: &str = "No data matches the selected filters. Please adjust your filter criteria.";

/// Render the main UI layout
pub fn render_layout(
    f: &mut Frame,
    area: Rect,
    view: &DashboardView,
    ui: &mut UiState,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Length(3),  // Filters
            Constraint::Length(3),  // Metrics
            Constraint::Min(10),    // Charts
            Constraint::Min(8),     // Table
            Constraint::Length(3),  // Footer/Status
        ])
        .split(area);

    render_header(f, chunks[0], view);
    render_filters(f, chunks[1], view);
    render_metrics(f, chunks[2], view);

    if !view.has_data() {
        render_message(f, chunks[3].union(chunks[4]), NO_DATA, Color::Red);
    } else {
        if view.nothing_matches() {
            render_message(f, chunks[3], NO_MATCH, Color::Yellow);
        } else {
            render_charts(f, chunks[3], view);
        }
        render_table(f, chunks[4], view, ui)?;
    }

    render_footer(f, chunks[5], view, ui);
    Ok(())
}

/// Placeholder frame shown while the first fetch is in flight
pub fn render_loading(f: &mut Frame, area: Rect) {
    render_message(f, area, "Loading plant inventory…", Color::Cyan);
}

fn render_header(f: &mut Frame, area: Rect, view: &DashboardView) {
    let header = Block::default()
        .borders(Borders::ALL)
        .title("LSG Project Plant Inventory Dashboard");

    let text = vec![
        Line::from(vec![
            Span::styled("📊 Data Source: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(format_source(view.source)),
        ]),
        Line::from(vec![Span::raw(
            "g/s/b: cycle genotype/status/bench | c: clear filters | r: refresh | ↑/↓: scroll | q/Esc: quit",
        )]),
    ];

    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_filters(f: &mut Frame, area: Rect, view: &DashboardView) {
    let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text = Line::from(vec![
        Span::styled("Genotype: ", label),
        Span::raw(view.filters.genotype.to_string()),
        Span::raw(" | "),
        Span::styled("Status: ", label),
        Span::raw(view.filters.status.to_string()),
        Span::raw(" | "),
        Span::styled("Bench: ", label),
        Span::raw(view.filters.bench.to_string()),
        Span::raw(format!("   ({} of {} plants)", view.metrics.total_plants, view.total_loaded)),
    ]);

    let block = Block::default().borders(Borders::ALL).title("🔍 Filters");
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_metrics(f: &mut Frame, area: Rect, view: &DashboardView) {
    let cells = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let metrics = [
        ("Total LSG Plants", view.metrics.total_plants),
        ("Unique Genotypes", view.metrics.unique_genotypes),
        ("Active Plants", view.metrics.active_plants),
        ("Killed Plants", view.metrics.killed_plants),
    ];

    for (cell, (title, value)) in cells.iter().zip(metrics) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, *cell);
    }
}

fn render_charts(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);
    let top = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[0]);
    let bottom = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[1]);

    render_genotype_chart(f, top[0], view);
    render_status_chart(f, top[1], view);
    render_bench_chart(f, bottom[0], view);
    render_timeline(f, bottom[1], view);
}

fn render_genotype_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let bars: Vec<Bar> = view
        .genotypes
        .iter()
        .map(|g| {
            Bar::default()
                .value(g.count as u64)
                .label(Line::from(truncate(&g.name, 18)))
                .text_value(g.count.to_string())
                .style(Style::default().fg(Color::Magenta))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("📊 Top 15 Genotypes by Plant Count"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn render_status_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let total = view.metrics.total_plants.max(1) as f64;
    let bars: Vec<Bar> = view
        .statuses
        .iter()
        .map(|s| {
            let share = s.count as f64 * 100.0 / total;
            Bar::default()
                .value(s.count as u64)
                .label(Line::from(s.status.to_string()))
                .text_value(format!("{} ({:.0}%)", s.count, share))
                .style(Style::default().fg(status_fg(s.status)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("🎯 Plant Status Overview"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn render_bench_chart(f: &mut Frame, area: Rect, view: &DashboardView) {
    let bars: Vec<Bar> = view
        .benches
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.count as u64)
                .label(Line::from(truncate(&b.bench, 6)))
                .style(Style::default().fg(Color::LightRed))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("🏢 Plants by Bench Location"))
        .bar_width(6)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn render_timeline(f: &mut Frame, area: Rect, view: &DashboardView) {
    let data: Vec<u64> = view.timeline.iter().map(|m| m.count as u64).collect();
    let title = match (view.timeline.first(), view.timeline.last()) {
        (Some(first), Some(last)) => format!("📅 Plants by Planting Month ({} → {})", first.month, last.month),
        _ => "📅 Plants by Planting Month".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, area);
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    view: &DashboardView,
    ui: &mut UiState,
) -> Result<(), Box<dyn std::error::Error>> {
    let header = Row::new(TABLE_COLUMNS.to_vec())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| Row::new(row.cells().to_vec()).style(Style::default().fg(status_fg(row.status))))
        .collect();

    let widths = [
        Constraint::Length(8),  // Plant #
        Constraint::Length(24), // Genotype
        Constraint::Length(8),  // Bench
        Constraint::Length(12), // Plant Date
        Constraint::Length(9),  // Status
        Constraint::Length(9),  // Days Old
        Constraint::Length(14), // Parent Plant
        Constraint::Min(10),    // Notes
    ];

    ui.clamp_selection(view.rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("📋 Filtered Plant Inventory Data"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, area, &mut ui.table_state);
    Ok(())
}

fn render_message(f: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, view: &DashboardView, ui: &UiState) {
    let mut spans = vec![
        Span::styled("Cache: ", Style::default().fg(Color::Cyan)),
        Span::raw(format_remaining(ui.cache_remaining)),
    ];
    if let Some(loaded_at) = view.loaded_at {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Loaded: ", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(loaded_at.format("%H:%M:%S").to_string()));
    }
    if view.metrics.attention_plants > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Needs attention: {}", view.metrics.attention_plants),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(notice) = view.notices.last() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice.message.clone(), notice_style(notice.level)));
    }

    let footer = Block::default().borders(Borders::ALL).title("Status");
    f.render_widget(Paragraph::new(Line::from(spans)).block(footer), area);
}
