use {
    crate::dashboard::Dashboard,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    ratatui::{backend::CrosstermBackend, widgets::TableState, Terminal},
    std::{
        io::Stdout,
        time::{Duration, Instant},
    },
};

/// How long to wait for a key before redrawing
const TICK: Duration = Duration::from_millis(1000);

/// Presentation-only state kept between frames
#[derive(Debug, Default)]
pub struct UiState {
    pub table_state: TableState,
    pub cache_remaining: Option<Duration>,
}

impl UiState {
    pub fn scroll_down(&mut self) {
        let next = self.table_state.selected().map_or(0, |i| i.saturating_add(1));
        self.table_state.select(Some(next));
    }

    pub fn scroll_up(&mut self) {
        let next = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(next));
    }

    pub fn reset_scroll(&mut self) {
        self.table_state = TableState::default();
    }

    /// Keep the selection inside a table of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        match self.table_state.selected() {
            Some(_) if len == 0 => self.reset_scroll(),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

/// Run the TUI event loop
///
/// Every pass re-checks cache freshness, so stale data is refetched on the
/// next interaction (or tick) after the TTL; `r` forces it immediately.
pub async fn run_ui(dashboard: &mut Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs from scribbling over the frame
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, dashboard).await;

    // Cleanup - restore terminal state, even when the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    dashboard: &mut Dashboard,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ui = UiState::default();

    loop {
        if dashboard.inventory().is_none() {
            terminal.draw(|f| {
                let area = f.size();
                super::layout::render_loading(f, area);
            })?;
        }
        if dashboard.ensure_fresh(Instant::now()).await {
            ui.reset_scroll();
        }
        ui.cache_remaining = dashboard.cache_remaining(Instant::now());

        let view = dashboard.view(chrono::Local::now().naive_local());
        terminal.draw(|f| {
            let area = f.size();
            if let Err(e) = super::layout::render_layout(f, area, &view, &mut ui) {
                log::error!("Layout render error: {}", e);
            }
        })?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('r') => dashboard.invalidate(),
            KeyCode::Char('g') => {
                dashboard.cycle_genotype(&view.options);
                ui.reset_scroll();
            }
            KeyCode::Char('s') => {
                dashboard.cycle_status(&view.options);
                ui.reset_scroll();
            }
            KeyCode::Char('b') => {
                dashboard.cycle_bench(&view.options);
                ui.reset_scroll();
            }
            KeyCode::Char('c') => {
                dashboard.clear_filters();
                ui.reset_scroll();
            }
            KeyCode::Down | KeyCode::Char('j') => ui.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => ui.scroll_up(),
            _ => {}
        }
    }

    Ok(())
}
