// Renderer module - formatting utilities
// Most rendering logic is in layout.rs; small display helpers live here

use {
    crate::{
        inventory::{metrics::status_color, PlantStatus},
        source::{DataSource, NoticeLevel},
    },
    ratatui::style::{Color, Modifier, Style},
    std::time::Duration,
};

/// Data source line shown under the title
pub fn format_source(source: DataSource) -> String {
    match source {
        DataSource::ModernConnection => format!("🌐 {} - Recommended", source),
        DataSource::DirectClient => format!("🔧 {} - Fallback", source),
        DataSource::LocalSnapshot => format!("📁 {}", source),
        DataSource::None => format!("❓ {}", source),
    }
}

/// Time until the cache goes stale, as `m:ss`
pub fn format_remaining(remaining: Option<Duration>) -> String {
    match remaining {
        Some(left) => {
            let secs = left.as_secs();
            format!("{}:{:02}", secs / 60, secs % 60)
        }
        None => "stale".to_string(),
    }
}

pub fn status_fg(status: PlantStatus) -> Color {
    status_color(status).parse().unwrap_or(Color::Gray)
}

pub fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Info => Style::default().fg(Color::Cyan),
        NoticeLevel::Warning => Style::default().fg(Color::Yellow),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
