use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for the dashboard
pub struct DashboardLayout {
    /// Top bar: user, selected version, busy flags
    pub header_area: Rect,
    /// Row of tonality stat cards
    pub cards_area: Rect,
    /// Bar chart (left of the table)
    pub chart_area: Rect,
    /// Review table
    pub table_area: Rect,
    /// Hotkey legend (full width)
    pub legend_area: Rect,
    /// Bottom status bar
    pub status_area: Rect,
}

/// Split the screen for the dashboard
///
/// The chart is dropped on narrow terminals so the table keeps its width.
pub fn calculate_dashboard_layout(area: Rect, legend_height: u16) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(5),             // Stat cards
            Constraint::Min(5),                // Chart + table
            Constraint::Length(legend_height), // Legend
            Constraint::Length(3),             // Status bar
        ])
        .split(area);

    let body = rows[2];
    let (chart_area, table_area) = if body.width >= 90 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(40)])
            .split(body);
        (cols[0], cols[1])
    } else {
        (Rect::new(body.x, body.y, 0, 0), body)
    };

    DashboardLayout {
        header_area: rows[0],
        cards_area: rows[1],
        chart_area,
        table_area,
        legend_area: rows[3],
        status_area: rows[4],
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_has_chart() {
        let layout = calculate_dashboard_layout(Rect::new(0, 0, 120, 40), 3);
        assert_eq!(layout.chart_area.width, 32);
        assert_eq!(layout.table_area.width, 88);
        assert_eq!(layout.status_area.height, 3);
    }

    #[test]
    fn test_narrow_terminal_drops_chart() {
        let layout = calculate_dashboard_layout(Rect::new(0, 0, 60, 40), 3);
        assert_eq!(layout.chart_area.width, 0);
        assert_eq!(layout.table_area.width, 60);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let rect = centered_rect(100, 10, Rect::new(0, 0, 40, 20));
        assert_eq!(rect, Rect::new(0, 5, 40, 10));
    }
}
