use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Contact;

/// One list row: position, full name, and number.
pub(crate) fn contact_row_line(position: usize, contact: &Contact) -> Line<'static> {
    let number = if contact.number.is_empty() {
        Span::styled("-".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(contact.number.clone(), Style::default().fg(Color::Cyan))
    };
    Line::from(vec![
        Span::styled(
            format!("{:>3}. ", position + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!("{:<32}", contact.display_name())),
        number,
    ])
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactDraft;
    use anyhow::Context;

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(std::io::Error::other("disk full"))
            .context("failed to write export")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= 20 && popup.y >= 15);
    }

    #[test]
    fn row_shows_one_based_position() {
        let contact = Contact::from_draft(&ContactDraft::new("HHBU", "Peter", "22233322"));
        let line = contact_row_line(0, &contact);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert!(text.starts_with("  1. HHBUPeter"));
        assert!(text.ends_with("22233322"));
    }
}
