use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::session::{ArticleView, Mode, Session};

pub fn render(frame: &mut Frame, session: &mut Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // List or article
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, session, chunks[0]);
    if let Mode::Article(view) = &session.mode {
        render_article(frame, view, chunks[1]);
    } else {
        render_list(frame, session, chunks[1]);
    }
    render_status_bar(frame, session, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, session: &Session, area: Rect) {
    let bar = Paragraph::new(format!(" {} ", session.title)).style(
        Style::default()
            .bg(session.accent)
            .fg(session.colors.title_fg)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(bar, area);
}

fn render_list(frame: &mut Frame, session: &mut Session, area: Rect) {
    let items: Vec<ListItem> = session
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>3}. ", i + 1)),
                Span::raw(item.title.clone()),
                Span::styled(
                    format!("  ({})", item.feed_name),
                    Style::default().fg(session.colors.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(session.colors.selection_fg)
                .bg(session.accent)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut session.list_state);
}

fn render_article(frame: &mut Frame, view: &ArticleView, area: Rect) {
    let article = Paragraph::new(view.text.as_str())
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    frame.render_widget(article, area);
}

fn render_status_bar(frame: &mut Frame, session: &Session, area: Rect) {
    let help = match session.mode {
        Mode::List => "j/k:Navigate  Enter:Read  r:Refresh  q:Quit",
        Mode::Article(_) => "j/k:Scroll  gg/G:Top/Bottom  Enter:Open  q:Back",
    };
    let status = match &session.status {
        Some(message) => format!("{}  |  {}", message, help),
        None => help.to_string(),
    };

    let bar = Paragraph::new(status).style(
        Style::default()
            .fg(session.colors.status_fg)
            .bg(session.colors.status_bg),
    );
    frame.render_widget(bar, area);
}
