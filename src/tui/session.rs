use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::style::Color;
use ratatui::widgets::ListState;
use tracing::debug;

use crate::app::{AppContext, FreshetError, Result};
use crate::config::{ColorConfig, Config, KeybindingConfig};
use crate::domain::DisplayItem;
use crate::tui::event::{Action, AppEvent};
use crate::tui::refresh::RefreshTimer;

/// Rows a list page jump moves by.
pub const PAGE_SIZE: usize = 10;

/// Lines reserved by the title bar and status bar.
const CHROME_HEIGHT: u16 = 2;

/// Which visual the session is showing. The article payload only exists in
/// article mode, so there is no "article selected but list showing" state
/// to rule out.
pub enum Mode {
    List,
    Article(ArticleView),
}

pub struct ArticleView {
    pub title: String,
    pub text: String,
    pub scroll: u16,
    pending_top_jump: bool,
}

impl ArticleView {
    fn new(title: String, text: String) -> Self {
        Self {
            title,
            text,
            scroll: 0,
            pending_top_jump: false,
        }
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    fn max_scroll(&self, viewport_height: u16) -> u16 {
        (self.line_count() as u16).saturating_sub(viewport_height)
    }
}

/// What asked for a refresh. Only the status-message wording differs; both
/// triggers share one code path.
#[derive(Debug, Clone, Copy)]
pub enum RefreshTrigger {
    Manual,
    Auto,
}

/// State of one interactive reading session.
pub struct Session {
    pub mode: Mode,
    pub items: Vec<DisplayItem>,
    pub list_state: ListState,
    cursor: usize,
    pub width: u16,
    pub height: u16,
    pub browser_mode: bool,
    pub refresh_timer: RefreshTimer,
    pub status: Option<String>,
    pub title: String,
    pub accent: Color,
    pub colors: ColorConfig,
    pub should_quit: bool,
    keys: KeybindingConfig,
}

impl Session {
    pub fn new(config: &Config, items: Vec<DisplayItem>, size: (u16, u16)) -> Result<Self> {
        let period = config.refresh.period().map_err(FreshetError::Config)?;
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Ok(Self {
            mode: Mode::List,
            items,
            list_state,
            cursor: 0,
            width: size.0,
            height: size.1,
            browser_mode: config.session_browser_mode(),
            refresh_timer: RefreshTimer::new(period),
            status: Some(format!("Fetched at {}", chrono::Local::now().format("%H:%M"))),
            title: config.session_title(),
            accent: config.session_accent(),
            colors: config.colors.clone(),
            should_quit: false,
            keys: config.keybindings.clone(),
        })
    }

    /// The open article's title, `None` in list mode.
    pub fn selected_article(&self) -> Option<&str> {
        match &self.mode {
            Mode::Article(view) => Some(view.title.as_str()),
            Mode::List => None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn content_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_HEIGHT)
    }

    /// Route one event. Resizes apply to both visuals no matter which is
    /// active; the tick drives the refresh countdown; keys go to the handler
    /// for the current mode. Collaborator errors propagate and end the
    /// session.
    pub async fn handle_event(&mut self, ctx: &AppContext, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Resize(width, height) => {
                self.resize(width, height);
                Ok(())
            }
            AppEvent::Tick => {
                if self.refresh_timer.expired(Instant::now()) {
                    self.refresh(ctx, RefreshTrigger::Auto).await?;
                }
                Ok(())
            }
            AppEvent::Key(key) => {
                if matches!(self.mode, Mode::Article(_)) {
                    self.handle_article_key(ctx, key).await
                } else {
                    self.handle_list_key(ctx, key).await
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let viewport = self.content_height();
        if let Mode::Article(view) = &mut self.mode {
            view.scroll = view.scroll.min(view.max_scroll(viewport));
        }
    }

    async fn handle_list_key(&mut self, ctx: &AppContext, key: KeyEvent) -> Result<()> {
        match self.keys.list_action(&key) {
            Action::Quit => self.should_quit = true,
            Action::Refresh => self.refresh(ctx, RefreshTrigger::Manual).await?,
            Action::Select => self.open_selected(ctx)?,
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_article_key(&mut self, ctx: &AppContext, key: KeyEvent) -> Result<()> {
        let action = self.keys.article_action(&key);
        let viewport = self.content_height();

        if let Mode::Article(view) = &mut self.mode {
            // vi-style top jump: the flag only survives consecutive goto_top
            // presses, every other key clears it before acting
            if action == Action::GotoTop {
                if view.pending_top_jump {
                    view.scroll = 0;
                    view.pending_top_jump = false;
                } else {
                    view.pending_top_jump = true;
                }
                return Ok(());
            }
            view.pending_top_jump = false;

            match action {
                Action::GotoBottom => view.scroll = view.max_scroll(viewport),
                Action::MoveUp => view.scroll = view.scroll.saturating_sub(1),
                Action::MoveDown => {
                    view.scroll = view.scroll.saturating_add(1).min(view.max_scroll(viewport))
                }
                Action::PageUp => view.scroll = view.scroll.saturating_sub(viewport),
                Action::PageDown => {
                    view.scroll = view
                        .scroll
                        .saturating_add(viewport)
                        .min(view.max_scroll(viewport))
                }
                _ => {}
            }
        }

        match action {
            Action::Back => {
                debug!("closing article view");
                self.mode = Mode::List;
            }
            Action::Quit => self.should_quit = true,
            // mirrors the list-mode browser path: the *highlighted list
            // entry* goes to the browser, and the article stays open
            Action::Select => {
                if let Some(item) = self.items.get(self.cursor) {
                    ctx.opener.open_article(&item.title)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Act on the highlighted entry: hand it to the browser in browser mode,
    /// otherwise render it and switch to the article view. With an empty
    /// list there is nothing highlighted and this is a no-op.
    fn open_selected(&mut self, ctx: &AppContext) -> Result<()> {
        let Some(item) = self.items.get(self.cursor) else {
            return Ok(());
        };

        if self.browser_mode {
            debug!(title = %item.title, "opening article in browser");
            ctx.opener.open_article(&item.title)?;
            return Ok(());
        }

        let title = item.title.clone();
        let text = ctx.renderer.render_article(&title)?;
        debug!(title = %title, lines = text.lines().count(), "opening article view");
        self.mode = Mode::Article(ArticleView::new(title, text));
        Ok(())
    }

    /// The one refresh path. Manual keypresses and the expired countdown
    /// both land here so the item replacement and the countdown re-arm can
    /// never diverge.
    pub async fn refresh(&mut self, ctx: &AppContext, trigger: RefreshTrigger) -> Result<()> {
        let entries = ctx.source.fetch_all(true).await?;

        self.items = entries.iter().map(DisplayItem::from_entry).collect();
        if self.cursor >= self.items.len() {
            self.cursor = self.items.len().saturating_sub(1);
        }
        self.list_state.select(Some(self.cursor));

        let stamp = chrono::Local::now().format("%H:%M");
        self.status = Some(match trigger {
            RefreshTrigger::Manual => format!("Fetched at {}", stamp),
            RefreshTrigger::Auto => format!("Auto-fetched at {}", stamp),
        });
        self.refresh_timer.reset(Instant::now());
        debug!(items = self.items.len(), ?trigger, "feed list refreshed");
        Ok(())
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn move_down(&mut self) {
        if !self.items.is_empty() && self.cursor < self.items.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn page_up(&mut self) {
        let new_cursor = self.cursor.saturating_sub(PAGE_SIZE);
        if new_cursor != self.cursor {
            self.cursor = new_cursor;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn page_down(&mut self) {
        let max_cursor = self.items.len().saturating_sub(1);
        let new_cursor = (self.cursor + PAGE_SIZE).min(max_cursor);
        if new_cursor != self.cursor {
            self.cursor = new_cursor;
            self.list_state.select(Some(self.cursor));
        }
    }
}
