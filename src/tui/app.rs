use super::events::TuiEvent;
use super::state::{FocusPane, TuiState};
use crate::gallery::{GalleryEvent, GallerySession, Screen, SessionSettings};
use crate::source::ImageSource;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Main TUI application
pub struct TuiApp<S: ImageSource> {
    pub session: GallerySession<S>,
    pub state: TuiState,
    pub should_quit: bool,
}

impl<S: ImageSource> TuiApp<S> {
    pub fn new(session: GallerySession<S>) -> Self {
        Self {
            session,
            state: TuiState::new(),
            should_quit: false,
        }
    }

    /// Handle a TUI event
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Tick => {
                self.state.expire_status(Instant::now());
            }
            TuiEvent::Input(input) => {
                self.handle_input(input);
                self.state.mark_dirty();
            }
            TuiEvent::Gallery(event) => {
                self.handle_gallery_event(event);
                self.state.mark_dirty();
            }
        }
    }

    fn handle_gallery_event(&mut self, event: GalleryEvent) {
        let page_event = matches!(event, GalleryEvent::GalleryPageLoaded(_));
        let pages_before = self.session.state().cursor();

        self.session.apply(event);

        let state = self.session.state();
        self.state.clamp_to(state.watch_list().len(), state.gallery().len());

        // A new page may still leave the viewport short of the end
        if page_event && self.session.state().cursor() != pages_before {
            self.report_gallery_scroll();
        }
    }

    /// Tell the session where the gallery is scrolled
    pub fn report_gallery_scroll(&mut self) {
        let total = self.session.state().gallery().len();
        let position = self.state.gallery_scroll_position(total);
        self.session.on_scroll(position);
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event else {
            if let Event::Resize(width, height) = event {
                tracing::debug!("Terminal resized to {}x{}", width, height);
            }
            return;
        };

        // Only process key press events, ignore release and repeat
        if kind != KeyEventKind::Press {
            return;
        }

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.session.screen() {
            Screen::Welcome => self.handle_welcome_key(code),
            Screen::InApp if self.session.selection().is_viewing() => self.handle_modal_key(code),
            Screen::InApp => self.handle_in_app_key(code),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('e') => self.session.on_explore(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('d') => {
                if let Some(intent) = self.session.on_download() {
                    self.state
                        .set_status(format!("Download requested: {}", intent.url.file_name()));
                }
            }
            KeyCode::Char('f') => {
                if let Some(url) = self.session.on_favorite() {
                    self.state
                        .set_status(format!("{} added to favorites", url.file_name()));
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => self.session.on_close(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_in_app_key(&mut self, key: KeyCode) {
        let watch_total = self.session.state().watch_list().len();
        let gallery_total = self.session.state().gallery().len();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.state.focus = self.state.focus.toggle(),
            KeyCode::Enter => self.select_highlighted(),
            _ => match self.state.focus {
                FocusPane::WatchList => match key {
                    KeyCode::Left | KeyCode::Char('h') => self.state.move_watch_list(-1, watch_total),
                    KeyCode::Right | KeyCode::Char('l') => self.state.move_watch_list(1, watch_total),
                    KeyCode::Down | KeyCode::Char('j') => self.state.focus = FocusPane::Gallery,
                    _ => {}
                },
                FocusPane::Gallery => {
                    match key {
                        KeyCode::Left | KeyCode::Char('h') => self.state.move_gallery(0, -1, gallery_total),
                        KeyCode::Right | KeyCode::Char('l') => self.state.move_gallery(0, 1, gallery_total),
                        KeyCode::Up | KeyCode::Char('k') => {
                            if self.state.gallery_index < super::state::GALLERY_COLUMNS {
                                self.state.focus = FocusPane::WatchList;
                            } else {
                                self.state.move_gallery(-1, 0, gallery_total);
                            }
                        }
                        KeyCode::Down | KeyCode::Char('j') => self.state.move_gallery(1, 0, gallery_total),
                        KeyCode::PageDown => {
                            let rows = self.state.gallery_viewport_rows.get().max(1) as isize;
                            self.state.move_gallery(rows, 0, gallery_total);
                        }
                        KeyCode::PageUp => {
                            let rows = self.state.gallery_viewport_rows.get().max(1) as isize;
                            self.state.move_gallery(-rows, 0, gallery_total);
                        }
                        KeyCode::End | KeyCode::Char('G') => self.state.jump_gallery_to_end(gallery_total),
                        _ => return,
                    }
                    self.report_gallery_scroll();
                }
            },
        }
    }

    fn select_highlighted(&mut self) {
        let state = self.session.state();
        let url = match self.state.focus {
            FocusPane::WatchList => state.watch_list().get(self.state.watch_index).map(|e| e.url.clone()),
            FocusPane::Gallery => state.gallery().get(self.state.gallery_index).cloned(),
        };

        if let Some(url) = url {
            self.session.on_image_select(url);
        }
    }
}

/// Main TUI entry point
pub async fn run_tui<S: ImageSource>(source: Arc<S>, settings: SessionSettings) -> Result<()> {
    // Event channel
    let (tx, mut rx) = mpsc::channel(100);

    // Gallery completions are bridged into the TUI event channel
    let (gallery_tx, mut gallery_rx) = mpsc::channel(32);
    let bridge_tx = tx.clone();
    tokio::spawn(async move {
        while let Some(event) = gallery_rx.recv().await {
            if bridge_tx.send(TuiEvent::Gallery(event)).await.is_err() {
                break;
            }
        }
    });

    let mut session = GallerySession::new(source, settings, gallery_tx);
    session.start();
    let mut app = TuiApp::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Spawn keyboard event reader
    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if input_tx.send(TuiEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // Spawn tick event generator
    let tick_tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tick_tx.send(TuiEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let result = event_loop(&mut app, &mut terminal, &mut rx).await;

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        "Session ended: {} gallery pages, {} favorites",
        app.session.state().cursor(),
        app.session.state().favorites().len()
    );

    result
}

async fn event_loop<S: ImageSource>(
    app: &mut TuiApp<S>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rx: &mut mpsc::Receiver<TuiEvent>,
) -> Result<()> {
    while !app.should_quit {
        // Draw UI only if dirty flag is set
        if app.state.needs_redraw() {
            terminal.draw(|f| super::ui::render(&*app, f))?;
            app.state.clear_dirty();

            // First layout or resize changes how much of the gallery is visible
            if app.state.take_viewport_changed() && app.session.screen() == Screen::InApp {
                app.report_gallery_scroll();
            }
        }

        // Handle events with timeout
        if let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
            app.handle_event(event);
        }
    }
    Ok(())
}
