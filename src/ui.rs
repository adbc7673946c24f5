use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;

use crate::actions::show_tracks::TrackFilter;
use crate::config::MoodItConfig;
use crate::endpoints::Endpoints;
use crate::render::{Applied, Fetched, RemoteListRenderer, Ticket};
use crate::source::{HttpSource, TrackSource};
use crate::view::TrackListView;

const TICK: Duration = Duration::from_millis(100);

struct App<S> {
    moods: Vec<String>,
    endpoints: Endpoints,
    renderer: Arc<RemoteListRenderer<S>>,
    runtime: Handle,
    completions: (Sender<Fetched>, Receiver<Fetched>),
    view: TrackListView,
    state: ListState,
    filter: Option<TrackFilter>,
    in_flight: Option<Ticket>,
    quit: bool,
}

impl<S: TrackSource + Send + Sync + 'static> App<S> {
    fn new(config: &MoodItConfig, source: S, runtime: Handle) -> Self {
        App {
            moods: config.moods.clone(),
            endpoints: config.endpoints(),
            renderer: Arc::new(RemoteListRenderer::new(source)),
            runtime,
            completions: mpsc::channel(),
            view: TrackListView::default(),
            state: ListState::default(),
            filter: None,
            in_flight: None,
            quit: false,
        }
    }

    fn request(&mut self, filter: TrackFilter) {
        let ticket = self.renderer.issue();
        let url = filter.url(&self.endpoints);
        let placeholder = filter.placeholder();
        let renderer = Arc::clone(&self.renderer);
        let done = self.completions.0.clone();
        self.runtime.spawn(async move {
            let fetched = renderer.fetch(ticket, &url, placeholder).await;
            // the receiver is gone once the UI has quit
            let _ = done.send(fetched);
        });
        self.filter = Some(filter);
        self.in_flight = Some(ticket);
    }

    fn settle(&mut self) {
        while let Ok(fetched) = self.completions.1.try_recv() {
            let ticket = fetched.ticket;
            if let Applied::Replaced(count) = self.renderer.apply(fetched, &mut self.view) {
                self.state.select((count > 0).then_some(0));
            }
            if self.in_flight == Some(ticket) {
                self.in_flight = None;
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('l') => self.request(TrackFilter::Liked),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let index = c as usize - '1' as usize;
                if let Some(mood) = self.moods.get(index) {
                    self.request(TrackFilter::Mood(mood.clone()));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            _ => {}
        }
    }

    fn scroll(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        let last = self.view.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.state.select(Some(next));
    }
}

/// Runs the interactive track browser until the user quits.
pub fn run(config: &MoodItConfig, runtime: Handle) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, App::new(config, HttpSource::new(), runtime));
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn event_loop<S: TrackSource + Send + Sync + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<S>,
) -> io::Result<()> {
    info!("Browsing tracks from {}", app.endpoints.base());
    while !app.quit {
        app.settle();
        terminal.draw(|frame| draw(frame, &mut app))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }
    }
    Ok(())
}

fn draw<S>(frame: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(frame.size());

    let mut keys: Vec<Span> = app
        .moods
        .iter()
        .take(9)
        .enumerate()
        .flat_map(|(i, mood)| {
            [
                Span::styled(format!("{}", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {mood}  ")),
            ]
        })
        .collect();
    keys.extend([
        Span::styled("l", Style::default().fg(Color::Yellow)),
        Span::raw(" liked  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);
    let header = Paragraph::new(Line::from(keys))
        .block(Block::default().borders(Borders::ALL).title(" moodit "));
    frame.render_widget(header, chunks[0]);

    let mut title = match &app.filter {
        Some(filter) => format!(" {filter} "),
        None => " Pick a mood ".to_string(),
    };
    if app.in_flight.is_some() {
        title.push_str("(loading) ");
    }
    let items: Vec<ListItem> = app
        .view
        .rows()
        .iter()
        .map(|row| ListItem::new(row.as_str()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], &mut app.state);

    let status = match app.view.updated_at() {
        Some(at) => format!("{} rows, updated {}", app.view.len(), at.format("%H:%M:%S")),
        None => format!("Server {}", app.endpoints.base()),
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
