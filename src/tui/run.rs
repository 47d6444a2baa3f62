use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;
use tracing::error;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{TuiState, ViewMode};
use super::views::{
    draw_commits_view, draw_files_view, draw_help_overlay, draw_scatter_view, draw_statistics_view,
};
use crate::cli::CommonArgs;
use crate::report::load_state;
use crate::state::AppState;

pub fn run(common: &CommonArgs) -> anyhow::Result<()> {
    let mut app = load_state(common, false)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app, common);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result.context("Terminal UI failed")
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, common: &CommonArgs) -> io::Result<()> {
    let mut tui = TuiState::default();

    loop {
        let draw_result = terminal.draw(|f| {
            let size = f.size();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
                .split(size);

            let titles: Vec<&str> = ViewMode::ALL.iter().map(|m| m.title()).collect();
            let tabs = Tabs::new(titles)
                .block(Block::default().borders(Borders::ALL).title("View Mode"))
                .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .select(tui.view_mode.index());
            f.render_widget(tabs, chunks[0]);

            match tui.view_mode {
                ViewMode::Scatter => draw_scatter_view(f, chunks[1], app, &mut tui),
                ViewMode::Commits => draw_commits_view(f, chunks[1], app),
                ViewMode::Files => draw_files_view(f, chunks[1], app),
                ViewMode::Stats => draw_statistics_view(f, chunks[1], app),
            }

            let footer = match tui.current_status() {
                Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Green))),
                None => Line::from(Span::styled(
                    format!(
                        " {}  |  h help  q quit  Tab view  ←/→ time  c copy  r reload",
                        app.selection_label()
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            };
            f.render_widget(Paragraph::new(footer), chunks[2]);

            if tui.show_help {
                draw_help_overlay(f, size);
            }
        });

        if let Err(e) = draw_result {
            error!(error = %e, "TUI draw error");
        }

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut tui, app, common) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, &mut tui, app),
                _ => {}
            }
        }
    }

    Ok(())
}
