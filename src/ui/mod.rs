//! Thin rendering boundary: draws the presentation root with ratatui and
//! pumps the crossterm/stream events on a single frame loop.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::shell::{Page, PopupContext, PresentationRoot, Shell};

/// Run the shell UI until the user quits (q or Ctrl-C).
pub async fn launch(mut shell: Shell) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut shell).await;

    // Restore terminal
    shell.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, shell: &mut Shell) -> Result<()> {
    loop {
        let frame_start = std::time::Instant::now();

        // Process input first for minimal latency.
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }

        // The single serialization point: every stream event mutates the
        // presentation root here, between renders.
        shell.poll_events();

        terminal.draw(|frame| render(frame, shell.root()))?;

        // Sleep for the remainder of a 16ms frame.
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = Duration::from_millis(16).checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }
}

fn render(frame: &mut Frame, root: &PresentationRoot) {
    let chunks =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());

    render_page(frame, root, chunks[0]);

    let status = Paragraph::new(root.connection_status.as_str())
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, chunks[1]);

    if let Some(context) = root.popup.context() {
        render_popup(frame, context);
    }
}

fn render_page(frame: &mut Frame, root: &PresentationRoot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(root.page.title());

    let lines: Vec<Line> = match root.page {
        Page::Initial => match &root.startup {
            Some(startup) => vec![Line::from(startup.notice.as_str())],
            None => vec![],
        },
        Page::Authentication => match &root.authentication {
            Some(auth) => vec![
                Line::from(format!("Phone number: {}", auth.phone_number)),
                Line::from(format!("Code: {}", auth.code)),
                Line::from(format!("Password: {}", mask(&auth.password))),
            ],
            None => vec![],
        },
        Page::Workspace => match &root.workspace {
            Some(workspace) => vec![Line::from(format!(
                "Workspace ready (session #{})",
                workspace.instance
            ))],
            None => vec![],
        },
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_popup(frame: &mut Frame, context: &PopupContext) {
    let area = centered_rect(50, 30, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(context.title.as_str())
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(context.payload.to_string()).block(block),
        area,
    );
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
