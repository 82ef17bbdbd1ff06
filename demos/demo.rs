use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    DefaultTerminal, Frame,
};

use ratadial::{Dial, DialConfig, DialWidget, Direction};

fn main() -> Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = run(terminal);
    ratatui::restore();
    result
}

fn new_dials() -> Vec<Dial> {
    let mut rng = rand::rng();
    [Direction::Up, Direction::Down, Direction::None]
        .into_iter()
        .map(|direction| {
            let target = f64::from(rng.random_range(5_u8..=100));
            Dial::new(
                DialConfig::new(200.0)
                    .target_value(target)
                    .direction(direction)
                    .gradient_colors(["#fc0303", "#fcc603", "#03fc07"]),
            )
        })
        .collect()
}

fn run(mut terminal: DefaultTerminal) -> Result<()> {
    let mut dials = new_dials();
    for dial in &mut dials {
        dial.animate_start();
    }

    loop {
        let now = Instant::now();
        for dial in &mut dials {
            dial.poll(now);
        }

        terminal.draw(|frame| draw(frame, &dials))?;
        match handle_input()? {
            Command::Quit => break Ok(()),
            Command::Restart => {
                for dial in &mut dials {
                    dial.animate_reset();
                    dial.animate_start();
                }
            }
            Command::Shuffle => {
                dials = new_dials();
                for dial in &mut dials {
                    dial.animate_start();
                }
            }
            Command::Noop => {}
        }
    }
}

fn draw(frame: &mut Frame, dials: &[Dial]) {
    let area = Rect::new(0, 1, frame.area().width, 3);
    let p = Paragraph::new("Ratadial Demo  (r: restart, n: new targets, q: quit)")
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center);
    frame.render_widget(p, area);

    let dial_row = Rect::new(0, 5, frame.area().width, 20).intersection(frame.area());
    let columns = Layout::horizontal([Constraint::Length(40); 3]).split(dial_row);
    for (dial, column) in dials.iter().zip(columns.iter()) {
        let title = format!(" target {}% ", dial.target_value());
        frame.render_widget(
            DialWidget::new(dial).block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(title),
            ),
            *column,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Noop,
    Restart,
    Shuffle,
    Quit,
}

fn handle_input() -> Result<Command> {
    if !event::poll(Duration::from_secs_f64(1.0 / 60.0))? {
        return Ok(Command::Noop);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') => Ok(Command::Quit),
            KeyCode::Char('r') => Ok(Command::Restart),
            KeyCode::Char('n') => Ok(Command::Shuffle),
            _ => Ok(Command::Noop),
        },
        _ => Ok(Command::Noop),
    }
}
