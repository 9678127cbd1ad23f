use std::io::{self, stdout};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dominoes::{
    cell_symbol, Board, BoardLayout, GridConfig, NullSink, Preview, RoomKey, Session, Snapshot,
    TileSupply,
};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoardSize {
    Eight,
    Seven,
}

#[derive(Parser)]
struct Args {
    /// Which board to play on
    #[arg(short, long, value_enum, default_value_t = BoardSize::Eight)]
    board: BoardSize,

    /// Seed for the tile sequence
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = match args.board {
        BoardSize::Eight => GridConfig::EIGHT_BY_EIGHT,
        BoardSize::Seven => GridConfig::SEVEN_BY_SEVEN,
    };
    let seed = args
        .seed
        .unwrap_or_else(|| std::process::id().into());
    let board = Board::new(config, &BoardLayout::reference(), TileSupply::new(seed));
    let mut app = App::new(Session::new(board, RoomKey::new("local", "you"), NullSink));

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let result = run(&mut app);
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result?;

    let board = app.session.board();
    println!(
        "Placed {} dominoes, covered {} of {} stars",
        board.placements().len(),
        board.score(),
        board.total_stars()
    );
    Ok(())
}

fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    while !app.should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}

struct App {
    session: Session<NullSink>,
    /// Where the cursor is, also while not hovering.
    cursor: usize,
    message: String,
    should_quit: bool,
}

impl App {
    fn new(session: Session<NullSink>) -> Self {
        Self {
            session,
            cursor: 0,
            message: String::from("Move with the arrow keys"),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let direction = match code {
            KeyCode::Left => Some(dominoes::Direction::Left),
            KeyCode::Up => Some(dominoes::Direction::Up),
            KeyCode::Right => Some(dominoes::Direction::Right),
            KeyCode::Down => Some(dominoes::Direction::Down),
            _ => None,
        };
        if let Some(direction) = direction {
            // The first arrow press only starts hovering.
            if self.session.board().hover().is_some() {
                let config = self.session.board().config();
                if let Some(next) = config.neighbor(self.cursor, direction) {
                    self.cursor = next;
                }
            }
            self.session.on_hover(self.cursor);
            return;
        }

        match code {
            KeyCode::Esc => self.session.on_hover_end(),
            KeyCode::Char('q') => {
                self.session.rotate_left();
            }
            KeyCode::Char('e') => {
                self.session.rotate_right();
            }
            KeyCode::Char('m') => self.session.mirror(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.message = match self.session.drop_current(self.cursor) {
                    Ok(delta) => format!(
                        "Placed on {} and {}, {} star(s) gained",
                        delta.placement.anchor, delta.placement.fill, delta.score_gained
                    ),
                    Err(err) => format!("Rejected: {}", err),
                };
            }
            KeyCode::Char('x') => self.should_quit = true,
            _ => {}
        }
    }

    fn ui(&self, frame: &mut Frame) {
        let board = self.session.board();
        let main_layout = Layout::new(
            Direction::Horizontal,
            [Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)],
        )
        .split(frame.size());
        frame.render_widget(
            BoardWidget {
                snapshot: board.snapshot(),
                config: board.config(),
                cursor: self.cursor,
            },
            main_layout[0],
        );
        frame.render_widget(self.side_panel(board), main_layout[1]);
    }

    fn side_panel(&self, board: &Board) -> Paragraph<'static> {
        let snapshot = board.snapshot();
        let lines = vec![
            Line::from(format!("Tile:        {}", snapshot.current_tile)),
            Line::from(format!("Orientation: {}", snapshot.orientation)),
            Line::from(format!(
                "Score:       {} / {}",
                snapshot.score,
                board.total_stars()
            )),
            Line::from(format!("Placements:  {}", board.placements().len())),
            Line::from(""),
            Line::from(self.message.clone()),
            if board.legal_placements().is_empty() {
                Line::from("No legal placement for this tile").red()
            } else {
                Line::from("")
            },
            Line::from(""),
            Line::from("arrows  move").dim(),
            Line::from("q / e   rotate").dim(),
            Line::from("m       mirror").dim(),
            Line::from("enter   drop").dim(),
            Line::from("esc     stop hovering").dim(),
            Line::from("x       quit").dim(),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(rounded_block(" Dominoes "))
    }
}

const SIDE_PANEL_WIDTH: u16 = 36;

const CELL_WIDTH: u16 = 3;

fn rounded_block(title: &str) -> Block<'_> {
    Block::new()
        .title(title)
        .border_type(BorderType::Rounded)
        .borders(Borders::all())
}

struct BoardWidget<'a> {
    snapshot: Snapshot<'a>,
    config: GridConfig,
    cursor: usize,
}

impl BoardWidget<'_> {
    fn cell_style(&self, index: usize, symbol: char) -> Style {
        let style = match symbol {
            'F' => Style::new().green(),
            'W' => Style::new().blue(),
            'C' => Style::new().gray(),
            '+' => Style::new().magenta().bold(),
            '*' => Style::new().yellow(),
            '#' => Style::new().dark_gray(),
            _ => Style::new(),
        };
        match self.snapshot.preview {
            Some(Preview {
                anchor,
                fill,
                legal,
            }) if index == anchor || Some(index) == fill => {
                if legal {
                    style.on_green()
                } else {
                    style.on_red()
                }
            }
            None if index == self.cursor => style.reversed(),
            _ => style,
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = rounded_block(" Board ");
        let inner = block.inner(area);
        block.render(area, buf);

        for (index, cell) in self.snapshot.cells.iter().enumerate() {
            let (row, column) = self.config.coordinates(index);
            let x = inner.x + column as u16 * CELL_WIDTH;
            let y = inner.y + row as u16;
            if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
                continue;
            }
            let symbol = cell_symbol(cell);
            buf.set_string(
                x,
                y,
                format!(" {} ", symbol),
                self.cell_style(index, symbol),
            );
        }
    }
}
