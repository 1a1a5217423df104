use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use twenty48::config::{usage, CliAction, GameConfig};
use twenty48::core::{Board, BoardError};
use twenty48::input::{map_key, DragTracker, GameInput};
use twenty48::logging::init_file_logging;
use twenty48::ui::draw_ui;
use twenty48::utils::build_info::version_line;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn board_error(e: BoardError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = GameConfig::load();
    match config.apply_args(&args) {
        Ok(CliAction::Play) => {}
        Ok(CliAction::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Ok(CliAction::Help) => {
            println!("{}", usage());
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'twenty48 --help' for usage.");
            std::process::exit(1);
        }
    }

    if let Err(e) = init_file_logging(&config) {
        eprintln!("Warning: could not open log file: {}", e);
    }
    info!(?config, "starting twenty48");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut board = Board::new(config.board_size, &mut rng).map_err(board_error)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &config, &mut board, &mut rng);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    info!(
        moves = board.moves(),
        max_value = board.max_value(),
        "session ended"
    );
    result
}

fn run_game(
    terminal: &mut Term,
    config: &GameConfig,
    board: &mut Board,
    rng: &mut StdRng,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let mut last_tick = Instant::now();
    let mut drag = DragTracker::new(config.drag_threshold);
    // Set once tick() fails; the board is frozen until the player exits.
    let mut fatal: Option<String> = None;

    loop {
        terminal.draw(|frame| draw_ui(frame, board, config.seed, fatal.as_deref()))?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if fatal.is_some() {
                        return Ok(());
                    }
                    match map_key(key.code) {
                        GameInput::Move(direction) => {
                            board.on_direction(direction);
                        }
                        GameInput::Restart => {
                            *board = Board::new(config.board_size, rng).map_err(board_error)?;
                            info!("new board");
                        }
                        GameInput::Quit => return Ok(()),
                        GameInput::Other => {}
                    }
                }
                Event::Mouse(mouse) if fatal.is_none() => {
                    drag.handle_mouse(mouse);
                    if let Some(direction) = drag.take_direction() {
                        board.on_direction(direction);
                    }
                }
                _ => {}
            }
        }

        if fatal.is_none() && last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            match board.tick(rng) {
                Ok(result) => {
                    for event in result.events {
                        debug!(?event, "tick");
                    }
                }
                Err(e) => {
                    error!(error = %e, "game step failed");
                    fatal = Some(e.to_string());
                }
            }
        }
    }
}
