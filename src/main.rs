use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use manor::build_info;
use manor::core::config::CliAction;
use manor::core::constants::INPUT_POLL_MS;
use manor::core::GameConfig;
use manor::exploration::Exploration;
use manor::input::{
    handle_game_input, handle_menu_input, GameOverlay, InputResult, MainMenuState, MenuItem,
};
use manor::ui::{render_game, render_main_menu};
use manor::utils::{LoadOutcome, SaveManager};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Copy)]
enum Screen {
    MainMenu,
    Game,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = match GameConfig::from_args(&args) {
        CliAction::Play(config) => config,
        CliAction::ShowVersion => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        CliAction::ShowHelp => {
            print_help();
            return Ok(());
        }
        CliAction::Unknown(other) => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Run 'manor --help' for usage.");
            std::process::exit(1);
        }
    };

    let save_manager = match &config.save_path {
        Some(path) => SaveManager::with_path(path.clone()),
        None => SaveManager::new(),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    init_logging(&save_manager.log_path());
    log::info!("{} starting", build_info::version_line());

    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config, &save_manager, &mut rng);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    log::info!("exiting");
    result
}

fn print_help() {
    println!("Manor - a room-drafting exploration game\n");
    println!("Usage: manor [options]\n");
    println!("Options:");
    println!("  --seed <n>     Use a fixed random seed");
    println!("  --save <path>  Read and write the save at <path>");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
}

/// Logs go to a file next to the save; the terminal belongs to the UI.
fn init_logging(path: &Path) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder
        .format(|buf, record| {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            writeln!(buf, "{} [{}] {}", ts, record.level(), record.args())
        })
        .target(env_logger::Target::Pipe(Box::new(file)));
    if builder.try_init().is_err() {
        eprintln!("Warning: logger already initialised");
    }
}

/// Next key press, if one arrives within the poll window.
fn next_key() -> io::Result<Option<KeyEvent>> {
    if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
    save_manager: &SaveManager,
    rng: &mut StdRng,
) -> io::Result<()> {
    let mut screen = Screen::MainMenu;
    let mut menu = MainMenuState::new(save_manager.save_info());
    let mut session = Exploration::new(config);
    let mut overlay = GameOverlay::None;
    let mut message = String::new();

    loop {
        match screen {
            Screen::MainMenu => {
                terminal.draw(|frame| render_main_menu(frame, &menu))?;
                let Some(key) = next_key()? else {
                    continue;
                };

                match handle_menu_input(key, &mut menu) {
                    Some(MenuItem::NewGame) => {
                        log::info!("new game");
                        session = Exploration::new(config);
                        message = String::new();
                        overlay = GameOverlay::None;
                        screen = Screen::Game;
                    }
                    Some(MenuItem::LoadGame) => {
                        match save_manager.load(config) {
                            LoadOutcome::Restored(loaded) => {
                                session = loaded;
                                message = "Game loaded.".to_string();
                            }
                            LoadOutcome::NoSave => {
                                session = Exploration::new(config);
                                message = "No save found. Starting a new game.".to_string();
                            }
                        }
                        overlay = GameOverlay::None;
                        screen = Screen::Game;
                    }
                    Some(MenuItem::Quit) => break,
                    None => {}
                }
            }
            Screen::Game => {
                terminal.draw(|frame| render_game(frame, &session, overlay, &message))?;
                let Some(key) = next_key()? else {
                    continue;
                };

                match handle_game_input(key, &mut session, &mut overlay, &mut message, rng) {
                    InputResult::Continue => {}
                    InputResult::Save => match save_manager.save(&session) {
                        Ok(()) => message = "Game saved.".to_string(),
                        Err(e) => {
                            log::error!("save failed: {}", e);
                            message = format!("Save failed: {}", e);
                        }
                    },
                    InputResult::Restart => {
                        log::info!("restarting");
                        session = Exploration::new(config);
                        overlay = GameOverlay::None;
                        message = String::new();
                    }
                    InputResult::QuitToMenu => {
                        menu = MainMenuState::new(save_manager.save_info());
                        screen = Screen::MainMenu;
                    }
                }
            }
        }
    }

    Ok(())
}
