//! Terminal side-scroller runner (default binary).
//!
//! Usage: `tui-scroller [LEVEL]`. Configuration comes from `SCROLLER_*`
//! environment variables; see `tui_scroller::store::config`.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use tui_scroller::core::{FollowUp, Session, TickOutcome};
use tui_scroller::input::{handle_key_event, handle_menu_key, MenuInput};
use tui_scroller::store::catalog::LEVEL_DIR;
use tui_scroller::store::{LevelCatalog, SaveStore, ScrollerConfig};
use tui_scroller::term::{FrameBuffer, GameView, MenuItem, MenuView, TerminalRenderer};
use tui_scroller::types::GameStatus;

/// Longest level number accepted at the menu prompt.
const MENU_INPUT_MAX: usize = 3;

fn main() -> Result<()> {
    let config = ScrollerConfig::from_env().with_start_level_arg(std::env::args().nth(1).as_deref());
    init_logging(&config)?;
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        warn!("exiting with error: {:#}", err);
    }
    result
}

/// Send log records to the configured file. Logging stays off otherwise so
/// nothing is written over the game screen.
fn init_logging(config: &ScrollerConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// What the process shows next.
enum Screen {
    Menu(Option<String>),
    Play { level: u32, hold: bool },
}

fn run(term: &mut TerminalRenderer, config: &ScrollerConfig) -> Result<()> {
    let mut store = SaveStore::open(&config.save_path);
    let catalog = LevelCatalog::load(&config.root).unwrap_or_else(|err| {
        warn!("level catalog unusable, scanning for level files: {}", err);
        LevelCatalog::discover(&config.root.join(LEVEL_DIR))
    });
    info!("{} levels available", catalog.len());

    let mut fb = FrameBuffer::new(1, 1);
    let mut screen = Screen::Play {
        level: config.start_level,
        hold: false,
    };

    loop {
        screen = match screen {
            Screen::Menu(notice) => {
                match select_level(term, &catalog, &store, notice.as_deref(), &mut fb)? {
                    Some(level) => Screen::Play { level, hold: false },
                    None => return Ok(()),
                }
            }
            Screen::Play { level, hold } => {
                let path = catalog.path_for(level);
                let mut session = match Session::load(level, &path, config.seed()) {
                    Ok(session) => session,
                    Err(err) => {
                        warn!("cannot start level {}: {}", level, err);
                        screen = Screen::Menu(Some(format!("Could not load level {}: {}", level, err)));
                        continue;
                    }
                };
                if hold {
                    session.hold_for_start();
                }
                info!("playing level {} from {}", level, path.display());

                let follow_up = play(term, &mut session, &mut store, &mut fb)?;
                match follow_up {
                    FollowUp::Play(next) => Screen::Play {
                        level: next,
                        hold: session.status() == GameStatus::Won && next != level,
                    },
                    FollowUp::LevelMenu => Screen::Menu(None),
                    FollowUp::Quit => return Ok(()),
                }
            }
        };
    }
}

/// Drive one session until the player picks what happens next.
fn play(
    term: &mut TerminalRenderer,
    session: &mut Session,
    store: &mut SaveStore,
    fb: &mut FrameBuffer,
) -> Result<FollowUp> {
    let mut view = GameView::new();
    let mut last_tick = Instant::now();
    term.invalidate();

    loop {
        // Render.
        view.render_into(session, store.high_score(), term.viewport(), fb);
        term.draw_swap(fb)?;

        if session.status() == GameStatus::Quit {
            return Ok(FollowUp::Quit);
        }

        // Input with timeout until next tick.
        let tick_duration = session.tick_interval();
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = handle_key_event(key) {
                        if session.is_over() {
                            if let Some(next) = session.follow_up(action) {
                                return Ok(next);
                            }
                        } else {
                            session.apply_action(action);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            match session.tick() {
                TickOutcome::Won | TickOutcome::Lost => {
                    info!(
                        "level {} ended {} with score {}",
                        session.level(),
                        session.status().as_str(),
                        session.score()
                    );
                    if store.maybe_update_high_score(u64::from(session.score())) {
                        info!("new high score {}", store.high_score());
                    }
                }
                TickOutcome::Idle | TickOutcome::Continuing => {}
            }
        }
    }
}

/// Level select prompt. `None` means the player backed out.
fn select_level(
    term: &mut TerminalRenderer,
    catalog: &LevelCatalog,
    store: &SaveStore,
    notice: Option<&str>,
    fb: &mut FrameBuffer,
) -> Result<Option<u32>> {
    let items: Vec<MenuItem<'_>> = catalog
        .entries()
        .iter()
        .map(|entry| MenuItem {
            id: entry.id,
            description: &entry.description,
        })
        .collect();
    let mut typed = String::new();
    term.invalidate();

    loop {
        MenuView.render_into(&items, &typed, notice, store.high_score(), term.viewport(), fb);
        term.draw_swap(fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match handle_menu_key(key) {
                Some(MenuInput::Digit(c)) if typed.len() < MENU_INPUT_MAX => typed.push(c),
                Some(MenuInput::Backspace) => {
                    typed.pop();
                }
                Some(MenuInput::Submit) => {
                    let chosen = typed
                        .parse::<u32>()
                        .ok()
                        .filter(|&id| catalog.find(id).is_some() || (catalog.is_empty() && id >= 1));
                    if chosen.is_some() {
                        return Ok(chosen);
                    }
                    typed.clear();
                }
                Some(MenuInput::Cancel) => return Ok(None),
                Some(MenuInput::Digit(_)) | None => {}
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
