use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::game::Round;
use crate::input::{InputHub, InputSource};
use crate::leaderboard::Leaderboard;
use crate::ui::context::RenderContext;

pub const MAX_NAME_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
    Quit,
}

/// The session: name entry, rounds, game over, and the leaderboard file.
pub struct App {
    pub screen: Screen,
    pub config: Config,
    pub leaderboard: Leaderboard,
    pub inputs: InputHub,
    pub round: Option<Round>,
    pub render_ctx: RenderContext,
    // Name entry state
    pub name_buffer: String,
    pub name_rejected: bool,
    pub player_name: String,
    // Results
    pub last_score: u32,
    pub best_score: u32,
    pub save_error: Option<String>,
    rng: StdRng,
}

impl App {
    pub fn new(config: Config, leaderboard: Leaderboard, inputs: InputHub) -> Self {
        Self::with_rng(config, leaderboard, inputs, StdRng::from_entropy())
    }

    pub fn with_rng(
        config: Config,
        mut leaderboard: Leaderboard,
        inputs: InputHub,
        rng: StdRng,
    ) -> Self {
        if config.reset_leaderboard_on_start {
            if let Err(e) = leaderboard.reset() {
                log::error!(
                    "could not reset leaderboard {}: {}",
                    leaderboard.path().display(),
                    e
                );
            }
        }
        Self {
            screen: Screen::Start,
            config,
            leaderboard,
            inputs,
            round: None,
            render_ctx: RenderContext::new(),
            name_buffer: String::new(),
            name_rejected: false,
            player_name: String::new(),
            last_score: 0,
            best_score: 0,
            save_error: None,
            rng,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.screen == Screen::Quit
    }

    pub fn on_tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        let flap = self.inputs.flap_requested();
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.tick(flap, &mut self.rng);
        if round.is_over() {
            self.finish_round();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            if self.screen == Screen::Playing && is_flap_key(key.code) {
                self.inputs.keyboard.release();
            }
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.screen {
            Screen::Start => self.handle_name_input(key),
            Screen::Playing => match key.code {
                code if is_flap_key(code) => self.inputs.keyboard.press(),
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
                _ => {}
            },
            Screen::GameOver => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.name_buffer = self.player_name.clone();
                    self.screen = Screen::Start;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => self.start_round(),
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
                _ => {}
            },
            Screen::Quit => {}
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let name = self.name_buffer.trim();
                if name.is_empty() {
                    self.name_rejected = true;
                    return;
                }
                self.player_name = name.to_string();
                self.start_round();
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Esc => self.quit(),
            KeyCode::Char(c) => {
                if self.name_buffer.chars().count() < MAX_NAME_LEN
                    && (c.is_ascii_graphic() || c == ' ')
                {
                    self.name_buffer.push(c);
                    self.name_rejected = false;
                }
            }
            _ => {}
        }
    }

    fn start_round(&mut self) {
        log::info!("round started for {}", self.player_name);
        self.round = Some(Round::new(&self.config.world, &mut self.rng));
        // Keys and camera frames from before the round must not flap
        self.inputs.reset();
        self.save_error = None;
        self.name_rejected = false;
        self.screen = Screen::Playing;
    }

    fn finish_round(&mut self) {
        let score = self.round.as_ref().map_or(0, Round::score);
        self.last_score = score;
        self.best_score = self.best_score.max(score);

        if let Err(e) = self.leaderboard.record(&self.player_name, score) {
            log::error!(
                "could not save leaderboard {}: {}",
                self.leaderboard.path().display(),
                e
            );
            self.save_error = Some(format!("Leaderboard not saved: {e}"));
        }
        self.screen = Screen::GameOver;
    }

    fn quit(&mut self) {
        log::info!("quit requested from {:?}", self.screen);
        self.screen = Screen::Quit;
    }
}

fn is_flap_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(' ') | KeyCode::Up)
}
