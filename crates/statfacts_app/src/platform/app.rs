use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::{DateTime, Utc};
use facts_logging::{facts_debug, facts_info};
use statfacts_core::{update, AppState, AppViewModel, Msg, Screen};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::input::{interpret, Command};
use super::ui::render::render;

/// Everything the main loop reacts to, from the keyboard or the engine.
pub enum Inbox {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(config: &AppConfig, initial_username: String) -> anyhow::Result<()> {
    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(config.engine_settings(), inbox_tx.clone())
        .context("failed to start lookup engine")?;
    spawn_stdin_reader(inbox_tx);

    let mut session = Session::new(runner, initial_username);
    session.redraw()?;

    while let Ok(item) = inbox_rx.recv() {
        let keep_going = match item {
            Inbox::Msg(msg) => {
                session.dispatch(msg)?;
                true
            }
            Inbox::Line(line) => session.handle_line(&line)?,
            Inbox::InputClosed => false,
        };
        if !keep_going {
            break;
        }
    }

    facts_info!("Terminal session ended");
    Ok(())
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if inbox.send(Inbox::Line(line)).is_err() {
                return;
            }
        }
        let _ = inbox.send(Inbox::InputClosed);
    });
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    results_at: Option<DateTime<Utc>>,
}

impl Session {
    fn new(runner: EffectRunner, initial_username: String) -> Self {
        let (mut state, _) = update(AppState::new(), Msg::UsernameChanged(initial_username));
        state.consume_dirty();
        Self {
            state,
            runner,
            results_at: None,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
        match interpret(line, self.state.view().screen) {
            Command::Quit => Ok(false),
            Command::Dispatch(msgs) => {
                for msg in msgs {
                    self.dispatch(msg)?;
                }
                Ok(true)
            }
            Command::Ignore => Ok(true),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        facts_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let was_results = state.view().screen == Screen::Results;
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        let view = self.state.view();
        match (was_results, view.screen == Screen::Results) {
            (false, true) => self.results_at = Some(Utc::now()),
            (true, false) => self.results_at = None,
            _ => {}
        }
        if was_dirty {
            self.print(&view)?;
        }
        Ok(())
    }

    fn redraw(&self) -> anyhow::Result<()> {
        self.print(&self.state.view())
    }

    fn print(&self, view: &AppViewModel) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out)?;
        for line in render(view, self.results_at) {
            writeln!(out, "{line}")?;
        }
        if matches!(view.screen, Screen::InputForm | Screen::Failed) {
            write!(out, "> ")?;
        }
        out.flush()?;
        Ok(())
    }
}
