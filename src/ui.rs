use crate::app::{update, AppMsg, Effect};
use crate::editor::FieldEditorStore;
use crate::model::{discover_profile, load_profile_from_path, LoadedProfile};
use crate::services::sink::{spawn_save, CommandSink, ProfileSink, SaveMsg, YamlFileSink};
use crate::widgets::form_widget::FormWidget;
use crate::widgets::status_bar::draw_footer;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

// ~200ms tick
const TICK_MS: u64 = 200;
const TICKS_PER_SECOND: u64 = 1000 / TICK_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) title: String,
    pub(crate) store: FieldEditorStore,
    pub(crate) form: FormWidget,
    pub(crate) autosave: bool,
    pub(crate) saving: bool,
    // A save was requested while another was in flight
    pub(crate) save_queued: bool,
    pub(crate) tick: u64,
    pub(crate) toast: Option<Toast>,
    pub(crate) status_text: Option<String>,
    pub(crate) last_error: Option<String>,
    pub(crate) quit_armed: bool,
    pub(crate) sinks: Vec<Arc<dyn ProfileSink>>,
    pub(crate) tx: Option<Sender<SaveMsg>>,
    pub(crate) rx: Option<Receiver<SaveMsg>>,
}

impl AppState {
    pub(crate) fn from_profile(loaded: &LoadedProfile) -> Self {
        let cfg = &loaded.config;
        let table = cfg.options_table();
        let store = FieldEditorStore::new(&cfg.fields, &table);
        info!(
            fields = store.len(),
            option_lists = table.len(),
            autosave = cfg.autosave,
            "form mounted"
        );
        let mut sinks: Vec<Arc<dyn ProfileSink>> = Vec::new();
        if let Some(p) = &cfg.save_path {
            sinks.push(Arc::new(YamlFileSink::new(loaded.resolve_path(p))));
        }
        if let Some(cmd) = &cfg.submit_cmd {
            sinks.push(Arc::new(CommandSink::new(cmd.clone())));
        }
        Self {
            title: cfg.title.clone(),
            store,
            autosave: cfg.autosave,
            sinks,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub edit_mode: bool,
    pub headless: bool,
    pub ticks: u64,
    pub summary: bool,
}

pub(crate) fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::PersistProfile { snapshot } => {
                info!(fields = snapshot.entries.len(), sinks = state.sinks.len(), "persist profile");
                match &state.tx {
                    Some(tx) => spawn_save(state.sinks.clone(), snapshot, tx.clone()),
                    None => {
                        warn!("no save channel; profile not persisted");
                        state.saving = false;
                        state.status_text = None;
                    }
                }
            }
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let exp = state
                    .tick
                    .saturating_add(seconds.saturating_mul(TICKS_PER_SECOND));
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: exp,
                });
            }
        }
    }
}

pub(crate) fn dispatch(state: &mut AppState, msgs: Vec<AppMsg>) {
    for msg in msgs {
        let effects = update(state, msg);
        run_effects(state, effects);
    }
}

fn drain_saves(state: &mut AppState) {
    let mut drained: Vec<SaveMsg> = Vec::new();
    if let Some(rx) = &state.rx {
        while let Ok(msg) = rx.try_recv() {
            drained.push(msg);
        }
    }
    for msg in drained {
        dispatch(state, vec![AppMsg::Saved {
            outcome: msg.outcome,
        }]);
    }
}

fn on_tick(state: &mut AppState) {
    state.tick = state.tick.wrapping_add(1);
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }
}

fn copy_focused(state: &mut AppState) {
    let Some(slot) = state.form.focused(&state.store) else {
        return;
    };
    let content = slot.draft.to_stored();
    let label = slot.label.clone();
    if content.is_empty() {
        return;
    }
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if clipboard.set_text(&content).is_ok() {
            run_effects(
                state,
                vec![Effect::ShowToast {
                    text: format!("Copied {label} to clipboard"),
                    level: ToastLevel::Info,
                    seconds: 2,
                }],
            );
        }
    }
}

/// Routes one key press. Returns true when the app should exit.
pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let armed = std::mem::take(&mut state.quit_armed);
    match key.code {
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('s') if ctrl => {
            let msgs = if state.form.textarea_editing(&state.store) {
                state.form.on_key(key, &state.store)
            } else {
                vec![AppMsg::SaveProfile]
            };
            dispatch(state, msgs);
            return false;
        }
        KeyCode::Char('e') if ctrl => {
            dispatch(state, vec![AppMsg::ToggleEditMode]);
            return false;
        }
        KeyCode::F(2) => {
            dispatch(state, vec![AppMsg::ToggleEditMode]);
            return false;
        }
        KeyCode::Char('v') if ctrl => {
            dispatch(state, vec![AppMsg::ToggleSelectionMode]);
            return false;
        }
        KeyCode::F(3) => {
            dispatch(state, vec![AppMsg::ToggleSelectionMode]);
            return false;
        }
        _ => {}
    }
    if !state.form.captures_input(&state.store) {
        match key.code {
            KeyCode::Char('q') => {
                if state.store.is_dirty() && !armed {
                    state.quit_armed = true;
                    run_effects(
                        state,
                        vec![Effect::ShowToast {
                            text: "Unsaved changes. Press q again to quit, Ctrl+S to save".into(),
                            level: ToastLevel::Error,
                            seconds: 3,
                        }],
                    );
                    return false;
                }
                return true;
            }
            KeyCode::Char('c') => {
                copy_focused(state);
                return false;
            }
            _ => {}
        }
    }
    let msgs = state.form.on_key(key, &state.store);
    dispatch(state, msgs);
    false
}

fn help_text(state: &AppState) -> String {
    let mode = state.store.mode();
    if mode.edit_mode {
        "Editing all • ↑↓ Move • Ctrl+S Save profile • Esc/F2 Leave edit mode".to_string()
    } else if mode.selection_mode {
        "Select • ↑↓ Move • Space Toggle • F3 Done • q Quit".to_string()
    } else {
        "↑↓ Move • e Edit • F2 Edit all • F3 Select • c Copy • Ctrl+S Save • q Quit".to_string()
    }
}

fn ui(f: &mut Frame, state: &mut AppState) {
    let area = f.area();
    f.render_widget(Block::default().style(crate::theme::base_style()), area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);
    let title = format!(" {} ", state.title);
    state
        .form
        .render(f, chunks[0], &title, &state.store, state.tick);
    let help = help_text(state);
    draw_footer(f, chunks[1], state, &help);
}

pub fn run(opts: RunOptions) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path = discover_profile(opts.config.as_deref(), &cwd)?;
    let loaded = load_profile_from_path(&path)?;
    let mut state = AppState::from_profile(&loaded);
    if opts.edit_mode {
        state.store.set_edit_mode(true);
    }
    let (tx, rx) = mpsc::channel::<SaveMsg>();
    state.tx = Some(tx);
    state.rx = Some(rx);
    if opts.headless {
        return run_headless(&mut state, &opts);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = event_loop(&mut terminal, &mut state);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    let tick_rate = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui(f, state))?;
        drain_saves(state);
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("polling terminal events")? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(state, key) {
                    info!("quit");
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            on_tick(state);
            last_tick = Instant::now();
        }
    }
}

fn run_headless(state: &mut AppState, opts: &RunOptions) -> Result<()> {
    let backend = ratatui::backend::TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend)?;
    let ticks = opts.ticks.max(1);
    for _ in 0..ticks {
        terminal.draw(|f| ui(f, state))?;
        drain_saves(state);
        on_tick(state);
        std::thread::sleep(Duration::from_millis(TICK_MS.min(20)));
    }
    info!(ticks, "headless run finished");
    if opts.summary {
        let out = serde_json::json!({
            "title": state.title,
            "fields": state.store.len(),
            "edit_mode": state.store.mode().edit_mode,
            "profile": state.store.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}
