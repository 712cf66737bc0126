//! Application state

use crate::tuner::Tuner;
use stat_core::{
    default_preset, Modifier, ModifierSource, PersistError, StatChange, StatPreset, StatRegistry,
};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};

/// Source tag for the buffs applied with `p`
pub const BUFF_SOURCE: &str = "buff";

/// Most recent change notifications kept for the log tab
const CHANGE_LOG_LIMIT: usize = 200;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Stats,
    Breakdown,
    Changes,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Stats, Tab::Breakdown, Tab::Changes, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Stats => "Stats",
            Tab::Breakdown => "Calc",
            Tab::Changes => "Changes",
            Tab::Help => "Help",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub registry: StatRegistry,
    pub tuner: Tuner,
    pub selected: usize,
    pub step: f64,
    /// Filled by the registry subscription
    pub changes: Rc<RefCell<Vec<StatChange>>>,
    pub log_scroll: usize,
    pub status: String,
    pub save_path: PathBuf,
}

impl App {
    pub fn new() -> Self {
        Self::with_preset(&default_preset())
    }

    pub fn with_preset(preset: &StatPreset) -> Self {
        let mut registry = StatRegistry::with_definitions("tuner", &preset.stats);

        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        registry.subscribe(move |change: &StatChange| {
            let mut log = sink.borrow_mut();
            log.push(change.clone());
            if log.len() > CHANGE_LOG_LIMIT {
                log.remove(0);
            }
        });

        App {
            current_tab: Tab::Stats,
            registry,
            tuner: Tuner::new(),
            selected: 0,
            step: 1.0,
            changes,
            log_scroll: 0,
            status: String::from("Ready"),
            save_path: PathBuf::from("stat_tui_save.json"),
        }
    }

    pub fn selected_name(&self) -> Option<String> {
        self.registry
            .all_stat_names()
            .nth(self.selected)
            .map(str::to_string)
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn toggle_help(&mut self) {
        self.current_tab = if self.current_tab == Tab::Help {
            Tab::Stats
        } else {
            Tab::Help
        };
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Changes => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => self.selected = self.selected.saturating_sub(1),
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Changes => {
                if self.log_scroll + 1 < self.changes.borrow().len() {
                    self.log_scroll += 1;
                }
            }
            _ => {
                if self.selected + 1 < self.registry.len() {
                    self.selected += 1;
                }
            }
        }
    }

    pub fn cycle_step(&mut self) {
        self.step = match self.step {
            s if s >= 10.0 => 0.1,
            s if s >= 1.0 => 10.0,
            _ => 1.0,
        };
        self.status = format!("Step: {}", self.step);
    }

    // === Tuning ===

    pub fn nudge(&mut self, direction: f64) {
        let Some(name) = self.selected_name() else {
            return;
        };
        if self.tuner.nudge(&mut self.registry, &name, direction * self.step) {
            let desired = self.tuner.desired(&self.registry, &name).unwrap_or_default();
            self.status = format!("{} → desired {:.2}", name, desired);
        }
    }

    pub fn toggle_pin(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        let pinned = self.tuner.toggle_pin(&mut self.registry, &name);
        self.status = if pinned {
            format!("{} pinned at {:.2}", name, self.registry.get_value(&name))
        } else {
            format!("{} released", name)
        };
    }

    pub fn add_buff(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        if self
            .registry
            .add_modifier(&name, Modifier::percent(0.10).with_source(BUFF_SOURCE))
        {
            self.status = format!("{} +10% buff", name);
        }
    }

    pub fn clear_buffs(&mut self) {
        let removed = self
            .registry
            .remove_all_modifiers_from_source(&ModifierSource::from(BUFF_SOURCE));
        self.status = format!("Removed {} buff(s)", removed);
    }

    pub fn clear_selected(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        self.registry.remove_all_modifiers(&name);
        self.tuner.sync(&self.registry);
        self.status = format!("Cleared modifiers on {}", name);
    }

    pub fn reset_tuning(&mut self) {
        let removed = self.tuner.reset(&mut self.registry);
        self.status = format!("Removed {} tuner modifier(s)", removed);
    }

    // === Persistence ===

    fn write_save(&self) -> Result<(), SaveError> {
        let blob = self.registry.serialize_base_values()?;
        fs::write(&self.save_path, blob)?;
        Ok(())
    }

    fn read_save(&mut self) -> Result<usize, SaveError> {
        let blob = fs::read_to_string(&self.save_path)?;
        Ok(self.registry.deserialize_base_values(&blob)?)
    }

    pub fn save(&mut self) {
        match self.write_save() {
            Ok(()) => {
                info!(path = %self.save_path.display(), "saved base values");
                self.status = format!("Saved to {}", self.save_path.display());
            }
            Err(err) => {
                warn!(%err, "save failed");
                self.status = format!("Save failed: {}", err);
            }
        }
    }

    /// Restore base values; failures are logged and shown, never fatal
    pub fn load(&mut self) {
        match self.read_save() {
            Ok(restored) => {
                info!(path = %self.save_path.display(), restored, "loaded base values");
                self.status = format!("Restored {} base value(s)", restored);
            }
            Err(err) => {
                warn!(%err, "load failed");
                self.status = format!("Load failed: {}", err);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
