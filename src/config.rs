//! User configuration: key bindings, scroll tuning and the remembered
//! language.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/studio-landing/config.toml`
//! (default `~/.config/studio-landing/config.toml`).  Unknown keys are
//! ignored and bad values fall back to the default for that key only.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::blend::{BlendCurve, RadiusCollapse};
use crate::core::content::Language;
use crate::core::pager::PagerTiming;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    NextSection,
    PrevSection,
    ToggleLanguage,
    CopyEmail,
    ToggleWorks,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::NextSection,
        Action::PrevSection,
        Action::ToggleLanguage,
        Action::CopyEmail,
        Action::ToggleWorks,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollDown => "Scroll Down",
            Action::ScrollUp => "Scroll Up",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Previous Section",
            Action::ToggleLanguage => "EN / KR",
            Action::CopyEmail => "Copy Email",
            Action::ToggleWorks => "More / Collapse Works",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::ToggleLanguage => "toggle_language",
            Action::CopyEmail => "copy_email",
            Action::ToggleWorks => "toggle_works",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.  Uppercase letters arrive with
    /// SHIFT set on some terminals and without it on others, so SHIFT is
    /// ignored for character keys.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = modifier_mask();
        if matches!(self.code, KeyCode::Char(_)) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Display string (e.g. `"↓"`, `"Ctrl+c"`, `"Space"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Down"`, `"Ctrl+c"`, `"Space"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let arrow = |glyph: &'static str, word: &'static str| if pretty { glyph } else { word };
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => arrow("↑", "Up").into(),
            KeyCode::Down => arrow("↓", "Down").into(),
            KeyCode::Left => arrow("←", "Left").into(),
            KeyCode::Right => arrow("→", "Right").into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => arrow("PgUp", "PageUp").into(),
            KeyCode::PageDown => arrow("PgDn", "PageDown").into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Tab"`, `"q"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Single characters keep their case.
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── tuning ────────────

/// Scroll and transition constants.  Every field is range-clamped on load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub section_threshold: f64,
    pub blend_deadzone: f64,
    pub blend_spread: f64,
    pub radius_cap: f64,
    pub noise_floor: f64,
    pub paging_cooldown_ms: u64,
    pub exit_intent_ms: u64,
    pub entry_grace_ms: u64,
    /// Wheel delta synthesised per mouse notch or scroll key.
    pub wheel_delta: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            section_threshold: 0.1,
            blend_deadzone: 0.03,
            blend_spread: 0.55,
            radius_cap: 0.8,
            noise_floor: 6.0,
            paging_cooldown_ms: 650,
            exit_intent_ms: 900,
            entry_grace_ms: 400,
            wheel_delta: 40.0,
        }
    }
}

impl Tuning {
    pub fn blend_curve(&self) -> BlendCurve {
        BlendCurve {
            deadzone: self.blend_deadzone,
            spread: self.blend_spread,
        }
    }

    pub fn radius_collapse(&self) -> RadiusCollapse {
        RadiusCollapse {
            cap: self.radius_cap,
            ..RadiusCollapse::default()
        }
    }

    pub fn pager_timing(&self) -> PagerTiming {
        PagerTiming {
            noise_floor: self.noise_floor,
            cooldown: Duration::from_millis(self.paging_cooldown_ms),
            exit_window: Duration::from_millis(self.exit_intent_ms),
            entry_grace: Duration::from_millis(self.entry_grace_ms),
        }
    }

    /// Apply one `key = value` pair.  Returns `false` for keys that are not
    /// tuning keys.
    fn apply(&mut self, key: &str, value: &str) -> bool {
        fn float(v: &str, lo: f64, hi: f64) -> Option<f64> {
            v.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.clamp(lo, hi))
        }
        fn millis(v: &str, lo: u64, hi: u64) -> Option<u64> {
            v.parse::<u64>().ok().map(|n| n.clamp(lo, hi))
        }

        match key {
            "section_threshold" => {
                if let Some(v) = float(value, 0.01, 1.0) {
                    self.section_threshold = v;
                }
            }
            "blend_deadzone" => {
                if let Some(v) = float(value, 0.0, 0.5) {
                    self.blend_deadzone = v;
                }
            }
            "blend_spread" => {
                if let Some(v) = float(value, 0.05, 1.0) {
                    self.blend_spread = v;
                }
            }
            "radius_cap" => {
                if let Some(v) = float(value, 0.1, 1.0) {
                    self.radius_cap = v;
                }
            }
            "noise_floor" => {
                if let Some(v) = float(value, 0.0, 100.0) {
                    self.noise_floor = v;
                }
            }
            "paging_cooldown_ms" => {
                if let Some(v) = millis(value, 0, 5_000) {
                    self.paging_cooldown_ms = v;
                }
            }
            "exit_intent_ms" => {
                if let Some(v) = millis(value, 100, 5_000) {
                    self.exit_intent_ms = v;
                }
            }
            "entry_grace_ms" => {
                if let Some(v) = millis(value, 0, 5_000) {
                    self.entry_grace_ms = v;
                }
            }
            "wheel_delta" => {
                if let Some(v) = float(value, 1.0, 1_000.0) {
                    self.wheel_delta = v;
                }
            }
            _ => return false,
        }
        true
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: key bindings, tuning and language.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub tuning: Tuning,
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tuning: Tuning::default(),
            language: Language::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(
            ScrollDown,
            vec![
                KeyBind::new(Down, n),
                KeyBind::new(Char('j'), n),
                KeyBind::new(PageDown, n),
                KeyBind::new(Char(' '), n),
            ],
        );
        m.insert(
            ScrollUp,
            vec![
                KeyBind::new(Up, n),
                KeyBind::new(Char('k'), n),
                KeyBind::new(PageUp, n),
            ],
        );
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(
            PrevSection,
            vec![
                KeyBind::new(BackTab, shift),
                KeyBind::new(Char('p'), n),
            ],
        );
        m.insert(ToggleLanguage, vec![KeyBind::new(Char('l'), n)]);
        m.insert(CopyEmail, vec![KeyBind::new(Char('c'), n)]);
        m.insert(ToggleWorks, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, count)| mc > count) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Format the binding list for an action (e.g. `"↓/j/PgDn/Space"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: language | {}: copy email | {}: help",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ToggleLanguage),
            self.short_binding(Action::CopyEmail),
            self.short_binding(Action::Help),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "config loaded");
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if key == "language" {
                if let Some(lang) = Language::parse(value) {
                    config.language = lang;
                }
                continue;
            }
            if config.tuning.apply(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let t = &self.tuning;
        let mut lines = vec![
            "# studio-landing configuration".to_string(),
            String::new(),
            format!("language = {}", self.language.code()),
            String::new(),
            "# Scroll tuning".to_string(),
            format!("section_threshold = {}", t.section_threshold),
            format!("blend_deadzone = {}", t.blend_deadzone),
            format!("blend_spread = {}", t.blend_spread),
            format!("radius_cap = {}", t.radius_cap),
            format!("noise_floor = {}", t.noise_floor),
            format!("paging_cooldown_ms = {}", t.paging_cooldown_ms),
            format!("exit_intent_ms = {}", t.exit_intent_ms),
            format!("entry_grace_ms = {}", t.entry_grace_ms),
            format!("wheel_delta = {}", t.wheel_delta),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/studio-landing/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("studio-landing").join("config.toml")
}
