//! Shared UI primitives for hrdash
//!
//! Design principles:
//! - Minimal: Show only what's needed
//! - Clean: No decorative borders or lines
//! - Consistent: Same patterns everywhere
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `search: `
//! - Navigation hints: arrows in brackets: `[↑/↓]`
//! - Feedback: single word when possible: `Dismissed.`

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Text};
use std::io::{self, Write};

// ============================================================================
// Status Bar Builder
// ============================================================================

/// Maximum actions a status bar can hold (stack-allocated)
const MAX_STATUS_ACTIONS: usize = 10;

/// Builder for consistent status bar formatting.
///
/// Example output: "12/345 [/]search [d]epts [q]uit"
pub struct StatusBar<'a> {
    counter: Option<(usize, usize)>,
    actions: [Option<(&'a str, &'a str)>; MAX_STATUS_ACTIONS],
    action_count: usize,
}

impl<'a> StatusBar<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            counter: None,
            actions: [None; MAX_STATUS_ACTIONS],
            action_count: 0,
        }
    }

    /// Add a counter (current/total)
    #[inline]
    pub fn counter(mut self, current: usize, total: usize) -> Self {
        self.counter = Some((current, total));
        self
    }

    /// Add an action hint (key, label)
    /// Example: `.action("d", "epts")` produces `[d]epts`
    #[inline]
    pub fn action(mut self, key: &'a str, label: &'a str) -> Self {
        if self.action_count < MAX_STATUS_ACTIONS {
            self.actions[self.action_count] = Some((key, label));
            self.action_count += 1;
        }
        self
    }

    /// Add a visual separator (" | ")
    #[inline]
    pub fn separator(mut self) -> Self {
        if self.action_count < MAX_STATUS_ACTIONS {
            self.actions[self.action_count] = Some(("|", ""));
            self.action_count += 1;
        }
        self
    }

    /// Render the status bar to a string.
    /// Switches to a two-line format for narrow terminals.
    pub fn render(&self) -> String {
        let full = self.render_full();
        let (width, _) = term_size();

        if full.chars().count() > width.saturating_sub(5) {
            self.render_compact()
        } else {
            full
        }
    }

    fn render_full(&self) -> String {
        let mut result = String::with_capacity(12 + self.action_count * 18);

        if let Some((current, total)) = self.counter {
            result.push_str(&counter(current, total));
        }

        for (key, label) in self.actions.iter().take(self.action_count).flatten() {
            if *key == "|" {
                result.push_str(" | ");
                continue;
            }
            if !result.is_empty() && !result.ends_with(" | ") {
                result.push(' ');
            }
            push_action(&mut result, key, label);
        }

        result
    }

    fn render_compact(&self) -> String {
        let line1 = self
            .counter
            .map(|(current, total)| counter(current, total))
            .unwrap_or_default();
        let mut line2 = String::new();

        for (key, label) in self.actions.iter().take(self.action_count).flatten() {
            if *key == "|" {
                line2.push_str(" | ");
                continue;
            }
            if !line2.is_empty() && !line2.ends_with(" | ") {
                line2.push(' ');
            }
            push_action(&mut line2, key, label);
        }

        format!("{}\n{}", line1, line2.trim())
    }
}

fn push_action(out: &mut String, key: &str, label: &str) {
    out.push('[');
    out.push_str(key);
    out.push(']');
    out.push_str(label);
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Layout Primitives
// ============================================================================

/// Return selection prefix for list items
#[inline]
pub fn selection_prefix(selected: bool) -> &'static str {
    if selected {
        "> "
    } else {
        "  "
    }
}

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let truncate_at = max_chars.saturating_sub(1);
    let mut truncate_idx = 0;

    for (count, (idx, _)) in s.char_indices().enumerate() {
        if count == truncate_at {
            truncate_idx = idx;
        }
        if count + 1 > max_chars {
            return format!("{}…", &s[..truncate_idx]);
        }
    }

    s.to_string()
}

/// Format a counter string (e.g., "12/345")
#[inline]
pub fn counter(current: usize, total: usize) -> String {
    format!("{}/{}", current, total)
}

// ============================================================================
// Raw Mode
// ============================================================================

/// RAII guard that ensures raw mode is disabled on drop
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Block until a key is pressed and return its code.
/// Non-key events and key releases are skipped.
pub fn read_key() -> Result<KeyCode> {
    let _guard = RawModeGuard::new()?;
    loop {
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind != KeyEventKind::Release {
                return Ok(code);
            }
        }
    }
}

/// Wait for Enter, q, or Esc
pub fn wait_for_key() -> Result<()> {
    loop {
        if matches!(
            read_key()?,
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc
        ) {
            return Ok(());
        }
    }
}

/// Display context-sensitive help screen
pub fn show_help(context: &str) -> Result<()> {
    clear_screen()?;

    let help_text = match context {
        "directory" => r#"
DIRECTORY

  j / ↓         Move down
  k / ↑         Move up
  g / G         Jump to first / last
  Enter         View employee details

SEARCH AND SORT

  /             Edit search (empty clears)
  1 - 5         Sort by column; again to reverse

COMPANY

  c             Company profile
  d             Department tree

SESSION

  x             Dismiss oldest error
  p             Change provider
  q / Esc       Quit
  ?             This help screen
"#,
        _ => "Press any key to return.",
    };

    println!("{}", help_text);
    println!("\nPress any key to return...");

    read_key()?;
    Ok(())
}

// ============================================================================
// Terminal
// ============================================================================

/// Clear the terminal screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Get terminal dimensions, defaulting to 80x24 if unavailable
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

/// Number of visible table rows, leaving room for the header block, error
/// banners and status bar. Call inside the display loop to handle resize.
pub fn visible_lines(reserved: usize) -> usize {
    let (_, height) = term_size();
    height.saturating_sub(reserved).max(5)
}

// ============================================================================
// Prompts
// ============================================================================

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Prompt for text input with optional default value
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());

    if let Some(d) = default {
        if !d.is_empty() {
            builder = builder.with_default(d);
        }
    }

    Ok(builder.prompt_skippable()?)
}
