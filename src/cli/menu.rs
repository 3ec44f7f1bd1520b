//! Interactive dashboard for hrdash
//!
//! Uses inquire to pick a provider, then hands over to the directory table.

use anyhow::{anyhow, Result};
use inquire::Select;
use std::io::{self, IsTerminal};

use crate::api::HrApi;
use crate::cli::list::{run_directory_view, Exit};
use crate::cli::ui::{clear_screen, minimal_render_config};
use crate::models::Provider;
use crate::session::Session;

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Connect(Provider),
    Quit,
}

impl MenuOption {
    fn all() -> Vec<MenuOption> {
        Provider::ALL
            .iter()
            .copied()
            .map(MenuOption::Connect)
            .chain(std::iter::once(MenuOption::Quit))
            .collect()
    }

    fn label(self) -> &'static str {
        match self {
            MenuOption::Connect(provider) => provider.label(),
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        Self::all().into_iter().find(|opt| opt.label() == s)
    }
}

/// Run the interactive dashboard
pub fn run_menu<A: HrApi>(session: &mut Session<A>) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow!(
            "Interactive dashboard requires a terminal. Use subcommands for non-interactive use:\n  \
            hrdash providers\n  \
            hrdash directory <provider>\n  \
            hrdash show <provider> <employee-id>\n  \
            Run 'hrdash --help' for all options."
        ));
    }

    let labels: Vec<&str> = MenuOption::all().into_iter().map(MenuOption::label).collect();

    session.on_loading(|loading| {
        if let Some(what) = loading.label() {
            println!("Loading {}...", what);
        }
    });

    loop {
        let _ = clear_screen();

        let mut prompt = Select::new("provider", labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(labels.len())
            .with_vim_mode(true);
        if let Some(idx) = session
            .selected_provider()
            .and_then(|current| Provider::ALL.iter().position(|p| *p == current))
        {
            prompt = prompt.with_starting_cursor(idx);
        }

        // Ctrl+C and terminal errors exit quietly
        let Ok(Some(choice_label)) = prompt.prompt_skippable() else {
            return Ok(());
        };

        let Some(MenuOption::Connect(provider)) = MenuOption::from_label(choice_label) else {
            return Ok(());
        };

        let _ = clear_screen();
        println!("Connecting to {}...", provider.label());
        session.select_provider(provider);

        if run_directory_view(session)? == Exit::Quit {
            return Ok(());
        }
    }
}
