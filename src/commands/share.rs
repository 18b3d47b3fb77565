//! Share command - build a `mailto:` link for a set of recipes

use super::resolve_id;
use crate::api::RecipeBackend;
use crate::session::RecipeSession;
use crate::share::{copy_link, open_link};
use crate::Result;
use colored::Colorize;

/// Where the finished link goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkTarget {
    /// Print to stdout
    #[default]
    Print,
    /// Hand to the default mail client
    Open,
    /// Copy to the clipboard
    Clipboard,
}

impl LinkTarget {
    #[must_use]
    pub const fn from_flags(open: bool, copy: bool) -> Self {
        match (open, copy) {
            (true, _) => Self::Open,
            (false, true) => Self::Clipboard,
            (false, false) => Self::Print,
        }
    }
}

/// Select `keys` and deliver the share link
///
/// # Errors
///
/// Returns `RecipeBoxError::NotFound` for an unknown id and
/// `RecipeBoxError::Share` if the link cannot be built or delivered.
pub fn execute<B: RecipeBackend + 'static>(
    session: &mut RecipeSession<B>,
    keys: &[String],
    subject: &str,
    target: LinkTarget,
    quiet: bool,
) -> Result<String> {
    for key in keys {
        let id = resolve_id(session, key)?;
        if !session.selection().contains(&id) {
            session.toggle_selection(id);
        }
    }

    let link = session.share_link(subject)?;
    match target {
        LinkTarget::Print => println!("{link}"),
        LinkTarget::Open => {
            open_link(&link)?;
            if !quiet {
                println!("{} Opened mail client with {} recipe(s)", "✓".green(), session.selection().len());
            }
        }
        LinkTarget::Clipboard => {
            copy_link(&link)?;
            if !quiet {
                println!("{} Copied share link for {} recipe(s)", "✓".green(), session.selection().len());
            }
        }
    }
    Ok(link)
}
