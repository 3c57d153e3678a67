//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use std::path::Path;

use crate::cli::{
    ActiveSection, ContactCmd, ContactResponse, ExitCode, Output, SectionsCmd, ThemeAction,
    ThemeCmd, ThemeStatus,
};
use crate::launcher;
use crate::models::Portfolio;
use crate::page::contact::{ContactMessage, SUCCESS_MESSAGE};
use crate::page::document::Document;
use crate::page::scroll::{section_at, HeaderTracker, HeaderVisibility, READING_LINE};
use crate::page::storage::PreferenceStore;
use crate::page::theme::{load_preference, THEME_KEY};

// =============================================================================
// Theme Command
// =============================================================================

/// Show, toggle or set the stored preference. Unlike the interactive page,
/// a failed write is an error here.
pub fn theme_cmd(
    cmd: ThemeCmd,
    store: &dyn PreferenceStore,
    location: Option<&Path>,
    output: &Output,
) -> ExitCode {
    let current = load_preference(store);
    let next = match cmd.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => None,
        ThemeAction::Toggle => Some(current.flipped()),
        ThemeAction::Set { theme } => Some(theme.into()),
    };

    let pref = match next {
        Some(pref) => {
            if let Err(e) = store.set(THEME_KEY, pref.as_str()) {
                return output.error(format!("Failed to save theme: {}", e), ExitCode::StorageError);
            }
            tracing::info!(theme = %pref, "theme saved");
            pref
        }
        None => current,
    };

    let status = ThemeStatus {
        theme: pref.to_string(),
        icon: pref.icon().to_string(),
        storage: location.map(|p| p.display().to_string()),
    };

    if output.json {
        if let Err(e) = output.print(&status) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(format!("{} {}", status.theme, status.icon));
    }
    ExitCode::Success
}

// =============================================================================
// Contact Command
// =============================================================================

pub async fn contact_cmd(cmd: ContactCmd, to: String, output: &Output) -> ExitCode {
    let message = match ContactMessage::new(&cmd.name, &cmd.email, &cmd.subject, &cmd.message) {
        Ok(message) => message,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    let uri = message.mailto(&to);

    let mut opened = false;
    if cmd.open {
        output.info(SUCCESS_MESSAGE);
        if let Err(e) = launcher::open_uri(&uri).await {
            tracing::error!(error = %e, "could not open mail client");
            return output.error(e.to_string(), ExitCode::LaunchFailed);
        }
        opened = true;
    }

    let response = ContactResponse { to, uri, opened };
    if output.json {
        if let Err(e) = output.print(&response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(&response.uri);
    }
    ExitCode::Success
}

// =============================================================================
// Sections Command
// =============================================================================

pub fn sections_cmd(cmd: SectionsCmd, portfolio: &Portfolio, output: &Output) -> ExitCode {
    let document = Document::layout(portfolio);

    let result = match cmd.at {
        None => {
            if output.json {
                output.print(&document.sections)
            } else {
                for s in &document.sections {
                    output.line(format!("{:<14} {:>6} {:>6}  {}", s.id, s.top, s.height, s.title));
                }
                Ok(())
            }
        }
        Some(offset) => {
            let section = section_at(&document.sections, offset.saturating_add(READING_LINE))
                .map(|i| document.sections[i].id.clone());
            let header_visible = HeaderTracker::default().on_scroll(offset) == HeaderVisibility::Visible;
            let active = ActiveSection {
                offset,
                header_visible,
                section,
            };
            if output.json {
                output.print(&active)
            } else {
                output.line(active.section.as_deref().unwrap_or("-"));
                Ok(())
            }
        }
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ThemeArg;
    use crate::page::storage::MemoryStore;
    use crate::page::theme::ThemePreference;

    fn quiet() -> Output {
        Output {
            json: false,
            quiet: true,
        }
    }

    #[test]
    fn test_theme_toggle_persists() {
        let store = MemoryStore::new();
        let code = theme_cmd(
            ThemeCmd {
                action: Some(ThemeAction::Toggle),
            },
            &store,
            None,
            &quiet(),
        );
        assert_eq!(code, ExitCode::Success);
        assert_eq!(load_preference(&store), ThemePreference::Dark);

        theme_cmd(
            ThemeCmd {
                action: Some(ThemeAction::Set {
                    theme: ThemeArg::Light,
                }),
            },
            &store,
            None,
            &quiet(),
        );
        assert_eq!(load_preference(&store), ThemePreference::Light);
    }

    #[tokio::test]
    async fn test_contact_invalid_email_exit_code() {
        let cmd = ContactCmd {
            name: "Ada".into(),
            email: "ada".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
            to: None,
            open: false,
        };
        let code = contact_cmd(cmd, "me@site.dev".into(), &quiet()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_contact_valid() {
        let cmd = ContactCmd {
            name: "Ada".into(),
            email: "ada@example.org".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
            to: None,
            open: false,
        };
        let code = contact_cmd(cmd, "me@site.dev".into(), &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_sections_at_offset() {
        let code = sections_cmd(SectionsCmd { at: Some(400) }, &Portfolio::builtin(), &quiet());
        assert_eq!(code, ExitCode::Success);
    }
}
