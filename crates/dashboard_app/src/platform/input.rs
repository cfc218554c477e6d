use dashboard_core::{MenuAction, Modifiers, Msg};
use thiserror::Error;

pub(crate) const HELP: &str = "\
reload                  reload the table
click|ctrl|shift N      click row N (0-based) with modifier
dbl N                   double-click row N (info view)
menu N                  right-click row N
close                   dismiss the context menu
info|edit|copy|approve|delete
                        pick a context menu entry
del                     press the delete key
yes|no                  answer the delete prompt
expand ID               expand/collapse the jobs of request ID
reschedule JOB          reschedule a failed parametric job
new                     open the new request form
set NAME=VALUE          set a form field
add NAME=VALUE          append a repeated form field
submit|cancel           submit or discard the form
hide                    close the info view
dismiss                 dismiss the alert
quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Msg(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("unknown command {0:?}, try \"help\"")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("expected NAME=VALUE, got {0:?}")]
    NotAField(String),
}

/// Turns one line typed at the prompt into a gesture.
pub(crate) fn parse_line(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "reload" | "r" => Msg::ReloadRequested,
        "click" => click("click", rest, Modifiers::None)?,
        "ctrl" => click("ctrl", rest, Modifiers::Ctrl)?,
        "shift" => click("shift", rest, Modifiers::Shift)?,
        "dbl" => Msg::RowDoubleClicked {
            index: number("dbl", rest)?,
        },
        "menu" => Msg::ContextMenuOpened {
            index: number("menu", rest)?,
        },
        "close" => Msg::ContextMenuDismissed,
        "info" => Msg::MenuActionChosen(MenuAction::Info),
        "edit" => Msg::MenuActionChosen(MenuAction::Edit),
        "copy" => Msg::MenuActionChosen(MenuAction::Copy),
        "approve" => Msg::MenuActionChosen(MenuAction::Approve),
        "delete" => Msg::MenuActionChosen(MenuAction::Delete),
        "del" => Msg::DeleteKeyPressed,
        "yes" | "y" => Msg::DeleteConfirmed(true),
        "no" | "n" => Msg::DeleteConfirmed(false),
        "expand" => Msg::DetailToggled {
            request_id: number("expand", rest)?,
        },
        "reschedule" => Msg::RescheduleClicked {
            job_id: number("reschedule", rest)?,
        },
        "new" => Msg::FormOpened,
        "set" => {
            let (name, value) = field("set", rest)?;
            Msg::FormFieldSet { name, value }
        }
        "add" => {
            let (name, value) = field("add", rest)?;
            Msg::FormFieldAdded { name, value }
        }
        "submit" => Msg::FormSubmitted,
        "cancel" => Msg::FormCancelled,
        "hide" => Msg::InfoDismissed,
        "dismiss" => Msg::AlertDismissed,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(Command::Msg(msg)))
}

fn click(word: &'static str, rest: &str, modifiers: Modifiers) -> Result<Msg, InputError> {
    Ok(Msg::RowClicked {
        index: number(word, rest)?,
        modifiers,
    })
}

fn number<T: std::str::FromStr>(word: &'static str, rest: &str) -> Result<T, InputError> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument(word));
    }
    rest.parse()
        .map_err(|_| InputError::NotANumber(rest.to_string()))
}

fn field(word: &'static str, rest: &str) -> Result<(String, String), InputError> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument(word));
    }
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| InputError::NotAField(rest.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::NotAField(rest.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn msg(line: &str) -> Msg {
        match parse_line(line) {
            Ok(Some(Command::Msg(msg))) => msg,
            other => panic!("{line:?} parsed to {other:?}"),
        }
    }

    #[test]
    fn clicks_carry_modifiers() {
        assert_eq!(
            msg("click 3"),
            Msg::RowClicked {
                index: 3,
                modifiers: Modifiers::None
            }
        );
        assert_eq!(
            msg("  shift   7 "),
            Msg::RowClicked {
                index: 7,
                modifiers: Modifiers::Shift
            }
        );
        assert_eq!(
            msg("ctrl 0"),
            Msg::RowClicked {
                index: 0,
                modifiers: Modifiers::Ctrl
            }
        );
    }

    #[test]
    fn form_fields_keep_spaces_in_values() {
        assert_eq!(
            msg("add selected_macros = bg.mac 10 1000 1"),
            Msg::FormFieldAdded {
                name: "selected_macros".to_string(),
                value: "bg.mac 10 1000 1".to_string(),
            }
        );
        assert_eq!(
            msg("set description=a=b"),
            Msg::FormFieldSet {
                name: "description".to_string(),
                value: "a=b".to_string(),
            }
        );
    }

    #[test]
    fn delete_gestures() {
        assert_eq!(msg("del"), Msg::DeleteKeyPressed);
        assert_eq!(msg("delete"), Msg::MenuActionChosen(MenuAction::Delete));
        assert_eq!(msg("y"), Msg::DeleteConfirmed(true));
        assert_eq!(msg("no"), Msg::DeleteConfirmed(false));
    }

    #[test]
    fn ids_are_numeric() {
        assert_eq!(msg("expand 42"), Msg::DetailToggled { request_id: 42 });
        assert_eq!(
            parse_line("reschedule seven"),
            Err(InputError::NotANumber("seven".to_string()))
        );
        assert_eq!(
            parse_line("menu"),
            Err(InputError::MissingArgument("menu"))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("quit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_line("frobnicate 1"),
            Err(InputError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            parse_line("set =x"),
            Err(InputError::NotAField("=x".to_string()))
        );
    }
}
