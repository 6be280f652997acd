//! Chat command parsing.
//!
//! Commands arrive either as slash commands (`/bestaetige_12`,
//! `/loeschen 7`, `/start@leerstand_bot`) or as presses on the main-menu
//! buttons. Both map onto [`ChatCommand`].

use std::fmt;
use std::str::FromStr;

use crate::domain::ReportId;

pub const BUTTON_NEW_REPORT: &str = "📢 Neue Meldung";
pub const BUTTON_LEADERBOARD: &str = "🏆 Bestenliste";
pub const BUTTON_MY_REPORTS: &str = "📋 Meine Meldungen";
pub const BUTTON_HELP: &str = "ℹ️ Hilfe";

const CONFIRM: &str = "bestaetige";
const DELETE: &str = "loeschen";

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    NewReport,
    MyReports,
    AllReports,
    Leaderboard,
    Help,
    Confirm(ReportId),
    AdminDelete(ReportId),
}

/// Reasons a command could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    Unknown { name: String },
    MissingReportId { command: &'static str },
    InvalidReportId { value: String },
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { name } => write!(f, "unknown command: {name}"),
            Self::MissingReportId { command } => write!(f, "/{command} needs a report id"),
            Self::InvalidReportId { value } => write!(f, "not a report id: {value}"),
        }
    }
}

impl std::error::Error for CommandParseError {}

impl ChatCommand {
    /// Parse a command name with its argument text.
    ///
    /// The name may carry a leading `/` and a trailing `@botname`. Commands
    /// that target a report take the id either glued on with `_` or as the
    /// first argument.
    ///
    /// # Examples
    /// ```
    /// use leerstand::inbound::chat::ChatCommand;
    ///
    /// let cmd = ChatCommand::parse("/bestaetige_12", "").expect("valid command");
    /// assert!(matches!(cmd, ChatCommand::Confirm(id) if id.get() == 12));
    /// ```
    pub fn parse(name: &str, args: &str) -> Result<Self, CommandParseError> {
        let name = name.trim().trim_start_matches('/');
        let name = name.split_once('@').map_or(name, |(bare, _)| bare);
        let lowered = name.to_lowercase();

        match lowered.as_str() {
            "start" => return Ok(Self::Start),
            "melden" | "neu" => return Ok(Self::NewReport),
            "meine" => return Ok(Self::MyReports),
            "alle" => return Ok(Self::AllReports),
            "bestenliste" | "rangliste" => return Ok(Self::Leaderboard),
            "hilfe" | "help" => return Ok(Self::Help),
            _ => {}
        }

        if let Some(rest) = targeted(&lowered, CONFIRM) {
            return report_id(rest, args, CONFIRM).map(Self::Confirm);
        }
        if let Some(rest) = targeted(&lowered, DELETE) {
            return report_id(rest, args, DELETE).map(Self::AdminDelete);
        }
        Err(CommandParseError::Unknown {
            name: name.to_owned(),
        })
    }

    /// Map a main-menu button label to its command.
    pub fn from_button(label: &str) -> Option<Self> {
        match label.trim() {
            BUTTON_NEW_REPORT => Some(Self::NewReport),
            BUTTON_LEADERBOARD => Some(Self::Leaderboard),
            BUTTON_MY_REPORTS => Some(Self::MyReports),
            BUTTON_HELP => Some(Self::Help),
            _ => None,
        }
    }

    /// Interpret free text as a command when it starts with `/`.
    pub fn from_text(text: &str) -> Option<Result<Self, CommandParseError>> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }
        let (name, args) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        Some(Self::parse(name, args))
    }
}

/// Remainder after `prefix` when `name` is `prefix` or `prefix_<rest>`.
fn targeted<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('_')
}

fn report_id(glued: &str, args: &str, command: &'static str) -> Result<ReportId, CommandParseError> {
    let raw = if glued.is_empty() {
        args.split_whitespace()
            .next()
            .ok_or(CommandParseError::MissingReportId { command })?
    } else {
        glued
    };
    ReportId::from_str(raw).map_err(|_| CommandParseError::InvalidReportId {
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(value: i64) -> ReportId {
        ReportId::new(value).expect("valid id")
    }

    #[rstest]
    #[case("/start", "", ChatCommand::Start)]
    #[case("start@leerstand_bot", "", ChatCommand::Start)]
    #[case("/melden", "", ChatCommand::NewReport)]
    #[case("/Meine", "", ChatCommand::MyReports)]
    #[case("/alle", "", ChatCommand::AllReports)]
    #[case("/bestenliste", "", ChatCommand::Leaderboard)]
    #[case("/hilfe", "", ChatCommand::Help)]
    #[case("/bestaetige_12", "", ChatCommand::Confirm(id(12)))]
    #[case("/bestaetige", "12", ChatCommand::Confirm(id(12)))]
    #[case("/loeschen_7@leerstand_bot", "", ChatCommand::AdminDelete(id(7)))]
    #[case("/loeschen", " 3 extra", ChatCommand::AdminDelete(id(3)))]
    fn parses_commands(#[case] name: &str, #[case] args: &str, #[case] expected: ChatCommand) {
        assert_eq!(ChatCommand::parse(name, args), Ok(expected));
    }

    #[rstest]
    #[case("/bestaetige", "", CommandParseError::MissingReportId { command: "bestaetige" })]
    #[case("/bestaetige_x", "", CommandParseError::InvalidReportId { value: "x".to_owned() })]
    #[case("/loeschen", "0", CommandParseError::InvalidReportId { value: "0".to_owned() })]
    #[case("/bestaetigen", "", CommandParseError::Unknown { name: "bestaetigen".to_owned() })]
    #[case("/tanzen", "", CommandParseError::Unknown { name: "tanzen".to_owned() })]
    fn rejects_malformed_commands(
        #[case] name: &str,
        #[case] args: &str,
        #[case] expected: CommandParseError,
    ) {
        assert_eq!(ChatCommand::parse(name, args), Err(expected));
    }

    #[rstest]
    #[case(BUTTON_NEW_REPORT, Some(ChatCommand::NewReport))]
    #[case(BUTTON_LEADERBOARD, Some(ChatCommand::Leaderboard))]
    #[case(BUTTON_MY_REPORTS, Some(ChatCommand::MyReports))]
    #[case(BUTTON_HELP, Some(ChatCommand::Help))]
    #[case("Neue Meldung", None)]
    fn maps_buttons(#[case] label: &str, #[case] expected: Option<ChatCommand>) {
        assert_eq!(ChatCommand::from_button(label), expected);
    }

    #[rstest]
    fn free_text_is_not_a_command() {
        assert_eq!(ChatCommand::from_text("Musterstraße 12, Berlin"), None);
        assert_eq!(
            ChatCommand::from_text(" /bestaetige 4 "),
            Some(Ok(ChatCommand::Confirm(id(4))))
        );
    }
}
