//! German reply texts and the main menu keyboard.

use std::fmt::Write as _;

use super::command::{
    BUTTON_HELP, BUTTON_LEADERBOARD, BUTTON_MY_REPORTS, BUTTON_NEW_REPORT, CommandParseError,
};
use super::event::OutboundMessage;
use crate::domain::ports::RemovedReport;
use crate::domain::{
    AddressError, ConfirmedReport, ConversationOutcome, ConversationStep, Error, ErrorCode,
    InputRejection, LeaderboardEntry, Report, UserValidationError,
};

pub const ADDRESS_FORMAT_HINT: &str =
    "Bitte gib die Adresse im Format 'Straße Hausnummer, Stadt' an.";

/// Main menu keyboard rows.
pub fn main_menu() -> Vec<Vec<String>> {
    vec![
        vec![BUTTON_NEW_REPORT.to_owned(), BUTTON_LEADERBOARD.to_owned()],
        vec![BUTTON_MY_REPORTS.to_owned(), BUTTON_HELP.to_owned()],
    ]
}

fn with_menu(text: impl Into<String>) -> OutboundMessage {
    OutboundMessage::text(text).with_menu(main_menu())
}

/// Question asked while a conversation waits on `step`.
pub fn prompt(step: ConversationStep) -> &'static str {
    match step {
        ConversationStep::AwaitingAlias => {
            "Willkommen beim Leerstandsmelder! Bitte gib einen Nutzernamen ein:"
        }
        ConversationStep::ApartmentDetails => {
            "Beschreibe kurz die Wohnung, zum Beispiel Etage und Lage im Haus."
        }
        ConversationStep::Photo => "Bitte sende ein Foto der leerstehenden Wohnung.",
        ConversationStep::Address => {
            "Danke! Jetzt bitte die Adresse im Format 'Straße Hausnummer, Stadt'."
        }
        ConversationStep::Duration => "Wie lange steht die Wohnung vermutlich schon leer?",
    }
}

fn rejection(reason: &InputRejection) -> String {
    match reason {
        InputRejection::Alias(UserValidationError::AliasTooShort { min }) => {
            format!("Der Nutzername muss mindestens {min} Zeichen lang sein.")
        }
        InputRejection::Alias(UserValidationError::AliasTooLong { max }) => {
            format!("Der Nutzername darf höchstens {max} Zeichen lang sein.")
        }
        InputRejection::Alias(_) => "Dieser Nutzername ist ungültig.".to_owned(),
        InputRejection::Address(AddressError::MissingComma) => {
            format!("Zwischen Straße und Stadt fehlt das Komma. {ADDRESS_FORMAT_HINT}")
        }
        InputRejection::Address(AddressError::MissingHouseNumber) => {
            format!("Die Hausnummer fehlt. {ADDRESS_FORMAT_HINT}")
        }
        InputRejection::Address(AddressError::MissingCity) => {
            format!("Die Stadt fehlt. {ADDRESS_FORMAT_HINT}")
        }
        InputRejection::EmptyText => "Bitte schreib eine kurze Antwort.".to_owned(),
        InputRejection::ExpectedPhoto => "Hier brauche ich ein Foto.".to_owned(),
        InputRejection::ExpectedText => "Hier brauche ich eine Textantwort.".to_owned(),
    }
}

/// Reply for a conversation outcome.
pub fn outcome(outcome: &ConversationOutcome) -> OutboundMessage {
    match outcome {
        ConversationOutcome::Prompted(step) => OutboundMessage::text(prompt(*step)),
        ConversationOutcome::Rejected { step, reason } => {
            // Address rejections already carry the expected format.
            let text = match (step, reason) {
                (ConversationStep::Address, InputRejection::Address(_)) => rejection(reason),
                _ => format!("{}\n{}", rejection(reason), prompt(*step)),
            };
            OutboundMessage::text(text)
        }
        ConversationOutcome::Welcome { alias } => with_menu(format!(
            "Willkommen zurück, {alias}! Wähle unten, was du tun möchtest."
        )),
        ConversationOutcome::Registered { alias } => with_menu(format!(
            "Danke {alias}! Du kannst jetzt eine {BUTTON_NEW_REPORT} machen oder die \
             {BUTTON_LEADERBOARD} anschauen."
        )),
        ConversationOutcome::Completed { report, awarded } => with_menu(format!(
            "Meldung #{} gespeichert! Du hast {awarded} Punkte bekommen.",
            report.id()
        )),
        ConversationOutcome::NoSession => help(),
    }
}

pub fn help() -> OutboundMessage {
    with_menu(
        "📢 Mit diesem Bot kannst du Leerstand melden. Nutze die Buttons, um loszulegen.\n\
         /melden startet eine neue Meldung.\n\
         /meine zeigt deine Meldungen, /alle zeigt alle Meldungen.\n\
         /bestaetige_<Nr> bestätigt eine Meldung.\n\
         /bestenliste zeigt die Bestenliste.",
    )
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> OutboundMessage {
    if entries.is_empty() {
        return with_menu("🏆 Noch keine Punkte vergeben.");
    }
    let mut text = String::from("🏆 Bestenliste:");
    for (rank, entry) in entries.iter().enumerate() {
        let _ = write!(text, "\n{}. {} – {} Punkte", rank + 1, entry.alias, entry.points);
    }
    with_menu(text)
}

/// Report listing under `title`; `empty` is shown when there are none.
pub fn reports(title: &str, empty: &str, reports: &[Report]) -> OutboundMessage {
    if reports.is_empty() {
        return with_menu(empty);
    }
    let mut text = String::from(title);
    for report in reports {
        let _ = write!(
            text,
            "\n\n#{id} {address}\nLeer seit: {duration}",
            id = report.id(),
            address = report.address(),
            duration = report.duration_estimate(),
        );
        if let Some(details) = report.apartment_details() {
            let _ = write!(text, "\nWohnung: {details}");
        }
        let _ = write!(
            text,
            "\nBestätigungen: {count} · /bestaetige_{id}",
            count = report.confirmation_count(),
            id = report.id(),
        );
    }
    with_menu(text)
}

pub fn confirmed(confirmed: &ConfirmedReport) -> OutboundMessage {
    with_menu(format!(
        "Danke! Meldung #{} hat jetzt {} Bestätigung(en).",
        confirmed.report_id, confirmed.confirmation_count
    ))
}

pub fn removed(removed: &RemovedReport) -> OutboundMessage {
    with_menu(format!("Meldung #{} wurde gelöscht.", removed.report.id()))
}

pub fn command_error(err: &CommandParseError) -> OutboundMessage {
    let text = match err {
        CommandParseError::Unknown { name } => {
            format!("Den Befehl /{name} kenne ich nicht. /hilfe zeigt alle Befehle.")
        }
        CommandParseError::MissingReportId { command } => {
            format!("Bitte gib die Nummer der Meldung an, zum Beispiel /{command}_12.")
        }
        CommandParseError::InvalidReportId { value } => {
            format!("'{value}' ist keine gültige Meldungsnummer.")
        }
    };
    with_menu(text)
}

/// Reply for a failed operation.
///
/// Storage and internal failures use a generic text; the session, if any,
/// is still in place so the user can retry.
pub fn error(err: &Error) -> OutboundMessage {
    let text = match err.code() {
        ErrorCode::NotFound => "Diese Meldung gibt es nicht.",
        ErrorCode::Unauthorized => "Dazu bist du nicht berechtigt.",
        ErrorCode::InvalidRequest => "Das habe ich nicht verstanden. /hilfe zeigt alle Befehle.",
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => {
            "Da ist etwas schiefgelaufen. Bitte versuche es gleich noch einmal."
        }
    };
    OutboundMessage::text(text)
}
