//! Tests for chat event routing.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockConversationCommand, MockReportsCommand, MockReportsQuery, RemovedReport,
};
use crate::domain::{
    Address, Alias, ConfirmedReport, ConversationOutcome, ConversationStep, ExternalId,
    ImageReference, LeaderboardEntry, NewReport, Report, ReportId, UserId,
};

struct Mocks {
    conversation: MockConversationCommand,
    reports_command: MockReportsCommand,
    reports_query: MockReportsQuery,
}

impl Mocks {
    fn new() -> Self {
        Self {
            conversation: MockConversationCommand::new(),
            reports_command: MockReportsCommand::new(),
            reports_query: MockReportsQuery::new(),
        }
    }

    fn expect_cancel(mut self, existed: bool) -> Self {
        self.conversation
            .expect_cancel()
            .times(1)
            .return_once(move |_| existed);
        self
    }

    fn dispatcher(self) -> ChatDispatcher {
        ChatDispatcher::new(
            ChatPorts {
                conversation: Arc::new(self.conversation),
                reports_command: Arc::new(self.reports_command),
                reports_query: Arc::new(self.reports_query),
            },
            DEFAULT_LEADERBOARD_SIZE,
        )
    }
}

fn event(input: ChatInput) -> ChatEvent {
    let identity = ChatIdentity::new(ExternalId::new("4711").expect("valid id"));
    ChatEvent::new(identity, input)
}

fn command(name: &str, args: &str) -> ChatInput {
    ChatInput::Command {
        name: name.to_owned(),
        args: args.to_owned(),
    }
}

fn stored_report(id: i64) -> Report {
    let details = NewReport::new(
        UserId::random(),
        ImageReference::new("photo-1").expect("valid reference"),
        None,
        Address::parse("Teststr 5, Hamburg").expect("valid address"),
        "6 Monate",
    )
    .expect("valid report");
    Report::from_parts(ReportId::new(id).expect("valid id"), details, 0, chrono::Utc::now())
}

#[rstest]
#[tokio::test]
async fn plain_text_advances_the_conversation() {
    let mut mocks = Mocks::new();
    mocks.conversation.expect_cancel().times(0);
    mocks
        .conversation
        .expect_advance()
        .withf(|id, input| {
            id.as_ref() == "4711" && *input == ConversationInput::Text("Alex".to_owned())
        })
        .times(1)
        .return_once(|_, _| Ok(ConversationOutcome::Prompted(ConversationStep::ApartmentDetails)));

    let reply = mocks
        .dispatcher()
        .handle(event(ChatInput::Text("Alex".to_owned())))
        .await;

    assert_eq!(reply.text, render::prompt(ConversationStep::ApartmentDetails));
    assert_eq!(reply.menu, None);
}

#[rstest]
#[tokio::test]
async fn photos_advance_the_conversation() {
    let mut mocks = Mocks::new();
    mocks
        .conversation
        .expect_advance()
        .withf(|_, input| matches!(input, ConversationInput::Photo(bytes) if bytes == b"jpeg"))
        .times(1)
        .return_once(|_, _| Ok(ConversationOutcome::Prompted(ConversationStep::Address)));

    let reply = mocks
        .dispatcher()
        .handle(event(ChatInput::Photo(b"jpeg".to_vec())))
        .await;

    assert_eq!(reply.text, render::prompt(ConversationStep::Address));
}

#[rstest]
#[tokio::test]
async fn text_without_session_shows_help() {
    let mut mocks = Mocks::new();
    mocks
        .conversation
        .expect_advance()
        .times(1)
        .return_once(|_, _| Ok(ConversationOutcome::NoSession));

    let reply = mocks
        .dispatcher()
        .handle(event(ChatInput::Text("hallo".to_owned())))
        .await;

    assert_eq!(reply, render::help());
}

#[rstest]
#[case(ChatInput::Button("🏆 Bestenliste".to_owned()))]
#[case(ChatInput::Text("🏆 Bestenliste".to_owned()))]
#[case(command("/bestenliste", ""))]
#[tokio::test]
async fn leaderboard_interrupts_and_ranks(#[case] input: ChatInput) {
    let mut mocks = Mocks::new().expect_cancel(true);
    mocks
        .reports_query
        .expect_leaderboard()
        .with(eq(DEFAULT_LEADERBOARD_SIZE))
        .times(1)
        .return_once(|_| {
            Ok(vec![LeaderboardEntry {
                alias: Alias::new("Alex").expect("valid alias"),
                points: 8,
            }])
        });

    let reply = mocks.dispatcher().handle(event(input)).await;

    assert_eq!(reply.text, "🏆 Bestenliste:\n1. Alex – 8 Punkte");
}

#[rstest]
#[tokio::test]
async fn confirm_command_reports_new_count() {
    let mut mocks = Mocks::new().expect_cancel(false);
    mocks
        .reports_command
        .expect_confirm()
        .withf(|id, confirmer| id.get() == 3 && confirmer.external_id.as_ref() == "4711")
        .times(1)
        .return_once(|report_id, _| {
            Ok(ConfirmedReport {
                report_id,
                owner: UserId::random(),
                confirmation_count: 2,
            })
        });

    let reply = mocks
        .dispatcher()
        .handle(event(command("/bestaetige_3", "")))
        .await;

    assert_eq!(reply.text, "Danke! Meldung #3 hat jetzt 2 Bestätigung(en).");
}

#[rstest]
#[tokio::test]
async fn unauthorised_delete_is_surfaced() {
    let mut mocks = Mocks::new().expect_cancel(false);
    mocks
        .reports_command
        .expect_remove()
        .times(1)
        .return_once(|_, _| Err(Error::unauthorized("only admins may delete reports")));

    let reply = mocks
        .dispatcher()
        .handle(event(command("loeschen", "3")))
        .await;

    assert_eq!(reply.text, "Dazu bist du nicht berechtigt.");
}

#[rstest]
#[tokio::test]
async fn admin_delete_confirms_removal_even_when_media_lingers() {
    let mut mocks = Mocks::new().expect_cancel(false);
    mocks
        .reports_command
        .expect_remove()
        .times(1)
        .return_once(|_, _| {
            Ok(RemovedReport {
                report: stored_report(7),
                media_released: false,
            })
        });

    let reply = mocks
        .dispatcher()
        .handle(event(command("/loeschen_7", "")))
        .await;

    assert_eq!(reply.text, "Meldung #7 wurde gelöscht.");
}

#[rstest]
#[tokio::test]
async fn malformed_command_still_cancels() {
    let mut mocks = Mocks::new().expect_cancel(true);
    mocks.reports_command.expect_confirm().times(0);

    let reply = mocks
        .dispatcher()
        .handle(event(command("/bestaetige", "")))
        .await;

    assert!(reply.text.contains("/bestaetige_12"));
}

#[rstest]
#[tokio::test]
async fn storage_failures_render_generic_reply() {
    let mut mocks = Mocks::new();
    mocks
        .conversation
        .expect_advance()
        .times(1)
        .return_once(|_, _| Err(Error::service_unavailable("database unreachable")));

    let reply = mocks
        .dispatcher()
        .handle(event(ChatInput::Text("6 Monate".to_owned())))
        .await;

    assert_eq!(
        reply.text,
        "Da ist etwas schiefgelaufen. Bitte versuche es gleich noch einmal."
    );
}

#[rstest]
#[tokio::test]
async fn my_reports_lists_own_reports() {
    let mut mocks = Mocks::new().expect_cancel(false);
    mocks
        .reports_query
        .expect_list_mine()
        .times(1)
        .return_once(|_| Ok(vec![stored_report(5)]));

    let reply = mocks
        .dispatcher()
        .handle(event(ChatInput::Button("📋 Meine Meldungen".to_owned())))
        .await;

    assert!(reply.text.starts_with("📋 Deine Meldungen:"));
    assert!(reply.text.contains("/bestaetige_5"));
}
