//! Conversation engine implementing [`ConversationCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{
    ConversationInput, ConversationOutcome, ConversationSession, ConversationStep, InputRejection,
    SessionPurpose, SessionRegistry,
};
use crate::domain::ports::{ConversationCommand, MediaStore, ReportRepository, UserRepository};
use crate::domain::service_errors::{map_media_error, map_report_error};
use crate::domain::{
    Address, Alias, ChatIdentity, Error, ExternalId, IdentityService, ReportValidationError,
    ScoringEvent,
};

/// What to do with the session after a step.
enum Transition {
    Keep(ConversationOutcome),
    Finish(ConversationOutcome),
}

/// Drives report conversations over the driven ports.
pub struct ConversationEngine<U, R, M> {
    identity: IdentityService<U>,
    reports: Arc<R>,
    media: Arc<M>,
    sessions: SessionRegistry<ExternalId>,
}

impl<U, R, M> ConversationEngine<U, R, M> {
    pub fn new(identity: IdentityService<U>, reports: Arc<R>, media: Arc<M>) -> Self {
        Self {
            identity,
            reports,
            media,
            sessions: SessionRegistry::default(),
        }
    }

    /// Snapshot of the session held for `external_id`.
    pub async fn session(&self, external_id: &ExternalId) -> Option<ConversationSession> {
        self.sessions.current(external_id).await
    }
}

impl<U, R, M> ConversationEngine<U, R, M>
where
    U: UserRepository,
    R: ReportRepository,
    M: MediaStore,
{
    /// Replace the session for `external_id`, discarding any previous one.
    async fn open(&self, external_id: &ExternalId, session: Option<ConversationSession>) {
        let slot = self.sessions.slot(external_id);
        let previous = std::mem::replace(&mut *slot.lock().await, session);
        self.sessions.release(external_id, slot);
        self.discard(previous).await;
    }

    /// Release the photo held by an abandoned draft.
    async fn discard(&self, session: Option<ConversationSession>) -> bool {
        let Some(session) = session else {
            return false;
        };
        if let Some(image) = session.draft.image {
            if let Err(error) = self.media.delete(&image).await {
                warn!(%error, reference = %image, "failed to release abandoned photo");
            }
        }
        true
    }

    async fn step(
        &self,
        session: &mut ConversationSession,
        input: ConversationInput,
    ) -> Result<Transition, Error> {
        let step = session.step;
        let reject = |reason| Ok(Transition::Keep(ConversationOutcome::Rejected { step, reason }));

        match (step, input) {
            (ConversationStep::AwaitingAlias, ConversationInput::Text(text)) => {
                let alias = match Alias::new(text) {
                    Ok(alias) => alias,
                    Err(err) => return reject(InputRejection::Alias(err)),
                };
                self.identity.set_alias(&session.user, &alias).await?;
                match session.purpose {
                    SessionPurpose::Registration => {
                        Ok(Transition::Finish(ConversationOutcome::Registered { alias }))
                    }
                    SessionPurpose::Report => {
                        Ok(advance_to(session, ConversationStep::ApartmentDetails))
                    }
                }
            }
            (ConversationStep::ApartmentDetails, ConversationInput::Text(text)) => {
                let details = text.trim();
                if details.is_empty() {
                    return reject(InputRejection::EmptyText);
                }
                session.draft.apartment_details = Some(details.to_owned());
                Ok(advance_to(session, ConversationStep::Photo))
            }
            (ConversationStep::Photo, ConversationInput::Photo(bytes)) => {
                let image = self.media.store(&bytes).await.map_err(map_media_error)?;
                session.draft.image = Some(image);
                Ok(advance_to(session, ConversationStep::Address))
            }
            (ConversationStep::Photo, ConversationInput::Text(_)) => {
                reject(InputRejection::ExpectedPhoto)
            }
            (ConversationStep::Address, ConversationInput::Text(text)) => {
                match Address::parse(&text) {
                    Ok(address) => {
                        session.draft.address = Some(address);
                        Ok(advance_to(session, ConversationStep::Duration))
                    }
                    Err(err) => reject(InputRejection::Address(err)),
                }
            }
            (ConversationStep::Duration, ConversationInput::Text(text)) => {
                let new_report = match session.draft.complete(session.user, &text) {
                    Ok(new_report) => new_report,
                    Err(ReportValidationError::EmptyDurationEstimate) => {
                        return reject(InputRejection::EmptyText);
                    }
                    Err(err) => {
                        return Err(Error::internal(format!("incomplete report draft: {err}")));
                    }
                };
                let event = ScoringEvent::ReportSubmitted;
                let report = self
                    .reports
                    .insert_crediting_owner(&new_report, event)
                    .await
                    .map_err(map_report_error)?;
                Ok(Transition::Finish(ConversationOutcome::Completed {
                    report,
                    awarded: event.points(),
                }))
            }
            (_, ConversationInput::Photo(_)) => reject(InputRejection::ExpectedText),
        }
    }
}

fn advance_to(session: &mut ConversationSession, next: ConversationStep) -> Transition {
    session.step = next;
    Transition::Keep(ConversationOutcome::Prompted(next))
}

#[async_trait]
impl<U, R, M> ConversationCommand for ConversationEngine<U, R, M>
where
    U: UserRepository,
    R: ReportRepository,
    M: MediaStore,
{
    async fn start(&self, identity: &ChatIdentity) -> Result<ConversationOutcome, Error> {
        let (user, _) = self.identity.get_or_create(identity).await?;
        if let Some(alias) = user.alias() {
            self.open(&identity.external_id, None).await;
            return Ok(ConversationOutcome::Welcome {
                alias: alias.clone(),
            });
        }

        let step = ConversationStep::AwaitingAlias;
        let session = ConversationSession::new(user.id(), SessionPurpose::Registration, step);
        self.open(&identity.external_id, Some(session)).await;
        Ok(ConversationOutcome::Prompted(step))
    }

    async fn begin_report(&self, identity: &ChatIdentity) -> Result<ConversationOutcome, Error> {
        let (user, _) = self.identity.get_or_create(identity).await?;
        let step = if user.alias().is_some() {
            ConversationStep::ApartmentDetails
        } else {
            ConversationStep::AwaitingAlias
        };
        let session = ConversationSession::new(user.id(), SessionPurpose::Report, step);
        self.open(&identity.external_id, Some(session)).await;
        Ok(ConversationOutcome::Prompted(step))
    }

    async fn advance(
        &self,
        external_id: &ExternalId,
        input: ConversationInput,
    ) -> Result<ConversationOutcome, Error> {
        let Some(slot) = self.sessions.existing(external_id) else {
            return Ok(ConversationOutcome::NoSession);
        };
        let result = {
            let mut guard = slot.lock().await;
            match guard.as_mut() {
                None => Ok(ConversationOutcome::NoSession),
                // Failed steps leave the session untouched so the user can retry.
                Some(session) => match self.step(session, input).await {
                    Ok(Transition::Keep(outcome)) => Ok(outcome),
                    Ok(Transition::Finish(outcome)) => {
                        *guard = None;
                        Ok(outcome)
                    }
                    Err(error) => Err(error),
                },
            }
        };
        self.sessions.release(external_id, slot);
        result
    }

    async fn cancel(&self, external_id: &ExternalId) -> bool {
        let Some(slot) = self.sessions.existing(external_id) else {
            return false;
        };
        let previous = slot.lock().await.take();
        self.sessions.release(external_id, slot);
        self.discard(previous).await
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
