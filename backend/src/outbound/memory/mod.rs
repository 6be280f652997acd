//! In-process store backing every persistence port.
//!
//! Used when no database URL is configured and by tests. All three ports
//! share one lock, so a report insert and its owner's credit are applied
//! together.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    PointsLedger, PointsLedgerError, ReportRepository, ReportRepositoryError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Alias, ConfirmedReport, ExternalId, LeaderboardEntry, NewReport, NewUser, Report, ReportId,
    ScoringEvent, User, UserId,
};

#[derive(Default)]
struct State {
    // Registration order doubles as the leaderboard tie-breaker.
    users: Vec<User>,
    reports: BTreeMap<ReportId, Report>,
    last_report_id: i64,
}

impl State {
    fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id() == id)
    }

    fn next_report_id(&mut self) -> Result<ReportId, ReportRepositoryError> {
        let next = self
            .last_report_id
            .checked_add(1)
            .ok_or_else(|| ReportRepositoryError::query("report id space exhausted"))?;
        let id = ReportId::new(next).map_err(|err| ReportRepositoryError::query(err.to_string()))?;
        self.last_report_id = next;
        Ok(id)
    }

    fn newest_first<'a>(reports: impl Iterator<Item = &'a Report>) -> Vec<Report> {
        let mut listed: Vec<Report> = reports.cloned().collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        listed
    }
}

/// Users, reports, and points held in memory.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_or_create(&self, user: &NewUser) -> Result<(User, bool), UserPersistenceError> {
        let mut state = self.lock();
        if let Some(existing) = state
            .users
            .iter()
            .find(|candidate| candidate.external_id() == user.external_id())
        {
            return Ok((existing.clone(), false));
        }
        let created = User::registered(user);
        state.users.push(created.clone());
        Ok((created, true))
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .find(|user| user.external_id() == external_id)
            .cloned())
    }

    async fn set_alias(
        &self,
        id: &UserId,
        alias: &Alias,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        Ok(state.user_mut(*id).map(|user| {
            user.rename(alias.clone());
            user.clone()
        }))
    }
}

#[async_trait]
impl PointsLedger for InMemoryStore {
    async fn credit(
        &self,
        user: &UserId,
        event: ScoringEvent,
    ) -> Result<Option<u64>, PointsLedgerError> {
        let mut state = self.lock();
        Ok(state.user_mut(*user).map(|user| user.credit(event.points())))
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PointsLedgerError> {
        let state = self.lock();
        let mut ranked: Vec<LeaderboardEntry> = state
            .users
            .iter()
            .filter_map(|user| {
                user.alias().map(|alias| LeaderboardEntry {
                    alias: alias.clone(),
                    points: user.points(),
                })
            })
            .collect();
        // Stable sort keeps registration order among equal scores.
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn insert_crediting_owner(
        &self,
        report: &NewReport,
        event: ScoringEvent,
    ) -> Result<Report, ReportRepositoryError> {
        let mut state = self.lock();
        if state.user_mut(report.owner()).is_none() {
            return Err(ReportRepositoryError::unknown_owner(report.owner().to_string()));
        }
        let id = state.next_report_id()?;
        let stored = Report::from_parts(id, report.clone(), 0, Utc::now());
        state.reports.insert(id, stored.clone());
        if let Some(owner) = state.user_mut(report.owner()) {
            owner.credit(event.points());
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError> {
        Ok(self.lock().reports.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Report>, ReportRepositoryError> {
        let state = self.lock();
        Ok(State::newest_first(state.reports.values()))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Report>, ReportRepositoryError> {
        let state = self.lock();
        Ok(State::newest_first(
            state.reports.values().filter(|report| report.owner() == *owner),
        ))
    }

    async fn confirm_crediting_owner(
        &self,
        id: ReportId,
        event: ScoringEvent,
    ) -> Result<Option<ConfirmedReport>, ReportRepositoryError> {
        let mut state = self.lock();
        let Some(report) = state.reports.get_mut(&id) else {
            return Ok(None);
        };
        let confirmation_count = report.confirm();
        let owner = report.owner();
        if let Some(user) = state.user_mut(owner) {
            user.credit(event.points());
        }
        Ok(Some(ConfirmedReport {
            report_id: id,
            owner,
            confirmation_count,
        }))
    }

    async fn delete(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError> {
        Ok(self.lock().reports.remove(&id))
    }
}

#[cfg(test)]
mod tests;
