//! In-memory storage for devices, quiz sessions and best scores

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use verb_quiz_core::{record_best_score, BestScoreStore, InMemoryBestScores, SessionState};

use crate::error::{ApiError, Result};
use crate::models::{Device, StoredSession};

/// Bounds on what the store keeps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    /// Starting a session beyond this drops the device's oldest one.
    pub max_sessions_per_device: usize,
    /// How long a completed session stays readable after its last access.
    pub completed_session_ttl: Duration,
    /// How long an unfinished session survives without answers.
    pub idle_session_ttl: Duration,
    /// Devices unseen for this long are forgotten with their scores.
    pub device_ttl: Duration,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_sessions_per_device: 5,
            completed_session_ttl: Duration::minutes(30),
            idle_session_ttl: Duration::hours(24),
            device_ttl: Duration::days(90),
        }
    }
}

/// What a prune pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pruned {
    pub sessions: usize,
    pub devices: usize,
}

/// Best score of a set right after a session on it completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestScoreUpdate {
    pub best_score: f64,
    pub new_best: bool,
}

/// Process-lifetime store shared by all handlers
///
/// Locks are always taken in the order devices, sessions, best scores.
#[derive(Debug, Default)]
pub struct Store {
    limits: StoreLimits,
    /// Keyed by token.
    devices: RwLock<HashMap<String, Device>>,
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    /// Keyed by device id.
    best_scores: RwLock<HashMap<Uuid, InMemoryBestScores>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits: StoreLimits {
                max_sessions_per_device: limits.max_sessions_per_device.max(1),
                ..limits
            },
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &StoreLimits {
        &self.limits
    }

    // === Devices ===

    /// Create a new device with generated token
    pub async fn create_device(&self, name: Option<&str>) -> Device {
        let now = Utc::now();
        let device = Device {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            created_at: now,
            last_seen_at: now,
        };

        self.devices
            .write()
            .await
            .insert(device.token.clone(), device.clone());

        device
    }

    pub async fn get_device_by_token(&self, token: &str) -> Option<Device> {
        self.devices.read().await.get(token).cloned()
    }

    pub async fn update_last_seen(&self, token: &str) {
        if let Some(device) = self.devices.write().await.get_mut(token) {
            device.last_seen_at = Utc::now();
        }
    }

    // === Sessions ===

    /// Store a new session, evicting the device's oldest sessions once it
    /// holds the maximum. Completed sessions are evicted before unfinished ones.
    pub async fn insert_session(&self, session: StoredSession) -> Uuid {
        let device_id = session.device_id;
        let mut sessions = self.sessions.write().await;

        let mut owned: Vec<(bool, DateTime<Utc>, Uuid)> = sessions
            .iter()
            .filter(|(_, stored)| stored.device_id == device_id)
            .map(|(id, stored)| (stored.completed_at.is_none(), stored.last_active_at, *id))
            .collect();
        owned.sort();

        let excess = (owned.len() + 1).saturating_sub(self.limits.max_sessions_per_device);
        for (_, _, evicted) in owned.into_iter().take(excess) {
            sessions.remove(&evicted);
            tracing::debug!("Evicted session {} of device {}", evicted, device_id);
        }

        let id = Uuid::new_v4();
        sessions.insert(id, session);
        id
    }

    /// Run `f` on a session owned by the device.
    ///
    /// Sessions of other devices are reported as not found.
    pub async fn with_session<T, F>(&self, device_id: Uuid, session_id: Uuid, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoredSession) -> Result<T>,
    {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session_id)
            .filter(|stored| stored.device_id == device_id)
            .ok_or_else(|| session_not_found(session_id))?;

        stored.last_active_at = Utc::now();
        f(stored)
    }

    /// Like [`Store::with_session`], for requests that may finish the session.
    ///
    /// If `f` completes the session, its percent is recorded as a best score
    /// candidate and `new_best` is set before the session lock is released.
    pub async fn advance_session<T, F>(
        &self,
        device_id: Uuid,
        session_id: Uuid,
        f: F,
    ) -> Result<(T, Option<BestScoreUpdate>)>
    where
        F: FnOnce(&mut StoredSession) -> Result<T>,
    {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session_id)
            .filter(|stored| stored.device_id == device_id)
            .ok_or_else(|| session_not_found(session_id))?;

        let now = Utc::now();
        stored.last_active_at = now;
        let value = f(stored)?;

        if stored.completed_at.is_some() || stored.session.state() != SessionState::Completed {
            return Ok((value, None));
        }
        stored.completed_at = Some(now);

        let set_name = stored.session.set_name().unwrap_or_default();
        let mut best_scores = self.best_scores.write().await;
        let (best_score, new_best) = record_best_score(
            best_scores.entry(device_id).or_default(),
            set_name,
            stored.session.percent(),
        );
        stored.new_best = new_best;

        Ok((value, Some(BestScoreUpdate { best_score, new_best })))
    }

    /// Sessions of the device that are still in progress.
    pub async fn active_sessions(&self, device_id: Uuid) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|stored| {
                stored.device_id == device_id && stored.session.state() == SessionState::InProgress
            })
            .count()
    }

    pub async fn remove_session(&self, device_id: Uuid, session_id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&session_id) {
            Some(stored) if stored.device_id == device_id => {
                sessions.remove(&session_id);
                Ok(())
            }
            _ => Err(session_not_found(session_id)),
        }
    }

    // === Best Scores ===

    pub async fn best_scores(&self, device_id: Uuid) -> InMemoryBestScores {
        self.best_scores
            .read()
            .await
            .get(&device_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn best_score(&self, device_id: Uuid, set_name: &str) -> f64 {
        self.best_scores
            .read()
            .await
            .get(&device_id)
            .map_or(0.0, |scores| scores.get(set_name))
    }

    /// Keep the session percent if it beats the device's best for the set.
    ///
    /// Returns the best score after the update and whether it changed.
    pub async fn record_best_score(&self, device_id: Uuid, set_name: &str, percent: f64) -> (f64, bool) {
        let mut best_scores = self.best_scores.write().await;
        let scores = best_scores.entry(device_id).or_default();
        record_best_score(scores, set_name, percent)
    }
}

impl Store {
    // === Expiry ===

    /// Drop expired sessions and forgotten devices as of now.
    pub async fn prune_expired(&self) -> Pruned {
        self.prune_at(Utc::now()).await
    }

    pub async fn prune_at(&self, now: DateTime<Utc>) -> Pruned {
        let limits = self.limits;
        let mut devices = self.devices.write().await;
        let mut sessions = self.sessions.write().await;
        let mut best_scores = self.best_scores.write().await;

        let mut forgotten = HashSet::new();
        devices.retain(|_, device| {
            let keep = now - device.last_seen_at < limits.device_ttl;
            if !keep {
                forgotten.insert(device.id);
            }
            keep
        });
        best_scores.retain(|device_id, _| !forgotten.contains(device_id));

        let before = sessions.len();
        sessions.retain(|_, stored| {
            let ttl = match stored.completed_at {
                Some(_) => limits.completed_session_ttl,
                None => limits.idle_session_ttl,
            };
            !forgotten.contains(&stored.device_id) && now - stored.last_active_at < ttl
        });

        Pruned {
            sessions: before - sessions.len(),
            devices: forgotten.len(),
        }
    }
}

fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", session_id))
}
