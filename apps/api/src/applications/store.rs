//! In-memory application-status store and its approval workflow.
//!
//! The map is shared by every request, so each read-modify-write sequence
//! (approve, work-log append, create) runs under a single lock acquisition.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SEED_APPLICATION_ID: &str = "MN-2024-555";
pub const FINAL_STEP: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogEntry {
    pub id: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub date_applied: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub submitted_at: String,
    pub status: String,
    /// 0: submitted, 1: reviewing, 2: determination, 3: paid.
    pub step: u8,
    pub progress: u8,
    pub estimated_completion: String,
    pub week: String,
    pub notifications: Vec<Notification>,
    pub work_log: Vec<WorkLogEntry>,
}

/// What a workflow step displays once reached.
struct StepOutcome {
    status: &'static str,
    progress: u8,
    message: &'static str,
    kind: &'static str,
}

fn step_outcome(step: u8) -> Option<StepOutcome> {
    match step {
        1 => Some(StepOutcome {
            status: "Under Review",
            progress: 33,
            message: "Your application is being reviewed.",
            kind: "info",
        }),
        2 => Some(StepOutcome {
            status: "Determination Pending",
            progress: 66,
            message: "Determination pending.",
            kind: "info",
        }),
        3 => Some(StepOutcome {
            status: "Payment Issued",
            progress: 100,
            message: "Payment authorized.",
            kind: "success",
        }),
        _ => None,
    }
}

/// Admin actions understood by the workflow. Anything else is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Approve,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    /// Advances one step (capped at the final step) and records exactly one
    /// notification. Approving a paid application repeats the final notice.
    pub fn approve(&mut self) {
        let next = (self.step + 1).min(FINAL_STEP);
        self.step = next;
        if let Some(outcome) = step_outcome(next) {
            self.status = outcome.status.to_string();
            self.progress = outcome.progress;
            self.notifications.push(Notification {
                id: Utc::now().timestamp_millis(),
                message: outcome.message.to_string(),
                date: Some(display_timestamp()),
                kind: outcome.kind.to_string(),
            });
        }
    }

    fn seed() -> Self {
        Self {
            id: SEED_APPLICATION_ID.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            submitted_at: "2024-12-22T10:00:00Z".to_string(),
            status: "Pending Review".to_string(),
            step: 1,
            progress: 33,
            estimated_completion: "5-7 business days".to_string(),
            week: "Dec 15 - Dec 21".to_string(),
            notifications: vec![
                Notification {
                    id: 1,
                    message: "Application Received".to_string(),
                    date: Some("Dec 22, 2:30 PM".to_string()),
                    kind: "success".to_string(),
                },
                Notification {
                    id: 2,
                    message: "Handbook Available".to_string(),
                    date: Some("Dec 22, 2:31 PM".to_string()),
                    kind: "info".to_string(),
                },
            ],
            work_log: Vec::new(),
        }
    }
}

fn display_timestamp() -> String {
    Utc::now().format("%b %-d, %-I:%M %p").to_string()
}

/// Process-wide store of application statuses, cheap to clone.
#[derive(Clone, Default)]
pub struct StatusStore {
    inner: Arc<Mutex<HashMap<String, ApplicationStatus>>>,
}

impl StatusStore {
    /// A store holding the demo application every dashboard starts with.
    pub fn seeded() -> Self {
        let seed = ApplicationStatus::seed();
        let mut map = HashMap::new();
        map.insert(seed.id.clone(), seed);
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    #[cfg(test)]
    pub async fn get(&self, id: &str) -> Option<ApplicationStatus> {
        self.inner.lock().await.get(id).cloned()
    }

    /// The application shown on the default dashboard: the seed, or any
    /// application if the seed is gone.
    pub async fn primary(&self) -> Option<ApplicationStatus> {
        let map = self.inner.lock().await;
        map.get(SEED_APPLICATION_ID)
            .or_else(|| map.values().min_by(|a, b| a.id.cmp(&b.id)))
            .cloned()
    }

    /// All applications ordered by id.
    pub async fn all(&self) -> Vec<ApplicationStatus> {
        let mut apps: Vec<_> = self.inner.lock().await.values().cloned().collect();
        apps.sort_by(|a, b| a.id.cmp(&b.id));
        apps
    }

    /// Registers a fresh application at step 0 and returns its id.
    pub async fn create(&self, first_name: String, last_name: String) -> ApplicationStatus {
        let mut map = self.inner.lock().await;
        let id = loop {
            let candidate = format!("MN-2024-{}", Uuid::new_v4().as_u128() % 10_000);
            if !map.contains_key(&candidate) {
                break candidate;
            }
        };
        let app = ApplicationStatus {
            id: id.clone(),
            first_name,
            last_name,
            submitted_at: Utc::now().to_rfc3339(),
            status: "Submitted".to_string(),
            step: 0,
            progress: 10,
            estimated_completion: "10-14 business days".to_string(),
            week: "N/A".to_string(),
            notifications: vec![Notification {
                id: Utc::now().timestamp_millis(),
                message: "Application Received".to_string(),
                date: Some(display_timestamp()),
                kind: "success".to_string(),
            }],
            work_log: Vec::new(),
        };
        map.insert(id, app.clone());
        app
    }

    /// Applies an admin action. Returns `None` for an unknown id.
    pub async fn apply_action(&self, id: &str, action: &AdminAction) -> Option<ApplicationStatus> {
        let mut map = self.inner.lock().await;
        let app = map.get_mut(id)?;
        if *action == AdminAction::Approve {
            app.approve();
        }
        Some(app.clone())
    }

    /// Prepends a work-log entry to `user_id`'s application, falling back to
    /// the seeded application. Returns `None` if neither exists.
    pub async fn log_work(
        &self,
        user_id: &str,
        job_title: Option<String>,
        company: Option<String>,
    ) -> Option<WorkLogEntry> {
        let mut map = self.inner.lock().await;
        let key = if map.contains_key(user_id) {
            user_id
        } else {
            SEED_APPLICATION_ID
        };
        let app = map.get_mut(key)?;

        let entry = WorkLogEntry {
            id: format!("log-{}", Utc::now().timestamp()),
            job_title,
            company,
            date_applied: "Just now".to_string(),
            status: "Applied".to_string(),
        };
        app.work_log.insert(0, entry.clone());
        Some(entry)
    }
}
