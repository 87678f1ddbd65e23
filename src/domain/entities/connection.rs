use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "Pending",
            ConnectionStatus::Accepted => "Accepted",
            ConnectionStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConnectionStatus::Pending)
    }
}

impl FromStr for ConnectionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ConnectionStatus::Pending),
            "accepted" => Ok(ConnectionStatus::Accepted),
            "rejected" => Ok(ConnectionStatus::Rejected),
            _ => Err(AppError::InvalidArgument(
                "Status must be Pending, Accepted, or Rejected".to_string(),
            )),
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ConnectionRequestRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub alumni_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub alumni_id: Uuid,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ConnectionRequestRow> for ConnectionRequest {
    type Error = AppError;

    fn try_from(row: ConnectionRequestRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            AppError::InternalError(format!(
                "Unknown status '{}' stored for connection request {}",
                row.status, row.id
            ))
        })?;

        Ok(ConnectionRequest {
            id: row.id,
            student_id: row.student_id,
            alumni_id: row.alumni_id,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl ConnectionRequest {
    /// A pending request becomes due once it is at least `after` old.
    pub fn is_due_for_auto_accept(&self, now: DateTime<Utc>, after: Duration) -> bool {
        self.status == ConnectionStatus::Pending && now - self.created_at >= after
    }
}

/// Moves every due request in `requests` to `Accepted` and returns their ids.
///
/// Nothing else triggers this transition: a request that is never listed stays
/// `Pending` indefinitely.
pub fn auto_accept_due(
    requests: &mut [ConnectionRequest],
    now: DateTime<Utc>,
    after: Duration,
) -> Vec<Uuid> {
    requests
        .iter_mut()
        .filter(|request| request.is_due_for_auto_accept(now, after))
        .map(|request| {
            request.status = ConnectionStatus::Accepted;
            request.updated_at = now;
            request.id
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionParty {
    Student(Uuid),
    Alumnus(Uuid),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NewConnectionRequest {
    pub student_id: Uuid,
    pub alumni_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateConnectionStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_at(created_at: DateTime<Utc>) -> ConnectionRequest {
        ConnectionRequest {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            alumni_id: Uuid::new_v4(),
            status: ConnectionStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!("rejected".parse::<ConnectionStatus>().unwrap(), ConnectionStatus::Rejected);
        assert_eq!("ACCEPTED".parse::<ConnectionStatus>().unwrap(), ConnectionStatus::Accepted);
        assert_eq!(" Pending ".parse::<ConnectionStatus>().unwrap(), ConnectionStatus::Pending);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "archived".parse::<ConnectionStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn sweep_accepts_requests_older_than_window() {
        let t = Utc::now();
        let mut requests = vec![pending_at(t)];

        let changed = auto_accept_due(&mut requests, t + Duration::seconds(61), Duration::minutes(1));

        assert_eq!(changed, vec![requests[0].id]);
        assert_eq!(requests[0].status, ConnectionStatus::Accepted);
    }

    #[test]
    fn sweep_accepts_at_exact_boundary() {
        let t = Utc::now();
        let mut requests = vec![pending_at(t)];

        let changed = auto_accept_due(&mut requests, t + Duration::seconds(60), Duration::minutes(1));

        assert_eq!(changed.len(), 1);
    }

    #[test]
    fn sweep_leaves_young_requests_pending() {
        let t = Utc::now();
        let mut requests = vec![pending_at(t)];

        let changed = auto_accept_due(&mut requests, t + Duration::seconds(30), Duration::minutes(1));

        assert!(changed.is_empty());
        assert_eq!(requests[0].status, ConnectionStatus::Pending);
    }

    #[test]
    fn sweep_never_touches_terminal_requests() {
        let t = Utc::now();
        let mut rejected = pending_at(t - Duration::hours(2));
        rejected.status = ConnectionStatus::Rejected;
        let mut requests = vec![rejected];

        let changed = auto_accept_due(&mut requests, t, Duration::minutes(1));

        assert!(changed.is_empty());
        assert_eq!(requests[0].status, ConnectionStatus::Rejected);
    }

    #[test]
    fn unknown_stored_status_is_an_internal_error() {
        let now = Utc::now();
        let row = ConnectionRequestRow {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            alumni_id: Uuid::new_v4(),
            status: "Archived".into(),
            created_at: now,
            updated_at: now,
        };

        assert!(matches!(ConnectionRequest::try_from(row), Err(AppError::InternalError(_))));
    }
}
