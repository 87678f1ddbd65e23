use chrono::{DateTime, Utc};

use crate::{
    entities::connection::{
        auto_accept_due, ConnectionParty, ConnectionRequest, ConnectionStatus,
        NewConnectionRequest, UpdateConnectionStatus,
    },
    errors::AppError,
    repositories::{
        alumni::AlumniRepository, connection::ConnectionRepository, student::StudentRepository,
    },
    settings::LifecycleSettings,
    utils::valid_uuid::valid_uuid,
};

pub struct ConnectionHandler<C, S, A>
where
    C: ConnectionRepository,
    S: StudentRepository,
    A: AlumniRepository,
{
    pub connection_repo: C,
    pub student_repo: S,
    pub alumni_repo: A,
    pub settings: LifecycleSettings,
}

impl<C, S, A> ConnectionHandler<C, S, A>
where
    C: ConnectionRepository,
    S: StudentRepository,
    A: AlumniRepository,
{
    pub fn new(connection_repo: C, student_repo: S, alumni_repo: A, settings: LifecycleSettings) -> Self {
        ConnectionHandler {
            connection_repo,
            student_repo,
            alumni_repo,
            settings,
        }
    }

    /// Opens a new `Pending` request; at most one may be pending per pair
    pub async fn create_request(
        &self,
        request: NewConnectionRequest,
    ) -> Result<ConnectionRequest, AppError> {
        if !self.student_repo.student_exists(&request.student_id).await? {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        if !self.alumni_repo.alumnus_exists(&request.alumni_id).await? {
            return Err(AppError::NotFound("Alumni not found".to_string()));
        }

        let pending = self.connection_repo
            .find_pending(&request.student_id, &request.alumni_id)
            .await?;
        if pending.is_some() {
            return Err(AppError::Conflict(
                "A pending request already exists for this student and alumni.".to_string(),
            ));
        }

        let created = self.connection_repo
            .create_request(&request.student_id, &request.alumni_id)
            .await?;

        tracing::info!(
            request_id = %created.id,
            student_id = %created.student_id,
            alumni_id = %created.alumni_id,
            "Connection request created"
        );
        Ok(created)
    }

    pub async fn list_for_student(&self, student_id: &str) -> Result<Vec<ConnectionRequest>, AppError> {
        self.list_for_student_at(student_id, Utc::now()).await
    }

    pub async fn list_for_alumnus(&self, alumni_id: &str) -> Result<Vec<ConnectionRequest>, AppError> {
        self.list_for_alumnus_at(alumni_id, Utc::now()).await
    }

    pub async fn list_for_student_at(
        &self,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ConnectionRequest>, AppError> {
        let student_id = valid_uuid(student_id)?;
        self.list_requests(ConnectionParty::Student(student_id), now).await
    }

    pub async fn list_for_alumnus_at(
        &self,
        alumni_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ConnectionRequest>, AppError> {
        let alumni_id = valid_uuid(alumni_id)?;
        self.list_requests(ConnectionParty::Alumnus(alumni_id), now).await
    }

    /// Lists a party's requests, first accepting every pending one that has
    /// waited out the auto-accept window. A failed write fails the listing.
    async fn list_requests(
        &self,
        party: ConnectionParty,
        now: DateTime<Utc>,
    ) -> Result<Vec<ConnectionRequest>, AppError> {
        let mut requests = self.connection_repo.list_by_party(party).await?;

        let due = auto_accept_due(&mut requests, now, self.settings.auto_accept_after);
        if due.is_empty() {
            return Ok(requests);
        }

        let accepted = self.connection_repo.mark_accepted(&due).await?;
        for request in &accepted {
            tracing::info!(request_id = %request.id, "Connection request auto-accepted");
        }

        if accepted.len() == due.len() {
            // Keep the stored timestamps over the local ones.
            for stored in accepted {
                if let Some(slot) = requests.iter_mut().find(|r| r.id == stored.id) {
                    *slot = stored;
                }
            }
            Ok(requests)
        } else {
            // Something else changed a request between the read and the write.
            self.connection_repo.list_by_party(party).await
        }
    }

    /// Sets any of the three statuses, unconditionally
    pub async fn set_status(
        &self,
        request_id: &str,
        update: UpdateConnectionStatus,
    ) -> Result<ConnectionRequest, AppError> {
        let request_id = valid_uuid(request_id)?;
        let status: ConnectionStatus = update.status.parse()?;

        let updated = self.connection_repo
            .update_status(&request_id, status)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Connection request not found".to_string()),
                _ => e,
            })?;

        tracing::info!(request_id = %updated.id, status = %updated.status, "Connection request status set");
        Ok(updated)
    }
}
