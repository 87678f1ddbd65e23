use validator::Validate;

use crate::{
    entities::alumni::{
        generate_alumni_code, Alumnus, AlumnusCsvRecord, AlumnusInsert, ImportSummary, NewAlumnus,
    },
    errors::AppError,
    repositories::alumni::AlumniRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct AlumniHandler<R>
where
    R: AlumniRepository,
{
    pub alumni_repo: R,
}

impl<R> AlumniHandler<R>
where
    R: AlumniRepository,
{
    pub fn new(alumni_repo: R) -> Self {
        AlumniHandler { alumni_repo }
    }

    pub async fn list_alumni(&self) -> Result<Vec<Alumnus>, AppError> {
        self.alumni_repo.list_alumni().await
    }

    pub async fn get_alumnus(&self, id: &str) -> Result<Alumnus, AppError> {
        let valid_id = valid_uuid(id)?;

        self.alumni_repo
            .get_alumnus_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alumni not found".to_string()))
    }

    /// Creates a self-registered alumnus with a freshly generated external code
    pub async fn register(&self, request: NewAlumnus) -> Result<Alumnus, AppError> {
        request.validate()?;

        let insert = request.prepare_for_insert(generate_alumni_code());
        if let Some(email) = &insert.email {
            if self.alumni_repo.get_alumnus_by_email(email).await?.is_some() {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }

        let alumnus = self.alumni_repo.create_alumnus(&insert).await?;

        tracing::info!(alumni_id = %alumnus.id, code = %alumnus.alumni_code, "Alumnus registered");
        Ok(alumnus)
    }

    /// Seeds the table from a CSV export. Runs only against an empty table.
    pub async fn import_csv(&self, data: &[u8]) -> Result<ImportSummary, AppError> {
        let rows_in_db = self.alumni_repo.count_alumni().await?;
        if rows_in_db > 0 {
            tracing::info!(rows_in_db, "Alumni already imported; skipping");
            return Ok(ImportSummary::AlreadyImported { rows_in_db });
        }

        let alumni = parse_alumni_csv(data)?;
        let rows_inserted = self.alumni_repo.create_alumni_batch(&alumni).await?;

        tracing::info!(rows_inserted, "Alumni imported");
        Ok(ImportSummary::Imported { rows_inserted })
    }
}

/// Parses every record up front so a bad row aborts the import before any insert.
pub fn parse_alumni_csv(data: &[u8]) -> Result<Vec<AlumnusInsert>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    reader
        .deserialize::<AlumnusCsvRecord>()
        .map(|record| record.map(AlumnusInsert::from).map_err(AppError::from))
        .collect()
}
