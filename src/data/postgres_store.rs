use crate::{
    config::DbConfig,
    data::{
        StudentStore,
        student::{NewStudent, Student, StudentPatch},
    },
    error::{GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RollbookResult},
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{PgConnection, Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};
use uuid::Uuid;

const STUDENT_COLUMNS: &str =
    "id, name, email, address, phone_number, date_of_birth, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn connect(config: &DbConfig) -> RollbookResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .connect(&config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;
        info!("student table migrated");

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> RollbookResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    async fn fetch_by_id(id: Uuid, conn: &mut PgConnection) -> RollbookResult<Option<Student>> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn get_all(&self) -> RollbookResult<Vec<Student>> {
        let mut conn = self.get_connection().await?;
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM public.students ORDER BY created_at, id"
        ))
        .fetch_all(&mut *conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get_by_id(&self, id: Uuid) -> RollbookResult<Option<Student>> {
        let mut conn = self.get_connection().await?;
        Self::fetch_by_id(id, &mut conn).await
    }

    async fn insert(&self, to_be_added: NewStudent) -> RollbookResult<Student> {
        let NewStudent {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = to_be_added;

        let mut conn = self.get_connection().await?;
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO public.students (id, name, email, address, phone_number, date_of_birth) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(address)
        .bind(phone_number)
        .bind(date_of_birth)
        .fetch_one(&mut *conn)
        .await
        .context(MakeQuerySnafu)?;

        info!(id = %student.id, "inserted student");
        Ok(student)
    }

    async fn update(&self, id: Uuid, patch: StudentPatch) -> RollbookResult<Option<Student>> {
        let StudentPatch {
            name,
            email,
            address,
            phone_number,
            date_of_birth,
        } = patch;

        let mut conn = self.get_connection().await?;
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE public.students SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                address = COALESCE($4, address), \
                phone_number = COALESCE($5, phone_number), \
                date_of_birth = CASE WHEN $7 THEN $6 ELSE date_of_birth END, \
                updated_at = now() \
            WHERE id = $1 RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(address)
        .bind(phone_number)
        .bind(date_of_birth.flatten())
        .bind(date_of_birth.is_some())
        .fetch_optional(&mut *conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn remove(&self, id: Uuid) -> RollbookResult<bool> {
        let mut conn = self.get_connection().await?;
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
