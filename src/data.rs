use crate::{
    data::student::{NewStudent, Student, StudentPatch},
    error::RollbookResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;
use uuid::Uuid;

pub mod memory_store;
pub mod postgres_store;
pub mod student;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: Uuid,
}

/// Where students live. Handlers only ever see `Arc<dyn StudentStore>`.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    async fn get_all(&self) -> RollbookResult<Vec<Student>>;
    async fn get_by_id(&self, id: Uuid) -> RollbookResult<Option<Student>>;
    async fn insert(&self, to_be_added: NewStudent) -> RollbookResult<Student>;
    /// `Ok(None)` when there was nothing with that id to update.
    async fn update(&self, id: Uuid, patch: StudentPatch) -> RollbookResult<Option<Student>>;
    /// Returns whether anything was actually removed.
    async fn remove(&self, id: Uuid) -> RollbookResult<bool>;

    async fn close(&self) {}
}
