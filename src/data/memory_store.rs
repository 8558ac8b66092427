use crate::{
    data::{
        StudentStore,
        student::{NewStudent, Student, StudentPatch},
    },
    error::RollbookResult,
};
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn get_all(&self) -> RollbookResult<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RollbookResult<Option<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|student| student.id == id)
            .cloned())
    }

    async fn insert(&self, to_be_added: NewStudent) -> RollbookResult<Student> {
        let student = to_be_added.into_student(Uuid::new_v4(), OffsetDateTime::now_utc());
        self.students.write().await.push(student.clone());
        Ok(student)
    }

    async fn update(&self, id: Uuid, patch: StudentPatch) -> RollbookResult<Option<Student>> {
        let mut students = self.students.write().await;
        let Some(student) = students.iter_mut().find(|student| student.id == id) else {
            return Ok(None);
        };

        patch.apply(student, OffsetDateTime::now_utc());
        Ok(Some(student.clone()))
    }

    async fn remove(&self, id: Uuid) -> RollbookResult<bool> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|student| student.id != id);
        Ok(students.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(name: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..NewStudent::default()
        }
    }

    #[tokio::test]
    async fn insert_then_list_keeps_order() {
        let store = MemoryStudentStore::new();
        assert!(store.get_all().await.unwrap().is_empty());

        let first = store.insert(new_student("Grace")).await.unwrap();
        let second = store.insert(new_student("Alan")).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = store.get_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Grace", "Alan"]);

        assert_eq!(store.get_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let store = MemoryStudentStore::new();
        let grace = store.insert(new_student("Grace")).await.unwrap();

        let updated = store
            .update(
                grace.id,
                StudentPatch {
                    phone_number: Some("555-0199".into()),
                    ..StudentPatch::default()
                },
            )
            .await
            .unwrap()
            .expect("student exists");

        assert_eq!(updated.phone_number, "555-0199");
        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.created_at, grace.created_at);
        assert!(updated.updated_at >= grace.updated_at);
    }

    #[tokio::test]
    async fn missing_ids_are_not_errors() {
        let store = MemoryStudentStore::new();
        let ghost = Uuid::new_v4();

        assert_eq!(store.get_by_id(ghost).await.unwrap(), None);
        assert_eq!(
            store.update(ghost, StudentPatch::default()).await.unwrap(),
            None
        );
        assert!(!store.remove(ghost).await.unwrap());
    }

    #[tokio::test]
    async fn remove_only_drops_that_student() {
        let store = MemoryStudentStore::new();
        let grace = store.insert(new_student("Grace")).await.unwrap();
        let alan = store.insert(new_student("Alan")).await.unwrap();

        assert!(store.remove(grace.id).await.unwrap());
        assert_eq!(store.get_all().await.unwrap(), vec![alan]);
    }
}
