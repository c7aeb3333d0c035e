use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{DepartmentRepository, RepositoryError, RepositoryResult, validate};
use crate::model::department::{Department, NewDepartment};
use crate::search::name_matches;

#[derive(Default)]
struct Store {
    departments: BTreeMap<u64, Department>,
    last_id: u64,
}

/// Process-local department store, keyed by id.
#[derive(Default)]
pub struct InMemoryDepartmentRepository {
    store: RwLock<Store>,
}

impl InMemoryDepartmentRepository {
    /// Builds a store holding one department per name, with ids from 1.
    /// Names are validated the same way `create` validates them.
    pub fn with_names<I, S>(names: I) -> RepositoryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Store::default();
        for name in names {
            let name = validate(&NewDepartment { name: name.into() })?;
            store.last_id += 1;
            let id = store.last_id;
            store.departments.insert(id, Department { id, name });
        }

        Ok(Self {
            store: RwLock::new(store),
        })
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| RepositoryError::Unavailable("department store poisoned".into()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| RepositoryError::Unavailable("department store poisoned".into()))
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Department>> {
        Ok(self.read()?.departments.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Department>> {
        Ok(self.read()?.departments.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> RepositoryResult<Vec<Department>> {
        let found: Vec<Department> = self
            .read()?
            .departments
            .values()
            .filter(|d| name_matches(&d.name, fragment))
            .cloned()
            .collect();

        debug!(matches = found.len(), "Searched departments in memory");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn create(&self, department: NewDepartment) -> RepositoryResult<Department> {
        let name = validate(&department)?;
        let mut store = self.write()?;

        store.last_id += 1;
        let created = Department {
            id: store.last_id,
            name,
        };
        store.departments.insert(created.id, created.clone());

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: u64, department: NewDepartment) -> RepositoryResult<Department> {
        let name = validate(&department)?;
        let mut store = self.write()?;

        let existing = store
            .departments
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        existing.name = name;

        Ok(existing.clone())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: u64) -> RepositoryResult<()> {
        self.write()?
            .departments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.read()?.departments.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::department::MAX_NAME_LEN;

    fn named(name: &str) -> NewDepartment {
        NewDepartment { name: name.to_string() }
    }

    fn seeded() -> InMemoryDepartmentRepository {
        InMemoryDepartmentRepository::with_names(["Sales", "Engineering", "Customer Success"])
            .unwrap()
    }

    fn names(departments: &[Department]) -> Vec<&str> {
        departments.iter().map(|d| d.name.as_str()).collect()
    }

    #[actix_web::test]
    async fn search_follows_case_insensitive_substring_rule() {
        let repo = seeded();

        let found = repo.find_by_name_containing_ignore_case("es").await.unwrap();
        assert_eq!(names(&found), vec!["Sales", "Customer Success"]);

        let found = repo
            .find_by_name_containing_ignore_case("ENGIN")
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Engineering"]);

        let found = repo.find_by_name_containing_ignore_case("").await.unwrap();
        assert_eq!(found, repo.find_all().await.unwrap());
        assert_eq!(found.len(), 3);

        let found = repo.find_by_name_containing_ignore_case("zzz").await.unwrap();
        assert!(found.is_empty());
    }

    #[actix_web::test]
    async fn search_treats_like_metacharacters_as_text() {
        let repo = InMemoryDepartmentRepository::with_names(["R&D", "R_D", "Top 5%"]).unwrap();

        let found = repo.find_by_name_containing_ignore_case("_").await.unwrap();
        assert_eq!(names(&found), vec!["R_D"]);

        let found = repo.find_by_name_containing_ignore_case("%").await.unwrap();
        assert_eq!(names(&found), vec!["Top 5%"]);
    }

    #[actix_web::test]
    async fn accents_are_significant() {
        let repo = InMemoryDepartmentRepository::with_names(["Café", "Cafeteria"]).unwrap();

        let found = repo.find_by_name_containing_ignore_case("cafe").await.unwrap();
        assert_eq!(names(&found), vec!["Cafeteria"]);

        let found = repo.find_by_name_containing_ignore_case("CAFÉ").await.unwrap();
        assert_eq!(names(&found), vec!["Café"]);
    }

    #[test]
    fn seeded_names_are_validated() {
        let repo = InMemoryDepartmentRepository::with_names([" Legal "]).unwrap();
        let store = repo.read().unwrap();
        assert_eq!(store.departments[&1].name, "Legal");
        drop(store);

        let too_long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            InMemoryDepartmentRepository::with_names([too_long]),
            Err(RepositoryError::Validation(_))
        ));
        assert!(matches!(
            InMemoryDepartmentRepository::with_names(["Sales", "  "]),
            Err(RepositoryError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn create_assigns_increasing_ids() {
        let repo = seeded();

        let ops = repo.create(named(" Operations ")).await.unwrap();
        assert_eq!(ops.id, 4);
        assert_eq!(ops.name, "Operations");

        let legal = repo.create(named("Legal")).await.unwrap();
        assert_eq!(legal.id, 5);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[actix_web::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = seeded();

        repo.delete_by_id(3).await.unwrap();
        let created = repo.create(named("Support")).await.unwrap();

        assert_eq!(created.id, 4);
        assert!(repo.find_by_id(3).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn create_rejects_blank_name() {
        let repo = seeded();

        let err = repo.create(named("  ")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[actix_web::test]
    async fn update_renames_existing_department() {
        let repo = seeded();

        let updated = repo.update(1, named("Inside Sales")).await.unwrap();
        assert_eq!(updated, Department { id: 1, name: "Inside Sales".into() });
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(updated));
    }

    #[actix_web::test]
    async fn missing_ids_report_not_found() {
        let repo = seeded();

        let err = repo.update(42, named("Nope")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(42)));

        let err = repo.delete_by_id(42).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(42)));
    }
}
