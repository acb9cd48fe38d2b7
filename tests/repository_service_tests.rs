use employee_registry::RegistryError;
use employee_registry::config::DatabaseConfig;
use employee_registry::db::{Employee, EmployeePayload, EmployeesStorage};
use employee_registry::repository::EmployeeRepository;
use employee_registry::service::EmployeeService;
use std::sync::Arc;
use std::time::Duration;
use tracing::Span;

async fn repository() -> Arc<EmployeeRepository> {
    let cfg = DatabaseConfig {
        dbname: ":memory:".to_string(),
        ..DatabaseConfig::default()
    };
    let storage = EmployeesStorage::connect(&cfg)
        .await
        .expect("failed to open in-memory store");
    Arc::new(EmployeeRepository::new(storage, Span::none()))
}

fn payload(name: &str, position: &str, salary: f64) -> EmployeePayload {
    EmployeePayload {
        name: name.to_string(),
        position: position.to_string(),
        salary,
    }
}

#[tokio::test]
async fn repository_assigns_increasing_ids() {
    let repo = repository().await;
    let a = repo.create(Employee::new("A", "Dev", 1.0)).await;
    let b = repo.create(Employee::new("B", "Dev", 2.0)).await;
    assert!(a.id > 0);
    assert!(b.id > a.id);
    assert_eq!(repo.get_by_id(b.id).await.unwrap(), b);
}

#[tokio::test]
async fn missing_ids_are_not_found_everywhere() {
    let repo = repository().await;
    let ghost = Employee {
        id: 404,
        ..Employee::new("Ghost", "None", 0.0)
    };

    assert!(matches!(repo.get_by_id(404).await, Err(RegistryError::NotFound(404))));
    assert!(matches!(repo.update(&ghost).await, Err(RegistryError::NotFound(404))));
    assert!(matches!(repo.delete(404).await, Err(RegistryError::NotFound(404))));

    let service = EmployeeService::new(repo, Span::none());
    assert!(matches!(
        service.update_employee(404, payload("x", "y", 1.0)).await,
        Err(RegistryError::NotFound(404))
    ));
}

#[tokio::test]
async fn list_never_exceeds_limit() {
    let repo = repository().await;
    for i in 0..7 {
        repo.create(Employee::new(format!("e{i}"), "Staff", 1.0)).await;
    }
    let service = EmployeeService::new(repo.clone(), Span::none());

    for limit in 1..=8 {
        let rows = service.list_employees(1, limit).await.unwrap();
        assert!((rows.len() as i64) <= limit);
    }

    let window = repo.list(3, 2).await.unwrap();
    let names: Vec<_> = window.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["e3", "e4"]);

    let page = service.list_employees(2, 3).await.unwrap();
    let names: Vec<_> = page.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["e3", "e4", "e5"]);
}

#[tokio::test]
async fn service_create_returns_stored_record() {
    let service = EmployeeService::new(repository().await, Span::none());
    let created = service.create_employee("John Doe", "Software Engineer", 50000.0).await;
    let fetched = service.get_employee_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, "John Doe");
    assert_eq!(fetched.position, "Software Engineer");
    assert_eq!(fetched.salary, 50000.0);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let service = EmployeeService::new(repository().await, Span::none());
    let created = service.create_employee("Short", "Lived", 1.0).await;
    service.delete_employee(created.id).await.unwrap();
    assert!(matches!(
        service.get_employee_by_id(created.id).await,
        Err(RegistryError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_read_modify_write_loses_no_increments() {
    let service = EmployeeService::new(repository().await, Span::none());
    let created = service.create_employee("Counter", "Counter", 0.0).await;

    let writers: i32 = 32;
    let mut tasks = Vec::new();
    for _ in 0..writers {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service
                .modify_employee(created.id, |employee| employee.salary += 1.0)
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let last = service.get_employee_by_id(created.id).await.unwrap();
    assert_eq!(last.salary, f64::from(writers));
    assert_eq!(last.name, "Counter");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_waits_for_a_held_lock() {
    let repo = repository().await;
    let service = EmployeeService::new(repo.clone(), Span::none());
    let created = service.create_employee("Before", "Before", 1.0).await;

    let locked = repo.lock().await;
    let mut update = tokio::spawn({
        let service = service.clone();
        async move {
            service
                .update_employee(created.id, payload("After", "After", 2.0))
                .await
        }
    });

    let pending = tokio::time::timeout(Duration::from_millis(100), &mut update).await;
    assert!(pending.is_err(), "update finished while the lock was held");
    assert_eq!(locked.get_by_id(created.id).await.unwrap().name, "Before");
    drop(locked);

    let updated = update.await.unwrap().unwrap();
    assert_eq!(updated.name, "After");
    assert_eq!(updated.salary, 2.0);
}

#[tokio::test]
async fn modify_cannot_change_the_id() {
    let service = EmployeeService::new(repository().await, Span::none());
    let created = service.create_employee("Fixed", "Id", 1.0).await;
    let modified = service
        .modify_employee(created.id, |employee| employee.id = 9999)
        .await
        .unwrap();
    assert_eq!(modified.id, created.id);
    assert!(service.get_employee_by_id(9999).await.is_err());
}

#[tokio::test]
async fn held_lock_runs_several_operations() {
    let repo = repository().await;
    let locked = repo.lock().await;
    let created = locked.create(Employee::new("Held", "Lock", 5.0)).await;
    let fetched = locked.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
    locked.delete(created.id).await.unwrap();
    drop(locked);

    assert!(repo.list(0, 10).await.unwrap().is_empty());
}
