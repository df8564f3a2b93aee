use std::collections::HashSet;
use std::sync::Arc;

use accounts_api::models::account::{AccountPatch, NewAccount};
use accounts_api::repositories::{AccountRepository, InMemoryAccountRepository};

fn sample(name: &str, balance: f64) -> NewAccount {
    NewAccount {
        name: name.to_string(),
        description: None,
        balance,
        active: true,
    }
}

#[tokio::test]
async fn sequential_creates_assign_ids_in_call_order() {
    let repo = InMemoryAccountRepository::new();

    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(repo.create(sample(&format!("Account {i}"), 0.0)).await.id);
    }

    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_duplicate_ids() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let task_count = 50;

    let mut handles = Vec::new();
    for i in 0..task_count {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.create(sample(&format!("Account {i}"), 1.0)).await.id
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.expect("task must not panic")));
    }

    let expected: HashSet<u64> = (1..=task_count).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn created_record_round_trips_through_get() {
    let repo = InMemoryAccountRepository::new();

    let input = NewAccount {
        name: "Checking".to_string(),
        description: Some("Daily driver".to_string()),
        balance: 100.0,
        active: true,
    };
    let created = repo.create(input.clone()).await;
    let fetched = repo.get_by_id(created.id).await.expect("account visible");

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.description, input.description);
    assert_eq!(fetched.balance, input.balance);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn end_to_end_soft_delete_example() {
    let repo = InMemoryAccountRepository::new();

    let created = repo.create(sample("A", 100.0)).await;
    assert_eq!(created.id, 1);
    assert!(created.active);

    assert!(repo.delete(1).await);
    assert!(repo.get_by_id(1).await.is_none());
    assert!(!repo.exists(1).await);

    let admin_view = repo.get_all(false).await;
    assert_eq!(admin_view.len(), 1);
    assert_eq!(admin_view[0].id, 1);
    assert!(!admin_view[0].active);
}

#[tokio::test]
async fn mutations_on_missing_ids_are_sentinels_not_errors() {
    let repo = InMemoryAccountRepository::new();

    assert!(repo.update(7, sample("X", 0.0)).await.is_none());
    assert!(repo
        .partial_update(7, AccountPatch::default())
        .await
        .is_none());
    assert!(!repo.delete(7).await);
    assert!(!repo.exists(7).await);
}

#[tokio::test]
async fn concurrent_mutations_on_one_record_serialize() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let created = repo.create(sample("Contended", 0.0)).await;

    let mut handles = Vec::new();
    for i in 0..20u32 {
        let repo = Arc::clone(&repo);
        let id = created.id;
        handles.push(tokio::spawn(async move {
            let patch = AccountPatch {
                balance: Some(f64::from(i)),
                ..Default::default()
            };
            repo.partial_update(id, patch).await
        }));
    }
    for handle in handles {
        assert!(handle.await.expect("task must not panic").is_some());
    }

    // The record ends in a state one of the patches produced, not a torn mix.
    let account = repo.get_by_id(created.id).await.expect("still visible");
    assert!((0.0..20.0).contains(&account.balance));
    assert_eq!(account.name, "Contended");
    assert!(account.created_at <= account.updated_at);
}
