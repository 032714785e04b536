use chrono::NaiveDate;
use shared::domain::{Priority, Task, TaskId, TaskStatus};

use crate::store::{FilterUpdate, TaskStore, PAGE_SIZE};

fn task(id: i64, title: &str) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        description: None,
        status: TaskStatus::Pending,
        priority: Priority::Medium,
        due_date: None,
    }
}

fn loaded_store(count: usize) -> TaskStore {
    let mut store = TaskStore::new();
    let ticket = store.begin_load();
    let tasks = (1..=count as i64)
        .map(|i| task(i, &format!("Task {i}")))
        .collect();
    assert!(store.finish_load(ticket, Ok(tasks)));
    store
}

fn page_invariant_holds(store: &TaskStore) -> bool {
    let filtered = store.filtered().len();
    let max = filtered.div_ceil(PAGE_SIZE).max(1);
    (1..=max).contains(&store.current_page())
}

#[test]
fn twenty_five_tasks_make_three_pages_and_page_four_clamps() {
    let mut store = loaded_store(25);
    assert_eq!(store.total_pages(), 3);

    store.set_page(4);
    assert_eq!(store.current_page(), 3);
    assert_eq!(store.current_page_tasks().len(), 25 - 2 * PAGE_SIZE);

    store.set_page(0);
    assert_eq!(store.current_page(), 1);
}

#[test]
fn page_invariant_survives_arbitrary_mutation_sequences() {
    let mut store = loaded_store(25);
    store.set_page(3);
    assert!(page_invariant_holds(&store));

    // Shrink the filtered set out from under the page cursor.
    store.set_filter(FilterUpdate {
        search: Some("Task 1".to_string()),
        ..FilterUpdate::default()
    });
    assert_eq!(store.current_page(), 1);
    assert!(page_invariant_holds(&store));

    store.set_filter(FilterUpdate {
        search: Some(String::new()),
        ..FilterUpdate::default()
    });
    store.set_page(3);
    for id in 1..=20 {
        store.remove(TaskId(id));
        assert!(page_invariant_holds(&store), "broken after removing {id}");
    }

    store.insert_optimistic("fresh".to_string(), None);
    assert!(page_invariant_holds(&store));
}

#[test]
fn filter_change_always_resets_to_page_one() {
    let mut store = loaded_store(25);
    store.set_page(3);
    store.set_filter(FilterUpdate {
        priority: Some(Some(Priority::Medium)),
        ..FilterUpdate::default()
    });
    assert_eq!(store.current_page(), 1);
}

#[test]
fn search_is_case_insensitive_substring_on_title() {
    let mut store = TaskStore::new();
    let ticket = store.begin_load();
    store
        .finish_load(
            ticket,
            Ok(vec![
                task(1, "Refine motion rhythm"),
                task(2, "Design entry flow"),
            ]),
        );

    store.set_filter(FilterUpdate {
        search: Some("MOTION".to_string()),
        ..FilterUpdate::default()
    });
    let filtered = store.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, TaskId(1));

    // Whitespace-only search matches everything.
    store.set_filter(FilterUpdate {
        search: Some("   ".to_string()),
        ..FilterUpdate::default()
    });
    assert_eq!(store.filtered().len(), 2);
}

#[test]
fn priority_and_status_filters_compose() {
    let mut store = TaskStore::new();
    let mut high_done = task(1, "a");
    high_done.priority = Priority::High;
    high_done.status = TaskStatus::Completed;
    let mut high_open = task(2, "b");
    high_open.priority = Priority::High;
    let low = task(3, "c");

    let ticket = store.begin_load();
    store.finish_load(ticket, Ok(vec![high_done, high_open, low]));

    store.set_filter(FilterUpdate {
        priority: Some(Some(Priority::High)),
        status: Some(Some(TaskStatus::Completed)),
        ..FilterUpdate::default()
    });
    let filtered = store.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, TaskId(1));
}

#[test]
fn derivation_is_idempotent_and_a_subset_of_the_authoritative_set() {
    let mut store = loaded_store(12);
    store.set_filter(FilterUpdate {
        search: Some("1".to_string()),
        ..FilterUpdate::default()
    });
    let first: Vec<TaskId> = store.filtered().iter().map(|t| t.id).collect();
    let second: Vec<TaskId> = store.filtered().iter().map(|t| t.id).collect();
    assert_eq!(first, second);
    // Ordering is preserved from the authoritative set, no implicit sort.
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);
}

#[test]
fn toggle_twice_restores_the_prior_non_completed_status() {
    let mut store = TaskStore::new();
    let mut in_progress = task(1, "a");
    in_progress.status = TaskStatus::InProgress;
    let ticket = store.begin_load();
    store.finish_load(ticket, Ok(vec![in_progress, task(2, "b")]));

    store.toggle_completion(TaskId(1));
    assert_eq!(store.filtered()[0].status, TaskStatus::Completed);
    store.toggle_completion(TaskId(1));
    assert_eq!(store.filtered()[0].status, TaskStatus::InProgress);

    // A task completed by the server (no recorded prior) falls back to
    // PENDING.
    store.toggle_completion(TaskId(2));
    store.toggle_completion(TaskId(2));
    assert_eq!(store.filtered()[1].status, TaskStatus::Pending);
}

#[test]
fn toggling_or_removing_a_missing_id_is_a_silent_noop() {
    let mut store = loaded_store(3);
    store.toggle_completion(TaskId(99));
    store.remove(TaskId(99));
    assert_eq!(store.stats().total, 3);
}

#[test]
fn stats_count_from_the_authoritative_set() {
    let mut store = loaded_store(10);
    for id in 1..=4 {
        store.toggle_completion(TaskId(id));
    }
    let mut in_progress = task(11, "x");
    in_progress.status = TaskStatus::InProgress;
    let ticket = store.begin_load();
    let mut tasks: Vec<Task> = (1..=10).map(|i| task(i, "t")).collect();
    tasks[0].status = TaskStatus::Completed;
    tasks.push(in_progress);
    store.finish_load(ticket, Ok(tasks));

    let stats = store.stats();
    assert_eq!(stats.total, 11);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.in_progress, 1);
}

#[test]
fn stale_load_response_cannot_overwrite_a_newer_one() {
    let mut store = TaskStore::new();
    let ticket_a = store.begin_load();
    let ticket_b = store.begin_load();

    // B resolves first and wins.
    assert!(store.finish_load(ticket_b, Ok(vec![task(2, "from b")])));
    assert!(!store.is_loading());

    // A resolves late; its payload must be discarded.
    assert!(!store.finish_load(ticket_a, Ok(vec![task(1, "from a")])));
    let filtered = store.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "from b");
}

#[test]
fn stale_response_does_not_clear_the_loading_flag_of_a_newer_load() {
    let mut store = TaskStore::new();
    let ticket_a = store.begin_load();
    let _ticket_b = store.begin_load();
    assert!(!store.finish_load(ticket_a, Ok(vec![])));
    assert!(store.is_loading(), "newer load is still in flight");
}

#[test]
fn failed_load_resets_to_empty_and_clears_loading() {
    let mut store = loaded_store(5);
    store.select(TaskId(3));
    let ticket = store.begin_load();
    assert!(store.finish_load(ticket, Err("connection refused".to_string())));
    assert!(!store.is_loading());
    assert!(store.is_empty());
    assert!(store.selected_task().is_none());
}

#[test]
fn optimistic_create_confirm_swaps_in_the_server_record() {
    let mut store = loaded_store(2);
    let local_id = store.insert_optimistic("Draft".to_string(), Some("details".to_string()));
    assert!(local_id.is_local());
    assert_eq!(store.filtered()[0].id, local_id);

    let mut confirmed = task(77, "Draft");
    confirmed.description = Some("details".to_string());
    assert!(store.confirm_create(local_id, confirmed));

    let filtered = store.filtered();
    assert_eq!(filtered[0].id, TaskId(77));
    assert_eq!(filtered.len(), 3);
    // Position at the front is preserved.
    assert_eq!(filtered[1].id, TaskId(1));
}

#[test]
fn confirming_a_create_after_local_removal_reports_the_orphan() {
    let mut store = loaded_store(2);
    let local_id = store.insert_optimistic("Changed my mind".to_string(), None);
    store.remove(local_id);

    // The server record must not reappear, and the caller learns it now
    // owns an orphan to delete remotely.
    assert!(!store.confirm_create(local_id, task(77, "Changed my mind")));
    assert!(store.filtered().iter().all(|t| t.id != TaskId(77)));
    assert_eq!(store.stats().total, 2);
}

#[test]
fn optimistic_create_rollback_removes_the_local_record() {
    let mut store = loaded_store(2);
    let local_id = store.insert_optimistic("Doomed".to_string(), None);
    store.rollback_create(local_id);
    assert_eq!(store.stats().total, 2);
}

#[test]
fn local_ids_never_collide_across_inserts() {
    let mut store = TaskStore::new();
    let a = store.insert_optimistic("a".to_string(), None);
    let b = store.insert_optimistic("b".to_string(), None);
    assert_ne!(a, b);
    assert!(a.is_local() && b.is_local());
}

#[test]
fn removing_the_selected_task_closes_the_detail_view() {
    let mut store = loaded_store(3);
    store.select(TaskId(2));
    assert!(store.selected_task().is_some());
    store.remove(TaskId(2));
    assert!(store.selected_task().is_none());
}

#[test]
fn selecting_an_unknown_id_is_ignored() {
    let mut store = loaded_store(2);
    store.select(TaskId(42));
    assert!(store.selected_task().is_none());
}

#[test]
fn empty_authoritative_set_yields_empty_view_and_single_page() {
    let store = TaskStore::new();
    assert!(store.is_empty());
    assert!(store.current_page_tasks().is_empty());
    assert_eq!(store.total_pages(), 1);
    assert_eq!(store.stats(), Default::default());
}

#[test]
fn apply_update_replaces_in_place_and_ignores_unknown_ids() {
    let mut store = loaded_store(3);
    let mut updated = task(2, "Renamed");
    updated.status = TaskStatus::InProgress;
    store.apply_update(updated);
    assert_eq!(store.filtered()[1].title, "Renamed");

    store.apply_update(task(99, "ghost"));
    assert_eq!(store.stats().total, 3);
}

#[test]
fn tasks_due_on_matches_exact_dates_only() {
    let mut store = TaskStore::new();
    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let mut due = task(1, "due");
    due.due_date = Some(date);
    let mut other = task(2, "other");
    other.due_date = Some(date.succ_opt().unwrap());
    let ticket = store.begin_load();
    store.finish_load(ticket, Ok(vec![due, other, task(3, "undated")]));

    let on_date = store.tasks_due_on(date);
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0].id, TaskId(1));
}
