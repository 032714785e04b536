//! Task collection controller: the authoritative task set plus the
//! filter/pagination state that derives the rendered view.
//!
//! Derivations (`filtered`, `current_page_tasks`, `stats`) are recomputed
//! from scratch on every read rather than cached, so the view can never
//! observe state that drifted from the authoritative set.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::domain::{Priority, Task, TaskId, TaskStatus};
use tracing::debug;

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against the title.
    pub search: String,
    /// `None` means ALL.
    pub priority: Option<Priority>,
    /// `None` means ALL.
    pub status: Option<TaskStatus>,
}

impl FilterCriteria {
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.trim();
        if !needle.is_empty()
            && !task
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        true
    }
}

/// Partial criteria update. Outer `None` leaves a field untouched; for the
/// enum filters, `Some(None)` sets the field back to ALL.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub priority: Option<Option<Priority>>,
    pub status: Option<Option<TaskStatus>>,
}

/// Tag for one `load()` round trip. Responses carrying a stale ticket are
/// discarded so an older fetch can never overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: FilterCriteria,
    current_page: usize,
    loading: bool,
    load_generation: u64,
    next_local_id: i64,
    selected: Option<TaskId>,
    /// Status each task held before being toggled to COMPLETED, so a second
    /// toggle restores it instead of defaulting to PENDING.
    prior_status: HashMap<TaskId, TaskStatus>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            filter: FilterCriteria::default(),
            current_page: 1,
            loading: false,
            load_generation: 0,
            next_local_id: -1,
            selected: None,
            prior_status: HashMap::new(),
        }
    }

    // ---- load lifecycle -------------------------------------------------

    /// Begin an asynchronous reload. Supersedes any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Complete a reload. Returns whether the result was applied; stale
    /// tickets (a newer load was issued meanwhile) are ignored entirely so
    /// they cannot clear the loading flag of the newer request.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Task>, String>,
    ) -> bool {
        if ticket.0 != self.load_generation {
            debug!(
                stale = ticket.0,
                current = self.load_generation,
                "discarding superseded load response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
            }
            Err(reason) => {
                debug!(%reason, "load failed; falling back to empty set");
                self.tasks.clear();
            }
        }
        self.prune_bookkeeping();
        self.clamp_page();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ---- mutations ------------------------------------------------------

    /// Prepend an optimistic record with a fresh local id. The caller is
    /// expected to issue the create call and then either `confirm_create`
    /// or `rollback_create`.
    pub fn insert_optimistic(&mut self, title: String, description: Option<String>) -> TaskId {
        let id = TaskId(self.next_local_id);
        self.next_local_id -= 1;
        self.tasks.insert(
            0,
            Task {
                id,
                title,
                description,
                status: TaskStatus::Pending,
                priority: Priority::Medium,
                due_date: None,
            },
        );
        self.clamp_page();
        id
    }

    /// Swap the optimistic record for the server-confirmed one, preserving
    /// its position in the set. Returns false when the optimistic record was
    /// removed while the create was in flight; the server copy is then an
    /// orphan the caller must clean up.
    pub fn confirm_create(&mut self, local_id: TaskId, confirmed: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == local_id) else {
            return false;
        };
        if self.selected == Some(local_id) {
            self.selected = Some(confirmed.id);
        }
        if let Some(prior) = self.prior_status.remove(&local_id) {
            self.prior_status.insert(confirmed.id, prior);
        }
        *slot = confirmed;
        true
    }

    /// Remove a failed optimistic record.
    pub fn rollback_create(&mut self, local_id: TaskId) {
        self.remove(local_id);
    }

    /// Flip between COMPLETED and the remembered prior status (PENDING when
    /// none was recorded). Returns the new status so the caller can send
    /// the matching patch. Unknown ids are a silent no-op: the view is
    /// already consistent with the authoritative set.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if task.status == TaskStatus::Completed {
            task.status = self.prior_status.remove(&id).unwrap_or(TaskStatus::Pending);
        } else {
            self.prior_status.insert(id, task.status);
            task.status = TaskStatus::Completed;
        }
        let status = task.status;
        self.clamp_page();
        Some(status)
    }

    /// Delete from the authoritative set; closes the detail selection when
    /// it pointed at the removed task. Unknown ids are a no-op.
    pub fn remove(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return;
        }
        self.prior_status.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.clamp_page();
    }

    /// Replace a task in place by id (server-confirmed patch result).
    pub fn apply_update(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
            self.clamp_page();
        }
    }

    // ---- filter & pagination -------------------------------------------

    /// Any filter change resets to page 1 so a stale page number can never
    /// reference a page that no longer exists.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.filter.search = search;
        }
        if let Some(priority) = update.priority {
            self.filter.priority = priority;
        }
        if let Some(status) = update.status {
            self.filter.status = status;
        }
        self.current_page = 1;
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Clamps into the valid range instead of erroring.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    // ---- selection ------------------------------------------------------

    pub fn select(&mut self, id: TaskId) {
        if self.tasks.iter().any(|t| t.id == id) {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected?;
        self.tasks.iter().find(|t| t.id == id)
    }

    // ---- derivations ----------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filtered(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn current_page_tasks(&self) -> Vec<&Task> {
        let filtered = self.filtered();
        let start = (self.current_page - 1) * PAGE_SIZE;
        filtered
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        let mut stats = TaskStats {
            total: self.tasks.len(),
            ..TaskStats::default()
        };
        for task in &self.tasks {
            match task.status {
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Pending => {}
            }
        }
        stats
    }

    pub fn tasks_due_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.due_date == Some(date))
            .collect()
    }

    // ---- internals ------------------------------------------------------

    fn clamp_page(&mut self) {
        let max = self.total_pages();
        if self.current_page > max {
            self.current_page = max;
        }
    }

    /// Drop bookkeeping for ids no longer in the authoritative set.
    fn prune_bookkeeping(&mut self) {
        let ids: Vec<TaskId> = self.tasks.iter().map(|t| t.id).collect();
        self.prior_status.retain(|id, _| ids.contains(id));
        if let Some(selected) = self.selected {
            if !ids.contains(&selected) {
                self.selected = None;
            }
        }
    }
}
