//! Backend worker thread: owns the async runtime and drives either the
//! real HTTP client or the in-process demo backend.

use std::thread;
use std::time::Duration;

use chrono::{Days, Local};
use crossbeam_channel::{Receiver, Sender};

use client_core::TaskManagerClient;
use shared::domain::{Priority, Task, TaskId, TaskStatus, UserId};
use shared::protocol::{CreateTaskRequest, ProfilePatch, TaskPatch, UserProfile};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Artificial latency for the demo backend, mirroring a believable server
/// round trip so the staged sign-in and loading states stay visible.
const DEMO_LOGIN_DELAY: Duration = Duration::from_millis(900);
const DEMO_FETCH_DELAY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub server_url: String,
    pub demo: bool,
}

pub fn launch(config: BridgeConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            if config.demo {
                run_demo(cmd_rx, ui_tx).await;
            } else {
                run_networked(config.server_url, cmd_rx, ui_tx).await;
            }
        });
    });
}

async fn run_networked(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let mut client = TaskManagerClient::new(server_url);

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend: handling command");
        match cmd {
            BackendCommand::Login {
                ticket,
                username,
                password,
            } => match client.login(&username, &password).await {
                Ok(response) => {
                    let _ = ui_tx.try_send(UiEvent::LoginOk {
                        ticket,
                        user: response.user,
                    });
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::LoginFailed {
                        ticket,
                        error: UiError::from_message(UiErrorContext::Login, err.to_string()),
                    });
                }
            },
            BackendCommand::Register {
                username,
                email,
                password,
            } => match client.register(&username, &email, &password).await {
                Ok(()) => {
                    let _ = ui_tx.try_send(UiEvent::RegisterOk);
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::RegisterFailed(UiError::from_message(
                        UiErrorContext::Register,
                        err.to_string(),
                    )));
                }
            },
            BackendCommand::FetchTasks { ticket } => {
                let result = client
                    .get_all_tasks()
                    .await
                    .map_err(|err| err.to_string());
                if let Err(reason) = &result {
                    tracing::warn!(%reason, "backend: task fetch failed");
                }
                let _ = ui_tx.try_send(UiEvent::TasksLoaded { ticket, result });
            }
            BackendCommand::CreateTask { local_id, request } => {
                match client.create_task(&request).await {
                    Ok(task) => {
                        let _ = ui_tx.try_send(UiEvent::TaskCreated { local_id, task });
                    }
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::TaskCreateFailed {
                            local_id,
                            reason: err.to_string(),
                        });
                    }
                }
            }
            BackendCommand::UpdateTask { id, patch } => match client.update_task(id, &patch).await
            {
                Ok(task) => {
                    let _ = ui_tx.try_send(UiEvent::TaskUpdated(task));
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::TaskUpdateFailed {
                        id,
                        reason: err.to_string(),
                    });
                }
            },
            BackendCommand::DeleteTask { id } => {
                if let Err(err) = client.delete_task(id).await {
                    let _ = ui_tx.try_send(UiEvent::TaskDeleteFailed {
                        id,
                        reason: err.to_string(),
                    });
                }
            }
            BackendCommand::UpdateProfile { patch } => {
                match client.update_profile(&patch).await {
                    Ok(user) => {
                        let _ = ui_tx.try_send(UiEvent::ProfileUpdated(user));
                    }
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            UiErrorContext::Profile,
                            err.to_string(),
                        )));
                    }
                }
            }
            BackendCommand::Logout => {
                client.logout();
            }
        }
    }
}

/// In-process backend with seeded data. No network, but the same staged
/// latency the UI expects, so motion around loading states stays honest.
struct DemoBackend {
    tasks: Vec<Task>,
    next_id: i64,
    profile: UserProfile,
}

impl DemoBackend {
    fn new() -> Self {
        let today = Local::now().date_naive();
        let tasks = vec![
            Task {
                id: TaskId(1),
                title: "Design cinematic entry flow".to_string(),
                description: Some("Splash, sign-in, and the morph into the dashboard".to_string()),
                status: TaskStatus::Completed,
                priority: Priority::High,
                due_date: today.checked_sub_days(Days::new(1)),
            },
            Task {
                id: TaskId(2),
                title: "Refine motion rhythm".to_string(),
                description: Some("Stagger timings and spring stiffness tuning".to_string()),
                status: TaskStatus::InProgress,
                priority: Priority::Medium,
                due_date: Some(today),
            },
            Task {
                id: TaskId(3),
                title: "Add delightful empty state".to_string(),
                description: None,
                status: TaskStatus::Pending,
                priority: Priority::Low,
                due_date: today.checked_add_days(Days::new(2)),
            },
        ];
        Self {
            tasks,
            next_id: 4,
            profile: UserProfile {
                id: UserId(1),
                username: "demo".to_string(),
                email: Some("demo@lucid.tasks".to_string()),
            },
        }
    }

    fn create(&mut self, request: CreateTaskRequest) -> Task {
        let task = Task {
            id: TaskId(self.next_id),
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
        };
        self.next_id += 1;
        self.tasks.insert(0, task.clone());
        task
    }

    fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, String> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| format!("task {} not found", id.0))?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        Ok(task.clone())
    }

    fn delete(&mut self, id: TaskId) -> Result<(), String> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Err(format!("task {} not found", id.0));
        }
        Ok(())
    }
}

async fn run_demo(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let mut backend = DemoBackend::new();

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "demo backend: handling command");
        match cmd {
            BackendCommand::Login {
                ticket, username, ..
            } => {
                tokio::time::sleep(DEMO_LOGIN_DELAY).await;
                backend.profile.username = username;
                let _ = ui_tx.try_send(UiEvent::LoginOk {
                    ticket,
                    user: backend.profile.clone(),
                });
            }
            BackendCommand::Register { username, .. } => {
                tokio::time::sleep(DEMO_LOGIN_DELAY).await;
                backend.profile.username = username;
                let _ = ui_tx.try_send(UiEvent::RegisterOk);
            }
            BackendCommand::FetchTasks { ticket } => {
                tokio::time::sleep(DEMO_FETCH_DELAY).await;
                let _ = ui_tx.try_send(UiEvent::TasksLoaded {
                    ticket,
                    result: Ok(backend.tasks.clone()),
                });
            }
            BackendCommand::CreateTask { local_id, request } => {
                tokio::time::sleep(DEMO_FETCH_DELAY).await;
                let task = backend.create(request);
                let _ = ui_tx.try_send(UiEvent::TaskCreated { local_id, task });
            }
            BackendCommand::UpdateTask { id, patch } => match backend.update(id, patch) {
                Ok(task) => {
                    let _ = ui_tx.try_send(UiEvent::TaskUpdated(task));
                }
                Err(reason) => {
                    let _ = ui_tx.try_send(UiEvent::TaskUpdateFailed { id, reason });
                }
            },
            BackendCommand::DeleteTask { id } => {
                if let Err(reason) = backend.delete(id) {
                    let _ = ui_tx.try_send(UiEvent::TaskDeleteFailed { id, reason });
                }
            }
            BackendCommand::UpdateProfile { patch } => {
                let ProfilePatch { username, email } = patch;
                if let Some(username) = username {
                    backend.profile.username = username;
                }
                if let Some(email) = email {
                    backend.profile.email = Some(email);
                }
                let _ = ui_tx.try_send(UiEvent::ProfileUpdated(backend.profile.clone()));
            }
            BackendCommand::Logout => {}
        }
    }
}
