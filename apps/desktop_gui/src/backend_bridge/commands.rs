//! Backend commands queued from UI to the backend worker.

use client_core::{LoadTicket, SubmitTicket};
use shared::domain::TaskId;
use shared::protocol::{CreateTaskRequest, ProfilePatch, TaskPatch};

pub enum BackendCommand {
    Login {
        ticket: SubmitTicket,
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    FetchTasks {
        ticket: LoadTicket,
    },
    CreateTask {
        local_id: TaskId,
        request: CreateTaskRequest,
    },
    UpdateTask {
        id: TaskId,
        patch: TaskPatch,
    },
    DeleteTask {
        id: TaskId,
    },
    UpdateProfile {
        patch: ProfilePatch,
    },
    Logout,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Login { .. } => "login",
            BackendCommand::Register { .. } => "register",
            BackendCommand::FetchTasks { .. } => "fetch_tasks",
            BackendCommand::CreateTask { .. } => "create_task",
            BackendCommand::UpdateTask { .. } => "update_task",
            BackendCommand::DeleteTask { .. } => "delete_task",
            BackendCommand::UpdateProfile { .. } => "update_profile",
            BackendCommand::Logout => "logout",
        }
    }
}
