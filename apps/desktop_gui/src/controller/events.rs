//! UI/backend events and error modeling for the desktop controller.

use client_core::{LoadTicket, SubmitTicket};
use shared::domain::{Task, TaskId};
use shared::protocol::UserProfile;

pub enum UiEvent {
    LoginOk {
        ticket: SubmitTicket,
        user: UserProfile,
    },
    LoginFailed {
        ticket: SubmitTicket,
        error: UiError,
    },
    RegisterOk,
    RegisterFailed(UiError),
    TasksLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Task>, String>,
    },
    TaskCreated {
        local_id: TaskId,
        task: Task,
    },
    TaskCreateFailed {
        local_id: TaskId,
        reason: String,
    },
    TaskUpdated(Task),
    TaskUpdateFailed {
        id: TaskId,
        reason: String,
    },
    TaskDeleteFailed {
        id: TaskId,
        reason: String,
    },
    ProfileUpdated(UserProfile),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Login,
    Register,
    FetchTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    Profile,
    General,
}

/// Collapse raw login failures into user-facing phrasing.
pub fn classify_login_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; verify local app environment and retry.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Server unreachable; check URL/network and retry sign-in.".to_string()
    } else if lower.contains("unauthorized") || lower.contains("invalid credential") {
        "Invalid credentials. Check your username and password.".to_string()
    } else {
        format!("Sign-in error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("session expired")
            || message_lower.contains("invalid token")
            || message_lower.contains("invalid credential")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("validation")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// An auth failure outside the login flow means the stored session is
    /// no longer valid and the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth && self.context != UiErrorContext::Login
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
