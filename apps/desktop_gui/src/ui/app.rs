//! App shell: owns every piece of UI state, drains backend events, and
//! drives one frame of the staged experience per `update`.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{Phase, PhaseMachine, TaskStore, AUTH_ANCHOR_ID};
use motion::MotionConfig;
use shared::protocol::UserProfile;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_login_failure, err_label, UiError, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::anchor::AnchorMorph;
use crate::ui::auth::AuthForm;
use crate::ui::dashboard::DashboardState;
use crate::ui::notifications::{NotificationKind, NotificationTray};
use crate::ui::splash::show_splash;
use crate::ui::theme::{palette, visuals_for, ThemeMode};

pub const SETTINGS_STORAGE_KEY: &str = "lucid_tasks.settings";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersistedSettings {
    pub theme: ThemeMode,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
        }
    }
}

/// Places a child ui inside an exact rect, clipped to it.
pub(crate) fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

pub(crate) fn fade(color: egui::Color32, alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * alpha.clamp(0.0, 1.0)) as u8,
    )
}

pub struct DesktopGuiApp {
    pub(crate) cmd_tx: Sender<BackendCommand>,
    pub(crate) ui_rx: Receiver<UiEvent>,

    pub(crate) phase: PhaseMachine,
    pub(crate) store: TaskStore,
    pub(crate) motion_config: MotionConfig,

    pub(crate) user: Option<UserProfile>,
    pub(crate) status: String,

    pub(crate) auth: AuthForm,
    pub(crate) dashboard: DashboardState,
    pub(crate) anchor: AnchorMorph,
    pub(crate) tray: NotificationTray,

    pub(crate) theme: ThemeMode,
    applied_theme: Option<ThemeMode>,

    backend_gone: bool,
    splash_started: Instant,
    last_frame: Instant,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        motion_config: MotionConfig,
        settings: PersistedSettings,
    ) -> Self {
        let now = Instant::now();
        Self {
            cmd_tx,
            ui_rx,
            phase: PhaseMachine::new(now),
            store: TaskStore::new(),
            motion_config,
            user: None,
            status: "Starting".to_string(),
            auth: AuthForm::new(),
            dashboard: DashboardState::new(),
            anchor: AnchorMorph::new(),
            tray: NotificationTray::new(),
            theme: settings.theme,
            applied_theme: None,
            backend_gone: false,
            splash_started: now,
            last_frame: now,
        }
    }

    pub(crate) fn request_task_reload(&mut self) {
        let ticket = self.store.begin_load();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchTasks { ticket },
            &mut self.status,
        );
    }

    /// The only App -> Auth edge. Everything dashboard-local is discarded.
    pub(crate) fn sign_out(&mut self, notice: Option<String>) {
        self.phase.logout();
        self.store = TaskStore::new();
        self.user = None;
        self.anchor.reset();
        self.dashboard.reset();
        self.auth.password.clear();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Logout, &mut self.status);
        if let Some(notice) = notice {
            self.tray
                .push(NotificationKind::Error, notice, Instant::now());
        }
    }

    /// A failed collection operation either means the session died (auth
    /// category outside login) or is a transient fault worth a notification,
    /// optionally followed by a reconciling refetch.
    fn handle_operation_failure(
        &mut self,
        context: UiErrorContext,
        message: String,
        now: Instant,
        reload: bool,
    ) {
        let error = UiError::from_message(context, message);
        if error.requires_reauth() && self.phase.phase() == Phase::App {
            self.sign_out(Some(
                "Session expired or invalid. Please sign in again.".to_string(),
            ));
            return;
        }
        tracing::warn!(
            category = err_label(error.category()),
            message = error.message(),
            "operation failed"
        );
        self.tray
            .push(NotificationKind::Error, error.message(), now);
        if reload {
            self.request_task_reload();
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        loop {
            let event = match self.ui_rx.try_recv() {
                Ok(event) => event,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    if !self.backend_gone {
                        self.backend_gone = true;
                        let error = UiError::from_message(
                            UiErrorContext::General,
                            "Backend worker disconnected; restart the app to reconnect.",
                        );
                        tracing::error!(
                            category = err_label(error.category()),
                            "backend event channel closed"
                        );
                        self.tray
                            .push(NotificationKind::Error, error.message(), now);
                    }
                    break;
                }
            };
            match event {
                UiEvent::LoginOk { ticket, user } => {
                    if self.phase.submit_succeeded(ticket) {
                        self.dashboard.prepare_for_session(&user);
                        self.user = Some(user);
                        self.anchor.begin(&self.motion_config);
                        self.request_task_reload();
                        self.status = "Signed in".to_string();
                    }
                }
                UiEvent::LoginFailed { ticket, error } => {
                    if self.phase.submit_failed(ticket) {
                        self.auth.shake_started = Some(now);
                        self.tray.push(
                            NotificationKind::Error,
                            classify_login_failure(error.message()),
                            now,
                        );
                    }
                }
                UiEvent::RegisterOk => {
                    self.auth.register_busy = false;
                    self.auth.switch_to_sign_in();
                    self.tray.push(
                        NotificationKind::Success,
                        "Account created. Sign in to continue.",
                        now,
                    );
                }
                UiEvent::RegisterFailed(error) => {
                    self.auth.register_busy = false;
                    self.auth.shake_started = Some(now);
                    self.tray
                        .push(NotificationKind::Error, error.message(), now);
                }
                UiEvent::TasksLoaded { ticket, result } => {
                    let failure = result.as_ref().err().cloned();
                    if self.store.finish_load(ticket, result) {
                        if let Some(reason) = failure {
                            self.handle_operation_failure(
                                UiErrorContext::FetchTasks,
                                format!("Could not load tasks: {reason}"),
                                now,
                                false,
                            );
                        }
                    }
                }
                UiEvent::TaskCreated { local_id, task } => {
                    let server_id = task.id;
                    if !self.store.confirm_create(local_id, task) {
                        // The row was deleted while the create was in
                        // flight; the server copy has to go too.
                        tracing::debug!(task_id = server_id.0, "deleting orphaned create");
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::DeleteTask { id: server_id },
                            &mut self.status,
                        );
                    }
                }
                UiEvent::TaskCreateFailed { local_id, reason } => {
                    self.store.rollback_create(local_id);
                    self.handle_operation_failure(
                        UiErrorContext::CreateTask,
                        format!("Could not create task: {reason}"),
                        now,
                        false,
                    );
                }
                UiEvent::TaskUpdated(task) => {
                    self.store.apply_update(task);
                }
                UiEvent::TaskUpdateFailed { id, reason } => {
                    tracing::warn!(task_id = id.0, %reason, "task update failed; reloading");
                    self.handle_operation_failure(
                        UiErrorContext::UpdateTask,
                        format!("Could not update task: {reason}"),
                        now,
                        true,
                    );
                }
                UiEvent::TaskDeleteFailed { id, reason } => {
                    tracing::warn!(task_id = id.0, %reason, "task delete failed; reloading");
                    self.handle_operation_failure(
                        UiErrorContext::DeleteTask,
                        format!("Could not delete task: {reason}"),
                        now,
                        true,
                    );
                }
                UiEvent::ProfileUpdated(user) => {
                    self.user = Some(user);
                    self.tray
                        .push(NotificationKind::Success, "Profile updated", now);
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(error) => {
                    if error.requires_reauth() && self.phase.phase() == Phase::App {
                        self.sign_out(Some(
                            "Session expired or invalid. Please sign in again.".to_string(),
                        ));
                    } else {
                        self.tray
                            .push(NotificationKind::Error, error.message(), now);
                    }
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for(self.theme);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
    }

    fn show_notifications(&mut self, ctx: &egui::Context) {
        if self.tray.entries().is_empty() {
            return;
        }
        let palette = palette(self.theme);
        let mut dismissed = None;

        egui::Area::new(egui::Id::new("notification_tray"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_width(280.0);
                for entry in self.tray.entries() {
                    let reveal = entry.reveal();
                    let accent = match entry.kind {
                        NotificationKind::Success => palette.success,
                        NotificationKind::Error => palette.danger,
                        NotificationKind::Info => palette.accent,
                    };
                    ui.add_space((1.0 - reveal) * 6.0);
                    egui::Frame::NONE
                        .fill(fade(palette.card_background, reveal))
                        .stroke(egui::Stroke::new(1.0, fade(accent, reveal)))
                        .corner_radius(10.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&entry.message)
                                        .color(fade(palette.text_primary, reveal)),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("x").clicked() {
                                            dismissed = Some(entry.id);
                                        }
                                    },
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(id) = dismissed {
            self.tray.dismiss(id);
        }
    }

    fn draw_anchor_overlay(&self, ctx: &egui::Context) {
        let Some(rect) = self.anchor.overlay_rect() else {
            return;
        };
        let palette = palette(self.theme);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new(AUTH_ANCHOR_ID),
        ));
        painter.rect_filled(rect, egui::CornerRadius::same(14), palette.card_background);
        painter.rect_stroke(
            rect,
            egui::CornerRadius::same(14),
            egui::Stroke::new(1.0, palette.accent_soft),
            egui::StrokeKind::Middle,
        );
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.phase.phase() == Phase::Splash
            || self.store.is_loading()
            || self.phase.is_submitting()
            || self.anchor.is_animating()
            || self.tray.is_animating()
            || self.auth.shake_active(now)
            || !self.auth.magnet.is_at_rest()
            || self.dashboard.is_animating()
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .clamp(0.0, 0.1);
        self.last_frame = now;

        self.process_ui_events(now);
        self.apply_theme_if_needed(ctx);
        self.phase.tick(now);
        self.anchor.tick(dt, &self.motion_config);
        self.tray.tick(now, dt, &self.motion_config);

        match self.phase.phase() {
            Phase::Splash => {
                let elapsed = now.duration_since(self.splash_started).as_secs_f32();
                if show_splash(ctx, elapsed, &self.motion_config, &palette(self.theme)) {
                    self.phase.skip_splash();
                }
            }
            Phase::Auth => self.show_auth_screen(ctx, now, dt),
            Phase::App => self.show_dashboard(ctx, now, dt),
        }

        self.show_notifications(ctx);
        self.draw_anchor_overlay(ctx);

        if self.is_animating(now) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings { theme: self.theme };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
