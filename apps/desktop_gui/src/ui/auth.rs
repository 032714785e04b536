//! Auth screen: sign-in and account creation on one card. The card's
//! rect seeds the shared-element morph into the dashboard header.

use std::time::Instant;

use eframe::egui;

use client_core::AuthFieldError;
use motion::PointerSpring;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::app::{ui_in_rect, DesktopGuiApp};
use crate::ui::theme::palette;
use crate::ui::widgets::{shake_offset, SHAKE_DURATION};

/// Pull strength of the submit button toward the hovering cursor.
const MAGNET_ATTRACTION: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pub email: String,
    pub register_busy: bool,
    pub shake_started: Option<Instant>,
    pub magnet: PointerSpring,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            username: String::new(),
            password: String::new(),
            email: String::new(),
            register_busy: false,
            shake_started: None,
            magnet: PointerSpring::new(MAGNET_ATTRACTION),
        }
    }

    pub fn switch_to_sign_in(&mut self) {
        self.mode = AuthMode::SignIn;
        self.password.clear();
    }

    pub fn shake_active(&self, now: Instant) -> bool {
        self.shake_started
            .map(|start| now.duration_since(start).as_secs_f32() < SHAKE_DURATION)
            .unwrap_or(false)
    }

    pub fn shake_dx(&self, now: Instant) -> f32 {
        self.shake_started
            .map(|start| shake_offset(now.duration_since(start).as_secs_f32()))
            .unwrap_or(0.0)
    }
}

impl DesktopGuiApp {
    pub(crate) fn show_auth_screen(&mut self, ctx: &egui::Context, now: Instant, dt: f32) {
        self.auth.magnet.tick(dt, &self.motion_config);
        let palette = palette(self.theme);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(palette.app_background))
            .show(ctx, |ui| {
                let avail = ui.max_rect();
                let card_width = 420.0_f32.min(avail.width() - 32.0);
                let dx = if self.motion_config.reduced_motion {
                    0.0
                } else {
                    self.auth.shake_dx(now)
                };
                let top = avail.top() + (avail.height() * 0.16).clamp(24.0, 140.0);
                let card_rect = egui::Rect::from_min_size(
                    egui::pos2(avail.center().x - card_width / 2.0 + dx, top),
                    egui::vec2(card_width, avail.height() - top),
                );

                ui_in_rect(ui, card_rect, |ui| {
                    let frame = egui::Frame::NONE
                        .fill(palette.card_background)
                        .corner_radius(14.0)
                        .stroke(egui::Stroke::new(1.0, palette.card_stroke))
                        .inner_margin(egui::Margin::symmetric(20, 18))
                        .show(ui, |ui| {
                            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                            self.auth_card_contents(ui, now);
                        });
                    self.anchor.note_auth_rect(frame.response.rect);
                });
            });
    }

    fn auth_card_contents(&mut self, ui: &mut egui::Ui, now: Instant) {
        let palette = palette(self.theme);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("◦").color(palette.accent).size(24.0));
            ui.vertical(|ui| {
                ui.heading("Lucid");
                ui.weak(match self.auth.mode {
                    AuthMode::SignIn => "Sign in to your tasks.",
                    AuthMode::Register => "Create your account.",
                });
            });
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.auth.mode == AuthMode::SignIn, "Sign in")
                .clicked()
            {
                self.auth.mode = AuthMode::SignIn;
                self.phase.note_field_edited();
            }
            if ui
                .selectable_label(self.auth.mode == AuthMode::Register, "Create account")
                .clicked()
            {
                self.auth.mode = AuthMode::Register;
                self.phase.note_field_edited();
            }
        });

        ui.add_space(4.0);
        let mut submitted = false;
        egui::Frame::NONE
            .fill(palette.app_background.gamma_multiply(0.6))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                let username = ui.add(
                    egui::TextEdit::singleline(&mut self.auth.username)
                        .hint_text("Username")
                        .desired_width(f32::INFINITY),
                );
                if username.changed() {
                    self.phase.note_field_edited();
                }

                if self.auth.mode == AuthMode::Register {
                    let email = ui.add(
                        egui::TextEdit::singleline(&mut self.auth.email)
                            .hint_text("Email")
                            .desired_width(f32::INFINITY),
                    );
                    if email.changed() {
                        self.phase.note_field_edited();
                    }
                }

                let password = ui.add(
                    egui::TextEdit::singleline(&mut self.auth.password)
                        .password(true)
                        .hint_text("Password")
                        .desired_width(f32::INFINITY),
                );
                if password.changed() {
                    self.phase.note_field_edited();
                }

                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                if enter && (username.lost_focus() || password.lost_focus()) {
                    submitted = true;
                }
            });

        if self.phase.field_error() {
            ui.colored_label(palette.danger, "Please fill in every field.");
        }

        ui.add_space(6.0);
        let busy = match self.auth.mode {
            AuthMode::SignIn => self.phase.is_submitting(),
            AuthMode::Register => self.auth.register_busy,
        };
        let button_label = match (self.auth.mode, busy) {
            (AuthMode::SignIn, false) => "Sign in",
            (AuthMode::SignIn, true) => "Signing in...",
            (AuthMode::Register, false) => "Create account",
            (AuthMode::Register, true) => "Creating...",
        };
        // Magnetic submit: the button drifts toward a hovering cursor.
        let button_size = egui::vec2(ui.available_width(), 38.0);
        let (button_area, area_response) =
            ui.allocate_exact_size(button_size, egui::Sense::hover());
        match area_response.hover_pos() {
            Some(pos) => {
                let delta = pos - button_area.center();
                self.auth.magnet.set_offset(delta.x, delta.y);
            }
            None => self.auth.magnet.pointer_left(),
        }
        let (mx, my) = self.auth.magnet.offset();
        let button_rect = button_area.translate(egui::vec2(mx, my));
        let button = egui::Button::new(egui::RichText::new(button_label).strong())
            .fill(palette.accent)
            .min_size(button_size);
        ui_in_rect(ui, button_rect, |ui| {
            if ui.add_enabled(!busy, button).clicked() {
                submitted = true;
            }
        });
        if busy {
            ui.add(egui::Spinner::new().size(14.0));
        }

        if submitted && !busy {
            match self.auth.mode {
                AuthMode::SignIn => self.submit_sign_in(now),
                AuthMode::Register => self.submit_register(now),
            }
        }

        ui.add_space(4.0);
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn submit_sign_in(&mut self, now: Instant) {
        match self
            .phase
            .begin_submit(&self.auth.username, &self.auth.password)
        {
            Ok(ticket) => {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Login {
                        ticket,
                        username: self.auth.username.trim().to_string(),
                        password: self.auth.password.clone(),
                    },
                    &mut self.status,
                );
            }
            Err(AuthFieldError::EmptyFields) => {
                self.auth.shake_started = Some(now);
            }
            Err(AuthFieldError::AlreadySubmitting) => {}
        }
    }

    fn submit_register(&mut self, now: Instant) {
        let username = self.auth.username.trim();
        let email = self.auth.email.trim();
        if username.is_empty() || email.is_empty() || self.auth.password.is_empty() {
            let _ = self.phase.begin_submit("", "");
            self.auth.shake_started = Some(now);
            return;
        }
        self.auth.register_busy = true;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Register {
                username: username.to_string(),
                email: email.to_string(),
                password: self.auth.password.clone(),
            },
            &mut self.status,
        );
    }
}
