//! Dashboard: stats, filters, the animated task list, the calendar view,
//! and the profile editor.

use std::time::Instant;

use chrono::{Local, NaiveDate, Timelike};
use eframe::egui;

use client_core::store::FilterUpdate;
use motion::{
    ListAnimationCoordinator, PointerSpring, ProgressRing, Spring, SPRING_COUNTER,
};
use shared::domain::{Priority, Task, TaskId, TaskStatus};
use shared::protocol::{CreateTaskRequest, ProfilePatch, TaskPatch, UserProfile};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::app::{fade, ui_in_rect, DesktopGuiApp};
use crate::ui::calendar::{CalendarMonth, WEEKDAY_HEADERS};
use crate::ui::theme::{palette, Palette};
use crate::ui::widgets::{
    draw_progress_ring, priority_color, priority_label, status_color, status_label,
};

const ROW_HEIGHT: f32 = 64.0;
const ROW_GAP: f32 = 8.0;

/// The subtle magnetic pull applied to the hovered card.
const HOVER_ATTRACTION: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    List,
    Calendar,
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

enum TaskAction {
    Toggle(TaskId),
    Delete(TaskId),
    Select(TaskId),
}

pub struct DashboardState {
    pub list_motion: ListAnimationCoordinator<TaskId>,
    pub pointer: PointerSpring,
    pub hovered: Option<TaskId>,
    pub progress_ring: ProgressRing,
    pub total_counter: Spring,
    pub in_progress_counter: Spring,
    pub completed_counter: Spring,
    pub search_input: String,
    pub view: DashboardView,
    pub calendar: CalendarMonth,
    pub create_open: bool,
    pub create_title: String,
    pub create_description: String,
    pub profile_open: bool,
    pub profile_username: String,
    pub profile_email: String,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            list_motion: ListAnimationCoordinator::new(),
            pointer: PointerSpring::new(HOVER_ATTRACTION),
            hovered: None,
            progress_ring: ProgressRing::new(),
            total_counter: Spring::at_rest(0.0, SPRING_COUNTER),
            in_progress_counter: Spring::at_rest(0.0, SPRING_COUNTER),
            completed_counter: Spring::at_rest(0.0, SPRING_COUNTER),
            search_input: String::new(),
            view: DashboardView::List,
            calendar: CalendarMonth::containing(Local::now().date_naive()),
            create_open: false,
            create_title: String::new(),
            create_description: String::new(),
            profile_open: false,
            profile_username: String::new(),
            profile_email: String::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn prepare_for_session(&mut self, user: &UserProfile) {
        self.reset();
        self.profile_username = user.username.clone();
        self.profile_email = user.email.clone().unwrap_or_default();
    }

    pub fn is_animating(&self) -> bool {
        self.list_motion.is_animating()
            || !self.pointer.is_at_rest()
            || self.progress_ring.is_animating()
            || !self.total_counter.is_at_rest()
            || !self.in_progress_counter.is_at_rest()
            || !self.completed_counter.is_at_rest()
    }
}

impl DesktopGuiApp {
    pub(crate) fn show_dashboard(&mut self, ctx: &egui::Context, now: Instant, dt: f32) {
        let palette = palette(self.theme);

        let page_ids: Vec<TaskId> = self
            .store
            .current_page_tasks()
            .iter()
            .map(|task| task.id)
            .collect();
        self.dashboard.list_motion.sync(&page_ids);
        self.dashboard.list_motion.tick(dt, &self.motion_config);
        self.dashboard.pointer.tick(dt, &self.motion_config);

        let stats = self.store.stats();
        self.dashboard
            .progress_ring
            .set_fraction(stats.completed, stats.total);
        self.dashboard.progress_ring.tick(dt, &self.motion_config);
        for (spring, value) in [
            (&mut self.dashboard.total_counter, stats.total),
            (&mut self.dashboard.in_progress_counter, stats.in_progress),
            (&mut self.dashboard.completed_counter, stats.completed),
        ] {
            spring.set_target(value as f32);
            if self.motion_config.reduced_motion {
                spring.snap_to_target();
            } else {
                spring.tick(dt);
            }
        }

        self.show_header(ctx, &palette);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(palette.app_background)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.stats_row(ui, &palette);
                ui.add_space(12.0);
                self.filter_row(ui);
                ui.add_space(12.0);
                match self.dashboard.view {
                    DashboardView::List => self.task_list(ui, now, &palette),
                    DashboardView::Calendar => self.calendar_view(ui, &palette),
                }
            });

        self.profile_window(ctx);
        self.detail_window(ctx, &palette);
    }

    fn show_header(&mut self, ctx: &egui::Context, palette: &Palette) {
        let header = egui::TopBottomPanel::top("dashboard_header")
            .frame(
                egui::Frame::NONE
                    .fill(palette.card_background)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("◦ Lucid")
                            .color(palette.accent)
                            .strong()
                            .size(18.0),
                    );
                    let name = self
                        .user
                        .as_ref()
                        .map(|user| user.username.as_str())
                        .unwrap_or("there");
                    ui.label(
                        egui::RichText::new(format!(
                            "{}, {name}",
                            greeting_for_hour(Local::now().hour())
                        ))
                        .color(palette.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Sign out").clicked() {
                            self.sign_out(None);
                        }
                        if ui.button(self.theme.toggled().label()).clicked() {
                            self.theme = self.theme.toggled();
                        }
                        if ui.button("Profile").clicked() {
                            self.dashboard.profile_open = !self.dashboard.profile_open;
                        }
                        ui.separator();
                        if ui
                            .selectable_label(
                                self.dashboard.view == DashboardView::Calendar,
                                "Calendar",
                            )
                            .clicked()
                        {
                            self.dashboard.view = DashboardView::Calendar;
                        }
                        if ui
                            .selectable_label(self.dashboard.view == DashboardView::List, "List")
                            .clicked()
                        {
                            self.dashboard.view = DashboardView::List;
                        }
                    });
                });
            });
        self.anchor.note_header_rect(header.response.rect);
    }

    fn stats_row(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let cards = [
            ("Total", self.dashboard.total_counter.value()),
            ("In progress", self.dashboard.in_progress_counter.value()),
            ("Completed", self.dashboard.completed_counter.value()),
        ];
        ui.horizontal(|ui| {
            for (label, value) in cards {
                egui::Frame::NONE
                    .fill(palette.card_background)
                    .stroke(egui::Stroke::new(1.0, palette.card_stroke))
                    .corner_radius(12.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(label).color(palette.text_muted).small());
                            ui.label(
                                egui::RichText::new(format!("{}", value.round() as i64))
                                    .color(palette.text_primary)
                                    .size(24.0)
                                    .strong(),
                            );
                        });
                    });
            }

            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(56.0, 56.0), egui::Sense::hover());
            let fraction = self.dashboard.progress_ring.fraction();
            draw_progress_ring(ui, rect, fraction, palette);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{}%", (fraction * 100.0).round() as i64),
                egui::FontId::proportional(12.0),
                palette.text_primary,
            );
        });
    }

    fn filter_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.dashboard.search_input)
                    .hint_text("Search tasks")
                    .desired_width(220.0),
            );
            if search.changed() {
                self.store.set_filter(FilterUpdate {
                    search: Some(self.dashboard.search_input.clone()),
                    ..FilterUpdate::default()
                });
            }

            let mut priority = self.store.filter().priority;
            let priority_text = priority.map(priority_label).unwrap_or("All priorities");
            let changed = egui::ComboBox::from_id_salt("priority_filter")
                .selected_text(priority_text)
                .show_ui(ui, |ui| {
                    let mut changed = ui
                        .selectable_value(&mut priority, None, "All priorities")
                        .changed();
                    for option in [Priority::Low, Priority::Medium, Priority::High] {
                        changed |= ui
                            .selectable_value(&mut priority, Some(option), priority_label(option))
                            .changed();
                    }
                    changed
                })
                .inner
                .unwrap_or(false);
            if changed {
                self.store.set_filter(FilterUpdate {
                    priority: Some(priority),
                    ..FilterUpdate::default()
                });
            }

            let mut status = self.store.filter().status;
            let status_text = status.map(status_label).unwrap_or("All statuses");
            let changed = egui::ComboBox::from_id_salt("status_filter")
                .selected_text(status_text)
                .show_ui(ui, |ui| {
                    let mut changed = ui
                        .selectable_value(&mut status, None, "All statuses")
                        .changed();
                    for option in [
                        TaskStatus::Pending,
                        TaskStatus::InProgress,
                        TaskStatus::Completed,
                    ] {
                        changed |= ui
                            .selectable_value(&mut status, Some(option), status_label(option))
                            .changed();
                    }
                    changed
                })
                .inner
                .unwrap_or(false);
            if changed {
                self.store.set_filter(FilterUpdate {
                    status: Some(status),
                    ..FilterUpdate::default()
                });
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Refresh").clicked() {
                    self.request_task_reload();
                }
                if ui
                    .selectable_label(self.dashboard.create_open, "New task")
                    .clicked()
                {
                    self.dashboard.create_open = !self.dashboard.create_open;
                }
            });
        });

        if self.dashboard.create_open {
            ui.add_space(8.0);
            self.create_form(ui);
        }
    }

    fn create_form(&mut self, ui: &mut egui::Ui) {
        let palette = palette(self.theme);
        egui::Frame::NONE
            .fill(palette.card_background)
            .stroke(egui::Stroke::new(1.0, palette.card_stroke))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.dashboard.create_title)
                        .hint_text("Task title")
                        .desired_width(f32::INFINITY),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.dashboard.create_description)
                        .hint_text("Description (optional)")
                        .desired_width(f32::INFINITY),
                );
                ui.horizontal(|ui| {
                    let can_add = !self.dashboard.create_title.trim().is_empty();
                    if ui
                        .add_enabled(can_add, egui::Button::new("Add").fill(palette.accent))
                        .clicked()
                    {
                        self.submit_create();
                    }
                    if ui.button("Cancel").clicked() {
                        self.dashboard.create_open = false;
                        self.dashboard.create_title.clear();
                        self.dashboard.create_description.clear();
                    }
                });
            });
    }

    fn submit_create(&mut self) {
        let title = self.dashboard.create_title.trim().to_string();
        let description = {
            let text = self.dashboard.create_description.trim();
            (!text.is_empty()).then(|| text.to_string())
        };
        let local_id = self
            .store
            .insert_optimistic(title.clone(), description.clone());
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::CreateTask {
                local_id,
                request: CreateTaskRequest {
                    title,
                    description,
                    status: TaskStatus::Pending,
                    priority: Priority::Medium,
                    due_date: None,
                },
            },
            &mut self.status,
        );
        self.dashboard.create_title.clear();
        self.dashboard.create_description.clear();
        self.dashboard.create_open = false;
    }

    fn task_list(&mut self, ui: &mut egui::Ui, _now: Instant, palette: &Palette) {
        if self.store.is_loading() && self.store.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.add(egui::Spinner::new().size(28.0));
                ui.label(egui::RichText::new("Loading tasks").color(palette.text_muted));
            });
            return;
        }

        let page: Vec<Task> = self
            .store
            .current_page_tasks()
            .into_iter()
            .cloned()
            .collect();

        if page.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("✨").size(28.0));
                let text = if self.store.is_empty() {
                    "No tasks yet. Create your first one."
                } else {
                    "Nothing matches your filters."
                };
                ui.label(egui::RichText::new(text).color(palette.text_muted));
            });
            return;
        }

        let list_origin = ui.cursor().min;
        let width = ui.available_width();
        let mut action = None;
        let mut hovered_this_frame = None;

        for task in &page {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(width, ROW_HEIGHT), egui::Sense::hover());
            ui.add_space(ROW_GAP);

            let visibility = self.dashboard.list_motion.visibility(&task.id);
            // rank_offset is in rank units; scale by the row pitch.
            let glide = self.dashboard.list_motion.rank_offset(&task.id) * (ROW_HEIGHT + ROW_GAP);
            let mut draw_rect = rect.translate(egui::vec2(0.0, glide));

            if response.hovered() {
                hovered_this_frame = Some(task.id);
                if let Some(pointer) = response.hover_pos() {
                    let delta = pointer - rect.center();
                    if self.dashboard.hovered == Some(task.id) {
                        self.dashboard.pointer.set_offset(delta.x, delta.y);
                    }
                }
            }
            if self.dashboard.hovered == Some(task.id) {
                let (px, py) = self.dashboard.pointer.offset();
                draw_rect = draw_rect.translate(egui::vec2(px, py));
            }

            if let Some(row_action) =
                self.task_card(ui, draw_rect, task, visibility, palette)
            {
                action = Some(row_action);
            }
        }

        // Fading silhouettes where departing rows used to sit.
        for (_, rank) in self.dashboard.list_motion.exiting() {
            let top = list_origin.y + rank as f32 * (ROW_HEIGHT + ROW_GAP);
            let rect = egui::Rect::from_min_size(
                egui::pos2(list_origin.x, top),
                egui::vec2(width, ROW_HEIGHT),
            );
            ui.painter().rect_filled(
                rect,
                egui::CornerRadius::same(12),
                fade(palette.card_background, 0.25),
            );
        }

        if hovered_this_frame != self.dashboard.hovered {
            self.dashboard.hovered = hovered_this_frame;
            self.dashboard.pointer.pointer_left();
        }

        ui.add_space(8.0);
        self.pagination_row(ui, palette);

        if let Some(action) = action {
            self.apply_task_action(action);
        }
    }

    fn task_card(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        task: &Task,
        visibility: f32,
        palette: &Palette,
    ) -> Option<TaskAction> {
        let mut action = None;
        ui_in_rect(ui, rect, |ui| {
            egui::Frame::NONE
                .fill(fade(palette.card_background, visibility))
                .stroke(egui::Stroke::new(1.0, fade(palette.card_stroke, visibility)))
                .corner_radius(12.0)
                .inner_margin(egui::Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.set_min_height(ROW_HEIGHT - 20.0);
                    ui.horizontal(|ui| {
                        let done = task.status == TaskStatus::Completed;
                        let toggle_label = if done { "✔" } else { "○" };
                        if ui
                            .button(
                                egui::RichText::new(toggle_label)
                                    .color(status_color(task.status, palette))
                                    .size(18.0),
                            )
                            .clicked()
                        {
                            action = Some(TaskAction::Toggle(task.id));
                        }

                        ui.vertical(|ui| {
                            let mut title = egui::RichText::new(&task.title)
                                .color(fade(palette.text_primary, visibility))
                                .strong();
                            if done {
                                title = title.strikethrough();
                            }
                            let title_response =
                                ui.add(egui::Label::new(title).sense(egui::Sense::click()));
                            if title_response.clicked() {
                                action = Some(TaskAction::Select(task.id));
                            }
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(priority_label(task.priority))
                                        .color(priority_color(task.priority, palette))
                                        .small(),
                                );
                                ui.label(
                                    egui::RichText::new(status_label(task.status))
                                        .color(fade(palette.text_muted, visibility))
                                        .small(),
                                );
                                if let Some(due) = task.due_date {
                                    ui.label(
                                        egui::RichText::new(format!("Due {due}"))
                                            .color(fade(palette.text_muted, visibility))
                                            .small(),
                                    );
                                }
                            });
                        });

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Delete").clicked() {
                                    action = Some(TaskAction::Delete(task.id));
                                }
                            },
                        );
                    });
                });
        });
        action
    }

    fn pagination_row(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        let total_pages = self.store.total_pages();
        if total_pages < 2 {
            return;
        }
        let current = self.store.current_page();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(current > 1, egui::Button::new("Previous"))
                .clicked()
            {
                self.store.set_page(current - 1);
            }
            ui.label(
                egui::RichText::new(format!("Page {current} of {total_pages}"))
                    .color(palette.text_muted),
            );
            if ui
                .add_enabled(current < total_pages, egui::Button::new("Next"))
                .clicked()
            {
                self.store.set_page(current + 1);
            }
        });
    }

    fn apply_task_action(&mut self, action: TaskAction) {
        match action {
            TaskAction::Toggle(id) => {
                if let Some(new_status) = self.store.toggle_completion(id) {
                    if !id.is_local() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::UpdateTask {
                                id,
                                patch: TaskPatch {
                                    status: Some(new_status),
                                    ..TaskPatch::default()
                                },
                            },
                            &mut self.status,
                        );
                    }
                }
            }
            TaskAction::Delete(id) => {
                self.store.remove(id);
                if !id.is_local() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::DeleteTask { id },
                        &mut self.status,
                    );
                }
            }
            TaskAction::Select(id) => {
                self.store.select(id);
            }
        }
    }

    fn calendar_view(&mut self, ui: &mut egui::Ui, palette: &Palette) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.dashboard.calendar = self.dashboard.calendar.prev();
            }
            ui.label(
                egui::RichText::new(self.dashboard.calendar.label())
                    .strong()
                    .size(16.0),
            );
            if ui.button("▶").clicked() {
                self.dashboard.calendar = self.dashboard.calendar.next();
            }
        });
        ui.add_space(8.0);

        let today = Local::now().date_naive();
        let cell_width = (ui.available_width() - 6.0 * 6.0) / 7.0;
        egui::Grid::new("calendar_grid")
            .spacing(egui::vec2(6.0, 6.0))
            .min_col_width(cell_width)
            .max_col_width(cell_width)
            .show(ui, |ui| {
                for header in WEEKDAY_HEADERS {
                    ui.label(egui::RichText::new(header).color(palette.text_muted).small());
                }
                ui.end_row();

                for (index, cell) in self.dashboard.calendar.grid().iter().enumerate() {
                    self.calendar_cell(ui, *cell, today, palette);
                    if index % 7 == 6 {
                        ui.end_row();
                    }
                }
            });
    }

    fn calendar_cell(
        &self,
        ui: &mut egui::Ui,
        cell: Option<NaiveDate>,
        today: NaiveDate,
        palette: &Palette,
    ) {
        let Some(date) = cell else {
            ui.label("");
            return;
        };
        let due = self.store.tasks_due_on(date);
        let is_today = date == today;
        let fill = if is_today {
            palette.accent_soft
        } else {
            palette.card_background
        };
        egui::Frame::NONE
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, palette.card_stroke))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(6, 4))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.set_min_height(48.0);
                    ui.label(
                        egui::RichText::new(format!("{}", date.format("%-d")))
                            .color(palette.text_primary)
                            .small(),
                    );
                    for task in due.iter().take(2) {
                        ui.label(
                            egui::RichText::new(&task.title)
                                .color(priority_color(task.priority, palette))
                                .small(),
                        );
                    }
                    if due.len() > 2 {
                        ui.label(
                            egui::RichText::new(format!("+{} more", due.len() - 2))
                                .color(palette.text_muted)
                                .small(),
                        );
                    }
                });
            });
    }

    fn detail_window(&mut self, ctx: &egui::Context, palette: &Palette) {
        let Some(task) = self.store.selected_task().cloned() else {
            return;
        };
        let mut open = true;
        egui::Window::new(task.title.clone())
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                if let Some(description) = &task.description {
                    ui.label(description);
                    ui.add_space(6.0);
                }
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(status_label(task.status))
                            .color(status_color(task.status, palette)),
                    );
                    ui.label(
                        egui::RichText::new(priority_label(task.priority))
                            .color(priority_color(task.priority, palette)),
                    );
                });
                if let Some(due) = task.due_date {
                    ui.label(format!("Due {due}"));
                }
            });
        if !open {
            self.store.clear_selection();
        }
    }

    fn profile_window(&mut self, ctx: &egui::Context) {
        if !self.dashboard.profile_open {
            return;
        }
        let mut open = self.dashboard.profile_open;
        let mut save = false;
        egui::Window::new("Profile")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Username");
                ui.add(
                    egui::TextEdit::singleline(&mut self.dashboard.profile_username)
                        .desired_width(220.0),
                );
                ui.label("Email");
                ui.add(
                    egui::TextEdit::singleline(&mut self.dashboard.profile_email)
                        .desired_width(220.0),
                );
                let can_save = !self.dashboard.profile_username.trim().is_empty();
                if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                    save = true;
                }
            });
        self.dashboard.profile_open = open;

        if save {
            let email = self.dashboard.profile_email.trim();
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::UpdateProfile {
                    patch: ProfilePatch {
                        username: Some(self.dashboard.profile_username.trim().to_string()),
                        email: (!email.is_empty()).then(|| email.to_string()),
                    },
                },
                &mut self.status,
            );
            self.dashboard.profile_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_tracks_the_hour() {
        assert_eq!(greeting_for_hour(6), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(3), "Good evening");
    }
}
