//! Session engine
//!
//! Owns the domain snapshot, every surface and the modal slot. Input arrives as
//! [`AppEvent`]s and each one is handled to completion, including any git invocation it
//! triggers, before the next is looked at.

mod event_loop;
mod intents;
mod modal;
mod snapshot;
mod timers;

pub use event_loop::run;
pub use intents::Intent;
pub use modal::{ActiveModal, ModalKind, ModalSlot};
pub use snapshot::Snapshot;
pub use timers::FeedbackTimers;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::config::Config;
use crate::git::terminal::{TerminalLauncher, TerminalOpener};
use crate::git::GitRepo;
use crate::input::dispatcher;
use crate::tui::details::render_details;
use crate::tui::feedback::{Feedback, FeedbackKind};
use crate::tui::item::ViewItem;
use crate::tui::layout::ScreenLayout;
use crate::tui::list::ListSurface;
use crate::tui::tabs::{render_tabs, Tab};
use crate::tui::theme::theme;
use crate::tui::views::{render_not_a_repository, render_settings};

/// Key hints on the bottom row
pub const HELP_TEXT: &str =
    "↑/↓: navigate • Enter: action • n: new worktree • p: prune • Tab: switch tabs • q: quit";

/// Input the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste
    Paste(String),
    /// New viewport size (columns, rows)
    Resize(u16, u16),
    /// A feedback timer fired for this generation
    ClearFeedback(u64),
}

impl AppEvent {
    /// Translate a terminal event; events the engine has no use for yield `None`
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
            Event::Paste(text) => Some(AppEvent::Paste(text)),
            Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
            Event::FocusGained | Event::FocusLost => None,
        }
    }
}

/// Main application struct
pub struct App {
    pub(crate) config: Config,
    pub(crate) repo: GitRepo,
    pub(crate) launcher: Box<dyn TerminalLauncher>,
    /// Last loaded domain state
    pub(crate) snapshot: Snapshot,
    pub(crate) tab: Tab,
    pub(crate) worktrees: ListSurface,
    pub(crate) branches: ListSurface,
    pub(crate) modals: ModalSlot,
    pub(crate) feedback: Feedback,
    timers: FeedbackTimers,
    pub(crate) layout: ScreenLayout,
    viewport: Option<(u16, u16)>,
    pub(crate) quitting: bool,
    /// Worktree the shell should switch to after exit
    pub(crate) handoff: Option<PathBuf>,
}

impl App {
    /// Create the engine and load the initial snapshot
    pub fn new(config: Config, repo: GitRepo) -> Self {
        let launcher = TerminalOpener::with_command(config.terminal.clone());
        let mut app = Self {
            config,
            repo,
            launcher: Box::new(launcher),
            snapshot: Snapshot::default(),
            tab: Tab::default(),
            worktrees: ListSurface::default(),
            branches: ListSurface::default(),
            modals: ModalSlot::default(),
            feedback: Feedback::new(),
            timers: FeedbackTimers::default(),
            layout: ScreenLayout::default(),
            viewport: None,
            quitting: false,
            handoff: None,
        };
        app.refresh();
        app
    }

    /// Replace the terminal launcher used by the open action
    pub fn with_launcher(mut self, launcher: impl TerminalLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    /// Reload the snapshot from git and hand the new items to the lists
    pub fn refresh(&mut self) {
        self.snapshot = Snapshot::load(&self.repo);
        self.worktrees.set_items(self.snapshot.worktree_items());
        self.branches.set_items(self.snapshot.branch_items());

        let failure = self
            .snapshot
            .load_error()
            .filter(|e| !e.is_not_a_repository())
            .map(|e| format!("Failed to load worktrees: {}", e));
        if let Some(message) = failure {
            self.notify(FeedbackKind::Error, message);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                if let Some(intent) = dispatcher::route_key(self, key) {
                    self.apply(intent);
                }
            }
            AppEvent::Mouse(mouse) => {
                if let Some(intent) = dispatcher::route_mouse(self, mouse) {
                    self.apply(intent);
                }
            }
            AppEvent::Paste(text) => self.handle_paste(&text),
            AppEvent::Resize(width, height) => self.resize(width, height),
            AppEvent::ClearFeedback(generation) => {
                self.feedback.clear_if(generation);
            }
        }
    }

    /// Paste goes to the creation form only; the first line is used
    fn handle_paste(&mut self, text: &str) {
        if let Some(ActiveModal::CreationForm(form)) = self.modals.active_mut() {
            form.paste(text.lines().next().unwrap_or_default());
        }
    }

    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Some((width, height));
        self.layout = ScreenLayout::new(width, height);
        self.worktrees.set_area(self.layout.list);
        self.branches.set_area(self.layout.list);
    }

    /// Show feedback and schedule its self-clear
    pub(crate) fn notify(&mut self, kind: FeedbackKind, text: impl Into<String>) {
        let generation = self.feedback.show(kind, text);
        self.timers
            .schedule(generation, Instant::now() + self.config.feedback_duration());
    }

    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Deliver clear events for every timer due at `now`; returns whether any fired
    pub fn fire_due_timers(&mut self, now: Instant) -> bool {
        let due = self.timers.take_due(now);
        let fired = !due.is_empty();
        for generation in due {
            self.handle_event(AppEvent::ClearFeedback(generation));
        }
        fired
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Path of a worktree created in switch mode, for the shell wrapper
    pub fn handoff_target(&self) -> Option<&Path> {
        self.handoff.as_deref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn modals(&self) -> &ModalSlot {
        &self.modals
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// List shown on the current tab
    pub fn active_list(&self) -> Option<&ListSurface> {
        match self.tab {
            Tab::Worktrees => Some(&self.worktrees),
            Tab::Branches => Some(&self.branches),
            Tab::Settings => None,
        }
    }

    pub(crate) fn active_list_mut(&mut self) -> Option<&mut ListSurface> {
        match self.tab {
            Tab::Worktrees => Some(&mut self.worktrees),
            Tab::Branches => Some(&mut self.branches),
            Tab::Settings => None,
        }
    }

    pub fn selected_item(&self) -> Option<&ViewItem> {
        self.active_list().and_then(ListSurface::selected_item)
    }

    /// Draw the whole screen
    ///
    /// The layout follows the frame size, so the first frame after startup (or after a
    /// resize the host did not report) lays itself out.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();
        if self.viewport != Some((area.width, area.height)) {
            self.resize(area.width, area.height);
        }
        let layout = self.layout;

        render_tabs(frame, layout.tabs, self.tab);

        match self.tab {
            Tab::Worktrees | Tab::Branches if self.snapshot.is_not_a_repository() => {
                render_not_a_repository(frame, layout.content);
            }
            Tab::Worktrees => {
                self.worktrees.render(frame, "Worktrees");
                render_details(frame, layout.details, self.worktrees.selected_item());
            }
            Tab::Branches => {
                self.branches.render(frame, "Branches");
                render_details(frame, layout.details, self.branches.selected_item());
            }
            Tab::Settings => render_settings(frame, layout.content, &self.config, self.repo.dir()),
        }

        self.feedback.render(frame, layout.feedback);
        frame.render_widget(
            Paragraph::new(Span::styled(HELP_TEXT, theme().help_style())),
            layout.help,
        );

        if let Some(modal) = self.modals.active() {
            modal.render(frame, area);
        }
    }
}
