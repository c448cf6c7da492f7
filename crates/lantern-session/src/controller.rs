//! Binds device input to session transitions and rendering.

use std::sync::Arc;

use lantern_config::{Config, Modifiers, RenderSettings, Shortcut};
use lantern_index::DocumentSet;
use tracing::debug;

use crate::{
    host::{FocusTarget, Host, Visibility},
    planner::QueryPlanner,
    render::{Activation, ResultRenderer},
    schedule::{Scheduler, Wakeup},
    session::{QueryBackend, SearchSession, Transition},
};

/// A key, as far as the controller cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// The cancel key.
    Escape,
}

/// A key press with the modifiers held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// Key pressed.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// A key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Input events delivered by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The input's text changed; its value is read from the host.
    Changed,
    /// A key was pressed anywhere on the page.
    Key(KeyPress),
    /// The input lost focus.
    Blur {
        /// Where focus moved to.
        new_focus: FocusTarget,
    },
    /// A result item was chosen.
    Activate(Activation),
}

/// Drives a [`SearchSession`] and a [`ResultRenderer`] from host input.
pub struct InputController<H, B, S> {
    /// The embedding page.
    host: H,
    /// Answers committed queries.
    backend: B,
    /// Defers render continuations and navigation.
    scheduler: S,
    /// Session state and generation counter.
    session: SearchSession,
    /// Batched result materialization.
    renderer: ResultRenderer,
    /// Global shortcut that opens search.
    shortcut: Shortcut,
}

impl<H, B, S> InputController<H, B, S>
where
    H: Host,
    B: QueryBackend,
    S: Scheduler,
{
    /// Creates a controller with an idle session.
    pub fn new(
        host: H,
        backend: B,
        scheduler: S,
        renderer: ResultRenderer,
        planner: QueryPlanner,
        shortcut: Shortcut,
    ) -> Self {
        Self {
            host,
            backend,
            scheduler,
            session: SearchSession::new(planner),
            renderer,
            shortcut,
        }
    }

    /// Creates a controller using the search, render and input settings of `config`.
    pub fn from_config(
        host: H,
        backend: B,
        scheduler: S,
        documents: Arc<DocumentSet>,
        config: &Config,
    ) -> Self {
        let renderer = ResultRenderer::new(documents, config.render.clone());
        Self::new(
            host,
            backend,
            scheduler,
            renderer,
            QueryPlanner::from(&config.search),
            config.input.shortcut,
        )
    }

    /// Handles one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Changed => self.evaluate_input(),
            InputEvent::Key(press) => self.handle_key(press),
            InputEvent::Blur { new_focus } => {
                if new_focus == FocusTarget::Elsewhere {
                    self.go_idle();
                }
            }
            InputEvent::Activate(activation) => self.activate(activation),
        }
    }

    /// Resumes deferred work.
    pub fn handle_wakeup(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::RenderBatch(batch) => {
                self.renderer.render_batch(
                    batch,
                    self.session.live_generation(),
                    &mut self.host,
                    &self.scheduler,
                );
            }
            Wakeup::Navigate { url } => {
                debug!(%url, "navigating");
                self.host.navigate(&url);
            }
        }
    }

    /// Re-reads visibility after a change notification; hidden input means Idle.
    pub fn visibility_changed(&mut self, visibility: &(impl Visibility + ?Sized)) {
        if !visibility.is_visible() {
            debug!("search input hidden");
            self.go_idle();
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The host page.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host page.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The scheduler deferred work goes to.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Render settings in effect.
    pub fn render_settings(&self) -> &RenderSettings {
        self.renderer.settings()
    }

    /// Consumes the controller, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Feeds the current input value to the session and updates the surface.
    fn evaluate_input(&mut self) {
        let raw = self.host.input_value();
        match self.session.handle_input(&raw, &self.backend) {
            Transition::Cleared => self.clear_surface(),
            Transition::Pending => self.host.clear_results(),
            Transition::Unchanged => {}
            Transition::Committed {
                generation,
                results,
            } => {
                self.host.set_results_visible(true);
                self.host.set_search_active(true);
                self.renderer
                    .begin(generation, results, &mut self.host, &self.scheduler);
            }
        }
    }

    /// Handles the cancel key and the global shortcut.
    fn handle_key(&mut self, press: KeyPress) {
        match press.key {
            Key::Escape => {
                self.go_idle();
                self.host.blur_input();
            }
            Key::Char(c) => {
                if !self.shortcut.matches(c, press.modifiers) {
                    return;
                }
                // A bare key is ordinary text while the input has focus.
                if !self.shortcut.modifiers.any() && self.host.input_focused() {
                    return;
                }
                self.host.set_results_visible(true);
                self.host.focus_input();
                if !self.host.input_value().trim().is_empty() {
                    self.evaluate_input();
                }
            }
        }
    }

    /// Clears session state and the surface, then navigates after a short delay.
    fn activate(&mut self, activation: Activation) {
        self.session.reset();
        self.host.clear_input();
        self.clear_surface();
        let delay = self.renderer.settings().navigation_delay();
        self.scheduler
            .schedule_after(delay, Wakeup::Navigate { url: activation.url });
    }

    /// Forces the session to Idle.
    fn go_idle(&mut self) {
        self.session.reset();
        self.clear_surface();
    }

    /// Empties and hides the surface and lowers the active flag.
    fn clear_surface(&mut self) {
        self.host.clear_results();
        self.host.set_results_visible(false);
        self.host.set_search_active(false);
    }
}
