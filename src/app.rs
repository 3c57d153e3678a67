//! App state and core application logic
//!
//! Owns one instance of every page component and routes terminal events to
//! them. Side effects that need I/O (opening the mail client, reading image
//! files) are queued as `Effect`s for the event loop to run.

use std::any::Any;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::launcher;
use crate::models::Portfolio;
use crate::page::contact::{ContactForm, Field, SUCCESS_MESSAGE};
use crate::page::counter::StatCounter;
use crate::page::document::{Document, ElementId, Viewport, ROW_PX};
use crate::page::lazy::{ImageRequest, LazyImages};
use crate::page::nav::{MobileNav, DESKTOP_BREAKPOINT};
use crate::page::notify::{Notifier, GENERIC_ERROR};
use crate::page::observer::{ObserverOptions, VisibilityObserver};
use crate::page::perf::PerfTimings;
use crate::page::scroll::{HeaderVisibility, ScrollState};
use crate::page::storage::PreferenceStore;
use crate::page::theme::ThemeControl;
use crate::page::throttle::Debounce;
use crate::page::typing::Typewriter;
use crate::ui::layout::{ScreenLayout, HEADER_ROWS};

/// Resize handling waits for the terminal to settle
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Length of the reveal fade
pub const REVEAL_FADE: Duration = Duration::from_millis(300);
/// Rows scrolled per mouse wheel notch
pub const WHEEL_ROWS: i64 = 3;

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Page navigation
    #[default]
    Normal,
    /// Typing into the contact form
    Editing,
}

// =============================================================================
// Effects
// =============================================================================

/// Work the event loop performs on the app's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand a URI (mailto) to the system handler
    OpenUri(String),
    /// Read a deferred image
    LoadImage(ImageRequest),
}

/// Result of an effect, delivered back to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    ImageLoaded {
        element: ElementId,
        result: Result<String, String>,
    },
    Failed {
        action: &'static str,
        error: String,
    },
}

impl Effect {
    /// What the effect does, for error reports
    pub fn action(&self) -> &'static str {
        match self {
            Effect::OpenUri(_) => "open mail client",
            Effect::LoadImage(_) => "load image",
        }
    }
}

/// Run an effect. Returns what the app needs to hear back, if anything.
pub async fn perform(effect: Effect) -> Option<Completion> {
    match effect {
        Effect::OpenUri(uri) => match launcher::open_uri(&uri).await {
            Ok(()) => None,
            Err(e) => Some(Completion::Failed {
                action: "open mail client",
                error: e.to_string(),
            }),
        },
        Effect::LoadImage(request) => {
            let result = tokio::fs::read_to_string(&request.path)
                .await
                .map_err(|e| format!("{}: {}", request.path.display(), e));
            Some(Completion::ImageLoaded {
                element: request.element,
                result,
            })
        }
    }
}

/// Run `work` on its own task; a panic comes back as `Completion::Failed`
pub async fn supervise<F>(action: &'static str, work: F) -> Option<Completion>
where
    F: Future<Output = Option<Completion>> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(completion) => completion,
        Err(e) => Some(Completion::Failed {
            action,
            error: e.to_string(),
        }),
    }
}

/// `perform` under `supervise`, as the event loop runs effects
pub async fn run_effect(effect: Effect) -> Option<Completion> {
    supervise(effect.action(), perform(effect)).await
}

// =============================================================================
// Panic Guard
// =============================================================================

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// True while a handler runs under `App::guarded` on this thread
pub fn in_guarded_handler() -> bool {
    IN_HANDLER.with(Cell::get)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =============================================================================
// Options
// =============================================================================

/// Startup options resolved from config and CLI
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Where contact form messages are addressed
    pub contact_address: String,
    /// Observe images instead of loading them eagerly
    pub lazy_images: bool,
    /// Process start, for load timings
    pub started: Instant,
}

// =============================================================================
// Main Application State
// =============================================================================

pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,

    pub portfolio: Portfolio,
    pub document: Document,

    pub theme: ThemeControl,
    pub nav: MobileNav,
    pub scroll: ScrollState,
    pub notifier: Notifier,
    pub form: ContactForm,
    pub typing: Typewriter,
    pub images: LazyImages,
    pub counters: BTreeMap<ElementId, StatCounter>,
    pub perf: PerfTimings,

    reveal: VisibilityObserver,
    revealed: BTreeMap<ElementId, Instant>,
    counter_observer: VisibilityObserver,
    resize: Debounce,
    contact_address: String,
    /// Terminal size (columns, rows)
    size: (u16, u16),
    now: Instant,
    effects: Vec<Effect>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("running", &self.running)
            .field("input_mode", &self.input_mode)
            .field("theme", &self.theme)
            .field("nav", &self.nav)
            .field("scroll", &self.scroll)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Lay out the page and wire every component
    pub fn new(
        portfolio: Portfolio,
        store: Box<dyn PreferenceStore>,
        options: AppOptions,
        now: Instant,
    ) -> Self {
        let document = Document::layout(&portfolio);

        let mut reveal = VisibilityObserver::new(ObserverOptions {
            threshold: 0.1,
            margin_top: 0,
            margin_bottom: -50,
        });
        let mut counter_observer = VisibilityObserver::new(ObserverOptions {
            threshold: 0.5,
            ..Default::default()
        });
        let mut counters = BTreeMap::new();

        for (index, section) in portfolio.sections.iter().enumerate() {
            reveal.observe(ElementId::Section(index));
            for card in 0..section.cards.len() {
                reveal.observe(ElementId::Card {
                    section: index,
                    card,
                });
            }
            for (stat, s) in section.stats.iter().enumerate() {
                let id = ElementId::Stat {
                    section: index,
                    stat,
                };
                counter_observer.observe(id);
                counters.insert(id, StatCounter::new(&s.value));
            }
        }

        let images = LazyImages::new(&portfolio, options.lazy_images);
        let typing = Typewriter::new(&portfolio.profile.phrases, now);
        let nav = MobileNav::new(portfolio.sections.len());

        let mut perf = PerfTimings::new(options.started);
        perf.dom_ready(now);
        tracing::info!(
            sections = portfolio.sections.len(),
            height = document.height,
            lazy = images.is_lazy(),
            "page ready"
        );

        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            portfolio,
            document,
            theme: ThemeControl::new(store),
            nav,
            scroll: ScrollState::new(),
            notifier: Notifier::new(),
            form: ContactForm::new(),
            typing,
            images,
            counters,
            perf,
            reveal,
            revealed: BTreeMap::new(),
            counter_observer,
            resize: Debounce::new(RESIZE_DEBOUNCE),
            contact_address: options.contact_address,
            size: (80, 24),
            now,
            effects: Vec::new(),
        };
        app.apply_geometry();
        app
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Wide terminals show inline links instead of the mobile menu
    pub fn is_wide(&self) -> bool {
        self.size.0 >= DESKTOP_BREAKPOINT
    }

    pub fn header_visible(&self) -> bool {
        self.nav.is_open() || self.scroll.header() == HeaderVisibility::Visible
    }

    pub fn contact_address(&self) -> &str {
        &self.contact_address
    }

    /// Visible page window in page pixels (everything above the status bar)
    pub fn viewport(&self) -> Viewport {
        Viewport {
            top: self.scroll.offset(),
            height: self.size.1.saturating_sub(1) as u32 * ROW_PX,
        }
    }

    /// Screen geometry for the current state
    pub fn layout(&self) -> ScreenLayout {
        let titles: Vec<&str> = self
            .portfolio
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        ScreenLayout::compute(
            ratatui::layout::Rect::new(0, 0, self.size.0, self.size.1),
            &self.portfolio.profile.name,
            &titles,
            self.header_visible(),
            self.nav.is_open(),
            self.is_wide(),
        )
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains_key(&element)
    }

    /// Still fading in after its reveal
    pub fn is_revealing(&self, element: ElementId) -> bool {
        self.revealed
            .get(&element)
            .is_some_and(|at| self.now.saturating_duration_since(*at) < REVEAL_FADE)
    }

    pub fn counter(&self, element: ElementId) -> Option<&StatCounter> {
        self.counters.get(&element)
    }

    /// Drain queued effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Terminal size known at startup (not debounced)
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.apply_geometry();
        self.nav.resized(width);
    }

    fn apply_geometry(&mut self) {
        let max = self.document.max_offset(self.viewport().height);
        self.scroll.set_max_offset(max, &self.document.sections);
    }

    /// First frame drawn
    pub fn painted(&mut self, now: Instant) {
        self.perf.first_paint(now);
    }

    /// Advance every timer and observer to `now`
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        if self.resize.fire(now) {
            self.nav.resized(self.size.0);
        }

        self.scroll.tick(now, &self.document.sections);
        self.typing.tick(now);
        self.notifier.tick(now);

        let viewport = self.viewport();
        for element in self.reveal.poll(viewport, &self.document) {
            tracing::trace!(?element, "revealed");
            self.revealed.insert(element, now);
        }
        for element in self.counter_observer.poll(viewport, &self.document) {
            if let Some(counter) = self.counters.get_mut(&element) {
                counter.start(now);
            }
        }
        for counter in self.counters.values_mut() {
            counter.tick(now);
        }
        for request in self.images.due(viewport, &self.document) {
            self.effects.push(Effect::LoadImage(request));
        }

        if !self.perf.is_complete() && self.perf.get().1.is_some() && self.images.idle() {
            self.perf.load_complete(now);
            self.perf.report();
        }
    }

    /// Apply the result of an effect
    pub fn complete(&mut self, now: Instant, completion: Completion) {
        match completion {
            Completion::ImageLoaded { element, result } => {
                let error = result.as_ref().err().cloned();
                self.images.finish(element, result);
                if let Some(error) = error {
                    self.report_error(now, format!("load image: {}", error));
                }
            }
            Completion::Failed { action, error } => {
                self.report_error(now, format!("{}: {}", action, error));
            }
        }
    }

    /// Run a handler, turning a panic into a logged error and a notification
    pub fn guarded<R>(&mut self, now: Instant, handler: impl FnOnce(&mut App) -> R) -> Option<R> {
        let outer = IN_HANDLER.with(|flag| flag.replace(true));
        let result = panic::catch_unwind(AssertUnwindSafe(|| handler(self)));
        IN_HANDLER.with(|flag| flag.set(outer));

        match result {
            Ok(value) => Some(value),
            Err(payload) => {
                self.report_error(now, format!("handler panicked: {}", panic_message(payload.as_ref())));
                None
            }
        }
    }

    /// Top-level handler for unexpected errors: log and tell the user
    pub fn report_error(&mut self, now: Instant, error: impl fmt::Display) {
        tracing::error!(%error, "unexpected error");
        self.notifier.error(now, GENERIC_ERROR);
    }

    // -------------------------------------------------------------------------
    // Page actions
    // -------------------------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    /// Open or close the mobile menu; opening halts any smooth scroll
    pub fn toggle_nav(&mut self) {
        self.nav.toggle();
        if self.nav.scroll_locked() {
            self.scroll.stop();
        }
    }

    /// Close the menu and smooth-scroll to a section
    pub fn navigate(&mut self, now: Instant, index: usize) -> bool {
        if index >= self.document.sections.len() {
            return false;
        }
        self.nav.close();
        self.scroll.scroll_to_section(
            now,
            index,
            HEADER_ROWS as u32 * ROW_PX,
            &self.document.sections,
        )
    }

    pub fn scroll_to_contact(&mut self, now: Instant) -> bool {
        match self.portfolio.contact_section() {
            Some(index) => self.navigate(now, index),
            None => false,
        }
    }

    /// User scroll input; ignored while the menu locks scrolling
    pub fn scroll_by(&mut self, now: Instant, delta: i64) -> bool {
        if self.nav.scroll_locked() {
            return false;
        }
        self.scroll.scroll_by(now, delta, &self.document.sections);
        true
    }

    pub fn jump_to(&mut self, now: Instant, offset: u32) -> bool {
        if self.nav.scroll_locked() {
            return false;
        }
        self.scroll.jump_to(now, offset, &self.document.sections);
        true
    }

    /// Start editing the contact form
    pub fn focus_form(&mut self, now: Instant) -> bool {
        if self.portfolio.contact_section().is_none() {
            return false;
        }
        self.scroll_to_contact(now);
        self.input_mode = InputMode::Editing;
        if self.form.focus().is_none() {
            self.form.set_focus(Some(Field::Name));
        }
        true
    }

    fn leave_form(&mut self) {
        self.input_mode = InputMode::Normal;
        self.form.set_focus(None);
    }

    /// Validate and submit the contact form
    pub fn submit_form(&mut self, now: Instant) -> bool {
        match self.form.submit(&self.contact_address) {
            Ok(uri) => {
                tracing::info!("contact form submitted");
                self.effects.push(Effect::OpenUri(uri));
                self.notifier.success(now, SUCCESS_MESSAGE);
                self.leave_form();
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "contact form rejected");
                self.notifier.error(now, e.to_string());
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Event Handling
    // -------------------------------------------------------------------------

    /// Route a terminal event, returns true if it was consumed
    pub fn handle_event(&mut self, now: Instant, event: Event) -> bool {
        match event {
            // Only handle key press events (ignore releases on Windows)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(now, key),
            Event::Mouse(mouse) => self.handle_mouse(now, mouse),
            Event::Resize(width, height) => {
                self.size = (width, height);
                self.apply_geometry();
                self.resize.call(now);
                true
            }
            _ => false,
        }
    }

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, now: Instant, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global shortcuts
        if ctrl {
            match key.code {
                KeyCode::Char('c') => {
                    self.quit();
                    return true;
                }
                KeyCode::Char('t') => {
                    self.toggle_theme();
                    return true;
                }
                KeyCode::Char('k') => {
                    return self.scroll_to_contact(now);
                }
                _ => {}
            }
        }

        if self.input_mode == InputMode::Editing {
            return self.handle_editing_key(now, key);
        }
        if self.nav.is_open() {
            return self.handle_menu_key(now, key);
        }
        self.handle_normal_key(now, key)
    }

    /// Keys while the mobile menu is open
    fn handle_menu_key(&mut self, now: Instant, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.nav.escape(),
            KeyCode::Char('m') => {
                self.toggle_nav();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.nav.cursor_up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.nav.cursor_down();
                true
            }
            KeyCode::Enter => {
                let index = self.nav.cursor();
                self.navigate(now, index)
            }
            KeyCode::Char(c @ '1'..='9') => self.navigate(now, (c as usize) - ('1' as usize)),
            KeyCode::Char('t') => {
                self.toggle_theme();
                true
            }
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            // Page is scroll-locked
            _ => false,
        }
    }

    /// Keys in normal page mode
    fn handle_normal_key(&mut self, now: Instant, key: KeyEvent) -> bool {
        let page = self.viewport().height.saturating_sub(ROW_PX) as i64;
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('m') if !self.is_wide() => {
                self.toggle_nav();
                true
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                true
            }
            KeyCode::Char('e') | KeyCode::Char('i') => self.focus_form(now),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(now, ROW_PX as i64),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(now, -(ROW_PX as i64)),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(now, page),
            KeyCode::PageUp => self.scroll_by(now, -page),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to(now, 0),
            KeyCode::End | KeyCode::Char('G') => self.jump_to(now, self.scroll.max_offset()),
            KeyCode::Char(c @ '1'..='9') => self.navigate(now, (c as usize) - ('1' as usize)),
            KeyCode::Esc => self.nav.escape(),
            _ => false,
        }
    }

    /// Keys in editing (form input) mode
    fn handle_editing_key(&mut self, now: Instant, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => {
                    self.submit_form(now);
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.leave_form();
                true
            }
            KeyCode::Tab => {
                self.form.focus_next();
                true
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                true
            }
            KeyCode::Enter => {
                if self.form.focus() == Some(Field::Message) {
                    if let Some(input) = self.form.focused_mut() {
                        input.insert('\n');
                    }
                } else {
                    self.form.focus_next();
                }
                true
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.form.focused_mut() {
                    input.insert(c);
                }
                true
            }
            KeyCode::Backspace => {
                if let Some(input) = self.form.focused_mut() {
                    input.backspace();
                }
                true
            }
            KeyCode::Delete => {
                if let Some(input) = self.form.focused_mut() {
                    input.delete();
                }
                true
            }
            KeyCode::Left => {
                if let Some(input) = self.form.focused_mut() {
                    input.left();
                }
                true
            }
            KeyCode::Right => {
                if let Some(input) = self.form.focused_mut() {
                    input.right();
                }
                true
            }
            KeyCode::Home => {
                if let Some(input) = self.form.focused_mut() {
                    input.home();
                }
                true
            }
            KeyCode::End => {
                if let Some(input) = self.form.focused_mut() {
                    input.end();
                }
                true
            }
            _ => false,
        }
    }

    /// Mouse wheel scrolls; clicks hit header buttons, links, or close the menu
    pub fn handle_mouse(&mut self, now: Instant, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(now, WHEEL_ROWS * ROW_PX as i64),
            MouseEventKind::ScrollUp => self.scroll_by(now, -WHEEL_ROWS * ROW_PX as i64),
            MouseEventKind::Down(MouseButton::Left) => self.click(now, mouse.column, mouse.row),
            _ => false,
        }
    }

    fn click(&mut self, now: Instant, column: u16, row: u16) -> bool {
        let layout = self.layout();
        let on_toggle = layout.menu_button.is_some_and(|r| contains(r, column, row));

        if on_toggle {
            self.toggle_nav();
            return true;
        }
        if layout.theme_button.is_some_and(|r| contains(r, column, row)) {
            self.toggle_theme();
            self.nav.click_outside(false, false);
            return true;
        }
        if self.nav.is_open() {
            if let Some(index) = layout.nav_links.iter().position(|r| contains(*r, column, row)) {
                return self.navigate(now, index);
            }
            let inside = layout.nav_panel.is_some_and(|r| contains(r, column, row));
            return self.nav.click_outside(inside, on_toggle);
        }
        if let Some(index) = layout
            .inline_links
            .iter()
            .position(|r| contains(*r, column, row))
        {
            return self.navigate(now, index);
        }
        false
    }
}

fn contains(rect: ratatui::layout::Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

// =============================================================================
// Unit Tests
// =============================================================================
