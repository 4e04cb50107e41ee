//! Page controller
//!
//! Owns the document, the window model and every behavior, and routes input
//! events, scroll samples and timer jobs to them. Each behavior is set up
//! independently; one that cannot bind to the page is skipped without
//! affecting the others.

use folio_dom::{Document, DomTree, EventKind, NodeId, ScrollOptions, UiEvent};
use folio_runtime::{Debouncer, EventLoop, TaskHandle};

use crate::anchors::AnchorScroller;
use crate::animation_lib::AnimationLibrary;
use crate::bindings::PageBindings;
use crate::config::PageConfig;
use crate::contact::{ContactForm, SubmitOutcome};
use crate::counter::CounterGroup;
use crate::effects::{HoverEffects, PageLoad, detect_touch};
use crate::error::SetupError;
use crate::nav::MobileMenu;
use crate::notification::{NotificationKind, Notifier};
use crate::reveal::{RevealController, fill_progress_bars};
use crate::scroll::ScrollEffects;
use crate::typewriter::{Typewriter, TypewriterTask};
use crate::window::Window;

/// Deferred work on the page's event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    ScrollSample,
    TypewriterStep,
    CounterTick(usize),
    FillProgressBars,
    SubmitComplete,
    DismissNotification(NodeId),
    RevealHeroText,
    RevealHeroChild(NodeId),
}

fn feature<T>(name: &str, result: Result<T, SetupError>) -> Option<T> {
    match result {
        Ok(feature) => Some(feature),
        Err(e) => {
            tracing::debug!("Skipping {}: {}", name, e);
            None
        }
    }
}

pub struct PageController {
    document: Document,
    window: Window,
    config: PageConfig,
    bindings: PageBindings,
    event_loop: EventLoop<Job>,
    scroll_debounce: Debouncer,

    menu: Option<MobileMenu>,
    anchors: AnchorScroller,
    scroll: ScrollEffects,
    reveal: Option<RevealController>,
    counters: CounterGroup,
    typewriter: Option<TypewriterTask>,
    contact: Option<ContactForm>,
    notifier: Notifier,
    hover: Option<HoverEffects>,
    page_load: PageLoad,
    progress_bars: Option<TaskHandle>,
    animation_library: Option<Box<dyn AnimationLibrary>>,
    torn_down: bool,
}

impl PageController {
    /// Bind to `document` using the configured selectors
    pub fn new(document: Document, window: Window, config: PageConfig) -> Self {
        let bindings = PageBindings::discover(&document, &config.selectors);
        Self::with_bindings(document, bindings, window, config)
    }

    /// Bind to explicitly provided elements
    pub fn with_bindings(mut document: Document, bindings: PageBindings, window: Window, config: PageConfig) -> Self {
        let mut event_loop = EventLoop::new();
        let tree = document.tree_mut();

        let scroll = ScrollEffects::setup(tree, &bindings, &config.scroll, &config.classes);
        let menu = feature("mobile menu", MobileMenu::setup(&bindings, &config.classes.active));
        let anchors = AnchorScroller::new(bindings.anchors.clone(), config.scroll.anchor_offset);
        let reveal = feature(
            "reveal animations",
            RevealController::setup(&bindings, &config.reveal, &config.classes),
        );
        let counters = CounterGroup::setup(tree, &bindings.stat_numbers, &config.counter);
        let typewriter = feature(
            "typewriter",
            TypewriterTask::start(
                tree,
                bindings.hero_subtitle,
                &config.typewriter,
                &mut event_loop,
                Job::TypewriterStep,
            ),
        );
        let contact = feature("contact form", ContactForm::setup(tree, &bindings, &config.contact));
        let notifier = Notifier::new(bindings.body, config.notification.timeout_ms);

        let touch = detect_touch(tree, bindings.body, window.is_touch(), &config.classes.touch_device);
        let hover = feature(
            "hover effects",
            HoverEffects::setup(tree, &bindings, touch, &config.effects),
        );
        let page_load = PageLoad::new(&bindings, &config.classes.loaded, &config.effects);

        let mut controller = Self {
            document,
            window,
            scroll_debounce: Debouncer::new(config.scroll.debounce_ms),
            config,
            bindings,
            event_loop,
            menu,
            anchors,
            scroll,
            reveal,
            counters,
            typewriter,
            contact,
            notifier,
            hover,
            page_load,
            progress_bars: None,
            animation_library: None,
            torn_down: false,
        };
        // Observers report initial visibility as soon as they start
        controller.check_reveal();
        tracing::info!("Page controller ready for {}", controller.document.url());
        controller
    }

    /// Initialize a host-provided animation library (once)
    pub fn attach_animation_library(&mut self, mut library: Box<dyn AnimationLibrary>) -> bool {
        if self.animation_library.is_some() {
            tracing::warn!("Animation library already attached, ignoring {}", library.name());
            return false;
        }
        library.init(&self.config.animation_library);
        tracing::debug!("Initialized animation library {}", library.name());
        self.animation_library = Some(library);
        true
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Deliver an input event
    pub fn dispatch(&mut self, event: &mut UiEvent) {
        if self.torn_down {
            return;
        }
        match event.kind.clone() {
            EventKind::Click => self.on_click(event),
            EventKind::KeyDown { key } => {
                if let Some(menu) = &mut self.menu {
                    menu.handle_key(self.document.tree_mut(), &key);
                }
            }
            EventKind::Submit => self.on_submit(event),
            EventKind::MouseEnter => {
                if let Some(hover) = &self.hover {
                    hover.enter(self.document.tree_mut(), event.target);
                }
            }
            EventKind::MouseLeave => {
                if let Some(hover) = &self.hover {
                    hover.leave(self.document.tree_mut(), event.target);
                }
            }
            EventKind::Load => {
                self.page_load
                    .on_load(self.document.tree_mut(), &mut self.event_loop, Job::RevealHeroText);
            }
        }
    }

    fn on_click(&mut self, event: &mut UiEvent) {
        let target = event.target;
        self.notifier.handle_click(self.document.tree_mut(), target);
        if let Some(menu) = &mut self.menu {
            menu.handle_click(self.document.tree_mut(), target);
        }
        self.anchors.handle_click(&self.document, &mut self.window, event);
    }

    fn on_submit(&mut self, event: &mut UiEvent) {
        let Some(contact) = &mut self.contact else {
            return;
        };
        if event.target != contact.form() {
            return;
        }
        event.prevent_default();

        let tree = self.document.tree_mut();
        if let SubmitOutcome::Rejected(message) = contact.submit(tree, &mut self.event_loop, Job::SubmitComplete) {
            self.notifier.show(
                tree,
                &mut self.event_loop,
                &message,
                NotificationKind::Error,
                Job::DismissNotification,
            );
        }
    }

    /// Host scrolled the window to `y`
    ///
    /// Reveal checks run right away; the other scroll effects wait for the
    /// debounced sample.
    pub fn scroll_to(&mut self, y: f64) {
        if self.torn_down {
            return;
        }
        self.window.set_scroll_y(y);
        self.scroll_debounce.trigger(&mut self.event_loop, Job::ScrollSample);
        self.check_reveal();
    }

    /// Host resized the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.torn_down {
            return;
        }
        self.window.resize(width, height);
        self.scroll_debounce.trigger(&mut self.event_loop, Job::ScrollSample);
        self.check_reveal();
    }

    /// Scroll requests issued since the last call
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollOptions> {
        self.window.take_scroll_requests()
    }

    fn check_reveal(&mut self) {
        let Some(reveal) = &mut self.reveal else {
            return;
        };
        let tree = self.document.tree_mut();
        let triggers = reveal.check(tree, &self.window, self.event_loop.now());

        if triggers.start_counters {
            self.counters.start(tree, &mut self.event_loop, Job::CounterTick);
        }
        if triggers.fill_progress_bars {
            let delay = self.config.reveal.progress_bar_delay_ms;
            self.progress_bars = Some(self.event_loop.set_timeout(Job::FillProgressBars, delay));
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Let `ms` milliseconds pass, running every job that falls due
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.event_loop.now() + ms;
        while let Some(job) = self.event_loop.pop_due(deadline) {
            self.run(job);
        }
        self.event_loop.advance_clock(deadline);
    }

    /// Run every pending job, for at most `limit_ms`
    ///
    /// The typewriter never settles, so callers always pass a bound.
    pub fn run_until_idle(&mut self, limit_ms: u64) {
        let deadline = self.event_loop.now() + limit_ms;
        while let Some(wait) = self.event_loop.time_until_next() {
            let next = self.event_loop.now() + wait;
            if next > deadline {
                break;
            }
            self.advance(wait);
        }
    }

    fn run(&mut self, job: Job) {
        tracing::trace!("Running {:?} at {}", job, self.event_loop.now());
        let tree = self.document.tree_mut();
        match job {
            Job::ScrollSample => {
                self.scroll_debounce.settle();
                self.scroll.apply(tree, &self.window);
            }
            Job::TypewriterStep => {
                if let Some(typewriter) = &mut self.typewriter {
                    typewriter.step(tree, &mut self.event_loop, Job::TypewriterStep);
                }
            }
            Job::CounterTick(index) => self.counters.tick(tree, index),
            Job::FillProgressBars => {
                self.progress_bars = None;
                fill_progress_bars(tree, &self.bindings.progress_bars);
            }
            Job::SubmitComplete => {
                let message = self.contact.as_mut().and_then(|c| c.complete(tree));
                if let Some(message) = message {
                    self.notifier.show(
                        tree,
                        &mut self.event_loop,
                        &message,
                        NotificationKind::Success,
                        Job::DismissNotification,
                    );
                }
            }
            Job::DismissNotification(node) => self.notifier.expire(tree, node),
            Job::RevealHeroText => self.page_load.stagger(&mut self.event_loop, Job::RevealHeroChild),
            Job::RevealHeroChild(child) => self.page_load.reveal_child(tree, child),
        }
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Stop every task, disconnect the observer and close the menu
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let tree = self.document.tree_mut();

        self.scroll_debounce.cancel();
        if let Some(typewriter) = &self.typewriter {
            typewriter.stop();
        }
        self.counters.stop();
        if let Some(contact) = &mut self.contact {
            contact.cancel();
        }
        if let Some(handle) = self.progress_bars.take() {
            handle.stop();
        }
        self.notifier.clear(tree);
        self.page_load.stop();
        if let Some(reveal) = &mut self.reveal {
            reveal.disconnect();
        }
        if let Some(menu) = &mut self.menu {
            menu.close(tree);
        }
        self.event_loop.clear_all();
        tracing::debug!("Page controller torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    /// Mutable tree, for hosts that lay the page out
    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.document.tree_mut()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn bindings(&self) -> &PageBindings {
        &self.bindings
    }

    /// Virtual time (ms)
    pub fn now(&self) -> u64 {
        self.event_loop.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.event_loop.pending()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MobileMenu::is_open)
    }

    pub fn is_submitting(&self) -> bool {
        self.contact.as_ref().is_some_and(ContactForm::is_submitting)
    }

    pub fn active_notification(&self) -> Option<NodeId> {
        self.notifier.current()
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref().map(TypewriterTask::machine)
    }

    pub fn counters_started(&self) -> bool {
        self.counters.is_started()
    }

    pub fn progress_bar(&self) -> Option<NodeId> {
        self.scroll.progress_bar()
    }

    pub fn has_feature(&self, name: &str) -> bool {
        match name {
            "menu" => self.menu.is_some(),
            "reveal" => self.reveal.is_some(),
            "typewriter" => self.typewriter.is_some(),
            "contact" => self.contact.is_some(),
            "hover" => self.hover.is_some(),
            "counters" => !self.counters.is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Debug for PageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("url", &self.document.url())
            .field("now", &self.event_loop.now())
            .field("scroll_y", &self.window.scroll_y())
            .field("menu_open", &self.menu_open())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
