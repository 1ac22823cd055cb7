//! Purpose: Hook bus that lets a UI library plug into framework lifecycle events.
//! Exports: `Hooks`, `PageInstance`, `PendingLifecycles`, `Handler`.
//! Role: Indirection point between the page runtime and whichever reconciler is installed.
//! Invariants: An untapped `batched_event_updates` runs the callback directly.
//! Invariants: An untapped `merge_page_instance` leaves `next` unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub type Handler = Rc<dyn Fn()>;

type BatchTap = Box<dyn Fn(&mut dyn FnMut())>;
type MergeTap = Box<dyn Fn(Option<&PendingLifecycles>, &mut PageInstance)>;

/// Lifecycle handlers keyed by lifecycle name, in call order.
#[derive(Clone, Default)]
pub struct PageInstance {
    handlers: BTreeMap<String, Vec<Handler>>,
}

impl PageInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, lifecycle: impl Into<String>, handler: Handler) {
        self.handlers.entry(lifecycle.into()).or_default().push(handler);
    }

    pub fn handlers(&self, lifecycle: &str) -> &[Handler] {
        self.handlers
            .get(lifecycle)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn lifecycles(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn append(&mut self, lifecycle: &str, handlers: &[Handler]) {
        self.handlers
            .entry(lifecycle.to_string())
            .or_default()
            .extend(handlers.iter().cloned());
    }

    pub fn trigger(&self, lifecycle: &str) {
        for handler in self.handlers(lifecycle) {
            handler();
        }
    }
}

impl fmt::Debug for PageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("PageInstance").field("handlers", &counts).finish()
    }
}

/// Handlers that child components registered through lifecycle hooks before
/// the page instance existed.
#[derive(Clone, Debug, Default)]
pub struct PendingLifecycles(PageInstance);

impl PendingLifecycles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, lifecycle: impl Into<String>, handler: Handler) {
        self.0.on(lifecycle, handler);
    }

    pub fn instance(&self) -> &PageInstance {
        &self.0
    }
}

#[derive(Default)]
pub struct Hooks {
    batched_event_updates: Option<BatchTap>,
    merge_page_instance: Option<MergeTap>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap_batched_event_updates<F>(&mut self, tap: F)
    where
        F: Fn(&mut dyn FnMut()) + 'static,
    {
        self.batched_event_updates = Some(Box::new(tap));
    }

    pub fn tap_merge_page_instance<F>(&mut self, tap: F)
    where
        F: Fn(Option<&PendingLifecycles>, &mut PageInstance) + 'static,
    {
        self.merge_page_instance = Some(Box::new(tap));
    }

    pub fn batched_event_updates(&self, cb: &mut dyn FnMut()) {
        match &self.batched_event_updates {
            Some(tap) => tap(cb),
            None => cb(),
        }
    }

    pub fn merge_page_instance(&self, prev: Option<&PendingLifecycles>, next: &mut PageInstance) {
        if let Some(tap) = &self.merge_page_instance {
            tap(prev, next);
        }
    }
}
