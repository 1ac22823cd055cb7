//! Purpose: Install a reactivity library into the framework hook bus.
//! Exports: `Batch`, `set_reconciler`.
//! Role: Adapter between `Hooks` and a library's batching primitive.
//! Invariants: Lifecycle handlers from child components run after the page's own handlers.

use super::hooks::{Hooks, PageInstance, PendingLifecycles};

/// A library primitive that groups state updates and flushes them once.
pub trait Batch {
    fn batch(&self, cb: &mut dyn FnMut());
}

pub fn set_reconciler<B>(hooks: &mut Hooks, batcher: B)
where
    B: Batch + 'static,
{
    hooks.tap_batched_event_updates(move |cb| batcher.batch(cb));
    hooks.tap_merge_page_instance(merge_page_instance);
}

fn merge_page_instance(prev: Option<&PendingLifecycles>, next: &mut PageInstance) {
    let Some(prev) = prev else {
        return;
    };
    let pending = prev.instance();
    let lifecycles: Vec<&str> = pending.lifecycles().collect();
    for lifecycle in lifecycles {
        next.append(lifecycle, pending.handlers(lifecycle));
    }
}

#[cfg(test)]
mod tests {
    use super::{Batch, set_reconciler};
    use crate::runtime::hooks::{Hooks, PageInstance, PendingLifecycles};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Defers effects until the outermost batch returns, then flushes them.
    #[derive(Clone, Default)]
    struct DeferringBatch {
        depth: Rc<Cell<u32>>,
        flushes: Rc<Cell<u32>>,
    }

    impl Batch for DeferringBatch {
        fn batch(&self, cb: &mut dyn FnMut()) {
            self.depth.set(self.depth.get() + 1);
            cb();
            self.depth.set(self.depth.get() - 1);
            if self.depth.get() == 0 {
                self.flushes.set(self.flushes.get() + 1);
            }
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Rc<dyn Fn()> {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn event_updates_run_inside_batch() {
        let batcher = DeferringBatch::default();
        let depth = Rc::clone(&batcher.depth);
        let flushes = Rc::clone(&batcher.flushes);
        let mut hooks = Hooks::new();
        set_reconciler(&mut hooks, batcher);

        let mut seen_depth = 0;
        hooks.batched_event_updates(&mut || seen_depth = depth.get());
        assert_eq!(seen_depth, 1);
        assert_eq!(flushes.get(), 1);
    }

    #[test]
    fn merge_appends_pending_handlers_after_page_handlers() {
        let mut hooks = Hooks::new();
        set_reconciler(&mut hooks, DeferringBatch::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut prev = PendingLifecycles::new();
        prev.on("onShow", recorder(&log, "child-show"));
        prev.on("onHide", recorder(&log, "child-hide"));

        let mut next = PageInstance::new();
        next.on("onShow", recorder(&log, "page-show"));

        hooks.merge_page_instance(Some(&prev), &mut next);
        next.trigger("onShow");
        next.trigger("onHide");

        assert_eq!(
            *log.borrow(),
            vec!["page-show", "child-show", "child-hide"]
        );
    }

    #[test]
    fn merge_without_prev_is_noop() {
        let mut hooks = Hooks::new();
        set_reconciler(&mut hooks, DeferringBatch::default());
        let mut next = PageInstance::new();
        hooks.merge_page_instance(None, &mut next);
        assert_eq!(next.lifecycles().count(), 0);
    }
}
