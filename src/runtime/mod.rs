// Page runtime glue: the hook bus and the reconciler adapter that taps it.
pub mod hooks;
pub mod reconciler;
