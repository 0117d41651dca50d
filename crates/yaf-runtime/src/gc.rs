//! Collector hooks
//!
//! Generated code calls `yaf_gc_collect` at safe points and
//! `yaf_gc_final_cleanup` before exit. The runtime does not ship a collector:
//! both hooks do nothing until an implementation is registered.

use std::sync::OnceLock;

/// A memory collector driven by the runtime hooks.
pub trait Collector: Send + Sync {
    /// Reclaim unreachable memory at a safe point.
    fn collect(&self);

    /// Release everything still held before the process exits.
    fn final_cleanup(&self);
}

static COLLECTOR: OnceLock<Box<dyn Collector>> = OnceLock::new();

/// Register the process-wide collector. Returns `false` if one is already
/// registered.
pub fn register_collector(collector: Box<dyn Collector>) -> bool {
    COLLECTOR.set(collector).is_ok()
}

pub fn collect() {
    match COLLECTOR.get() {
        Some(collector) => collector.collect(),
        None => tracing::trace!("collect: no collector registered"),
    }
}

pub fn final_cleanup() {
    match COLLECTOR.get() {
        Some(collector) => collector.final_cleanup(),
        None => tracing::trace!("final_cleanup: no collector registered"),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_gc_collect() {
    collect();
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_gc_final_cleanup() {
    final_cleanup();
}
