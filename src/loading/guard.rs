use super::counter::LoadingCounter;

/// Scoped registration of one outstanding operation
///
/// Created by [`LoadingCounter::acquire`]. Dropping the guard calls
/// `remove_loader` exactly once, including during unwinding and task abort.
#[derive(Debug)]
pub struct LoadingGuard {
    counter: LoadingCounter,
}

impl LoadingGuard {
    pub(super) fn new(counter: LoadingCounter) -> Self {
        Self { counter }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.counter.remove_loader();
    }
}
