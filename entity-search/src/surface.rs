use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::render::ResultView;

/// The two output regions of the widget: result header and result body.
/// Implementations replace both wholesale on every call.
pub trait ResultSurface {
    fn replace(&self, view: &ResultView);
}

/// Keeps the last rendered view in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    current: Option<ResultView>,
    renders: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    // a panic while holding the lock can't leave the state half written,
    // both fields are plain values
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<ResultView> {
        self.state().current.clone()
    }

    pub fn result_header(&self) -> Option<String> {
        self.current().map(|view| view.result_header)
    }

    pub fn result_body(&self) -> Option<String> {
        self.current().map(|view| view.result_body_html())
    }

    /// Number of times the surface has been replaced.
    pub fn renders(&self) -> usize {
        self.state().renders
    }
}

impl ResultSurface for MemorySurface {
    fn replace(&self, view: &ResultView) {
        let mut state = self.state();
        state.current = Some(view.clone());
        state.renders += 1;
    }
}
