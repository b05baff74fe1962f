//! Mock LMS connection for testing.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use scotrack_core::gateway::LmsConnection;

use crate::counts::note_indexed_write;

#[derive(Default)]
struct MockState {
    values: BTreeMap<String, String>,
    set_calls: Vec<(String, String)>,
    save_count: u32,
    quit_count: u32,
    refuse_init: bool,
}

/// An in-memory LMS for testing the tracking layer without a host.
///
/// Cloning shares the underlying state, so tests keep a handle for
/// assertions after the gateway takes ownership of its copy. Every `set`
/// call is recorded in order; unset elements `get` as the empty string,
/// matching `LMSGetValue`.
#[derive(Clone, Default)]
pub struct MockConnection {
    state: Rc<RefCell<MockState>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose `init` always fails, for exercising the
    /// disconnected paths.
    pub fn refusing_init() -> Self {
        let mock = Self::default();
        mock.state.borrow_mut().refuse_init = true;
        mock
    }

    /// Pre-seed a data-model element, as if a previous session (or the
    /// LMS itself) had written it.
    pub fn seed(&self, path: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.values.insert(path.to_string(), value.to_string());
        note_indexed_write(&mut state.values, path);
    }

    /// Current value of a data-model element, if any write reached it.
    pub fn value(&self, path: &str) -> Option<String> {
        self.state.borrow().values.get(path).cloned()
    }

    /// Every `set` call made through the connection, in order.
    pub fn set_calls(&self) -> Vec<(String, String)> {
        self.state.borrow().set_calls.clone()
    }

    /// Number of `save` calls made through the connection.
    pub fn save_count(&self) -> u32 {
        self.state.borrow().save_count
    }

    /// Number of `quit` calls made through the connection.
    pub fn quit_count(&self) -> u32 {
        self.state.borrow().quit_count
    }
}

impl LmsConnection for MockConnection {
    fn init(&mut self) -> bool {
        !self.state.borrow().refuse_init
    }

    fn get(&mut self, path: &str) -> String {
        self.state
            .borrow()
            .values
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    fn set(&mut self, path: &str, value: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.set_calls.push((path.to_string(), value.to_string()));
        state.values.insert(path.to_string(), value.to_string());
        note_indexed_write(&mut state.values, path);
        true
    }

    fn save(&mut self) -> bool {
        self.state.borrow_mut().save_count += 1;
        true
    }

    fn quit(&mut self) -> bool {
        self.state.borrow_mut().quit_count += 1;
        true
    }
}
