//! The LMS gateway — the one place this crate talks to the host LMS.
//!
//! The gateway wraps an [`LmsConnection`] with a connected flag and the
//! write-batching used by the tracked collections. Its failure policy is
//! deliberate: a read or write attempted while disconnected is dropped
//! with a `warn!` line and never raised as an error, so the lesson page
//! stays usable even when no LMS is reachable. Nothing is queued for
//! replay.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

/// Contract for the host LMS connection, shaped like the SCORM 1.2
/// run-time API: synchronous call-and-return, every value crossing the
/// boundary as a string. Callers parse numerics themselves.
pub trait LmsConnection {
    /// Open the LMS session (`LMSInitialize`). `true` on success.
    fn init(&mut self) -> bool;

    /// Read a data-model element (`LMSGetValue`). Unset elements come
    /// back as the empty string.
    fn get(&mut self, path: &str) -> String;

    /// Write a data-model element (`LMSSetValue`). The write is not
    /// durable until [`LmsConnection::save`].
    fn set(&mut self, path: &str, value: &str) -> bool;

    /// Persist all writes since the last save (`LMSCommit`).
    fn save(&mut self) -> bool;

    /// End the LMS session (`LMSFinish`).
    fn quit(&mut self) -> bool;
}

/// Shared session object over the LMS connection.
///
/// Constructed once per session and handed to every tracked entity as an
/// `Rc` — explicit dependency injection, never a global. The model is
/// single-threaded and synchronous, matching the SCORM API itself, so
/// interior mutability with `Cell`/`RefCell` is all the coordination
/// required.
pub struct LmsGateway {
    conn: RefCell<Box<dyn LmsConnection>>,
    connected: Cell<bool>,
    dirty: Cell<bool>,
}

impl LmsGateway {
    /// Wrap a connection. The session is not opened until
    /// [`LmsGateway::connect`].
    pub fn new(conn: Box<dyn LmsConnection>) -> Rc<Self> {
        Rc::new(Self {
            conn: RefCell::new(conn),
            connected: Cell::new(false),
            dirty: Cell::new(false),
        })
    }

    /// Whether the LMS session is currently open.
    pub fn connected(&self) -> bool {
        self.connected.get()
    }

    /// Open the LMS session. The connected flag takes whatever the
    /// connection's `init` reports.
    pub fn connect(&self) -> bool {
        let ok = self.conn.borrow_mut().init();
        self.connected.set(ok);
        if ok {
            info!("LMS session opened");
        } else {
            warn!("LMS session failed to open");
        }
        ok
    }

    /// Flush pending writes and end the session.
    ///
    /// Idempotent: every call after the first successful one is a silent
    /// no-op. Skipping this call entirely loses all session data on most
    /// LMS implementations.
    pub fn disconnect(&self) {
        if !self.connected.get() {
            debug!("disconnect called while not connected; ignoring");
            return;
        }
        self.flush();
        self.conn.borrow_mut().quit();
        self.connected.set(false);
        info!("LMS session closed");
    }

    /// Read a data-model element. `None` (plus a warning) when the
    /// session is not open.
    pub fn get(&self, path: &str) -> Option<String> {
        if !self.connected.get() {
            warn!(path, "LMS not connected; read skipped");
            return None;
        }
        let value = self.conn.borrow_mut().get(path);
        debug!(path, value = %value, "LMS read");
        Some(value)
    }

    /// Read a numeric element, falling back to `default` when the
    /// session is closed or the LMS hands back something unparseable.
    pub fn get_f64(&self, path: &str, default: f64) -> f64 {
        self.get(path)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Integer variant of [`LmsGateway::get_f64`], used for the `_count`
    /// elements.
    pub fn get_u32(&self, path: &str, default: u32) -> u32 {
        self.get(path)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Write a data-model element and force a save in the same call.
    /// Dropped (plus a warning) when the session is not open — never
    /// queued for replay.
    pub fn set(&self, path: &str, value: &str) {
        if !self.connected.get() {
            warn!(path, "LMS not connected; write dropped");
            return;
        }
        debug!(path, value, "LMS write");
        let mut conn = self.conn.borrow_mut();
        conn.set(path, value);
        conn.save();
        self.dirty.set(false);
    }

    /// Write without forcing a save, leaving the gateway dirty until the
    /// next [`LmsGateway::flush`]. Used to batch several writes into one
    /// LMS round trip.
    pub fn set_deferred(&self, path: &str, value: &str) {
        if !self.connected.get() {
            warn!(path, "LMS not connected; deferred write dropped");
            return;
        }
        debug!(path, value, "LMS write (deferred)");
        self.conn.borrow_mut().set(path, value);
        self.dirty.set(true);
    }

    /// Persist any deferred writes. No-op when nothing is pending or the
    /// session is closed.
    pub fn flush(&self) {
        if !self.connected.get() {
            if self.dirty.get() {
                warn!("LMS not connected; flush dropped");
            }
            return;
        }
        if self.dirty.get() {
            self.conn.borrow_mut().save();
            self.dirty.set(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scotrack_conn::MockConnection;

    #[test]
    fn connect_sets_flag_from_init() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        assert!(!gateway.connected());
        assert!(gateway.connect());
        assert!(gateway.connected());
    }

    #[test]
    fn refused_init_leaves_gateway_disconnected() {
        let mock = MockConnection::refusing_init();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        assert!(!gateway.connect());
        assert!(!gateway.connected());
    }

    #[test]
    fn disconnected_reads_and_writes_are_noops() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));

        assert_eq!(gateway.get("cmi.core.lesson_status"), None);
        gateway.set("cmi.core.lesson_status", "completed");
        gateway.set_deferred("cmi.core.lesson_location", "page-2");
        gateway.flush();

        assert!(mock.set_calls().is_empty());
        assert_eq!(mock.save_count(), 0);
    }

    #[test]
    fn set_saves_immediately_but_deferred_waits_for_flush() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        gateway.connect();

        gateway.set("cmi.core.lesson_location", "page-1");
        assert_eq!(mock.save_count(), 1);

        gateway.set_deferred("cmi.objectives.0.id", "Quiz 1");
        gateway.set_deferred("cmi.objectives.0.status", "not attempted");
        assert_eq!(mock.save_count(), 1);

        gateway.flush();
        assert_eq!(mock.save_count(), 2);

        // Nothing pending, so a second flush does not hit the LMS again.
        gateway.flush();
        assert_eq!(mock.save_count(), 2);
    }

    #[test]
    fn numeric_reads_fall_back_to_defaults() {
        let mock = MockConnection::new();
        mock.seed("cmi.objectives._count", "not a number");
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        gateway.connect();

        assert_eq!(gateway.get_u32("cmi.objectives._count", 0), 0);
        assert_eq!(gateway.get_f64("cmi.objectives.0.score.max", 100.0), 100.0);

        mock.seed("cmi.objectives._count", "3");
        assert_eq!(gateway.get_u32("cmi.objectives._count", 0), 3);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        gateway.connect();

        gateway.disconnect();
        gateway.disconnect();
        gateway.disconnect();

        assert_eq!(mock.quit_count(), 1);
        assert!(!gateway.connected());
    }

    #[test]
    fn disconnect_flushes_pending_writes() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        gateway.connect();

        gateway.set_deferred("cmi.suspend_data", "3|b|d");
        assert_eq!(mock.save_count(), 0);
        gateway.disconnect();
        assert_eq!(mock.save_count(), 1);
    }
}
