//! SCO-level state: lesson status, bookmark, suspend data, overall
//! score, and exit condition.

use std::rc::Rc;

use crate::datamodel;
use crate::gateway::LmsGateway;
use crate::model::{ExitCondition, LessonStatus};

/// Facade over the lesson-level `cmi.core.*` and `cmi.suspend_data`
/// elements of the current SCO.
pub struct Sco {
    gateway: Rc<LmsGateway>,
}

impl Sco {
    pub fn new(gateway: Rc<LmsGateway>) -> Self {
        Self { gateway }
    }

    /// Mark the SCO completed in the LMS.
    pub fn complete(&self) {
        self.set_status(LessonStatus::Completed);
    }

    /// Report a lesson status other than plain completion.
    pub fn set_status(&self, status: LessonStatus) {
        self.gateway
            .set(datamodel::LESSON_STATUS, &status.to_string());
    }

    /// Read the lesson status back from the LMS. `None` when the session
    /// is closed or the LMS returns something outside the vocabulary.
    pub fn status(&self) -> Option<LessonStatus> {
        self.gateway
            .get(datamodel::LESSON_STATUS)
            .and_then(|v| v.parse().ok())
    }

    /// Store the learner's location in the course.
    pub fn set_bookmark(&self, location: &str) {
        self.gateway.set(datamodel::LESSON_LOCATION, location);
    }

    /// Retrieve the stored bookmark, if any. An empty string means the
    /// learner has no saved location.
    pub fn bookmark(&self) -> Option<String> {
        self.gateway.get(datamodel::LESSON_LOCATION)
    }

    /// Store the opaque suspend-data string the SCO uses to carry
    /// arbitrary state across sessions.
    pub fn set_suspend_data(&self, data: &str) {
        self.gateway.set(datamodel::SUSPEND_DATA, data);
    }

    /// Retrieve the suspend-data string from a previous session.
    pub fn suspend_data(&self) -> Option<String> {
        self.gateway.get(datamodel::SUSPEND_DATA)
    }

    /// Report the overall SCO score.
    pub fn set_score(&self, raw: f64) {
        self.gateway.set(datamodel::SCORE_RAW, &raw.to_string());
    }

    /// Report the lowest score the SCO can produce.
    pub fn set_min_score(&self, min: f64) {
        self.gateway.set(datamodel::SCORE_MIN, &min.to_string());
    }

    /// Report the highest score the SCO can produce.
    pub fn set_max_score(&self, max: f64) {
        self.gateway.set(datamodel::SCORE_MAX, &max.to_string());
    }

    /// Report how the learner is leaving the SCO.
    pub fn set_exit(&self, exit: ExitCondition) {
        self.gateway.set(datamodel::EXIT, &exit.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scotrack_conn::MockConnection;

    fn connected_sco() -> (MockConnection, Sco) {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        gateway.connect();
        (mock, Sco::new(gateway))
    }

    #[test]
    fn complete_writes_lesson_status() {
        let (mock, sco) = connected_sco();
        sco.complete();
        assert_eq!(
            mock.value("cmi.core.lesson_status").as_deref(),
            Some("completed")
        );
    }

    #[test]
    fn bookmark_round_trip() {
        let (_, sco) = connected_sco();
        sco.set_bookmark("page-7");
        assert_eq!(sco.bookmark().as_deref(), Some("page-7"));
    }

    #[test]
    fn status_reads_through() {
        let (mock, sco) = connected_sco();
        mock.seed("cmi.core.lesson_status", "browsed");
        assert_eq!(sco.status(), Some(LessonStatus::Browsed));

        mock.seed("cmi.core.lesson_status", "finished-ish");
        assert_eq!(sco.status(), None);
    }

    #[test]
    fn scores_are_written_as_strings() {
        let (mock, sco) = connected_sco();
        sco.set_score(42.0);
        sco.set_min_score(0.0);
        sco.set_max_score(100.0);
        assert_eq!(mock.value("cmi.core.score.raw").as_deref(), Some("42"));
        assert_eq!(mock.value("cmi.core.score.max").as_deref(), Some("100"));
    }

    #[test]
    fn normal_exit_is_the_empty_string() {
        let (mock, sco) = connected_sco();
        sco.set_exit(ExitCondition::Normal);
        assert_eq!(mock.value("cmi.core.exit").as_deref(), Some(""));
        sco.set_exit(ExitCondition::Suspend);
        assert_eq!(mock.value("cmi.core.exit").as_deref(), Some("suspend"));
    }

    #[test]
    fn disconnected_sco_stays_quiet() {
        let mock = MockConnection::new();
        let gateway = LmsGateway::new(Box::new(mock.clone()));
        let sco = Sco::new(gateway);

        sco.complete();
        sco.set_bookmark("page-1");
        assert_eq!(sco.status(), None);
        assert!(mock.set_calls().is_empty());
    }
}
