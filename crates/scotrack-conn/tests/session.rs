//! End-to-end session tests: the tracking layer driving real
//! connections through a full connect/track/disconnect lifecycle.

use scotrack_core::gateway::LmsGateway;
use scotrack_core::interactions::{InteractionConfig, TrackedInteractions};
use scotrack_core::model::{InteractionResult, InteractionType, LessonStatus};
use scotrack_core::objectives::TrackedObjectives;
use scotrack_core::sco::Sco;

use scotrack_conn::{FileConnection, MockConnection};

#[test]
fn quiz_session_against_mock_lms() {
    let mock = MockConnection::new();
    let gateway = LmsGateway::new(Box::new(mock.clone()));
    assert!(gateway.connect());

    let sco = Sco::new(gateway.clone());
    sco.set_min_score(0.0);
    sco.set_max_score(100.0);

    let mut objectives = TrackedObjectives::new(gateway.clone());
    objectives.add_objective_with("Quiz 1", "core", 50.0);
    objectives.add_objective_with("Bonus 1", "bonus", 5.0);
    objectives.finalize_objectives();

    let mut interactions = TrackedInteractions::new(gateway.clone());
    let question = interactions.add_interaction(InteractionConfig {
        id: "q1".to_string(),
        kind: InteractionType::Choice,
        objectives: vec!["Quiz 1".to_string()],
        correct_responses: vec!["b".to_string()],
        weighting: 1.0,
    });
    question.start();
    question.record_response("b");
    question.record_result(InteractionResult::Correct);
    question.finish();

    let quiz = objectives.objective_mut("Quiz 1").unwrap();
    quiz.set_score(50.0);
    quiz.complete();

    assert!(objectives.check_all_completed("core"));
    assert!(!objectives.check_all_completed("bonus"));
    assert_eq!(objectives.calculate_total_score("core"), 50.0);

    sco.set_score(objectives.calculate_total_score("core"));
    sco.complete();
    sco.set_bookmark("done");
    gateway.disconnect();

    assert_eq!(mock.value("cmi.objectives._count").as_deref(), Some("2"));
    assert_eq!(mock.value("cmi.interactions._count").as_deref(), Some("1"));
    assert_eq!(mock.value("cmi.core.score.raw").as_deref(), Some("50"));
    assert_eq!(
        mock.value("cmi.core.lesson_status").as_deref(),
        Some("completed")
    );
    assert_eq!(
        mock.value("cmi.interactions.0.result").as_deref(),
        Some("correct")
    );
    assert_eq!(mock.quit_count(), 1);
}

#[test]
fn objectives_survive_a_relaunch_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmi.json");

    // First launch: declare objectives, score one, leave a bookmark.
    {
        let store = FileConnection::open(&path).unwrap();
        let gateway = LmsGateway::new(Box::new(store));
        assert!(gateway.connect());

        let mut objectives = TrackedObjectives::new(gateway.clone());
        assert!(objectives.is_empty());
        objectives.add_objective_with("Quiz 1", "core", 50.0);
        objectives.add_objective_with("Bonus 1", "bonus", 5.0);
        objectives.finalize_objectives();

        objectives.objective_mut("Quiz 1").unwrap().set_score(35.0);
        Sco::new(gateway.clone()).set_bookmark("page-4");
        gateway.disconnect();
    }

    // Relaunch: everything comes back, keyed by logical id.
    let store = FileConnection::open(&path).unwrap();
    let gateway = LmsGateway::new(Box::new(store));
    assert!(gateway.connect());

    let objectives = TrackedObjectives::new(gateway.clone());
    assert_eq!(objectives.len(), 2);

    let quiz = objectives.objective("Quiz 1").unwrap();
    assert_eq!(quiz.group(), "core");
    assert_eq!(quiz.max_score(), 50.0);
    assert_eq!(quiz.score(), 35.0);
    assert_eq!(quiz.status(), LessonStatus::NotAttempted);

    let bonus = objectives.objective("Bonus 1").unwrap();
    assert_eq!(bonus.group(), "bonus");
    assert_eq!(bonus.max_score(), 5.0);

    assert_eq!(Sco::new(gateway).bookmark().as_deref(), Some("page-4"));
}

#[test]
fn lms_that_refuses_to_connect_degrades_to_noops() {
    let mock = MockConnection::refusing_init();
    let gateway = LmsGateway::new(Box::new(mock.clone()));
    assert!(!gateway.connect());

    let sco = Sco::new(gateway.clone());
    sco.set_bookmark("page-1");
    assert_eq!(sco.bookmark(), None);

    let mut objectives = TrackedObjectives::new(gateway.clone());
    objectives.add_objective("Quiz 1");
    objectives.finalize_objectives();
    objectives.complete_all_objectives("default");

    let mut interactions = TrackedInteractions::new(gateway.clone());
    let q = interactions.add_interaction(InteractionConfig::new("q1"));
    q.start();
    q.finish();

    gateway.disconnect();

    assert!(mock.set_calls().is_empty());
    assert_eq!(mock.save_count(), 0);
    assert_eq!(mock.quit_count(), 0);
}

#[test]
fn interaction_journal_layout_matches_the_data_model() {
    let mock = MockConnection::new();
    let gateway = LmsGateway::new(Box::new(mock.clone()));
    gateway.connect();

    let mut interactions = TrackedInteractions::new(gateway);
    interactions.add_interaction(InteractionConfig {
        id: "match-1".to_string(),
        kind: InteractionType::Matching,
        objectives: vec!["Quiz 1".to_string(), "Quiz 2".to_string()],
        correct_responses: vec!["a.1".to_string(), "b.2".to_string()],
        weighting: 1.5,
    });

    assert_eq!(
        mock.value("cmi.interactions.0.type").as_deref(),
        Some("matching")
    );
    assert_eq!(
        mock.value("cmi.interactions.0.objectives.1.id").as_deref(),
        Some("Quiz 2")
    );
    assert_eq!(
        mock.value("cmi.interactions.0.correct_responses.1.pattern")
            .as_deref(),
        Some("b.2")
    );
    assert_eq!(
        mock.value("cmi.interactions.0.weighting").as_deref(),
        Some("1.5")
    );
}
