//! The `scotrack simulate` command.
//!
//! Replays a scripted lesson session against a file-backed cmi store:
//! connect, restore or declare objectives, run interactions with their
//! recorded responses, report scores and completion, disconnect. Running
//! the same store twice exercises the restore paths the way a second
//! SCO launch would.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use scotrack_core::gateway::LmsGateway;
use scotrack_core::interactions::{InteractionConfig, TrackedInteractions};
use scotrack_core::model::{InteractionResult, LessonStatus};
use scotrack_core::objectives::TrackedObjectives;
use scotrack_core::sco::Sco;
use scotrack_conn::FileConnection;

fn default_group() -> String {
    "default".to_string()
}

fn default_max_score() -> f64 {
    100.0
}

/// One scripted lesson session.
#[derive(Debug, Deserialize)]
struct LessonScript {
    #[serde(default)]
    bookmark: Option<String>,
    #[serde(default)]
    suspend_data: Option<String>,
    #[serde(default)]
    min_score: Option<f64>,
    #[serde(default)]
    max_score: Option<f64>,
    /// Group whose total becomes the overall SCO score and whose
    /// completion marks the SCO completed.
    #[serde(default = "default_group")]
    score_group: String,
    #[serde(default)]
    objectives: Vec<ObjectiveStep>,
    #[serde(default)]
    interactions: Vec<InteractionStep>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveStep {
    id: String,
    #[serde(default = "default_group")]
    group: String,
    #[serde(default = "default_max_score")]
    max_score: f64,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    complete: bool,
}

#[derive(Debug, Deserialize)]
struct InteractionStep {
    #[serde(flatten)]
    config: InteractionConfig,
    #[serde(default)]
    response: Option<String>,
    /// A result keyword (`correct`, `wrong`, ...) or a number.
    #[serde(default)]
    result: Option<String>,
}

pub fn execute(store: PathBuf, script: PathBuf) -> Result<()> {
    let script_text = std::fs::read_to_string(&script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let lesson: LessonScript = toml::from_str(&script_text)
        .with_context(|| format!("failed to parse script {}", script.display()))?;

    let connection = FileConnection::open(&store)?;
    let gateway = LmsGateway::new(Box::new(connection));
    if !gateway.connect() {
        anyhow::bail!("LMS connection refused to initialize");
    }

    let sco = Sco::new(gateway.clone());
    if let Some(min) = lesson.min_score {
        sco.set_min_score(min);
    }
    if let Some(max) = lesson.max_score {
        sco.set_max_score(max);
    }

    let mut objectives = TrackedObjectives::new(gateway.clone());
    info!(restored = objectives.len(), "objectives restored from store");

    for step in &lesson.objectives {
        if objectives.objective(&step.id).is_none() {
            objectives.add_objective_with(&step.id, &step.group, step.max_score);
        }
    }
    objectives.finalize_objectives();

    for step in &lesson.objectives {
        let objective = objectives
            .objective_mut(&step.id)
            .with_context(|| format!("objective {:?} was not declared", step.id))?;
        if let Some(score) = step.score {
            objective.set_score(score);
        }
        if step.complete {
            objective.complete();
        }
    }

    let mut interactions = TrackedInteractions::new(gateway.clone());
    for step in &lesson.interactions {
        let interaction = interactions.add_interaction(step.config.clone());
        interaction.start();
        if let Some(response) = &step.response {
            interaction.record_response(response);
        }
        if let Some(result) = &step.result {
            let result: InteractionResult = result
                .parse()
                .with_context(|| format!("bad result for interaction {:?}", step.config.id))?;
            interaction.record_result(result);
        }
        interaction.finish();
    }

    let total = objectives.calculate_total_score(&lesson.score_group);
    sco.set_score(total);
    let all_done = objectives.check_all_completed(&lesson.score_group);
    if all_done {
        sco.complete();
    } else {
        sco.set_status(LessonStatus::Incomplete);
    }

    if let Some(bookmark) = &lesson.bookmark {
        sco.set_bookmark(bookmark);
    }
    if let Some(data) = &lesson.suspend_data {
        sco.set_suspend_data(data);
    }

    gateway.disconnect();

    println!(
        "Session complete: {} objectives, {} interactions, group {:?} scored {} ({})",
        objectives.len(),
        interactions.len(),
        lesson.score_group,
        total,
        if all_done { "completed" } else { "incomplete" },
    );

    Ok(())
}
