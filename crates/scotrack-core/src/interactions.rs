//! Interaction tracking: local mirrors of `cmi.interactions.N.*`
//! records.
//!
//! Interactions are append-only journal entries: unlike objectives there
//! is no restore-from-LMS path, because most LMS implementations expose
//! the interaction records write-only. A [`TrackedInteractions`]
//! collection only ever allocates forward within the session.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datamodel;
use crate::gateway::LmsGateway;
use crate::model::{InteractionResult, InteractionType};
use crate::time::{format_time, format_timespan};

fn default_kind() -> InteractionType {
    InteractionType::Choice
}

fn default_weighting() -> f64 {
    1.0
}

/// Everything an interaction record needs at creation.
///
/// Every recognized field is explicit here, with its default; partial
/// TOML/JSON configs deserialize against those defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Application-chosen identifier, also the collection key.
    pub id: String,
    /// SCORM interaction type.
    #[serde(default = "default_kind", rename = "type")]
    pub kind: InteractionType,
    /// Ids of objectives this interaction informs. Purely informational
    /// references; nothing checks they exist.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Ordered correct-response patterns. The pattern grammar depends on
    /// the interaction type (see the SCORM 1.2 data model).
    #[serde(default)]
    pub correct_responses: Vec<String>,
    /// Relative weight of this interaction; higher weighs heavier.
    #[serde(default = "default_weighting")]
    pub weighting: f64,
}

impl InteractionConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: default_kind(),
            objectives: Vec::new(),
            correct_responses: Vec::new(),
            weighting: default_weighting(),
        }
    }
}

/// Local mirror of one `cmi.interactions.N.*` record, including its
/// timing fields.
pub struct Interaction {
    index: u32,
    config: InteractionConfig,
    student_response: Option<String>,
    result: Option<InteractionResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    gateway: Rc<LmsGateway>,
}

impl Interaction {
    /// Build the interaction and push its full initial state (id, type,
    /// weighting, objective references, correct-response patterns) to
    /// the LMS as one batched round trip.
    fn create(gateway: Rc<LmsGateway>, index: u32, config: InteractionConfig) -> Self {
        gateway.set_deferred(&datamodel::interaction(index, "id"), &config.id);
        gateway.set_deferred(
            &datamodel::interaction(index, "type"),
            &config.kind.to_string(),
        );
        gateway.set_deferred(
            &datamodel::interaction(index, "weighting"),
            &config.weighting.to_string(),
        );
        for (m, objective_id) in config.objectives.iter().enumerate() {
            gateway.set_deferred(
                &datamodel::interaction_objective(index, m as u32),
                objective_id,
            );
        }
        for (m, pattern) in config.correct_responses.iter().enumerate() {
            gateway.set_deferred(&datamodel::interaction_pattern(index, m as u32), pattern);
        }
        gateway.flush();

        Self {
            index,
            config,
            student_response: None,
            result: None,
            started_at: None,
            finished_at: None,
            gateway,
        }
    }

    /// Position of this interaction in the LMS interaction array.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn student_response(&self) -> Option<&str> {
        self.student_response.as_deref()
    }

    pub fn result(&self) -> Option<InteractionResult> {
        self.result
    }

    /// Elapsed time between start and finish, once both are recorded.
    pub fn latency(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(finish)) => Some(finish - start),
            _ => None,
        }
    }

    /// Record the instant the stimulus was presented. Local only;
    /// nothing is written until [`Interaction::finish`].
    pub fn start(&mut self) {
        self.started_at = Some(Utc::now());
        debug!(id = %self.config.id, "interaction started");
    }

    /// Record the completion instant and write the `time` and `latency`
    /// fields. A finish without a prior start reports a zero latency.
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.finished_at = Some(now);
        let latency = self
            .started_at
            .map(|start| now - start)
            .unwrap_or_else(Duration::zero);
        self.write_timing(now, latency);
    }

    fn write_timing(&self, finished: DateTime<Utc>, latency: Duration) {
        self.gateway.set_deferred(
            &datamodel::interaction(self.index, "time"),
            &format_time(finished.time()),
        );
        self.gateway.set_deferred(
            &datamodel::interaction(self.index, "latency"),
            &format_timespan(latency),
        );
        self.gateway.flush();
    }

    /// Record what the student answered, writing through immediately.
    pub fn record_response(&mut self, response: &str) {
        self.student_response = Some(response.to_string());
        self.gateway.set(
            &datamodel::interaction(self.index, "student_response"),
            response,
        );
    }

    /// Record how the answer was judged, writing through immediately.
    pub fn record_result(&mut self, result: InteractionResult) {
        self.result = Some(result);
        self.gateway.set(
            &datamodel::interaction(self.index, "result"),
            &result.to_string(),
        );
    }
}

/// All interactions recorded this session, keyed by config id, plus the
/// default configuration new interactions start from.
pub struct TrackedInteractions {
    interactions: HashMap<String, Interaction>,
    defaults: InteractionConfig,
    gateway: Rc<LmsGateway>,
}

impl TrackedInteractions {
    pub fn new(gateway: Rc<LmsGateway>) -> Self {
        Self::with_defaults(gateway, InteractionConfig::default())
    }

    /// Use `defaults` as the template handed out by
    /// [`TrackedInteractions::default_config`].
    pub fn with_defaults(gateway: Rc<LmsGateway>, defaults: InteractionConfig) -> Self {
        Self {
            interactions: HashMap::new(),
            defaults,
            gateway,
        }
    }

    /// A copy of the default configuration for the caller to adjust
    /// before [`TrackedInteractions::add_interaction`].
    pub fn default_config(&self) -> InteractionConfig {
        self.defaults.clone()
    }

    /// Record a new interaction. Its index is the LMS's current
    /// interaction count (0 when unreadable); a duplicate config id
    /// silently replaces the map entry.
    pub fn add_interaction(&mut self, config: InteractionConfig) -> &mut Interaction {
        let index = self.gateway.get_u32(datamodel::INTERACTION_COUNT, 0);
        let key = config.id.clone();
        let interaction = Interaction::create(Rc::clone(&self.gateway), index, config);
        self.interactions.insert(key.clone(), interaction);
        self.interactions
            .get_mut(&key)
            .expect("interaction inserted above")
    }

    pub fn interaction(&self, id: &str) -> Option<&Interaction> {
        self.interactions.get(id)
    }

    pub fn interaction_mut(&mut self, id: &str) -> Option<&mut Interaction> {
        self.interactions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}
