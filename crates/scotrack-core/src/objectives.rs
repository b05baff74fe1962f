//! Objective tracking: local mirrors of `cmi.objectives.N.*` records.
//!
//! An [`Objective`] keeps a local copy of everything it sends to the
//! LMS, so fields the LMS treats as write-only stay readable. Reads are
//! an explicit two-method contract: the plain getter returns the cached
//! value, the `refresh_*` variant forces a gateway read — staleness is
//! the caller's choice, never an accident.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::datamodel::{self, DEFAULT_GROUP};
use crate::gateway::LmsGateway;
use crate::model::{LessonStatus, Score};

/// Local mirror of one `cmi.objectives.N.*` record.
///
/// The index is fixed at creation; everything else writes through to the
/// LMS as it changes. Instances come from [`TrackedObjectives`], either
/// new or rehydrated from a previous session.
pub struct Objective {
    index: u32,
    id: String,
    group: String,
    status: LessonStatus,
    score: Score,
    gateway: Rc<LmsGateway>,
}

impl Objective {
    /// Build a fresh objective and queue its initial record to the LMS.
    /// The writes stay pending until the owning collection finalizes, so
    /// several additions batch into one round trip.
    fn create(gateway: Rc<LmsGateway>, index: u32, id: &str, group: &str, max_score: f64) -> Self {
        let objective = Self {
            index,
            id: id.to_string(),
            group: group.to_string(),
            status: LessonStatus::NotAttempted,
            score: Score::new(0.0, 0.0, max_score),
            gateway,
        };
        objective.gateway.set_deferred(
            &datamodel::objective(index, "id"),
            &datamodel::pack_objective_id(id, group),
        );
        objective.gateway.set_deferred(
            &datamodel::objective(index, "status"),
            &objective.status.to_string(),
        );
        objective.gateway.set_deferred(
            &datamodel::objective(index, "score.min"),
            &objective.score.min.to_string(),
        );
        objective.gateway.set_deferred(
            &datamodel::objective(index, "score.max"),
            &objective.score.max.to_string(),
        );
        objective
    }

    /// Rehydrate an objective from values already on the LMS. Writes
    /// nothing back.
    fn restore(
        gateway: Rc<LmsGateway>,
        index: u32,
        id: String,
        group: String,
        status: LessonStatus,
        score: Score,
    ) -> Self {
        Self {
            index,
            id,
            group,
            status,
            score,
            gateway,
        }
    }

    /// Position of this objective in the LMS objective array.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Cached logical id (the stored id minus the group suffix).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Group this objective was created in.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Cached status. May lag the LMS if something else wrote the
    /// record; use [`Objective::refresh_status`] to resynchronize.
    pub fn status(&self) -> LessonStatus {
        self.status
    }

    /// Cached raw score. Deliberately has no refresh variant:
    /// `score.raw` is write-only on most LMS implementations, so the
    /// local copy is authoritative.
    pub fn score(&self) -> f64 {
        self.score.raw
    }

    pub fn min_score(&self) -> f64 {
        self.score.min
    }

    pub fn max_score(&self) -> f64 {
        self.score.max
    }

    /// Re-read the status from the LMS and update the cache. A failed or
    /// unparseable read leaves the cache untouched.
    pub fn refresh_status(&mut self) -> LessonStatus {
        if let Some(status) = self
            .gateway
            .get(&datamodel::objective(self.index, "status"))
            .and_then(|v| v.parse().ok())
        {
            self.status = status;
        }
        self.status
    }

    /// Re-read the stored id from the LMS, unpacking the group suffix
    /// into the id and group caches. A failed read leaves both alone.
    pub fn refresh_id(&mut self) -> &str {
        if let Some(stored) = self.gateway.get(&datamodel::objective(self.index, "id")) {
            let (id, group) = datamodel::unpack_objective_id(&stored);
            self.id = id;
            self.group = group;
        }
        &self.id
    }

    /// Mark this objective completed, writing through immediately.
    /// Calling it again re-issues the identical write; that is legal.
    pub fn complete(&mut self) {
        self.set_status(LessonStatus::Completed);
    }

    /// Report a status, writing through immediately.
    pub fn set_status(&mut self, status: LessonStatus) {
        self.status = status;
        self.gateway.set(
            &datamodel::objective(self.index, "status"),
            &status.to_string(),
        );
    }

    /// Rename the objective, writing the packed id through immediately.
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
        self.gateway.set(
            &datamodel::objective(self.index, "id"),
            &datamodel::pack_objective_id(&self.id, &self.group),
        );
    }

    /// Record a raw score, writing through immediately.
    pub fn set_score(&mut self, raw: f64) {
        self.score.raw = raw;
        self.gateway.set(
            &datamodel::objective(self.index, "score.raw"),
            &raw.to_string(),
        );
    }

    pub fn set_min_score(&mut self, min: f64) {
        self.score.min = min;
        self.gateway.set(
            &datamodel::objective(self.index, "score.min"),
            &min.to_string(),
        );
    }

    pub fn set_max_score(&mut self, max: f64) {
        self.score.max = max;
        self.gateway.set(
            &datamodel::objective(self.index, "score.max"),
            &max.to_string(),
        );
    }
}

/// All objectives of the current SCO, keyed by logical id.
///
/// Construction restores whatever a previous session left on the LMS.
/// Additions queue their writes; call
/// [`TrackedObjectives::finalize_objectives`] once after the last
/// addition to commit the batch in a single round trip. A duplicate id
/// silently replaces the map entry.
pub struct TrackedObjectives {
    objectives: HashMap<String, Objective>,
    gateway: Rc<LmsGateway>,
}

impl TrackedObjectives {
    /// Build the collection, rehydrating every objective the LMS already
    /// holds for this SCO.
    pub fn new(gateway: Rc<LmsGateway>) -> Self {
        let mut tracked = Self {
            objectives: HashMap::new(),
            gateway,
        };
        tracked.restore_objectives();
        tracked
    }

    /// Read back every `cmi.objectives.N` record, splitting stored ids
    /// into (logical id, group). Malformed numerics fall back to the
    /// usual defaults; this is how group membership survives reload.
    fn restore_objectives(&mut self) {
        let count = self.gateway.get_u32(datamodel::OBJECTIVE_COUNT, 0);
        debug!(count, "restoring objectives from LMS");
        for index in 0..count {
            let stored = self
                .gateway
                .get(&datamodel::objective(index, "id"))
                .unwrap_or_default();
            let (id, group) = datamodel::unpack_objective_id(&stored);
            let status = self
                .gateway
                .get(&datamodel::objective(index, "status"))
                .and_then(|v| v.parse().ok())
                .unwrap_or(LessonStatus::NotAttempted);
            let score = Score::new(
                self.gateway
                    .get_f64(&datamodel::objective(index, "score.raw"), 0.0),
                self.gateway
                    .get_f64(&datamodel::objective(index, "score.min"), 0.0),
                self.gateway
                    .get_f64(&datamodel::objective(index, "score.max"), 100.0),
            );
            let objective = Objective::restore(
                Rc::clone(&self.gateway),
                index,
                id.clone(),
                group,
                status,
                score,
            );
            self.objectives.insert(id, objective);
        }
    }

    /// Add an objective in the default group with the default max score
    /// of 100.
    pub fn add_objective(&mut self, id: &str) -> &mut Objective {
        self.add_objective_with(id, DEFAULT_GROUP, 100.0)
    }

    /// Add an objective with an explicit group and max score. Its index
    /// is the LMS's current objective count (0 when unreadable); its
    /// initial record stays queued until
    /// [`TrackedObjectives::finalize_objectives`].
    pub fn add_objective_with(&mut self, id: &str, group: &str, max_score: f64) -> &mut Objective {
        let index = self.gateway.get_u32(datamodel::OBJECTIVE_COUNT, 0);
        let objective = Objective::create(Rc::clone(&self.gateway), index, id, group, max_score);
        self.objectives.insert(id.to_string(), objective);
        self.objectives
            .get_mut(id)
            .expect("objective inserted above")
    }

    /// Commit all queued additions in one LMS round trip.
    pub fn finalize_objectives(&self) {
        self.gateway.flush();
    }

    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.get(id)
    }

    pub fn objective_mut(&mut self, id: &str) -> Option<&mut Objective> {
        self.objectives.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.values()
    }

    /// Sum of raw scores across the given group only.
    pub fn calculate_total_score(&self, group: &str) -> f64 {
        self.objectives
            .values()
            .filter(|o| o.group() == group)
            .map(Objective::score)
            .sum()
    }

    /// Whether every objective in the group reports completed, going by
    /// the cached status. Vacuously true when the group is empty.
    pub fn check_all_completed(&self, group: &str) -> bool {
        self.objectives
            .values()
            .filter(|o| o.group() == group)
            .all(|o| o.status() == LessonStatus::Completed)
    }

    /// Emergency override: set every objective in the group to its max
    /// score, mark it completed, and overwrite the overall SCO score
    /// with the group total. Not ordinary flow.
    pub fn complete_all_objectives(&mut self, group: &str) {
        let mut total = 0.0;
        for objective in self
            .objectives
            .values_mut()
            .filter(|o| o.group() == group)
        {
            let max = objective.max_score();
            objective.set_score(max);
            objective.complete();
            total += max;
        }
        self.gateway.set(datamodel::SCORE_RAW, &total.to_string());
    }
}
