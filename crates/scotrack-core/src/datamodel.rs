//! `cmi.*` path construction for the SCORM 1.2 run-time data model.
//!
//! Everything the gateway reads or writes is addressed by one of these
//! dot paths. Indexed records (objectives, interactions) get their paths
//! from the builder functions.

/// `cmi.core.lesson_status`
pub const LESSON_STATUS: &str = "cmi.core.lesson_status";
/// `cmi.core.lesson_location` — the bookmark field.
pub const LESSON_LOCATION: &str = "cmi.core.lesson_location";
/// `cmi.core.exit`
pub const EXIT: &str = "cmi.core.exit";
/// `cmi.core.score.raw` — the overall SCO score.
pub const SCORE_RAW: &str = "cmi.core.score.raw";
/// `cmi.core.score.min`
pub const SCORE_MIN: &str = "cmi.core.score.min";
/// `cmi.core.score.max`
pub const SCORE_MAX: &str = "cmi.core.score.max";
/// `cmi.suspend_data` — opaque cross-session bookmark string.
pub const SUSPEND_DATA: &str = "cmi.suspend_data";
/// `cmi.objectives._count`
pub const OBJECTIVE_COUNT: &str = "cmi.objectives._count";
/// `cmi.interactions._count`
pub const INTERACTION_COUNT: &str = "cmi.interactions._count";

/// Reserved delimiter packed into a stored objective id to carry its
/// group across sessions: `logical-id::group`. Real-world SCORM 1.2
/// identifiers use single colons and dots, so the double colon is safe
/// to reserve.
pub const GROUP_DELIMITER: &str = "::";

/// Group objectives land in when none is given, and the group restored
/// for stored ids with no delimiter.
pub const DEFAULT_GROUP: &str = "default";

/// Path of a field on the objective record at `index`, e.g.
/// `cmi.objectives.0.score.raw`.
pub fn objective(index: u32, field: &str) -> String {
    format!("cmi.objectives.{index}.{field}")
}

/// Path of a field on the interaction record at `index`.
pub fn interaction(index: u32, field: &str) -> String {
    format!("cmi.interactions.{index}.{field}")
}

/// Path of the `m`-th objective reference on the interaction at `index`.
pub fn interaction_objective(index: u32, m: u32) -> String {
    format!("cmi.interactions.{index}.objectives.{m}.id")
}

/// Path of the `m`-th correct-response pattern on the interaction at
/// `index`.
pub fn interaction_pattern(index: u32, m: u32) -> String {
    format!("cmi.interactions.{index}.correct_responses.{m}.pattern")
}

/// Pack a logical objective id and its group into the stored id form.
pub fn pack_objective_id(id: &str, group: &str) -> String {
    format!("{id}{GROUP_DELIMITER}{group}")
}

/// Split a stored objective id back into (logical id, group). Ids
/// written before grouping existed have no delimiter and restore into
/// [`DEFAULT_GROUP`].
pub fn unpack_objective_id(stored: &str) -> (String, String) {
    match stored.split_once(GROUP_DELIMITER) {
        Some((id, group)) => (id.to_string(), group.to_string()),
        None => (stored.to_string(), DEFAULT_GROUP.to_string()),
    }
}
