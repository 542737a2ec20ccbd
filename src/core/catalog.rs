use crate::models::{Goal, SlotCodeError, TimeSlot, Tutor, TutorRecord, Weekday};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading the goal and tutor sources
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed {kind} source: {source}")]
    Malformed {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("Tutor id is not an unsigned integer: {0}")]
    InvalidTutorId(String),

    #[error("Tutor {tutor_id} references unknown goal: {goal}")]
    DanglingGoal { tutor_id: u32, goal: String },

    #[error("Tutor id is not unique: {0}")]
    DuplicateTutorId(u32),

    #[error("Tutor name is not unique: {0}")]
    DuplicateTutorName(String),

    #[error("Tutor {tutor_id} has malformed availability: {source}")]
    InvalidAvailability {
        tutor_id: u32,
        source: SlotCodeError,
    },
}

/// Lookup failures surfaced to callers as "not found"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown tutor: {0}")]
    UnknownTutor(u32),
}

/// Immutable goal and tutor catalog
///
/// Built once at startup and shared read-only with every handler. Goals and
/// tutors keep the order in which they appear in their source files.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    goals: Vec<Arc<Goal>>,
    goal_index: HashMap<String, usize>,
    tutors: Vec<Arc<Tutor>>,
    tutor_index: HashMap<u32, usize>,
}

impl Catalog {
    /// Load the catalog from the goal and tutor JSON files
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        goals_path: P,
        tutors_path: Q,
    ) -> Result<Self, CatalogLoadError> {
        let goals_json = read_source(goals_path.as_ref())?;
        let tutors_json = read_source(tutors_path.as_ref())?;

        let catalog = Self::from_json(&goals_json, &tutors_json)?;

        tracing::info!(
            "Loaded catalog: {} goals from {}, {} tutors from {}",
            catalog.goals.len(),
            goals_path.as_ref().display(),
            catalog.tutors.len(),
            tutors_path.as_ref().display()
        );

        Ok(catalog)
    }

    /// Build the catalog from in-memory JSON sources
    ///
    /// The goal source maps goal codes to display names. The tutor source
    /// maps tutor ids to [`TutorRecord`]s. Either the whole catalog loads or
    /// an error is returned.
    pub fn from_json(goals_json: &str, tutors_json: &str) -> Result<Self, CatalogLoadError> {
        let goal_source: Map<String, Value> = serde_json::from_str(goals_json)
            .map_err(|source| CatalogLoadError::Malformed { kind: "goal", source })?;
        let tutor_source: Map<String, Value> = serde_json::from_str(tutors_json)
            .map_err(|source| CatalogLoadError::Malformed { kind: "tutor", source })?;

        let mut catalog = Catalog::default();

        for (position, (code, value)) in goal_source.into_iter().enumerate() {
            let name_ru: String = serde_json::from_value(value)
                .map_err(|source| CatalogLoadError::Malformed { kind: "goal", source })?;

            catalog.goal_index.insert(code.clone(), catalog.goals.len());
            catalog.goals.push(Arc::new(Goal {
                id: position as u32 + 1,
                name_en: code,
                name_ru,
            }));
        }

        let mut names = HashSet::new();

        for (key, value) in tutor_source {
            let id: u32 = key
                .parse()
                .map_err(|_| CatalogLoadError::InvalidTutorId(key.clone()))?;
            // "1" and "01" parse to the same id
            if catalog.tutor_index.contains_key(&id) {
                return Err(CatalogLoadError::DuplicateTutorId(id));
            }
            let record: TutorRecord = serde_json::from_value(value)
                .map_err(|source| CatalogLoadError::Malformed { kind: "tutor", source })?;

            if !names.insert(record.name.clone()) {
                return Err(CatalogLoadError::DuplicateTutorName(record.name));
            }

            let tutor = catalog.resolve_tutor(id, record)?;
            catalog.tutor_index.insert(id, catalog.tutors.len());
            catalog.tutors.push(Arc::new(tutor));
        }

        Ok(catalog)
    }

    fn resolve_tutor(&self, id: u32, record: TutorRecord) -> Result<Tutor, CatalogLoadError> {
        let goals = record
            .goals
            .iter()
            .map(|code| {
                self.goal(code).cloned().ok_or_else(|| CatalogLoadError::DanglingGoal {
                    tutor_id: id,
                    goal: code.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut free = BTreeMap::new();
        for (day_code, time_codes) in &record.free {
            let day: Weekday = day_code
                .parse()
                .map_err(|source| CatalogLoadError::InvalidAvailability { tutor_id: id, source })?;
            let slots = time_codes
                .iter()
                .map(|code| code.parse::<TimeSlot>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| CatalogLoadError::InvalidAvailability { tutor_id: id, source })?;
            free.insert(day, slots);
        }

        Ok(Tutor {
            id,
            name: record.name,
            about: record.about,
            rating: record.rating,
            price: record.price,
            goals,
            free,
        })
    }

    pub fn goals(&self) -> &[Arc<Goal>] {
        &self.goals
    }

    pub fn tutors(&self) -> &[Arc<Tutor>] {
        &self.tutors
    }

    pub fn goal(&self, code: &str) -> Option<&Arc<Goal>> {
        self.goal_index.get(code).map(|&index| &self.goals[index])
    }

    pub fn tutor(&self, id: u32) -> Option<&Arc<Tutor>> {
        self.tutor_index.get(&id).map(|&index| &self.tutors[index])
    }

    pub fn require_goal(&self, code: &str) -> Result<&Arc<Goal>, LookupError> {
        self.goal(code)
            .ok_or_else(|| LookupError::UnknownGoal(code.to_string()))
    }

    pub fn require_tutor(&self, id: u32) -> Result<&Arc<Tutor>, LookupError> {
        self.tutor(id).ok_or(LookupError::UnknownTutor(id))
    }

    /// Rebuild the source record of a tutor
    pub fn tutor_record(&self, id: u32) -> Option<TutorRecord> {
        self.tutor(id).map(|tutor| tutor.to_record())
    }
}

fn read_source(path: &Path) -> Result<String, CatalogLoadError> {
    std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOALS: &str = r#"{"travel": "Для путешествий", "work": "Для работы"}"#;

    #[test]
    fn test_load_resolves_goals() {
        let tutors = r#"{
            "7": {"name": "Anna", "about": "", "rating": 4.5, "price": 900,
                  "goals": ["work", "travel"], "free": {"mon": ["8"]}}
        }"#;

        let catalog = Catalog::from_json(GOALS, tutors).unwrap();

        assert_eq!(catalog.goals().len(), 2);
        assert_eq!(catalog.goal("travel").unwrap().id, 1);
        assert_eq!(catalog.goal("work").unwrap().id, 2);

        let tutor = catalog.tutor(7).unwrap();
        let goal_codes: Vec<&str> = tutor.goals.iter().map(|g| g.name_en.as_str()).collect();
        assert_eq!(goal_codes, vec!["work", "travel"]);
        assert!(tutor.is_free(Weekday::Mon, "8".parse().unwrap()));
    }

    #[test]
    fn test_goal_order_follows_source() {
        let goals = r#"{"work": "Для работы", "relocate": "Для переезда", "study": "Для учебы"}"#;
        let catalog = Catalog::from_json(goals, "{}").unwrap();

        let codes: Vec<&str> = catalog.goals().iter().map(|g| g.name_en.as_str()).collect();
        assert_eq!(codes, vec!["work", "relocate", "study"]);
    }

    #[test]
    fn test_dangling_goal_rejected() {
        let tutors = r#"{"1": {"name": "Anna", "about": "", "rating": 4.5, "price": 900,
                              "goals": ["cooking"], "free": {}}}"#;

        let err = Catalog::from_json(GOALS, tutors).unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::DanglingGoal { tutor_id: 1, ref goal } if goal == "cooking"
        ));
    }

    #[test]
    fn test_non_numeric_tutor_id_rejected() {
        let tutors = r#"{"t1": {"name": "Anna", "about": "", "rating": 4.5, "price": 900,
                               "goals": [], "free": {}}}"#;

        let err = Catalog::from_json(GOALS, tutors).unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidTutorId(ref key) if key == "t1"));
    }

    #[test]
    fn test_duplicate_tutor_name_rejected() {
        let tutors = r#"{
            "1": {"name": "Anna", "about": "", "rating": 4.5, "price": 900, "goals": [], "free": {}},
            "2": {"name": "Anna", "about": "", "rating": 4.0, "price": 800, "goals": [], "free": {}}
        }"#;

        let err = Catalog::from_json(GOALS, tutors).unwrap_err();
        assert!(matches!(err, CatalogLoadError::DuplicateTutorName(_)));
    }

    #[test]
    fn test_duplicate_tutor_id_rejected() {
        let tutors = r#"{
            "1": {"name": "Anna", "about": "", "rating": 4.5, "price": 900, "goals": [], "free": {}},
            "01": {"name": "Boris", "about": "", "rating": 4.0, "price": 800, "goals": [], "free": {}}
        }"#;

        let err = Catalog::from_json(GOALS, tutors).unwrap_err();
        assert!(matches!(err, CatalogLoadError::DuplicateTutorId(1)));
    }

    #[test]
    fn test_unknown_availability_code_rejected() {
        let tutors = r#"{"1": {"name": "Anna", "about": "", "rating": 4.5, "price": 900,
                              "goals": [], "free": {"mon": ["9"]}}}"#;

        let err = Catalog::from_json(GOALS, tutors).unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidAvailability { tutor_id: 1, .. }));
    }

    #[test]
    fn test_malformed_sources_rejected() {
        assert!(matches!(
            Catalog::from_json("[1, 2]", "{}"),
            Err(CatalogLoadError::Malformed { kind: "goal", .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"travel": 5}"#, "{}"),
            Err(CatalogLoadError::Malformed { kind: "goal", .. })
        ));
        assert!(matches!(
            Catalog::from_json(GOALS, r#"{"1": {"name": "Anna"}}"#),
            Err(CatalogLoadError::Malformed { kind: "tutor", .. })
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = Catalog::load("/nonexistent/goals.json", "/nonexistent/teachers.json").unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[test]
    fn test_require_lookups() {
        let catalog = Catalog::from_json(GOALS, "{}").unwrap();
        assert_eq!(
            catalog.require_goal("cooking").unwrap_err(),
            LookupError::UnknownGoal("cooking".to_string())
        );
        assert_eq!(catalog.require_tutor(3).unwrap_err(), LookupError::UnknownTutor(3));
    }
}
