use crate::models::vocabulary::{TimeSlot, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Learning goal tutors can be filtered by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: u32,
    /// Goal code, unique across the catalog
    pub name_en: String,
    pub name_ru: String,
}

/// Tutor as it appears in the tutor source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorRecord {
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub price: f64,
    pub goals: Vec<String>,
    #[serde(default)]
    pub free: BTreeMap<String, Vec<String>>,
}

/// Bookable tutor with goal references resolved against the catalog
#[derive(Debug, Clone)]
pub struct Tutor {
    pub id: u32,
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub price: f64,
    pub goals: Vec<Arc<Goal>>,
    pub free: BTreeMap<Weekday, Vec<TimeSlot>>,
}

impl Tutor {
    pub fn offers(&self, goal_code: &str) -> bool {
        self.goals.iter().any(|goal| goal.name_en == goal_code)
    }

    pub fn is_free(&self, day: Weekday, time: TimeSlot) -> bool {
        self.free
            .get(&day)
            .map(|slots| slots.contains(&time))
            .unwrap_or(false)
    }

    /// Rebuild the source record this tutor was loaded from
    pub fn to_record(&self) -> TutorRecord {
        TutorRecord {
            name: self.name.clone(),
            about: self.about.clone(),
            rating: self.rating,
            price: self.price,
            goals: self.goals.iter().map(|goal| goal.name_en.clone()).collect(),
            free: self
                .free
                .iter()
                .map(|(day, slots)| {
                    (
                        day.code().to_string(),
                        slots.iter().map(|slot| slot.code()).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// The single in-flight booking record
///
/// Holds the slot chosen on the booking page and, once the contact form is
/// submitted, the visitor's name and phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub day: Weekday,
    pub time: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl BookingDraft {
    pub fn new(day: Weekday, time: TimeSlot) -> Self {
        Self {
            day,
            time,
            name: None,
            phone: None,
        }
    }

    pub fn is_contacted(&self) -> bool {
        self.name.is_some() && self.phone.is_some()
    }
}

/// Completed booking appended to the ledger
///
/// The draft does not carry a tutor, so a ledger row cannot say which tutor
/// the booking was for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: uuid::Uuid,
    pub day: Weekday,
    pub time: TimeSlot,
    pub name: String,
    pub phone: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Booking {
    pub fn new(day: Weekday, time: TimeSlot, name: String, phone: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            day,
            time,
            name,
            phone,
            created_at: chrono::Utc::now(),
        }
    }

    /// Build a booking from a draft that already carries contact details
    pub fn from_draft(draft: &BookingDraft) -> Option<Self> {
        match (&draft.name, &draft.phone) {
            (Some(name), Some(phone)) => Some(Self::new(draft.day, draft.time, name.clone(), phone.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(code: &str) -> TimeSlot {
        code.parse().unwrap()
    }

    fn create_tutor() -> Tutor {
        let travel = Arc::new(Goal {
            id: 1,
            name_en: "travel".to_string(),
            name_ru: "Для путешествий".to_string(),
        });

        let mut free = BTreeMap::new();
        free.insert(Weekday::Mon, vec![slot("8"), slot("12")]);
        free.insert(Weekday::Fri, vec![]);

        Tutor {
            id: 0,
            name: "Морган Фриман".to_string(),
            about: "Опыт 10 лет".to_string(),
            rating: 4.8,
            price: 1200.0,
            goals: vec![travel],
            free,
        }
    }

    #[test]
    fn test_tutor_offers_goal() {
        let tutor = create_tutor();
        assert!(tutor.offers("travel"));
        assert!(!tutor.offers("work"));
    }

    #[test]
    fn test_tutor_is_free() {
        let tutor = create_tutor();
        assert!(tutor.is_free(Weekday::Mon, slot("8")));
        assert!(!tutor.is_free(Weekday::Mon, slot("10")));
        assert!(!tutor.is_free(Weekday::Fri, slot("8")));
        assert!(!tutor.is_free(Weekday::Sun, slot("8")));
    }

    #[test]
    fn test_to_record_uses_codes() {
        let record = create_tutor().to_record();
        assert_eq!(record.goals, vec!["travel"]);
        assert_eq!(record.free["mon"], vec!["8", "12"]);
        assert!(record.free["fri"].is_empty());
    }

    #[test]
    fn test_draft_serialization_omits_missing_contact() {
        let draft = BookingDraft::new(Weekday::Mon, slot("8"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"day": "mon", "time": "8"}));

        let restored: BookingDraft = serde_json::from_value(json).unwrap();
        assert_eq!(restored, draft);
        assert!(!restored.is_contacted());
    }

    #[test]
    fn test_booking_requires_contact() {
        let mut draft = BookingDraft::new(Weekday::Tue, slot("10"));
        assert!(Booking::from_draft(&draft).is_none());

        draft.name = Some("Anna".to_string());
        draft.phone = Some("555-0100".to_string());

        let booking = Booking::from_draft(&draft).unwrap();
        assert_eq!(booking.day, Weekday::Tue);
        assert_eq!(booking.name, "Anna");
        assert_eq!(booking.phone, "555-0100");
    }
}
