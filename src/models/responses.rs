use serde::{Deserialize, Serialize};
use crate::models::domain::{Goal, Tutor};
use crate::models::vocabulary::{TimeSlot, Weekday};

/// Navigation entry shown in every page header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub link: String,
}

/// Goal as listed on the landing page and request form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    pub name_en: String,
    pub name_ru: String,
}

impl From<&Goal> for GoalView {
    fn from(goal: &Goal) -> Self {
        Self {
            name_en: goal.name_en.clone(),
            name_ru: goal.name_ru.clone(),
        }
    }
}

/// Tutor summary used in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorCard {
    pub id: u32,
    pub name: String,
    pub rating: f64,
    pub price: f64,
    pub about: String,
}

impl From<&Tutor> for TutorCard {
    fn from(tutor: &Tutor) -> Self {
        Self {
            id: tutor.id,
            name: tutor.name.clone(),
            rating: tutor.rating,
            price: tutor.price,
            about: tutor.about.clone(),
        }
    }
}

/// Minimal tutor reference for the booking and message forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorRef {
    pub id: u32,
    pub name: String,
}

impl From<&Tutor> for TutorRef {
    fn from(tutor: &Tutor) -> Self {
        Self {
            id: tutor.id,
            name: tutor.name.clone(),
        }
    }
}

/// GET /
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPage {
    pub links: Vec<NavLink>,
    pub goals: Vec<GoalView>,
    pub tutors: Vec<TutorCard>,
}

/// GET /goals/{goal}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPage {
    pub links: Vec<NavLink>,
    pub goal: String,
    pub goal_ru: String,
    pub tutors: Vec<TutorCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub time: TimeSlot,
    pub label: String,
    pub free: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub label: String,
    pub slots: Vec<SlotView>,
}

/// GET /profiles/{id}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePage {
    pub links: Vec<NavLink>,
    pub tutor: TutorCard,
    pub goals: Vec<String>,
    pub schedule: Vec<DaySchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// GET /request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFormPage {
    pub links: Vec<NavLink>,
    pub goals: Vec<Choice>,
    pub durations: Vec<Choice>,
}

/// GET /request/sent/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSentPage {
    pub links: Vec<NavLink>,
    pub goal: String,
    pub duration: String,
    pub name: String,
    pub phone: String,
}

/// GET /booking/{id}/{day}/{time}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPage {
    pub links: Vec<NavLink>,
    pub tutor: TutorRef,
    pub day: Weekday,
    pub day_ru: String,
    pub time: TimeSlot,
    pub time_label: String,
}

/// GET /message/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    pub links: Vec<NavLink>,
    pub tutor: TutorRef,
}

/// GET /sent/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentPage {
    pub links: Vec<NavLink>,
    pub booking_id: uuid::Uuid,
    pub name: String,
    pub phone: String,
    pub day: String,
    pub time: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub goals: usize,
    pub tutors: usize,
    pub ledger: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
