// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod vocabulary;

pub use domain::{Goal, Tutor, TutorRecord, BookingDraft, Booking};
pub use requests::{ContactQuery, MatchRequestQuery};
pub use responses::{
    NavLink, GoalView, TutorCard, TutorRef, IndexPage, GoalPage, SlotView, DaySchedule, ProfilePage,
    Choice, RequestFormPage, RequestSentPage, BookingPage, MessagePage, SentPage, HealthResponse,
    ErrorResponse,
};
pub use vocabulary::{Weekday, TimeSlot, SlotCodeError, WEEKLY_HOURS};
