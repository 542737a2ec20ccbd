use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{random_sample, tutors_for_goal};
use crate::models::vocabulary::weekly_hours_label;
use crate::models::{
    Choice, DaySchedule, GoalPage, GoalView, IndexPage, MatchRequestQuery, ProfilePage,
    RequestFormPage, RequestSentPage, SlotView, TimeSlot, Tutor, TutorCard, Weekday, WEEKLY_HOURS,
};
use super::{nav_links, ApiError, AppState};

/// Configure catalog browsing and guided-matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/goals/{goal}/", web::get().to(goal_listing))
        .route("/profiles/{id}/", web::get().to(profile))
        .route("/request", web::get().to(request_form))
        .route("/request/sent/", web::get().to(request_sent));
}

/// Landing page: every goal plus a random handful of tutors
///
/// GET /
async fn index(state: web::Data<AppState>) -> HttpResponse {
    let catalog = &state.catalog;

    let tutors = random_sample(catalog.tutors(), state.sample_size)
        .iter()
        .map(|tutor| TutorCard::from(tutor.as_ref()))
        .collect();

    HttpResponse::Ok().json(IndexPage {
        links: nav_links(),
        goals: catalog.goals().iter().map(|goal| GoalView::from(goal.as_ref())).collect(),
        tutors,
    })
}

/// Tutors offering a goal, best rated first
///
/// GET /goals/{goal}/
async fn goal_listing(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let code = path.into_inner();
    let goal = state.catalog.require_goal(&code)?;
    let tutors = tutors_for_goal(&state.catalog, &code)?;

    tracing::debug!("Goal {} offered by {} tutors", code, tutors.len());

    Ok(HttpResponse::Ok().json(GoalPage {
        links: nav_links(),
        goal: goal.name_en.clone(),
        goal_ru: goal.name_ru.to_lowercase(),
        tutors: tutors.iter().map(|tutor| TutorCard::from(tutor.as_ref())).collect(),
    }))
}

/// Tutor details and the weekly availability grid
///
/// GET /profiles/{id}/
async fn profile(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let tutor = state.catalog.require_tutor(path.into_inner())?;

    Ok(HttpResponse::Ok().json(ProfilePage {
        links: nav_links(),
        tutor: TutorCard::from(tutor.as_ref()),
        goals: tutor.goals.iter().map(|goal| goal.name_ru.clone()).collect(),
        schedule: schedule(tutor),
    }))
}

/// One row per weekday, one cell per bookable hour
pub fn schedule(tutor: &Tutor) -> Vec<DaySchedule> {
    Weekday::ALL
        .into_iter()
        .map(|day| DaySchedule {
            day,
            label: day.label().to_string(),
            slots: TimeSlot::ALL
                .into_iter()
                .map(|time| SlotView {
                    time,
                    label: time.label(),
                    free: tutor.is_free(day, time),
                })
                .collect(),
        })
        .collect()
}

/// Guided-matching request form
///
/// GET /request
async fn request_form(state: web::Data<AppState>) -> HttpResponse {
    let goals = state
        .catalog
        .goals()
        .iter()
        .map(|goal| Choice {
            value: goal.name_en.clone(),
            label: goal.name_ru.clone(),
        })
        .collect();

    let durations = WEEKLY_HOURS
        .iter()
        .map(|(value, label)| Choice {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();

    HttpResponse::Ok().json(RequestFormPage {
        links: nav_links(),
        goals,
        durations,
    })
}

/// Accept a guided-matching request
///
/// GET /request/sent/?goal=...&duration=...&name=...&phone=...
async fn request_sent(
    state: web::Data<AppState>,
    query: web::Query<MatchRequestQuery>,
) -> Result<HttpResponse, ApiError> {
    let request = query.into_inner();

    if let Err(errors) = request.validate() {
        return Err(ApiError::InvalidInput(errors.to_string()));
    }

    let goal = state
        .catalog
        .goal(&request.goal)
        .ok_or_else(|| ApiError::InvalidInput(format!("Unknown goal choice: {}", request.goal)))?;

    let duration = weekly_hours_label(&request.duration)
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidInput(format!("Unknown duration choice: {}", request.duration)))?;

    tracing::info!("Matching request received for goal {} ({})", goal.name_en, request.duration);

    Ok(HttpResponse::Ok().json(RequestSentPage {
        links: nav_links(),
        goal: goal.name_ru.clone(),
        duration,
        name: request.name,
        phone: request.phone,
    }))
}
