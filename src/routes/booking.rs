use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Booking, BookingPage, ContactQuery, HealthResponse, MessagePage, SentPage, TutorRef};
use super::{nav_links, ApiError, AppState};

/// Configure booking and contact routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/booking/{id}/{day}/{time}", web::get().to(booking))
        .route("/message/{id}", web::get().to(message))
        .route("/sent/", web::get().to(sent))
        .route("/health", web::get().to(health_check));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let ledger = match &state.ledger {
        None => "disabled",
        Some(postgres) => match postgres.health_check().await {
            Ok(true) => "healthy",
            Ok(false) => "unavailable",
            Err(e) => {
                tracing::warn!("Ledger health check failed: {}", e);
                "unavailable"
            }
        },
    };

    let status = if ledger == "unavailable" { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        goals: state.catalog.goals().len(),
        tutors: state.catalog.tutors().len(),
        ledger: ledger.to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Select a slot and show the contact form
///
/// GET /booking/{id}/{day}/{time}
///
/// Replaces the booking draft with this slot. The tutor must exist; the
/// draft itself does not remember which tutor was chosen.
async fn booking(
    state: web::Data<AppState>,
    path: web::Path<(u32, String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (id, day, time) = path.into_inner();
    let tutor = state.catalog.require_tutor(id)?;

    let draft = state.drafts.select_slot(tutor.id, &day, &time).await?;

    if !tutor.is_free(draft.day, draft.time) {
        tracing::debug!("Tutor {} is not listed as free on {} at {}", tutor.id, draft.day, draft.time);
    }

    Ok(HttpResponse::Ok().json(BookingPage {
        links: nav_links(),
        tutor: TutorRef::from(tutor.as_ref()),
        day: draft.day,
        day_ru: draft.day.label().to_string(),
        time: draft.time,
        time_label: draft.time.label(),
    }))
}

/// Free-form message form
///
/// GET /message/{id}
async fn message(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let tutor = state.catalog.require_tutor(path.into_inner())?;

    Ok(HttpResponse::Ok().json(MessagePage {
        links: nav_links(),
        tutor: TutorRef::from(tutor.as_ref()),
    }))
}

/// Attach contact details to the draft and confirm the booking
///
/// GET /sent/?name=...&phone=...
async fn sent(
    state: web::Data<AppState>,
    query: web::Query<ContactQuery>,
) -> Result<HttpResponse, ApiError> {
    let contact = query.into_inner();

    if let Err(errors) = contact.validate() {
        tracing::info!("Contact validation failed: {:?}", errors);
        return Err(ApiError::InvalidInput(errors.to_string()));
    }

    let draft = state.drafts.attach_contact(&contact.name, &contact.phone).await?;
    let booking = Booking::new(draft.day, draft.time, contact.name, contact.phone);

    // The draft is the primary record; the ledger is best-effort
    if let Some(postgres) = &state.ledger {
        if let Err(e) = postgres.record_booking(&booking).await {
            tracing::warn!("Booking {} confirmed but not recorded in PostgreSQL: {}", booking.id, e);
        }
    }

    tracing::info!("Booking {} confirmed for {} at {}", booking.id, booking.day, booking.time);

    Ok(HttpResponse::Ok().json(SentPage {
        links: nav_links(),
        booking_id: booking.id,
        day: booking.day.label().to_string(),
        time: booking.time.label(),
        name: booking.name,
        phone: booking.phone,
    }))
}
