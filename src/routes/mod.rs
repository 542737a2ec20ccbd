// Route exports
pub mod booking;
pub mod error;
pub mod pages;

use actix_web::web;
use crate::core::{Catalog, DraftStore};
use crate::models::NavLink;
use crate::services::PostgresClient;
use std::sync::Arc;

pub use error::{ApiError, handle_path_error, handle_query_payload_error};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub drafts: Arc<DraftStore>,
    pub ledger: Option<Arc<PostgresClient>>,
    pub sample_size: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::configure)
        .configure(booking::configure);
}

/// Header links shown on every page
pub fn nav_links() -> Vec<NavLink> {
    vec![
        NavLink {
            title: "Все репетиторы".to_string(),
            link: "/".to_string(),
        },
        NavLink {
            title: "Заявка на подбор".to_string(),
            link: "/request".to_string(),
        },
    ]
}
