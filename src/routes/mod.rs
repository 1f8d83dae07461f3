// Route exports
pub mod areas;

use actix_web::web;

pub use areas::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(areas::configure),
    );
}
