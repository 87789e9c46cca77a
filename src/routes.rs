use crate::api::{listing, registration};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(listing::list_employees)))
        .service(web::resource("/registro").route(web::post().to(registration::register_attendance)));
}
