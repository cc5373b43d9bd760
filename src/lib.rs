#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

pub mod catalog;
pub mod cms;
pub mod config;
pub mod models;
pub mod routes;
pub mod sheets;
pub mod state;

use state::AppState;

/// The site without deployment concerns (CORS, static assets), so tests can
/// drive it directly.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes::routes())
        .register("/", catchers![routes::not_found])
}
