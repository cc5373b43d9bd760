use rocket::response::Redirect;
use rocket::Route;
use serde::Serialize;

pub mod about;
pub mod catalog;
pub mod home;

/// Page language. Both variants share all data logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ml,
}

#[get("/health")]
fn health() -> &'static str {
    "ok"
}

// unknown pages go home
#[catch(404)]
pub fn not_found() -> Redirect {
    Redirect::to("/")
}

pub fn routes() -> Vec<Route> {
    let mut all = routes![health];
    all.extend(home::routes());
    all.extend(catalog::routes());
    all.extend(about::routes());
    all
}
