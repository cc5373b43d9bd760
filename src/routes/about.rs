use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Serialize;

use super::home::first_library_info;
use super::Locale;
use crate::cms::{self, LIBRARY_PHOTOS};
use crate::models::{LibraryInformation, LibraryPhoto};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AboutPage {
    locale: Locale,
    library_info: Option<LibraryInformation>,
    photos: Vec<LibraryPhoto>,
}

#[get("/about")]
pub async fn about_en(state: &State<AppState>) -> Json<AboutPage> {
    about_page(state, Locale::En).await
}

#[get("/about-ml")]
pub async fn about_ml(state: &State<AppState>) -> Json<AboutPage> {
    about_page(state, Locale::Ml).await
}

async fn about_page(state: &AppState, locale: Locale) -> Json<AboutPage> {
    let library_info = first_library_info(state).await;
    let photos = cms::fetch_all::<LibraryPhoto>(state.cms.as_ref(), LIBRARY_PHOTOS)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("about: photos unavailable: {e:#}");
            vec![]
        });

    Json(AboutPage {
        locale,
        library_info,
        photos,
    })
}

pub fn routes() -> Vec<Route> {
    routes![about_en, about_ml]
}
