use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Serialize;

use super::Locale;
use crate::cms::{self, BOOK_CATALOG, LIBRARY_INFORMATION};
use crate::models::{BookRecord, LibraryInformation};
use crate::state::AppState;

const FEATURED_BOOKS: usize = 6;

#[derive(Serialize)]
pub struct HomePage {
    locale: Locale,
    featured_books: Vec<BookRecord>,
    library_info: Option<LibraryInformation>,
}

#[get("/")]
pub async fn home_en(state: &State<AppState>) -> Json<HomePage> {
    home_page(state, Locale::En).await
}

#[get("/home-ml")]
pub async fn home_ml(state: &State<AppState>) -> Json<HomePage> {
    home_page(state, Locale::Ml).await
}

// CMS failures leave the page with its defaults.
async fn home_page(state: &AppState, locale: Locale) -> Json<HomePage> {
    let featured_books = match cms::fetch_all::<BookRecord>(state.cms.as_ref(), BOOK_CATALOG).await {
        Ok(mut books) => {
            books.truncate(FEATURED_BOOKS);
            books
        }
        Err(e) => {
            tracing::error!("home: featured books unavailable: {e:#}");
            vec![]
        }
    };

    let library_info = first_library_info(state).await;

    Json(HomePage {
        locale,
        featured_books,
        library_info,
    })
}

/// First `libraryinformation` record, if any. Failures are logged.
pub(crate) async fn first_library_info(state: &AppState) -> Option<LibraryInformation> {
    match cms::fetch_all::<LibraryInformation>(state.cms.as_ref(), LIBRARY_INFORMATION).await {
        Ok(info) => info.into_iter().next(),
        Err(e) => {
            tracing::error!("library information unavailable: {e:#}");
            None
        }
    }
}

// GET /search?q= hands the home page search box over to the catalog
#[get("/search?<q>")]
pub fn search_en(q: Option<String>) -> Redirect {
    Redirect::to(catalog_search_url("/catalog", q.as_deref()))
}

#[get("/search-ml?<q>")]
pub fn search_ml(q: Option<String>) -> Redirect {
    Redirect::to(catalog_search_url("/catalog-ml", q.as_deref()))
}

fn catalog_search_url(catalog: &str, q: Option<&str>) -> String {
    match q {
        Some(q) if !q.trim().is_empty() => format!("{catalog}?search={}", urlencoding::encode(q)),
        _ => catalog.to_string(),
    }
}

pub fn routes() -> Vec<Route> {
    routes![home_en, home_ml, search_en, search_ml]
}
