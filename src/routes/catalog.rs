use rocket::form::FromForm;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Serialize;

use super::Locale;
use crate::catalog::{
    open_book, AvailabilityFilter, CatalogSource, CatalogView, GenreFilter, QueryPredicate,
    SeedParams,
};
use crate::models::BookRecord;
use crate::state::AppState;

/// Query string of a catalog page. `search` and `book` seed the page,
/// `genre` and `availability` preselect the two menus.
#[derive(FromForm, Debug, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub book: Option<String>,
    pub genre: Option<String>,
    pub availability: Option<String>,
}

#[derive(Serialize)]
pub struct CatalogPage {
    locale: Locale,
    books: Vec<BookRecord>,
    total: usize,
    showing: usize,
    genres: Vec<String>,
    predicate: QueryPredicate,
    source: CatalogSource,
    selected_book: Option<BookRecord>,
}

// GET /catalog?search=&book=&genre=&availability=
#[get("/catalog?<query..>")]
pub async fn catalog_en(state: &State<AppState>, query: CatalogQuery) -> Result<Json<CatalogPage>, Status> {
    catalog_page(state, Locale::En, query).await
}

#[get("/catalog-ml?<query..>")]
pub async fn catalog_ml(state: &State<AppState>, query: CatalogQuery) -> Result<Json<CatalogPage>, Status> {
    catalog_page(state, Locale::Ml, query).await
}

async fn catalog_page(
    state: &AppState,
    locale: Locale,
    query: CatalogQuery,
) -> Result<Json<CatalogPage>, Status> {
    let availability = match non_empty(query.availability.as_deref()) {
        Some(v) => v.parse::<AvailabilityFilter>().map_err(|e| {
            tracing::debug!("rejecting catalog query: {e}");
            Status::BadRequest
        })?,
        None => AvailabilityFilter::All,
    };
    let genre = non_empty(query.genre.as_deref())
        .map(GenreFilter::parse)
        .unwrap_or_default();

    let seed = SeedParams {
        search: query.search,
        book: query.book,
    };

    // The detail lookup goes to the CMS on its own schedule, independent of
    // which provider ends up supplying the list.
    let lookup = async {
        let mut selected = None;
        if let Some(id) = seed.book.as_deref() {
            open_book(state.cms_books.as_ref(), id, state.book_lookup_delay, |book| {
                selected = Some(book)
            })
            .await;
        }
        selected
    };
    let (resolved, selected_book) = tokio::join!(state.resolve_catalog(), lookup);

    let resolved = resolved.map_err(|e| {
        tracing::error!("catalog unavailable: {e:#}");
        Status::ServiceUnavailable
    })?;

    let mut view = CatalogView::new(resolved, &seed);
    view.set_genre(genre);
    view.set_availability(availability);

    let total = view.books().len();
    let genres = view.genres().to_vec();
    let predicate = view.predicate().clone();
    let source = view.source();
    let books = view.into_visible();

    Ok(Json(CatalogPage {
        locale,
        showing: books.len(),
        books,
        total,
        genres,
        predicate,
        source,
        selected_book,
    }))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn routes() -> Vec<Route> {
    routes![catalog_en, catalog_ml]
}
