use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use dotenvy::dotenv;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use fake::faker::name::raw::Name;
use fake::locales::EN;
use fake::Fake;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use rand::{seq::SliceRandom, Rng};

use library_site::cms::{BOOK_CATALOG, LIBRARY_INFORMATION, LIBRARY_PHOTOS};
use library_site::models::{BookRecord, LibraryInformation, LibraryPhoto};

const BOOKS: usize = 60;
const PHOTOS: usize = 8;

const GENRES: [&str; 8] = [
    "Fiction", "Poetry", "History", "Science", "Biography", "Children", "Drama", "Travel",
];

fn title_case(words: Vec<String>) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_date(rng: &mut impl Rng, years: std::ops::RangeInclusive<i32>) -> Option<String> {
    let year = rng.gen_range(years);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let uri = std::env::var("MONGO_URI").context("MONGO_URI not set")?;
    let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "library_dev".into());

    let mut client_opts = ClientOptions::parse(&uri).await?;
    client_opts.app_name = Some("library-site-seeder".into());
    let client = Client::with_options(client_opts)?;
    let db = client.database(&db_name);

    let mut rng = rand::thread_rng();

    // ---- bookcatalog ----
    let books: Collection<BookRecord> = db.collection(BOOK_CATALOG);
    let mut docs = Vec::with_capacity(BOOKS);
    for n in 1..=BOOKS {
        // roughly one in ten records has no availability recorded
        let is_available = if rng.gen_ratio(1, 10) {
            None
        } else {
            Some(rng.gen_bool(0.7))
        };
        let isbn = format!("978-{:010}", rng.gen_range(0..10_000_000_000u64));

        docs.push(BookRecord {
            id: format!("cms-{n}"),
            title: Some(title_case(Words(1..5).fake())),
            author: Some(Name(EN).fake()),
            genre: GENRES.choose(&mut rng).map(|g| g.to_string()),
            description: Some(Sentence(8..20).fake()),
            isbn: Some(isbn),
            is_available,
            cover_image: Some(format!("https://picsum.photos/seed/book{n}/300/400")),
        });
    }
    books.delete_many(doc! {}).await?;
    let res = books.insert_many(docs).await?;
    println!("Seeded books: {}", res.inserted_ids.len());

    // ---- libraryinformation ----
    let info: Collection<LibraryInformation> = db.collection(LIBRARY_INFORMATION);
    info.delete_many(doc! {}).await?;
    info.insert_one(LibraryInformation {
        id: "info-1".into(),
        section_name: Some("About".into()),
        content: Some(Paragraph(3..6).fake()),
        date_established: random_date(&mut rng, 1920..=1990),
        mission_statement: Some(Sentence(10..18).fake()),
        vision_statement: Some(Sentence(10..18).fake()),
        main_image: Some("https://picsum.photos/seed/library/1920/1080".into()),
    })
    .await?;
    println!("Seeded library information: 1");

    // ---- libraryphotos ----
    let photos: Collection<LibraryPhoto> = db.collection(LIBRARY_PHOTOS);
    let photo_docs: Vec<LibraryPhoto> = (1..=PHOTOS)
        .map(|n| LibraryPhoto {
            id: format!("photo-{n}"),
            photo_title: Some(title_case(Words(2..4).fake())),
            photo: Some(format!("https://picsum.photos/seed/photo{n}/800/600")),
            photo_description: Some(Sentence(6..12).fake()),
            date_taken: random_date(&mut rng, 2000..=2024),
            location: Some(CityName().fake()),
            photographer: Some(Name(EN).fake()),
        })
        .collect();
    photos.delete_many(doc! {}).await?;
    let res = photos.insert_many(photo_docs).await?;
    println!("Seeded photos: {}", res.inserted_ids.len());

    Ok(())
}
