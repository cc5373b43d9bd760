use std::env;
use std::time::Duration;

/// How the spreadsheet feed is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsMode {
    /// Built-in two-row sample payload.
    Fixture,
    /// Real GET against the spreadsheet values endpoint.
    Http,
    /// Spreadsheet always empty; the CMS is the only source.
    Off,
}

impl SheetsMode {
    /// Blank means the default. Anything unrecognised turns the
    /// spreadsheet off rather than serving sample rows.
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "fixture" => SheetsMode::Fixture,
            "http" => SheetsMode::Http,
            "off" | "none" | "disabled" => SheetsMode::Off,
            other => {
                tracing::warn!(value = other, "unknown SHEETS_MODE, spreadsheet disabled");
                SheetsMode::Off
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub mode: SheetsMode,
    pub api_url: String,
    pub spreadsheet_id: Option<String>,
    pub sheet_name: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_uri: Option<String>,
    pub db_name: String,
    pub sheets: SheetsConfig,
    pub book_lookup_delay: Duration,
    pub static_dir: String,
    pub serve_static_from_app: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // no .env is fine

        let get = |k: &str, d: &str| env::var(k).unwrap_or_else(|_| d.to_string());
        let get_opt = |k: &str| env::var(k).ok().filter(|v| !v.trim().is_empty());
        let get_u64 = |k: &str, d: u64| {
            env::var(k)
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(d)
        };

        Self {
            mongo_uri: get_opt("MONGO_URI"),
            db_name: get("DB_NAME", "library_dev"),
            sheets: SheetsConfig {
                mode: SheetsMode::parse(&get("SHEETS_MODE", "fixture")),
                api_url: get(
                    "SHEETS_API_URL",
                    "https://sheets.googleapis.com/v4/spreadsheets",
                ),
                spreadsheet_id: get_opt("SHEETS_SPREADSHEET_ID"),
                sheet_name: get("SHEETS_SHEET_NAME", "Books"),
                api_key: get_opt("SHEETS_API_KEY"),
                timeout: Duration::from_secs(get_u64("SHEETS_TIMEOUT_SECS", 10)),
            },
            book_lookup_delay: Duration::from_millis(get_u64("BOOK_LOOKUP_DELAY_MS", 500)),
            static_dir: get("STATIC_DIR", "./static"),
            serve_static_from_app: get("SERVE_STATIC", "app") == "app",
        }
    }
}
