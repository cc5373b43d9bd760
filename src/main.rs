use rocket::fs::FileServer;
use rocket::http::Method;
use rocket::{launch, Build, Rocket};
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use tracing_subscriber::EnvFilter;

use library_site::build_rocket;
use library_site::config::AppConfig;
use library_site::state::init_state;

// Read-only API consumed by the front-end bundle.
fn cors() -> Result<rocket_cors::Cors, rocket_cors::Error> {
    CorsOptions {
        allowed_origins: AllowedOrigins::all(),
        allowed_methods: vec![Method::Get, Method::Options]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::some(&["Content-Type", "Accept"]),
        allow_credentials: false,
        ..Default::default()
    }
    .to_cors()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[launch]
async fn rocket() -> Rocket<Build> {
    init_tracing();

    let cfg = AppConfig::from_env();
    let state = init_state(&cfg).await;

    let mut app = build_rocket(state);

    match cors() {
        Ok(cors) => app = app.attach(cors),
        Err(e) => tracing::error!("CORS disabled: {e}"),
    }

    // SERVE_STATIC=app serves the front-end from STATIC_DIR; otherwise a proxy does.
    if cfg.serve_static_from_app {
        app = app.mount("/static", FileServer::from(&cfg.static_dir));
    }

    app
}
