use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::model::ErrorBody;

/// The only error detail the client ever sees; upstream specifics stay in
/// the server log.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error fetching data from CoinMarketCap";

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

struct ProxyState {
    client: reqwest::Client,
    listings_url: String,
    api_key: String,
}

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().body("Coin Tracker proxy")
}

/// `GET /api`: forward the upstream listings body verbatim, or collapse any
/// failure into a fixed 500 envelope.
#[get("/api")]
async fn listings(state: web::Data<ProxyState>) -> HttpResponse {
    match fetch_upstream(&state).await {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(err) => {
            error!("Upstream listings request failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: UPSTREAM_ERROR_MESSAGE.to_string(),
            })
        }
    }
}

async fn fetch_upstream(state: &ProxyState) -> Result<Vec<u8>> {
    let response = state
        .client
        .get(&state.listings_url)
        .header(API_KEY_HEADER, &state.api_key)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::message(format!(
            "upstream responded with status {}",
            status
        )));
    }

    Ok(response.bytes().await?.to_vec())
}

pub async fn run_server(config: AppConfig) -> Result<()> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        AppError::message("CMC_API_KEY is not set; refusing to start the proxy")
    })?;

    let state = web::Data::new(ProxyState {
        client: reqwest::Client::new(),
        listings_url: config.listings_url.clone(),
        api_key,
    });

    info!("Proxy listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(actix_web::middleware::Logger::default())
            .service(home)
            .service(listings)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await?;

    Ok(())
}
