use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{error, info};

use crate::config::RosterConfig;
use crate::parser::{load_availability, load_ledger, load_schedule};
use crate::roster::{AvailabilityIndex, DayType};
use crate::tasks::run_schedule;
use crate::workbook::{DATE_COL, DAY_COL, FIRST_COL, MONTH_COL, SECOND_COL};

pub struct AppState {
    pub config: RosterConfig,
    /// Held for the whole of a run so two requests never overlap
    pub run_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            run_lock: Mutex::new(()),
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    last_updated: Option<String>,
    rows: Vec<ScheduleRowView>,
}

#[derive(Serialize)]
pub struct ScheduleRowView {
    row: usize,
    month: String,
    date: String,
    day: String,
    who: Vec<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    volunteers: usize,
    available_per_day: BTreeMap<DayType, usize>,
    ledger: BTreeMap<String, u32>,
}

fn failure(err: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "error": err.to_string()
    }))
}

// Schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let sheet = match load_schedule(&state.config.schedule_path()) {
        Ok(sheet) => sheet,
        Err(e) => return Ok(failure(e)),
    };

    let rows = sheet
        .rows
        .iter()
        .map(|row| ScheduleRowView {
            row: row.row,
            month: row.cell(MONTH_COL).to_string(),
            date: row.cell(DATE_COL).to_string(),
            day: row.cell(DAY_COL).to_string(),
            who: [row.cell(FIRST_COL), row.cell(SECOND_COL)]
                .into_iter()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ScheduleResponse {
        last_updated: sheet.last_updated().map(str::to_string),
        rows,
    }))
}

// Stats endpoint
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let loaded = load_availability(&state.config.availability_path())
        .and_then(|records| Ok((records, load_ledger(&state.config.ledger_path())?)));
    let (records, ledger) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(failure(e)),
    };

    let index = AvailabilityIndex::build(&records);
    let available_per_day = DayType::ALL
        .into_iter()
        .map(|day| (day, index.availability.available_on(day).len()))
        .collect();

    Ok(HttpResponse::Ok().json(StatsResponse {
        volunteers: index.people.len(),
        available_per_day,
        ledger: ledger.into_iter().collect(),
    }))
}

// Run endpoint: extend then fill, admin only
async fn post_run(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let authorized = state
        .config
        .admin_password
        .as_deref()
        .is_some_and(|expected| expected == password);
    if !authorized {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let _guard = state
        .run_lock
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("run lock poisoned"))?;

    match run_schedule(&state.config) {
        Ok(report) => {
            info!(filled = report.filled.results.len(), "run triggered over http");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "report": report
            })))
        }
        Err(e) => {
            error!(error = %e, "run failed");
            Ok(failure(e))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/schedule", web::get().to(get_schedule))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/run", web::post().to(post_run));
}

pub async fn start_server(config: RosterConfig) -> std::io::Result<()> {
    let port = config.port;
    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
