//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use ev_charge_sim::api::{AppState, router};
use ev_charge_sim::config::ScenarioConfig;
use ev_charge_sim::runner::run_scenario;

/// Run a scenario and wrap it as API state.
fn build_api_state(config: ScenarioConfig) -> Arc<AppState> {
    let run = run_scenario(&config).expect("scenario should run");
    Arc::new(AppState {
        config,
        summary: run.summary,
        results: run.results,
    })
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn summary_reports_scenario_and_outcome() {
    let (status, json) = get_json(build_api_state(ScenarioConfig::baseline()), "/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["config"]["session"]["connection"], "2025-01-31 09:00");
    assert_eq!(json["config"]["operating_window"]["end"], "21:00");
    assert_eq!(json["config"]["battery"]["capacity_kwh"], 50.0);
    assert_eq!(json["sample_count"], 49);
    assert_eq!(json["summary"]["full_at"], "2025-01-31T13:06:00");
    assert_eq!(json["summary"]["final_soc_pct"], 100.0);
    assert_eq!(json["summary"]["peak_power_kw"], 11.0);
}

#[tokio::test]
async fn samples_carry_index_and_fields() {
    let (status, json) = get_json(build_api_state(ScenarioConfig::fast_ac()), "/samples").await;

    assert_eq!(status, StatusCode::OK);
    let records = json.as_array().expect("array of samples");
    assert_eq!(records.len(), 49);

    let first = &records[0];
    assert_eq!(first["index"], 0);
    assert_eq!(first["timestamp"], "2025-01-31T09:00:00");
    assert_eq!(first["state"], "disconnected");
    assert!(first.get("charging_power_kw").is_some());
    assert!(first.get("soc_pct").is_some());
    assert!(first.get("net_energy_charged_kwh").is_some());

    // fast_ac plugs in at 12:00; the 12:15 sample covers the first charging period
    assert_eq!(records[13]["state"], "charging");
    assert_eq!(records[13]["charging_power_kw"], 22.0);
}

#[tokio::test]
async fn samples_range_and_invalid_range() {
    let state = build_api_state(ScenarioConfig::evening_top_up());

    let (status, json) = get_json(state.clone(), "/samples?from=100&to=104").await;
    assert_eq!(status, StatusCode::OK);
    let records = json.as_array().expect("array of samples");
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["index"], 100);
    assert_eq!(records[4]["index"], 104);

    let (status, json) = get_json(state, "/samples?from=10&to=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}
