use crate::http::form::{map_submission, parse_pairs};
use crate::telemetry::render_metrics;
use crate::{AppState, SETTINGS_PATH, SUBMIT_PATH};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use settings_tabs_model::TabModel;
use settings_tabs_render as render;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use tracing::{error, warn};

fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

fn html_response(status: StatusCode, html: String) -> Response {
    let mut resp = Response::new(Body::from(html));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        "content-type",
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    resp
}

/// Static-content dispatch for tabs without fields.
fn static_tab_content(tab: &TabModel) -> String {
    match tab.id.as_str() {
        "instructions" => "<p>Instructions go here. This tab has no fields.</p>".to_string(),
        _ => String::new(),
    }
}

pub(crate) async fn landing_handler(State(state): State<AppState>) -> Response {
    state.metrics.observe_request();
    Redirect::to(SETTINGS_PATH).into_response()
}

pub(crate) async fn settings_page_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let request_id = make_request_id(&state);
    state.metrics.observe_request();
    state.metrics.page_renders.fetch_add(1, Ordering::Relaxed);

    let active = state
        .registry
        .select_tab(params.get("tab").map(String::as_str));

    let mut page = String::from("<div class=\"wrap\">");
    page.push_str(&render::render_page_heading(&state.registry));
    page.push_str(&render::render_nav(&state.registry, &active.id));

    // Static tabs render their content only: no form, no storage read.
    let storage_key = if active.has_fields {
        state.registry.storage_key(&active.id)
    } else {
        None
    };
    match storage_key {
        None => page.push_str(&static_tab_content(active)),
        Some(key) => {
            if params.get("updated").map(String::as_str) == Some("true") {
                page.push_str(&render::render_updated_notice());
            }
            let values = match state.store.get(key).await {
                Ok(values) => values,
                Err(e) => {
                    state.metrics.store_failures.fetch_add(1, Ordering::Relaxed);
                    error!("option read failed for {key}: {e}");
                    return with_request_id(
                        html_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "<p>Settings are temporarily unavailable.</p>".to_string(),
                        ),
                        &request_id,
                    );
                }
            };
            page.push_str(&render::render_form_open(SUBMIT_PATH, key));
            for registered in state.host.sections_for_page(key) {
                page.push_str(&render::render_section_heading(&registered.section));
                page.push_str(&(registered.intro)(&registered.section));
                page.push_str("<table class=\"form-table\">");
                for field in state.host.fields_in_section(key, &registered.section.id) {
                    let control = (field.render)(&field.descriptor, key, &values);
                    page.push_str(&render::render_field_row(&field.descriptor.title, &control));
                }
                page.push_str("</table>");
            }
            page.push_str(&render::render_submit());
        }
    }
    page.push_str("</div>");

    let doc = render::render_document(state.registry.page_title(), &page);
    with_request_id(html_response(StatusCode::OK, doc), &request_id)
}

pub(crate) async fn save_settings_handler(
    State(state): State<AppState>,
    body: String,
) -> Response {
    let request_id = make_request_id(&state);
    state.metrics.observe_request();

    let pairs = parse_pairs(body.as_bytes());
    let token = pairs
        .iter()
        .find(|(name, _)| name == "option_page")
        .map(|(_, value)| value.clone());

    // Submissions for unknown option groups fall back to the default tab
    // without writing anything.
    let Some(key) = token else {
        warn!("settings submission without an option_page token");
        return with_request_id(Redirect::to(SETTINGS_PATH).into_response(), &request_id);
    };
    let owner = if state.host.is_registered_setting(&key) {
        state.registry.tab_for_storage_key(&key)
    } else {
        None
    };
    let Some(tab) = owner else {
        warn!("settings submission for unregistered option group: {key}");
        return with_request_id(Redirect::to(SETTINGS_PATH).into_response(), &request_id);
    };

    let values = map_submission(tab.fields(), &key, &pairs);
    if let Err(e) = state.store.replace(&key, values).await {
        state.metrics.store_failures.fetch_add(1, Ordering::Relaxed);
        error!("option write failed for {key}: {e}");
        return with_request_id(
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "<p>Saving settings failed.</p>".to_string(),
            ),
            &request_id,
        );
    }
    state.metrics.submissions.fetch_add(1, Ordering::Relaxed);

    let target = format!("{SETTINGS_PATH}?tab={}&updated=true", tab.id);
    with_request_id(Redirect::to(&target).into_response(), &request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.observe_request();
    (StatusCode::OK, "ok")
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.observe_request();
    if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    }
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.observe_request();
    render_metrics(&state.metrics)
}
