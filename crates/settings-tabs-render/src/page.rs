use crate::escape::{attr, text};
use settings_tabs_model::SchemaRegistry;
use std::fmt::Write;

/// Page heading block: icon well plus the page title.
#[must_use]
pub fn render_page_heading(registry: &SchemaRegistry) -> String {
    format!(
        "<div class=\"col-plugin-icon icon32\"></div><h2>{}</h2>",
        text(registry.page_title())
    )
}

/// Tab navigation row. Exactly the active tab gets the
/// `nav-tab-active` class; links are relative so the page mounts anywhere.
#[must_use]
pub fn render_nav(registry: &SchemaRegistry, active_tab_id: &str) -> String {
    let mut out = String::from("<h2 class=\"nav-tab-wrapper\">");
    for tab in registry.tabs() {
        let active = if tab.id == active_tab_id {
            " nav-tab-active"
        } else {
            ""
        };
        let _ = write!(
            out,
            "<a href=\"?tab={}\" class=\"nav-tab{}\">{}</a>",
            attr(&tab.id),
            active,
            text(&tab.title),
        );
    }
    out.push_str("</h2>");
    out
}

/// Flash notice rendered after a successful save redirect.
#[must_use]
pub fn render_updated_notice() -> String {
    "<div class=\"notice notice-success\"><p>Settings saved.</p></div>".to_string()
}

/// Opens the settings form bound to the generic submission endpoint, with
/// the tab's storage key embedded as the hidden grouping token.
#[must_use]
pub fn render_form_open(submit_path: &str, storage_key: &str) -> String {
    format!(
        "<form action=\"{}\" method=\"post\">\
<input type=\"hidden\" name=\"option_page\" value=\"{}\" />",
        attr(submit_path),
        attr(storage_key),
    )
}

#[must_use]
pub fn render_submit() -> String {
    "<p class=\"submit\"><input type=\"submit\" class=\"button button-primary\" \
value=\"Save Changes\" /></p></form>"
        .to_string()
}

/// One field row of a section table: title cell plus the pre-rendered
/// control markup.
#[must_use]
pub fn render_field_row(title: &str, control: &str) -> String {
    format!(
        "<tr><th scope=\"row\">{}</th><td>{}</td></tr>",
        text(title),
        control
    )
}

/// Wraps assembled page content in a minimal document shell.
#[must_use]
pub fn render_document(page_title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head>\
<body>{}</body></html>",
        text(page_title),
        body
    )
}
