//! HTTP host: serves rendered heads, the editor form, the save endpoint and
//! the administrator notice.

use crate::admin::{self, SaveRequest, NONCE_ACTION, NONCE_FIELD};
use crate::attributes::{MemoryStore, StoredAttributes};
use crate::config::Config;
use crate::content::{ContentSource, ItemId, MemoryContent};
use crate::fixture::LoadedFixture;
use crate::head;
use crate::i18n::{ConfiguredMultilingual, MultilingualService};
use crate::security::{constant_time_compare, NonceGuard};
use crate::site::{RenderContext, Site};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Header carrying the editor key.
pub const EDITOR_KEY_HEADER: &str = "x-api-key";

/// Form field set by autosave requests.
pub const AUTOSAVE_FIELD: &str = "autosave";

pub struct AppState {
    pub site: Site,
    pub content: MemoryContent,
    pub store: MemoryStore,
    pub multilingual: Option<ConfiguredMultilingual>,
    pub nonces: NonceGuard,
    pub editor_api_key: Option<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &Config, loaded: LoadedFixture) -> Self {
        Self {
            site: config.site(),
            content: loaded.content,
            store: loaded.store,
            multilingual: loaded.multilingual,
            nonces: NonceGuard::new(config.nonce_secret.clone()),
            editor_api_key: config.editor_api_key.clone(),
        }
    }

    /// Multilingual service for one request, with `lang` as the current
    /// language when given.
    fn multilingual_for(&self, lang: Option<&str>) -> Option<ConfiguredMultilingual> {
        self.multilingual
            .as_ref()
            .map(|ml| ml.clone().with_current_language(lang))
    }

    fn context<'a>(&'a self, ml: Option<&'a ConfiguredMultilingual>) -> RenderContext<'a> {
        let ctx = RenderContext::new(&self.site, &self.content);
        match ml {
            Some(ml) => ctx.with_multilingual(ml),
            None => ctx,
        }
    }

    /// Log the domain-coverage warning. Called once at startup; request
    /// handlers only render the notice. Returns whether it was logged.
    pub fn warn_on_domain_coverage(&self) -> bool {
        let service = self
            .multilingual
            .as_ref()
            .map(|ml| ml as &dyn MultilingualService);
        if admin::domain_coverage_notice(service).is_none() {
            return false;
        }
        warn!(
            "Languages are served per domain but not every language has a domain; see {}",
            admin::LANGUAGE_SETTINGS_URL
        );
        true
    }

    /// Editing requires a configured key and a matching request header.
    fn can_edit(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = self.editor_api_key.as_deref() else {
            return false;
        };
        headers
            .get(EDITOR_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|provided| constant_time_compare(provided, expected))
            .unwrap_or(false)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items/:id", get(render_item))
        .route("/items/:id/edit", get(edit_form))
        .route("/items/:id/meta", post(save_meta))
        .route("/admin/notices", get(admin_notices))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn render_item(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Query(query): Query<LangQuery>,
) -> Result<Html<String>, StatusCode> {
    let item = state.content.item(ItemId(id)).ok_or(StatusCode::NOT_FOUND)?;
    let ml = state.multilingual_for(query.lang.as_deref());
    let ctx = state.context(ml.as_ref());

    let head = head::render_head(&ctx, &state.store, &item);
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n{}</head>\n<body></body>\n</html>\n",
        head.to_html()
    )))
}

pub async fn edit_form(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, StatusCode> {
    if !state.can_edit(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let item = state.content.item(ItemId(id)).ok_or(StatusCode::NOT_FOUND)?;
    let ml = state.multilingual_for(query.lang.as_deref());
    let service = ml.as_ref().map(|ml| ml as &dyn MultilingualService);

    let attrs = StoredAttributes::load(&state.store, item.id);
    let nonce = state.nonces.create(NONCE_ACTION, &item.id.to_string());
    let notice = admin::domain_coverage_notice(service).unwrap_or_default();
    let form = admin::render_form(
        &item,
        &attrs,
        &nonce,
        &format!("/items/{}/meta", item.id),
        service,
    );
    Ok(Html(format!("{}{}", notice, form)))
}

/// Save handler. Rejected saves look exactly like successful ones to the
/// client: both redirect back to the form.
pub async fn save_meta(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Form(mut fields): Form<HashMap<String, String>>,
) -> Result<Redirect, StatusCode> {
    let item = state.content.item(ItemId(id)).ok_or(StatusCode::NOT_FOUND)?;

    let request = SaveRequest {
        item: item.id,
        nonce: fields.remove(NONCE_FIELD),
        autosave: fields
            .remove(AUTOSAVE_FIELD)
            .is_some_and(|value| value == "1" || value == "true"),
        fields,
    };

    match admin::save(&state.store, &state.nonces, &request, state.can_edit(&headers)) {
        Ok(written) => info!("Item {}: updated {} fields", item.id, written.len()),
        Err(rejection) => warn!("Item {}: save dropped: {}", item.id, rejection),
    }

    Ok(Redirect::to(&format!("/items/{}/edit", item.id)))
}

pub async fn admin_notices(State(state): State<SharedState>) -> Html<String> {
    let ml = state.multilingual_for(None);
    let service = ml.as_ref().map(|ml| ml as &dyn MultilingualService);
    Html(admin::domain_coverage_notice(service).unwrap_or_default())
}
