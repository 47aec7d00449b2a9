use super::format::{format_count, join_first, DASH};
use crate::catalog::cover::{cover_url, placeholder_initials};
use crate::catalog::types::SearchResultItem;
use crate::widget::pagination::{has_next, has_previous};
use crate::widget::types::{RequestStatus, WidgetState};

use anyhow::{Context, Result};
use minijinja::{context, Environment};
use serde::Serialize;

const CARD_AUTHOR_LIMIT: usize = 3;
const DETAIL_LIST_LIMIT: usize = 4;

pub const SEARCHING_TEXT: &str = "Searching...";
pub const PROMPT_TEXT: &str = "Type a title to start searching.";
pub const NO_TITLE_TEXT: &str = "No title";
pub const UNKNOWN_AUTHOR_TEXT: &str = "Unknown author";
const NO_COVER_TEXT: &str = "No cover";

// The `.html` names switch on HTML auto-escaping for every interpolated value.
const TEMPLATES: [(&str, &str); 6] = [
    ("widget.html", include_str!("templates/widget.html")),
    ("card.html", include_str!("templates/card.html")),
    ("cover.html", include_str!("templates/cover.html")),
    ("pager.html", include_str!("templates/pager.html")),
    ("detail.html", include_str!("templates/detail.html")),
    ("shell.html", include_str!("templates/shell.html")),
];

/// Endpoints the markup links to.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Cover image endpoint, no trailing slash.
    pub covers_url: String,
    /// Catalog site root that record keys are appended to, no trailing slash.
    pub site_url: String,
}

#[derive(Debug, Serialize)]
struct CoverView {
    url: Option<String>,
    alt: String,
    placeholder: String,
}

#[derive(Debug, Serialize)]
struct CardView {
    key: String,
    title: String,
    authors: String,
    year: String,
    cover: CoverView,
}

#[derive(Debug, Serialize)]
struct PagerView {
    page: u32,
    total_pages: u32,
    has_previous: bool,
    has_next: bool,
}

#[derive(Debug, Serialize)]
struct DetailView {
    title: String,
    authors: String,
    year: String,
    editions: String,
    publishers: String,
    isbns: String,
    record_url: String,
    cover: CoverView,
}

/// Everything below the search box, flattened for the template.
#[derive(Debug, Serialize)]
struct WidgetView {
    status: String,
    error: Option<String>,
    empty_query: Option<String>,
    cards: Vec<CardView>,
    pager: Option<PagerView>,
    detail: Option<DetailView>,
}

/// Compiled page templates plus the endpoints they link to.
pub struct ViewRenderer {
    env: Environment<'static>,
    ctx: RenderContext,
}

impl ViewRenderer {
    pub fn new(ctx: RenderContext) -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .with_context(|| format!("Failed to add template {}", name))?;
        }

        Ok(Self { env, ctx })
    }

    /// Renders everything below the search box.
    pub fn render_widget(&self, state: &WidgetState) -> Result<String> {
        let view = WidgetView {
            status: status_line(state),
            error: match &state.status {
                RequestStatus::Failure { message } => Some(message.clone()),
                _ => None,
            },
            empty_query: shows_empty_state(state).then(|| state.effective_query.clone()),
            cards: state.results.iter().map(|item| self.card_view(item)).collect(),
            pager: state
                .has_query()
                .then(|| pager_view(state.page, state.total_pages())),
            detail: state.selected_item().map(|item| self.detail_view(item)),
        };

        self.render("widget.html", &view)
    }

    pub fn render_card(&self, item: &SearchResultItem) -> Result<String> {
        self.render("card.html", context! { card => self.card_view(item) })
    }

    /// Prev/Next pair with the page indicator; each button is disabled at its bound.
    pub fn render_pager(&self, page: u32, total_pages: u32) -> Result<String> {
        self.render("pager.html", context! { pager => pager_view(page, total_pages) })
    }

    /// Modal overlay for one record. The backdrop closes on click; the card does not.
    pub fn render_detail(&self, item: &SearchResultItem) -> Result<String> {
        self.render("detail.html", context! { detail => self.detail_view(item) })
    }

    /// The full page for a freshly opened session.
    pub fn render_shell(&self, session_id: &str) -> Result<String> {
        self.render("shell.html", context! { session_id })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)?
            .render(ctx)
            .with_context(|| format!("Failed to render template {}", name))
    }

    fn cover_view(&self, item: &SearchResultItem, placeholder: String) -> CoverView {
        CoverView {
            url: cover_url(item, &self.ctx.covers_url),
            alt: item.title.clone().unwrap_or_else(|| NO_TITLE_TEXT.to_string()),
            placeholder,
        }
    }

    fn card_view(&self, item: &SearchResultItem) -> CardView {
        let initials = placeholder_initials(item.title.as_deref());

        CardView {
            key: item.key.clone(),
            title: item.title.clone().unwrap_or_else(|| NO_TITLE_TEXT.to_string()),
            authors: join_first(&item.author_name, CARD_AUTHOR_LIMIT)
                .unwrap_or_else(|| UNKNOWN_AUTHOR_TEXT.to_string()),
            year: item
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| DASH.to_string()),
            cover: self.cover_view(item, initials),
        }
    }

    fn detail_view(&self, item: &SearchResultItem) -> DetailView {
        DetailView {
            title: item.title.clone().unwrap_or_else(|| NO_TITLE_TEXT.to_string()),
            authors: join_first(&item.author_name, usize::MAX)
                .unwrap_or_else(|| UNKNOWN_AUTHOR_TEXT.to_string()),
            year: item
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            editions: item
                .edition_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| DASH.to_string()),
            publishers: join_first(&item.publisher, DETAIL_LIST_LIMIT)
                .unwrap_or_else(|| DASH.to_string()),
            isbns: join_first(&item.isbn, DETAIL_LIST_LIMIT).unwrap_or_else(|| DASH.to_string()),
            record_url: format!("{}{}", self.ctx.site_url, item.key),
            cover: self.cover_view(item, NO_COVER_TEXT.to_string()),
        }
    }
}

fn pager_view(page: u32, total_pages: u32) -> PagerView {
    PagerView {
        page,
        total_pages,
        has_previous: has_previous(page),
        has_next: has_next(page, total_pages),
    }
}

/// "Searching..." while loading, else the match count for an active query, else the prompt.
pub fn status_line(state: &WidgetState) -> String {
    if state.is_loading() {
        SEARCHING_TEXT.to_string()
    } else if state.has_query() {
        let noun = if state.total == 1 { "result" } else { "results" };
        format!("{} {}", format_count(state.total), noun)
    } else {
        PROMPT_TEXT.to_string()
    }
}

pub fn shows_empty_state(state: &WidgetState) -> bool {
    !state.is_loading()
        && state.results.is_empty()
        && state.has_query()
        && !matches!(state.status, RequestStatus::Failure { .. })
}
