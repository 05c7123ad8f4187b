use crate::core::render::render_page;
use crate::domain::model::StatusKind;
use crate::domain::ports::MetricsView;

/// In-memory page holding the status line and the rendered metrics container.
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    status: String,
    status_kind: StatusKind,
    items: Vec<String>,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn status_kind(&self) -> StatusKind {
        self.status_kind
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn to_html(&self) -> String {
        render_page(&self.status, self.status_kind, &self.items)
    }
}

impl MetricsView for HtmlPage {
    fn set_status(&mut self, message: &str, kind: StatusKind) {
        self.status = message.to_string();
        self.status_kind = kind;
    }

    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn append_item(&mut self, html: String) {
        self.items.push(html);
    }
}
