//! Search query construction
//!
//! Query controls are passed through to the API verbatim; nothing here
//! interprets or rewrites them.

/// A document filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    expr: String,
}

impl Predicate {
    /// Match documents whose field at `path` equals `value`
    pub fn at(path: &str, value: &str) -> Self {
        Self {
            expr: format!("at({},\"{}\")", path, value),
        }
    }

    pub fn as_expr(&self) -> &str {
        &self.expr
    }
}

/// Result ordering for a search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    field: String,
    descending: bool,
}

impl Ordering {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }

    fn render(&self) -> String {
        if self.descending {
            format!("[{} desc]", self.field)
        } else {
            format!("[{}]", self.field)
        }
    }
}

/// A search query against the content API
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    predicates: Vec<Predicate>,
    fetch: Vec<String>,
    page_size: Option<usize>,
    orderings: Option<String>,
    after: Option<String>,
    preview_ref: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Field projection for the results
    pub fn fetch(mut self, fields: &[String]) -> Self {
        self.fetch = fields.to_vec();
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings = Some(ordering.render());
        self
    }

    /// Raw orderings expression, passed through unmodified
    pub fn orderings(mut self, raw: &str) -> Self {
        self.orderings = Some(raw.to_string());
        self
    }

    /// Return results published after the document with this id,
    /// in the direction of the current ordering
    pub fn after(mut self, id: &str) -> Self {
        self.after = Some(id.to_string());
        self
    }

    /// Draft-content ref token; `None` uses the published content set
    pub fn preview_ref(mut self, preview_ref: Option<&str>) -> Self {
        self.preview_ref = preview_ref.map(|r| r.to_string());
        self
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview_ref.as_deref()
    }

    /// URL query pairs for the search endpoint
    pub fn to_params(&self, resolved_ref: &str) -> Vec<(String, String)> {
        let mut params = vec![("ref".to_string(), resolved_ref.to_string())];

        if !self.predicates.is_empty() {
            let exprs: String = self
                .predicates
                .iter()
                .map(|p| format!("[{}]", p.as_expr()))
                .collect();
            params.push(("q".to_string(), format!("[{}]", exprs)));
        }
        if !self.fetch.is_empty() {
            params.push(("fetch".to_string(), self.fetch.join(",")));
        }
        if let Some(size) = self.page_size {
            params.push(("pageSize".to_string(), size.to_string()));
        }
        if let Some(orderings) = &self.orderings {
            params.push(("orderings".to_string(), orderings.clone()));
        }
        if let Some(after) = &self.after {
            params.push(("after".to_string(), after.clone()));
        }

        params
    }
}
