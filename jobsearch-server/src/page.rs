const SEARCH_TEMPLATE: &str = include_str!("../assets/search.html");

/// Absolute URLs of the interceptor's endpoints under a mount prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    prefix: String,
}

impl Endpoints {
    /// `segments` are the mount prefix, e.g. `["hangfire"]`.
    pub fn new(segments: &[String]) -> Self {
        let prefix = segments
            .iter()
            .map(|segment| format!("/{}", segment))
            .collect();
        Endpoints { prefix }
    }

    pub fn search(&self) -> String {
        format!("{}/jobs/search", self.prefix)
    }

    pub fn jobs(&self) -> String {
        format!("{}/jobs", self.prefix)
    }

    pub fn delete(&self) -> String {
        format!("{}/jobs/delete", self.prefix)
    }
}

/// Search page shell. Rows are filled in by the browser from the JSON
/// endpoint, nothing job related is rendered here.
pub fn render_search(endpoints: &Endpoints) -> String {
    SEARCH_TEMPLATE
        .replace("__JOBS_URL__", &js_string(&endpoints.jobs()))
        .replace("__DELETE_URL__", &js_string(&endpoints.delete()))
}

fn js_string(value: &str) -> String {
    // Inline <script>: `<` must not appear literally.
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}
