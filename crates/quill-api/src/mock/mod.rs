//! In-memory backend with simulated latency.
//!
//! Answers the same routes as the REST backend from seeded tables, so every
//! screen works without a server. Tokens are accepted when they carry the
//! [`MOCK_TOKEN_PREFIX`], which keeps a login valid across process restarts.

mod seo;
mod state;

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use quill_auth::storage::{self, ClientStorage};
use quill_config::ClientConfig;
use quill_core::entities::{AccountSettings, AnalyticsOverview, LoginResponse, PerformanceRange};
use quill_core::enums::{AbMetric, AbTestStatus, ProjectStatus, TemplateCategory};
use quill_core::requests::{
    AppearanceUpdate, ContentUpdate, EnhanceRequest, GenerateRequest,
    GeneratedText, LoginRequest, NewAbTest, NewContent, NewSavedProject, NewTemplate,
    PasswordChange, RecordMetric, SavedProjectUpdate, SeoRequest, TemplateUpdate,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::backend::{ApiRequest, Backend, Method};
use crate::error::ApiError;

pub use state::{MOCK_PASSWORD, MOCK_TOKEN_PREFIX, MOCK_USERNAME};
use state::MockState;

/// Requests kept for inspection; older ones are dropped first.
const REQUEST_LOG_CAPACITY: usize = 512;

/// A failure injected for requests whose path starts with `prefix`.
#[derive(Debug, Clone)]
struct InjectedFailure {
    prefix: String,
    status: u16,
}

#[derive(Debug)]
pub struct MockBackend {
    state: Mutex<MockState>,
    storage: Arc<dyn ClientStorage>,
    latency: Duration,
    log: Mutex<VecDeque<ApiRequest>>,
    failures: Mutex<Vec<InjectedFailure>>,
}

impl MockBackend {
    /// Seeded backend without latency.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self::with_state(MockState::seeded(Utc::now()), storage)
    }

    /// Backend with no A/B tests, projects, templates, or contents.
    #[must_use]
    pub fn empty(storage: Arc<dyn ClientStorage>) -> Self {
        Self::with_state(MockState::empty(), storage)
    }

    /// Seeded backend with the configured latency.
    #[must_use]
    pub fn from_config(config: &ClientConfig, storage: Arc<dyn ClientStorage>) -> Self {
        Self::new(storage).with_latency(Duration::from_millis(config.mock_latency_ms))
    }

    fn with_state(state: MockState, storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            state: Mutex::new(state),
            storage,
            latency: Duration::ZERO,
            log: Mutex::new(VecDeque::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The most recent requests, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.log).iter().cloned().collect()
    }

    /// Number of requests matching `method` and exact `path`.
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        lock(&self.log)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Answer every request under `prefix` with `status` until cleared.
    pub fn fail_requests(&self, prefix: &str, status: u16) {
        lock(&self.failures).push(InjectedFailure {
            prefix: prefix.to_string(),
            status,
        });
    }

    pub fn clear_failures(&self) {
        lock(&self.failures).clear();
    }

    fn injected_failure(&self, path: &str) -> Option<ApiError> {
        lock(&self.failures)
            .iter()
            .find(|f| path.starts_with(&f.prefix))
            .map(|f| ApiError::Api {
                status: f.status,
                message: "injected failure".into(),
            })
    }

    fn session_token(&self) -> Option<String> {
        storage::load_token(self.storage.as_ref()).filter(|t| t.starts_with(MOCK_TOKEN_PREFIX))
    }

    #[allow(clippy::too_many_lines)]
    fn route(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let segments: Vec<String> = request
            .path
            .trim_matches('/')
            .split('/')
            .map(|s| urlencoding::decode(s).map_or_else(|_| s.to_string(), |d| d.into_owned()))
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let now = Utc::now();
        let mut state = lock(&self.state);

        match (request.method, segments.as_slice()) {
            // auth
            (Method::Post, ["auth", "login"]) => {
                let login: LoginRequest = body(request)?;
                if login.username != state.user.username || login.password != state.password {
                    return Err(status(401, "Invalid username or password"));
                }
                let issued = state.next_id("session");
                to_json(&LoginResponse {
                    token: format!("{MOCK_TOKEN_PREFIX}{issued}"),
                    user: state.user.clone(),
                })
            }
            (Method::Post, ["auth", "logout"]) => Ok(Value::Null),
            (Method::Get, ["auth", "me"]) => match self.session_token() {
                Some(_) => to_json(&state.user),
                None => Ok(Value::Null),
            },
            (Method::Post, ["auth", "verify"]) => {
                Ok(json!({ "valid": self.session_token().is_some() }))
            }

            // contents
            (Method::Get, ["contents"]) => to_json(&state.contents),
            (Method::Post, ["contents"]) => {
                let new: NewContent = body(request)?;
                to_json(&state.insert_content(new, now))
            }
            (Method::Post, ["contents", "enhance"]) => {
                let req: EnhanceRequest = body(request)?;
                to_json(&enhance(&req))
            }
            (Method::Post, ["contents", "generate"]) => {
                let req: GenerateRequest = body(request)?;
                to_json(&generate(&req))
            }
            (Method::Get, ["contents", id]) => to_json(find(&state.contents, |c| c.id == *id, "content", id)?),
            (Method::Put, ["contents", id]) => {
                let update: ContentUpdate = body(request)?;
                let content = find_mut(&mut state.contents, |c| c.id == *id, "content", id)?;
                if let Some(title) = update.title {
                    content.title = title;
                }
                if let Some(text) = update.body {
                    content.body = text;
                }
                if let Some(status) = update.status {
                    content.status = status;
                }
                content.updated_at = now;
                to_json(content)
            }
            (Method::Delete, ["contents", id]) => {
                remove(&mut state.contents, |c| c.id == *id, "content", id)
            }

            // A/B tests
            (Method::Get, ["ab-tests"]) => to_json(&state.ab_tests),
            (Method::Post, ["ab-tests"]) => {
                let new: NewAbTest = body(request)?;
                if new.variants.len() < 2 {
                    return Err(status(422, "At least two variants are required"));
                }
                to_json(&state.insert_ab_test(new, now))
            }
            (Method::Get, ["ab-tests", id]) => to_json(find(&state.ab_tests, |t| t.id == *id, "A/B test", id)?),
            (Method::Delete, ["ab-tests", id]) => {
                remove(&mut state.ab_tests, |t| t.id == *id, "A/B test", id)
            }
            (Method::Post, ["ab-tests", id, action @ ("start" | "complete")]) => {
                let test = find_mut(&mut state.ab_tests, |t| t.id == *id, "A/B test", id)?;
                let next = if *action == "start" {
                    AbTestStatus::Running
                } else {
                    AbTestStatus::Completed
                };
                test.status = test
                    .status
                    .transition_to(next)
                    .map_err(|e| status(409, &e.to_string()))?;
                if next == AbTestStatus::Completed {
                    test.completed_at = Some(now);
                }
                to_json(test)
            }
            (Method::Post, ["ab-tests", id, "metrics"]) => {
                let metric: RecordMetric = body(request)?;
                let test = find_mut(&mut state.ab_tests, |t| t.id == *id, "A/B test", id)?;
                if !test.status.accepts_metrics() {
                    return Err(status(409, "metrics can only be recorded while a test is running"));
                }
                let variant = find_mut(
                    &mut test.variants,
                    |v| v.id == metric.variant_id,
                    "variant",
                    &metric.variant_id,
                )?;
                match metric.metric {
                    AbMetric::Impression => variant.impressions += 1,
                    AbMetric::Conversion if variant.conversions >= variant.impressions => {
                        return Err(status(422, "conversion recorded without a matching impression"));
                    }
                    AbMetric::Conversion => variant.conversions += 1,
                }
                to_json(test)
            }

            // templates
            (Method::Get, ["templates"]) => {
                let category = parse_param::<TemplateCategory>(request, "category")?;
                let templates: Vec<_> = state
                    .templates
                    .iter()
                    .filter(|t| category.is_none_or(|c| t.category == c))
                    .collect();
                to_json(&templates)
            }
            (Method::Post, ["templates"]) => {
                let new: NewTemplate = body(request)?;
                to_json(&state.insert_template(new))
            }
            (Method::Get, ["templates", id]) => to_json(find(&state.templates, |t| t.id == *id, "template", id)?),
            (Method::Put, ["templates", id]) => {
                let update: TemplateUpdate = body(request)?;
                let template = find_mut(&mut state.templates, |t| t.id == *id, "template", id)?;
                if let Some(name) = update.name {
                    template.name = name;
                }
                if let Some(description) = update.description {
                    template.description = description;
                }
                if let Some(content) = update.content {
                    template.content = content;
                }
                if let Some(category) = update.category {
                    template.category = category;
                }
                to_json(template)
            }
            (Method::Delete, ["templates", id]) => {
                remove(&mut state.templates, |t| t.id == *id, "template", id)
            }

            // saved projects
            (Method::Get, ["saved-projects"]) => {
                let status = parse_param::<ProjectStatus>(request, "status")?;
                let projects: Vec<_> = state
                    .saved_projects
                    .iter()
                    .filter(|p| status.is_none_or(|s| p.status == s))
                    .collect();
                to_json(&projects)
            }
            (Method::Post, ["saved-projects"]) => {
                let new: NewSavedProject = body(request)?;
                to_json(&state.insert_saved_project(new, now))
            }
            (Method::Get, ["saved-projects", id]) => {
                to_json(find(&state.saved_projects, |p| p.id == *id, "saved project", id)?)
            }
            (Method::Put, ["saved-projects", id]) => {
                let update: SavedProjectUpdate = body(request)?;
                let project =
                    find_mut(&mut state.saved_projects, |p| p.id == *id, "saved project", id)?;
                if let Some(title) = update.title {
                    project.title = title;
                }
                if let Some(content) = update.content {
                    project.content = content;
                }
                if let Some(status) = update.status {
                    project.status = status;
                }
                if let Some(platform) = update.platform {
                    project.platform = platform;
                }
                if let Some(keywords) = update.keywords {
                    project.keywords = keywords;
                }
                project.updated_at = now;
                to_json(project)
            }
            (Method::Delete, ["saved-projects", id]) => {
                remove(&mut state.saved_projects, |p| p.id == *id, "saved project", id)
            }

            // settings
            (Method::Get, ["settings", "account"]) => to_json(&state.account),
            (Method::Put, ["settings", "account"]) => {
                let update: AccountSettings = body(request)?;
                state.user.name.clone_from(&update.name);
                state.user.email.clone_from(&update.email);
                state.account = update;
                to_json(&state.account)
            }
            (Method::Get, ["settings", "appearance"]) => to_json(&state.appearance),
            (Method::Put, ["settings", "appearance"]) => {
                let update: AppearanceUpdate = body(request)?;
                let appearance = &mut state.appearance;
                if let Some(theme) = update.theme {
                    appearance.theme = theme;
                }
                if let Some(accent) = update.accent_color {
                    appearance.accent_color = accent;
                }
                if let Some(compact) = update.compact_mode {
                    appearance.compact_mode = compact;
                }
                if let Some(size) = update.font_size {
                    appearance.font_size = size;
                }
                to_json(&state.appearance)
            }
            (Method::Post, ["settings", "password"]) => {
                let change: PasswordChange = body(request)?;
                if change.current_password != state.password {
                    return Err(status(400, "Current password is incorrect"));
                }
                state.password = change.new_password;
                Ok(Value::Null)
            }

            // analytics
            (Method::Get, ["analytics", "performance"]) => {
                let range = range_param(request)?;
                to_json(&range.mock_series(now.date_naive()))
            }
            (Method::Get, ["analytics", "overview"]) => {
                let range = range_param(request)?;
                let points = range.mock_series(now.date_naive());
                to_json(&AnalyticsOverview::from_points(range, &points))
            }

            // SEO
            (Method::Post, ["seo", "analyze"]) => {
                let req: SeoRequest = body(request)?;
                to_json(&seo::analyze(&req.content, &req.keywords))
            }

            _ => Err(ApiError::NotFound(request.path.clone())),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        {
            let mut log = lock(&self.log);
            if log.len() == REQUEST_LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(request.clone());
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(error) = self.injected_failure(&request.path) {
            return Err(error);
        }
        tracing::debug!(method = %request.method, path = %request.path, "mock request");
        self.route(&request)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn status(status: u16, message: &str) -> ApiError {
    ApiError::Api {
        status,
        message: message.to_string(),
    }
}

fn body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiError> {
    let value = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| status(422, &format!("invalid request body: {e}")))
}

fn to_json(value: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

fn find<'a, T>(
    items: &'a [T],
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> Result<&'a T, ApiError> {
    items
        .iter()
        .find(|item| matches(item))
        .ok_or_else(|| ApiError::NotFound(format!("{kind} {id}")))
}

fn find_mut<'a, T>(
    items: &'a mut [T],
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> Result<&'a mut T, ApiError> {
    items
        .iter_mut()
        .find(|item| matches(item))
        .ok_or_else(|| ApiError::NotFound(format!("{kind} {id}")))
}

fn remove<T>(
    items: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    kind: &str,
    id: &str,
) -> Result<Value, ApiError> {
    let before = items.len();
    items.retain(|item| !matches(item));
    if items.len() == before {
        return Err(ApiError::NotFound(format!("{kind} {id}")));
    }
    Ok(Value::Null)
}

fn parse_param<T: FromStr>(request: &ApiRequest, name: &str) -> Result<Option<T>, ApiError>
where
    T::Err: std::fmt::Display,
{
    request
        .query_param(name)
        .map(|raw| raw.parse::<T>().map_err(|e| status(400, &e.to_string())))
        .transpose()
}

fn range_param(request: &ApiRequest) -> Result<PerformanceRange, ApiError> {
    Ok(parse_param::<PerformanceRange>(request, "range")?.unwrap_or_default())
}

fn enhance(request: &EnhanceRequest) -> GeneratedText {
    let collapsed = request.content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let mut text: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    let closing = match request.goal.trim().to_lowercase().as_str() {
        "seo" => "Learn more about how this helps your search ranking.",
        "engagement" => "What do you think? Share your take in the comments.",
        "conversion" => "Start your free trial today.",
        _ => "Read on to find out more.",
    };
    GeneratedText {
        content: format!("{text} {closing}").trim().to_string(),
    }
}

fn generate(request: &GenerateRequest) -> GeneratedText {
    use quill_core::enums::Platform;

    let topic = request.prompt.trim();
    let hashtags = request
        .keywords
        .iter()
        .map(|k| format!("#{}", k.split_whitespace().collect::<String>()))
        .collect::<Vec<_>>()
        .join(" ");
    let content = match request.platform {
        Platform::Twitter => {
            let mut post = format!("{topic}: here is what you need to know. {hashtags}");
            if post.chars().count() > 280 {
                post = post.chars().take(277).collect::<String>() + "...";
            }
            post
        }
        Platform::Linkedin | Platform::Facebook | Platform::Instagram => format!(
            "{topic}\n\nWe have been thinking a lot about this lately. Here are three takeaways for your team.\n\n{hashtags}"
        ),
        Platform::Email => format!(
            "Subject: {topic}\n\nHi there,\n\nA quick note about {topic}. Reply to this email with your questions.\n"
        ),
        Platform::Blog | Platform::Wordpress => format!(
            "# {topic}\n\n## Why it matters\n\n## How to get started\n\n## Next steps\n"
        ),
    };
    GeneratedText {
        content: content.trim_end().to_string(),
    }
}
