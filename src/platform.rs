use super::*;
use std::collections::BTreeMap;

/// Client storage key holding the persisted filter set.
pub const FILTER_STORAGE_KEY: &str = "apartmentFilters";

/// Key/value client storage (the `localStorage` seam).
///
/// The page only talks to storage through this trait, so callers can hand in
/// a pre-populated store, share one across page loads, or plug in their own.
pub trait StateStore: fmt::Debug {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StateStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub last_modified: i64,
}

impl MockFile {
    /// A file named after the last path segment of `name`, typed by extension.
    pub fn new(name: &str) -> Self {
        let name = name.rsplit(['/', '\\']).next().unwrap_or(name).to_string();
        let mime_type = mime_type_for(&name).to_string();
        Self {
            name,
            mime_type,
            bytes: Vec::new(),
            last_modified: 0,
        }
    }

    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = bytes.into();
        self
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = mime_type.to_string();
        self
    }
}

fn mime_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNavigationKind {
    /// Default action of an activated `<a href>`.
    LinkClick,
    /// `location.href` assigned by a behavior.
    HrefSet,
    /// A form submission that completed.
    FormSubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub kind: LocationNavigationKind,
    pub from: String,
    pub to: String,
}

/// A form submission that proceeded and is waiting for the host to settle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Completed,
    Failed,
}

#[derive(Debug, Default)]
pub(crate) struct PlatformMockState {
    pub(crate) alert_messages: Vec<String>,
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) console_messages: Vec<String>,
    pub(crate) location_navigations: Vec<LocationNavigation>,
    pub(crate) pending_submission: Option<PendingSubmission>,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

/// Resolves `href` against the document URL `base`.
pub(crate) fn resolve_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if has_scheme(href) {
        return href.to_string();
    }

    let (origin, rest) = split_origin(base);
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest.split_once('#').map(|(p, _)| p).unwrap_or(rest), None),
    };
    let path = if path.is_empty() { "/" } else { path };

    if href.is_empty() {
        return format!("{origin}{}", rest.split_once('#').map(|(p, _)| p).unwrap_or(rest));
    }
    if let Some(authority) = href.strip_prefix("//") {
        let scheme = base.split_once(':').map(|(s, _)| s).unwrap_or("http");
        return format!("{scheme}://{authority}");
    }
    if href.starts_with('#') {
        let query = query.map(|q| format!("?{}", q.split_once('#').map(|(q, _)| q).unwrap_or(q)));
        return format!("{origin}{path}{}{href}", query.unwrap_or_default());
    }
    if href.starts_with('?') {
        return format!("{origin}{path}{href}");
    }

    let (href_path, suffix) = match href.find(['?', '#']) {
        Some(pos) => (&href[..pos], &href[pos..]),
        None => (href, ""),
    };
    let joined = if href_path.starts_with('/') {
        href_path.to_string()
    } else {
        let base_dir = match path.rsplit_once('/') {
            Some((prefix, _)) => format!("{prefix}/"),
            None => "/".to_string(),
        };
        format!("{base_dir}{href_path}")
    };
    format!("{origin}{}{suffix}", normalize_pathname(&joined))
}

fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn split_origin(url: &str) -> (&str, &str) {
    let Some(scheme_end) = url.find("://") else {
        return ("", url);
    };
    let after = scheme_end + 3;
    match url[after..].find(['/', '?', '#']) {
        Some(pos) => url.split_at(after + pos),
        None => (url, ""),
    }
}

fn normalize_pathname(pathname: &str) -> String {
    let ends_with_slash = pathname.ends_with('/') && pathname.len() > 1;
    let mut parts = Vec::new();
    for segment in pathname.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(segment),
        }
    }
    let mut out = format!("/{}", parts.join("/"));
    if ends_with_slash && !out.ends_with('/') {
        out.push('/');
    }
    out
}
