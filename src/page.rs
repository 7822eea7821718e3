use super::*;
use crate::behaviors::BehaviorState;
use crate::platform::{PlatformMockState, TraceState, resolve_url};

mod actions;
mod assertions;
mod events;
mod mocks;
mod timers;
mod trace;

pub(crate) use events::{EventState, Listener, ListenerTarget};

/// 2026-01-01T00:00:00Z
pub const DEFAULT_EPOCH_MS: i64 = 1_767_225_600_000;

/// Settings that must be known before the behaviors initialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub url: String,
    pub viewport_width: u32,
    /// Wall-clock time at virtual time zero, used for "today".
    pub epoch_ms: i64,
    pub timer_step_limit: usize,
    pub trace: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost/".to_string(),
            viewport_width: 1024,
            epoch_ms: DEFAULT_EPOCH_MS,
            timer_step_limit: 10_000,
            trace: false,
        }
    }
}

impl PageConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn with_epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.epoch_ms = epoch_ms;
        self
    }

    pub fn with_timer_step_limit(mut self, max_steps: usize) -> Self {
        self.timer_step_limit = max_steps;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }
}

/// A loaded page with its behaviors installed.
///
/// Everything runs on the caller's thread: user actions dispatch events
/// synchronously, and timers only fire when the virtual clock is advanced.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) source_html: String,
    pub(crate) config: PageConfig,
    pub(crate) location: String,
    pub(crate) viewport_width: u32,
    pub(crate) listeners: Vec<Listener>,
    pub(crate) scheduler: SchedulerState,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) storage: Box<dyn StateStore>,
    pub(crate) trace_state: TraceState,
    pub(crate) behaviors: BehaviorState,
    // Fields typed into since their last `change`.
    pub(crate) dirty_fields: Vec<NodeId>,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, PageConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: PageConfig) -> Result<Self> {
        Self::from_html_with_storage(html, config, Box::new(MemoryStorage::new()))
    }

    pub fn from_html_with_storage(
        html: &str,
        config: PageConfig,
        storage: Box<dyn StateStore>,
    ) -> Result<Self> {
        if config.timer_step_limit == 0 {
            return Err(Error::Runtime(
                "timer_step_limit requires at least 1 step".into(),
            ));
        }
        let dom = html::parse_html(html)?;
        let mut page = Self {
            dom,
            source_html: html.to_string(),
            location: config.url.clone(),
            viewport_width: config.viewport_width,
            listeners: Vec::new(),
            scheduler: SchedulerState {
                timer_step_limit: config.timer_step_limit,
                ..SchedulerState::default()
            },
            platform_mocks: PlatformMockState::default(),
            storage,
            trace_state: TraceState {
                enabled: config.trace,
                ..TraceState::default()
            },
            behaviors: BehaviorState::default(),
            dirty_fields: Vec::new(),
            config,
        };
        page.trace_line(format!("[nav] load url={}", page.location));
        app::initialize(&mut page)?;
        Ok(page)
    }

    /// Loads the original markup again at the current location.
    ///
    /// Storage, the clock, dialog queues and recorded messages carry over;
    /// timers, listeners and behavior state start fresh.
    pub fn reload(&mut self) -> Result<()> {
        let html = self.source_html.clone();
        self.load_html(&html)
    }

    /// Replaces the document with new server markup, as after a navigation.
    pub fn load_html(&mut self, html: &str) -> Result<()> {
        self.dom = html::parse_html(html)?;
        self.source_html = html.to_string();
        self.listeners.clear();
        self.scheduler.task_queue.clear();
        self.behaviors = BehaviorState::default();
        self.dirty_fields.clear();
        self.platform_mocks.pending_submission = None;
        self.trace_line(format!("[nav] load url={}", self.location));
        app::initialize(self)
    }

    /// Hands back the client storage, e.g. to build the next page with it.
    pub fn into_storage(self) -> Box<dyn StateStore> {
        self.storage
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Milliseconds since the Unix epoch at the current virtual time.
    pub fn wall_clock_ms(&self) -> i64 {
        self.config.epoch_ms.saturating_add(self.scheduler.now_ms)
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    /// Inline style property value, empty when unset.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.style_get(target, property))
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn storage_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key)
    }

    pub fn set_storage_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value)?;
        self.trace_line(format!("[storage] set {key}={value}"));
        Ok(())
    }

    pub fn remove_storage_item(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key)?;
        self.trace_line(format!("[storage] remove {key}"));
        Ok(())
    }

    pub fn pending_submission(&self) -> Option<&PendingSubmission> {
        self.platform_mocks.pending_submission.as_ref()
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    /// Records a navigation to `href` (resolved against the current location).
    pub(crate) fn navigate(&mut self, kind: LocationNavigationKind, href: &str) {
        let from = self.location.clone();
        let to = resolve_url(&from, href);
        self.trace_line(format!("[nav] {kind:?} from={from} to={to}"));
        self.location = to.clone();
        self.platform_mocks
            .location_navigations
            .push(LocationNavigation { kind, from, to });
    }
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_overrides_defaults() {
        let config = PageConfig::default()
            .with_url("http://localhost/apartments/")
            .with_viewport_width(375)
            .with_trace(true);
        assert_eq!(config.url, "http://localhost/apartments/");
        assert_eq!(config.viewport_width, 375);
        assert_eq!(config.epoch_ms, DEFAULT_EPOCH_MS);
        assert_eq!(config.timer_step_limit, 10_000);
        assert!(config.trace);
    }

    #[test]
    fn zero_step_limit_is_rejected_up_front() {
        let err = Page::from_html_with_config("<p></p>", PageConfig::default().with_timer_step_limit(0));
        assert!(matches!(err, Err(Error::Runtime(_))));
    }

    #[test]
    fn truncation_marks_cut_text() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("₱₱₱₱", 2), "₱₱...");
    }

    #[test]
    fn reload_keeps_storage_and_resets_listeners() -> Result<()> {
        let mut page = Page::from_html(r#"<form class="filter-form"><input name="search"></form>"#)?;
        page.type_text("input[name='search']", "loft")?;
        page.submit(".filter-form")?;
        page.reload()?;
        page.assert_value("input[name='search']", "loft")?;
        assert_eq!(page.listeners.iter().filter(|l| l.event_type == "submit").count(), 3);
        Ok(())
    }
}
