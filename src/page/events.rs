use super::*;
use crate::behaviors::Handler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerTarget {
    Window,
    /// An element, or the document when it is the DOM root.
    Node(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct Listener {
    pub(crate) target: ListenerTarget,
    pub(crate) event_type: &'static str,
    pub(crate) handler: Handler,
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: ListenerTarget,
    pub(crate) current_target: ListenerTarget,
    pub(crate) default_prevented: bool,
    pub(crate) key: Option<String>,
    pub(crate) modifiers: KeyModifiers,
    pub(crate) submitter: Option<NodeId>,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: ListenerTarget) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            key: None,
            modifiers: KeyModifiers::default(),
            submitter: None,
        }
    }

    pub(crate) fn target_node(&self) -> Option<NodeId> {
        match self.target {
            ListenerTarget::Node(node) => Some(node),
            ListenerTarget::Window => None,
        }
    }

    pub(crate) fn current_node(&self) -> Option<NodeId> {
        match self.current_target {
            ListenerTarget::Node(node) => Some(node),
            ListenerTarget::Window => None,
        }
    }
}

impl Page {
    pub(crate) fn add_listener(
        &mut self,
        target: ListenerTarget,
        event_type: &'static str,
        handler: Handler,
    ) {
        self.listeners.push(Listener {
            target,
            event_type,
            handler,
        });
    }

    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        self.dispatch(EventState::new(event_type, ListenerTarget::Node(target)))
    }

    pub(crate) fn dispatch(&mut self, event: EventState) -> Result<EventState> {
        stacker::grow(32 * 1024 * 1024, || self.dispatch_impl(event))
    }

    fn dispatch_impl(&mut self, mut event: EventState) -> Result<EventState> {
        let target_label = self.listener_target_label(event.target);
        self.trace_event_line(format!(
            "[event] dispatch {} target={target_label}",
            event.event_type
        ));

        for current in self.propagation_path(event.target) {
            event.current_target = current;
            let handlers = self
                .listeners
                .iter()
                .filter(|listener| {
                    listener.target == current && listener.event_type == event.event_type
                })
                .map(|listener| listener.handler.clone())
                .collect::<Vec<_>>();
            if handlers.is_empty() {
                continue;
            }
            let current_label = self.listener_target_label(current);
            for handler in handlers {
                self.trace_event_line(format!(
                    "[event] {} target={target_label} current={current_label} handler={}",
                    event.event_type,
                    handler.label()
                ));
                self.run_handler(&handler, &mut event)?;
            }
        }

        self.trace_event_line(format!(
            "[event] done {} target={target_label} default_prevented={}",
            event.event_type, event.default_prevented
        ));
        Ok(event)
    }

    /// Target first, then each ancestor, then the window.
    fn propagation_path(&self, target: ListenerTarget) -> Vec<ListenerTarget> {
        let ListenerTarget::Node(node) = target else {
            return vec![ListenerTarget::Window];
        };
        let mut path = vec![target];
        let mut cursor = self.dom.parent(node);
        while let Some(parent) = cursor {
            path.push(ListenerTarget::Node(parent));
            cursor = self.dom.parent(parent);
        }
        if self.dom.is_connected(node) {
            path.push(ListenerTarget::Window);
        }
        path
    }

    fn listener_target_label(&self, target: ListenerTarget) -> String {
        match target {
            ListenerTarget::Window => "window".to_string(),
            ListenerTarget::Node(node) if node == self.dom.root => "document".to_string(),
            ListenerTarget::Node(node) => self.node_label(node),
        }
    }

    pub(crate) fn node_label(&self, node: NodeId) -> String {
        let Some(element) = self.dom.element(node) else {
            return format!("#node{}", node.0);
        };
        let mut label = element.tag_name.clone();
        if let Some(id) = element.attr("id").filter(|id| !id.is_empty()) {
            label.push('#');
            label.push_str(id);
        } else if let Some(name) = element.attr("name").filter(|name| !name.is_empty()) {
            label.push_str(&format!("[name={name}]"));
        } else if let Some(class) = dom::class_tokens(element.attr("class")).first() {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    /// Activation of `target`: the click event, then its default action.
    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if forms::is_form_control(&self.dom, target) && self.dom.disabled(target) {
            return Ok(());
        }

        let checkable = forms::is_checkable_input(&self.dom, target);
        let was_checked = self.dom.checked(target);
        if checkable {
            let is_radio = forms::input_type(&self.dom, target).as_deref() == Some("radio");
            self.set_checked_state(target, if is_radio { true } else { !was_checked })?;
        }

        let event = self.dispatch_event(target, "click")?;
        if event.default_prevented {
            if checkable {
                self.set_checked_state(target, was_checked)?;
            }
            return Ok(());
        }

        if checkable {
            if self.dom.checked(target) != was_checked {
                self.dispatch_event(target, "input")?;
                self.dispatch_event(target, "change")?;
            }
            return Ok(());
        }

        if let Some(anchor) = self.dom.closest(target, "a[href]")? {
            let href = self.dom.attr(anchor, "href").unwrap_or_default();
            self.navigate(LocationNavigationKind::LinkClick, &href);
            return Ok(());
        }

        if forms::is_submit_control(&self.dom, target) {
            if let Some(form) = forms::form_of(&self.dom, target) {
                self.request_submit(form, Some(target))?;
            }
        }
        Ok(())
    }

    /// Checks a box or radio, unchecking the other radios of its group.
    pub(crate) fn set_checked_state(&mut self, target: NodeId, checked: bool) -> Result<()> {
        if checked && forms::input_type(&self.dom, target).as_deref() == Some("radio") {
            if let Some(name) = self.dom.attr(target, "name").filter(|name| !name.is_empty()) {
                let scope = forms::form_of(&self.dom, target).unwrap_or(self.dom.root);
                for other in self.dom.query_selector_all_from(scope, "input[type='radio']")? {
                    if other != target && self.dom.attr(other, "name").as_deref() == Some(&name) {
                        self.dom.set_checked(other, false)?;
                    }
                }
            }
        }
        self.dom.set_checked(target, checked)
    }

    /// Fires `submit` on `form` and, unless a listener prevents it, starts the submission.
    pub(crate) fn request_submit(&mut self, form: NodeId, submitter: Option<NodeId>) -> Result<()> {
        let mut event = EventState::new("submit", ListenerTarget::Node(form));
        event.submitter = submitter;
        let event = self.dispatch(event)?;
        if event.default_prevented {
            self.trace_line(format!("[nav] submit prevented form={}", self.node_label(form)));
            return Ok(());
        }
        self.begin_submission(form, event.submitter)
    }

    fn begin_submission(&mut self, form: NodeId, submitter: Option<NodeId>) -> Result<()> {
        let method = self
            .dom
            .attr(form, "method")
            .filter(|method| method.eq_ignore_ascii_case("post"))
            .map_or("GET", |_| "POST")
            .to_string();
        let action = self
            .dom
            .attr(form, "action")
            .filter(|action| !action.trim().is_empty())
            .unwrap_or_else(|| self.location.clone());
        let action_url = resolve_url(&self.location, &action);

        let mut entries = forms::form_data_entries(&self.dom, form)?;
        if let Some(submitter) = submitter {
            if let Some(name) = self.dom.attr(submitter, "name").filter(|name| !name.is_empty()) {
                entries.push((name, self.dom.attr(submitter, "value").unwrap_or_default()));
            }
        }
        let encoded = forms::encode_form_urlencoded(&entries);

        let submission = if method == "POST" {
            PendingSubmission {
                method,
                url: action_url,
                body: Some(encoded),
            }
        } else {
            let base = action_url
                .split(['?', '#'])
                .next()
                .unwrap_or(action_url.as_str());
            PendingSubmission {
                method,
                url: format!("{base}?{encoded}"),
                body: None,
            }
        };
        self.trace_line(format!(
            "[nav] submit method={} url={}",
            submission.method, submission.url
        ));
        self.platform_mocks.pending_submission = Some(submission);
        Ok(())
    }

    /// Reports how the pending submission ended and clears the loading state.
    ///
    /// A completed submission navigates to its URL. Returns false when no
    /// submission was pending.
    pub fn settle_submission(&mut self, outcome: SubmissionOutcome) -> Result<bool> {
        let pending = self.platform_mocks.pending_submission.take();
        self.restore_loading_buttons()?;
        let Some(pending) = pending else {
            return Ok(false);
        };
        match outcome {
            SubmissionOutcome::Completed => {
                self.navigate(LocationNavigationKind::FormSubmit, &pending.url);
            }
            SubmissionOutcome::Failed => {
                self.trace_line(format!("[nav] submit failed url={}", pending.url));
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_forms_submit_as_query_strings() -> Result<()> {
        let mut page = Page::from_html_with_config(
            r#"<form id="f" action="list/?page=2">
                 <input name="q" value="sea view">
                 <input type="checkbox" name="pets" id="pets">
                 <button type="submit" name="sort" value="price">Go</button>
               </form>"#,
            PageConfig::default().with_url("http://localhost/apartments/"),
        )?;
        page.click("#pets")?;
        page.click("button")?;
        assert_eq!(
            page.pending_submission().map(|s| s.url.as_str()),
            Some("http://localhost/apartments/list/?q=sea+view&pets=on&sort=price")
        );
        assert_eq!(page.pending_submission().and_then(|s| s.body.clone()), None);
        Ok(())
    }

    #[test]
    fn radios_in_a_group_are_exclusive() -> Result<()> {
        let mut page = Page::from_html(
            r#"<form><input type="radio" name="term" id="short" checked>
                     <input type="radio" name="term" id="long"></form>"#,
        )?;
        page.click("#long")?;
        assert!(!page.dom.checked(page.select_one("#short")?));
        assert!(page.dom.checked(page.select_one("#long")?));
        page.click("#long")?;
        assert!(page.dom.checked(page.select_one("#long")?));
        Ok(())
    }

    #[test]
    fn disabled_controls_ignore_clicks() -> Result<()> {
        let mut page = Page::from_html(
            r#"<form action="/x/"><button type="submit" disabled>Save</button></form>"#,
        )?;
        page.click("button")?;
        assert!(page.pending_submission().is_none());
        Ok(())
    }

    #[test]
    fn events_bubble_to_the_document_and_window() -> Result<()> {
        let mut page = Page::from_html(r#"<div><p id="leaf">x</p></div>"#)?;
        let leaf = page.select_one("#leaf")?;
        let path = page.propagation_path(ListenerTarget::Node(leaf));
        assert_eq!(path.first(), Some(&ListenerTarget::Node(leaf)));
        assert_eq!(path[path.len() - 2], ListenerTarget::Node(page.dom.root));
        assert_eq!(path.last(), Some(&ListenerTarget::Window));
        Ok(())
    }
}
