use super::*;
use crate::markup::NavView;

pub(crate) const COLLAPSE_BELOW_PX: u32 = 768;
pub(crate) const RESIZE_DEBOUNCE_MS: i64 = 250;

const TOGGLE_LABEL: &str = "☰";
const TOGGLE_STYLE: &str =
    "display: none; background: none; border: none; font-size: 1.5rem; cursor: pointer; padding: 0.5rem;";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NavLayout {
    #[default]
    Expanded,
    Collapsed,
}

impl NavLayout {
    pub(crate) fn for_width(width: u32) -> Self {
        if width < COLLAPSE_BELOW_PX {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavTransition {
    Collapse,
    Expand,
    Keep,
}

/// Layout change needed when the viewport is `width` pixels wide.
pub(crate) fn transition(current: NavLayout, width: u32) -> NavTransition {
    match (current, NavLayout::for_width(width)) {
        (NavLayout::Expanded, NavLayout::Collapsed) => NavTransition::Collapse,
        (NavLayout::Collapsed, NavLayout::Expanded) => NavTransition::Expand,
        _ => NavTransition::Keep,
    }
}

/// Menu display after the toggle is clicked.
pub(crate) fn toggled_menu_display(current: &str) -> &'static str {
    if current == "none" { "flex" } else { "none" }
}

#[derive(Debug, Default)]
pub(crate) struct NavState {
    pub(crate) toggle: Option<NodeId>,
    pub(crate) layout: NavLayout,
}

impl Page {
    /// Brings the menu and its toggle in line with the current viewport width.
    pub(crate) fn apply_nav_layout(&mut self) -> Result<()> {
        let Some(view) = NavView::resolve(&self.dom)? else {
            return Ok(());
        };
        match transition(self.behaviors.nav.layout, self.viewport_width) {
            NavTransition::Keep => {}
            NavTransition::Collapse => {
                let Some(toggle) = self.ensure_nav_toggle(view)? else {
                    return Ok(());
                };
                self.dom.style_set(toggle, "display", "block")?;
                self.dom.style_set(view.menu, "display", "none")?;
                self.behaviors.nav.layout = NavLayout::Collapsed;
                self.trace_line(format!("[nav] layout collapsed width={}", self.viewport_width));
            }
            NavTransition::Expand => {
                if let Some(toggle) = self.behaviors.nav.toggle {
                    self.dom.style_set(toggle, "display", "none")?;
                }
                self.dom.style_set(view.menu, "display", "")?;
                self.behaviors.nav.layout = NavLayout::Expanded;
                self.trace_line(format!("[nav] layout expanded width={}", self.viewport_width));
            }
        }
        Ok(())
    }

    fn ensure_nav_toggle(&mut self, view: NavView) -> Result<Option<NodeId>> {
        if let Some(toggle) = self.behaviors.nav.toggle {
            return Ok(Some(toggle));
        }
        let Some(brand) = view.brand else {
            return Ok(None);
        };
        let toggle = self.dom.create_detached_element("button");
        self.dom.set_text_content(toggle, TOGGLE_LABEL)?;
        self.dom.class_add(toggle, markup::MENU_TOGGLE_CLASS)?;
        self.dom.set_attr(toggle, "style", TOGGLE_STYLE)?;
        self.dom.append_child(brand, toggle)?;
        self.add_listener(
            ListenerTarget::Node(toggle),
            "click",
            Handler::ToggleNavMenu { menu: view.menu },
        );
        self.behaviors.nav.toggle = Some(toggle);
        Ok(Some(toggle))
    }

    pub(crate) fn toggle_nav_menu(&mut self, menu: NodeId) -> Result<()> {
        let next = toggled_menu_display(&self.dom.style_get(menu, "display"));
        self.dom.style_set(menu, "display", next)
    }

    pub(crate) fn debounce_resize(&mut self) {
        if let Some(timer) = self.behaviors.resize_timer.take() {
            self.clear_timer(timer);
        }
        let timer = self.schedule_timeout(TimerCallback::ReevaluateNav, RESIZE_DEBOUNCE_MS);
        self.behaviors.resize_timer = Some(timer);
    }
}
