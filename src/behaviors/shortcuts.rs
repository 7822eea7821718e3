use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shortcut {
    /// Ctrl/Cmd+B: open the reservation form.
    Book,
    /// Escape: follow the page's back button.
    Back,
}

pub(crate) fn shortcut_for(key: &str, modifiers: KeyModifiers) -> Option<Shortcut> {
    if (modifiers.ctrl || modifiers.meta) && key == "b" {
        Some(Shortcut::Book)
    } else if key == "Escape" {
        Some(Shortcut::Back)
    } else {
        None
    }
}

impl Page {
    pub(crate) fn run_keyboard_shortcut(&mut self, event: &mut EventState) -> Result<()> {
        let Some(key) = event.key.as_deref() else {
            return Ok(());
        };
        match shortcut_for(key, event.modifiers) {
            Some(Shortcut::Book) => {
                event.default_prevented = true;
                if let Some(link) = self.dom.query_selector(markup::BOOKING_LINK)? {
                    let href = self.dom.attr(link, "href").unwrap_or_default();
                    self.navigate(LocationNavigationKind::HrefSet, &href);
                }
            }
            Some(Shortcut::Back) => {
                if let Some(button) = self.dom.query_selector(markup::BACK_BUTTON)? {
                    if self.dom.text_content(button).contains("Back") {
                        self.click_node(button)?;
                    }
                }
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<header>
        <a class="btn btn-outline" href="/apartments/">← Back to list</a>
        <a class="btn" href="/reservations/reservation/create/?apartment=3">Book this unit</a>
    </header>"#;

    #[test]
    fn key_bindings() {
        assert_eq!(shortcut_for("b", KeyModifiers::ctrl()), Some(Shortcut::Book));
        assert_eq!(shortcut_for("b", KeyModifiers::meta()), Some(Shortcut::Book));
        assert_eq!(shortcut_for("b", KeyModifiers::default()), None);
        assert_eq!(shortcut_for("B", KeyModifiers::ctrl()), None);
        assert_eq!(shortcut_for("Escape", KeyModifiers::default()), Some(Shortcut::Back));
    }

    #[test]
    fn ctrl_b_opens_the_booking_link() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.press_key_with("b", KeyModifiers::ctrl())?;
        assert_eq!(
            page.take_location_navigations(),
            vec![LocationNavigation {
                kind: LocationNavigationKind::HrefSet,
                from: "http://localhost/".to_string(),
                to: "http://localhost/reservations/reservation/create/?apartment=3".to_string(),
            }]
        );
        Ok(())
    }

    #[test]
    fn escape_clicks_the_back_button() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.press_key("Escape")?;
        assert_eq!(page.location(), "http://localhost/apartments/");
        Ok(())
    }

    #[test]
    fn escape_ignores_outline_buttons_without_back() -> Result<()> {
        let mut page = Page::from_html(r#"<a class="btn-outline" href="/x/">Cancel</a>"#)?;
        page.press_key("Escape")?;
        page.press_key_with("b", KeyModifiers::meta())?;
        assert!(page.take_location_navigations().is_empty());
        Ok(())
    }
}
