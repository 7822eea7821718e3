use super::*;

pub(crate) const STARTUP_MESSAGE: &str = "🏢 Apartment Reservation System Initialized";
pub(crate) const INITIALIZED_MESSAGE: &str = "✅ All components initialized successfully!";
pub(crate) const READY_MESSAGE: &str = " Apartment Reservation System Ready! Press Ctrl+B to book.";

/// Installs every behavior on a freshly loaded document.
///
/// Behaviors run in a fixed order; a failure stops the ones after it, so a
/// page with corrupt stored filters keeps the behaviors installed before
/// filter persistence and nothing later. The page-wide listeners and the
/// ready message are installed either way and the failure is returned after.
pub(crate) fn initialize(page: &mut Page) -> Result<()> {
    let installed = install_behaviors(page);
    page.install_document_listeners()?;
    page.console_log(READY_MESSAGE);
    installed
}

fn install_behaviors(page: &mut Page) -> Result<()> {
    page.console_log(STARTUP_MESSAGE);

    page.install_alert_dismissal()?;
    page.install_form_validation()?;
    page.install_delete_confirmations()?;
    page.apply_nav_layout()?;
    page.install_reservation_calculator()?;
    page.install_image_preview()?;
    page.install_filter_persistence()?;
    page.install_apartment_search()?;
    if page.dom.query_selector(markup::DASHBOARD)?.is_some() {
        page.animate_dashboard_stats()?;
    }
    page.install_bedroom_autofill()?;
    page.install_date_validation()?;
    page.install_price_clamp()?;
    page.console_log(INITIALIZED_MESSAGE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_filters_stop_later_behaviors_but_keep_page_listeners() -> Result<()> {
        let html = r#"<div class="alert">Hi</div>
            <a href="/reservations/reservation/create/?apartment=2">Book</a>
            <form class="filter-form"><input name="search"></form>
            <div class="apartment-card">Loft</div>"#;
        let mut page = Page::from_html(html)?;
        page.take_console_messages();
        page.set_storage_item(FILTER_STORAGE_KEY, "{broken")?;

        assert!(matches!(page.reload(), Err(Error::Storage(_))));
        assert_eq!(
            page.take_console_messages(),
            vec![STARTUP_MESSAGE.to_string(), READY_MESSAGE.to_string()]
        );
        assert_eq!(page.pending_timers().len(), 1);
        assert!(page.behaviors.search.is_none());

        page.press_key_with("b", KeyModifiers::ctrl())?;
        let navigations = page.take_location_navigations();
        assert_eq!(navigations.len(), 1);
        assert_eq!(
            navigations[0].to,
            "http://localhost/reservations/reservation/create/?apartment=2"
        );
        Ok(())
    }

    #[test]
    fn messages_are_logged_in_load_order() -> Result<()> {
        let mut page = Page::from_html("<p>Empty</p>")?;
        assert_eq!(
            page.take_console_messages(),
            vec![
                STARTUP_MESSAGE.to_string(),
                INITIALIZED_MESSAGE.to_string(),
                READY_MESSAGE.to_string(),
            ]
        );
        Ok(())
    }
}
