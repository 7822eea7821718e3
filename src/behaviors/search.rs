use super::*;
use unicode_normalization::UnicodeNormalization;

pub(crate) const SEARCH_DEBOUNCE_MS: i64 = 300;

/// Case-folded form used on both sides of the comparison.
pub(crate) fn normalize_for_search(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

pub(crate) fn card_matches(card_text: &str, term: &str) -> bool {
    normalize_for_search(card_text).contains(&normalize_for_search(term))
}

#[derive(Debug)]
pub(crate) struct SearchState {
    pub(crate) view: SearchView,
    pub(crate) timer: Option<i64>,
}

impl Page {
    pub(crate) fn install_apartment_search(&mut self) -> Result<()> {
        let Some(view) = SearchView::resolve(&self.dom)? else {
            return Ok(());
        };
        self.add_listener(
            ListenerTarget::Node(view.input),
            "input",
            Handler::ScheduleSearch,
        );
        self.behaviors.search = Some(SearchState { view, timer: None });
        Ok(())
    }

    pub(crate) fn schedule_search(&mut self) {
        let Some((input, previous)) = self
            .behaviors
            .search
            .as_mut()
            .map(|search| (search.view.input, search.timer.take()))
        else {
            return;
        };
        if let Some(timer) = previous {
            self.clear_timer(timer);
        }
        let timer = self.schedule_timeout(TimerCallback::ApplySearch { input }, SEARCH_DEBOUNCE_MS);
        if let Some(search) = self.behaviors.search.as_mut() {
            search.timer = Some(timer);
        }
    }

    pub(crate) fn apply_search(&mut self, input: NodeId) -> Result<()> {
        let Some(search) = self.behaviors.search.as_mut() else {
            return Ok(());
        };
        search.timer = None;
        let cards = search.view.cards.clone();
        let term = self.dom.value(input)?;
        for card in cards {
            let display = if card_matches(&self.dom.text_content(card), &term) {
                ""
            } else {
                "none"
            };
            self.dom.style_set(card, "display", display)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <input name="search" type="search">
        <div class="apartment-grid">
          <div class="apartment-card" id="a"><h3>Skyline Loft</h3><p>Makati City</p></div>
          <div class="apartment-card" id="b"><h3>Garden Studio</h3><p>Quezon City</p></div>
          <div class="apartment-card" id="c"><h3>Ñino Residences</h3><p>Pasig</p></div>
        </div>"#;

    #[test]
    fn matching_ignores_case_and_composition() {
        assert!(card_matches("Skyline Loft", "LOFT"));
        assert!(card_matches("Ñino Residences", "n\u{303}ino"));
        assert!(card_matches("anything", ""));
        assert!(!card_matches("Garden Studio", "loft"));
    }

    #[test]
    fn cards_filter_after_the_debounce_window() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.type_text("input[name='search']", "city")?;
        page.advance_time(299)?;
        page.assert_visible("#c")?;

        page.advance_time(1)?;
        page.assert_visible("#a")?;
        page.assert_visible("#b")?;
        page.assert_hidden("#c")?;
        Ok(())
    }

    #[test]
    fn rapid_typing_runs_one_search_with_the_final_term() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.type_text("input[name='search']", "gar")?;
        page.advance_time(100)?;
        page.type_text("input[name='search']", "sky")?;
        assert_eq!(page.pending_timers().len(), 1);
        page.flush()?;
        page.assert_visible("#a")?;
        page.assert_hidden("#b")?;

        page.type_text("input[name='search']", "")?;
        page.flush()?;
        page.assert_visible("#b")?;
        assert_eq!(page.attr("#b", "style")?, None);
        Ok(())
    }

    #[test]
    fn no_cards_means_no_search() -> Result<()> {
        let mut page = Page::from_html(r#"<input name="search">"#)?;
        page.type_text("input[name='search']", "x")?;
        assert!(page.pending_timers().is_empty());
        Ok(())
    }
}
