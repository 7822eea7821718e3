use super::*;
use fancy_regex::Regex;
use std::sync::LazyLock;

const PRICE_PATTERN: &str = r"₱([0-9,]+\.?[0-9]*)";
static PRICE_REGEX: LazyLock<std::result::Result<Regex, String>> =
    LazyLock::new(|| Regex::new(PRICE_PATTERN).map_err(|err| err.to_string()));

const PREVIEW_STYLE: &str =
    "margin-top: 1rem; padding: 1rem; background-color: #f3f4f6; border-radius: 0.5rem;";

/// Monthly rate, duration and total shown under the reservation form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReservationSummary {
    pub(crate) monthly_rate: f64,
    pub(crate) months: f64,
    pub(crate) total: f64,
}

impl ReservationSummary {
    pub(crate) fn to_html(&self) -> String {
        format!(
            concat!(
                "<h4>Reservation Summary</h4>",
                "<p><strong>Monthly Rate:</strong> {rate}</p>",
                "<p><strong>Duration:</strong> {months} month(s)</p>",
                "<p><strong>Total Amount:</strong> ",
                r#"<span class="total-amount" style="font-size: 1.5rem; color: var(--primary);">{total}</span>"#,
                "</p>"
            ),
            rate = format::format_peso(self.monthly_rate),
            months = format::format_js_number(self.months),
            total = format::format_peso(self.total),
        )
    }
}

/// Peso amount embedded in an option label such as `Unit 5 (₱12,500.00/mo)`.
pub(crate) fn parse_label_price(label: &str) -> Result<Option<f64>> {
    let pattern = PRICE_REGEX
        .as_ref()
        .map_err(|err| Error::Runtime(format!("invalid price pattern: {err}")))?;
    let captures = pattern
        .captures(label)
        .map_err(|err| Error::Runtime(format!("price pattern failed on {label:?}: {err}")))?;
    let Some(amount) = captures.and_then(|captures| captures.get(1)) else {
        return Ok(None);
    };
    Ok(Some(format::parse_js_float(&amount.as_str().replace(',', ""))))
}

/// Duration field value as a number of months; unparsable input counts as zero.
pub(crate) fn parse_months(value: &str) -> f64 {
    let months = format::parse_js_float(value);
    if months.is_nan() { 0.0 } else { months }
}

pub(crate) fn summarize(label: &str, months_value: &str) -> Result<Option<ReservationSummary>> {
    let Some(monthly_rate) = parse_label_price(label)? else {
        return Ok(None);
    };
    let months = parse_months(months_value);
    Ok(Some(ReservationSummary {
        monthly_rate,
        months,
        total: monthly_rate * months,
    }))
}

impl Page {
    pub(crate) fn install_reservation_calculator(&mut self) -> Result<()> {
        let Some(fields) = ReservationFields::resolve(&self.dom)? else {
            return Ok(());
        };
        self.add_listener(
            ListenerTarget::Node(fields.months),
            "input",
            Handler::RecalculateReservation(fields),
        );
        self.add_listener(
            ListenerTarget::Node(fields.apartment),
            "change",
            Handler::RecalculateReservation(fields),
        );
        self.recalculate_reservation(fields)
    }

    pub(crate) fn recalculate_reservation(&mut self, fields: ReservationFields) -> Result<()> {
        let Some(option) = self.dom.selected_option(fields.apartment) else {
            return Ok(());
        };
        let label = self.dom.option_text(option);
        let months = self.dom.value(fields.months)?;
        let Some(summary) = summarize(&label, &months)? else {
            return Ok(());
        };
        let Some(preview) = self.reservation_preview(fields)? else {
            return Ok(());
        };
        self.dom.set_inner_html(preview, &summary.to_html())
    }

    fn reservation_preview(&mut self, fields: ReservationFields) -> Result<Option<NodeId>> {
        if let Some(preview) = self.dom.query_selector(markup::RESERVATION_PREVIEW)? {
            return Ok(Some(preview));
        }
        let Some(host) = self
            .dom
            .parent_element(fields.months)
            .and_then(|parent| self.dom.parent_element(parent))
        else {
            return Ok(None);
        };
        let preview = self.dom.create_detached_element("div");
        self.dom.class_add(preview, markup::RESERVATION_PREVIEW_CLASS)?;
        self.dom.set_attr(preview, "style", PREVIEW_STYLE)?;
        self.dom.append_child(host, preview)?;
        Ok(Some(preview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <form method="post" action="/reservations/create/">
          <div class="form-group">
            <label>Apartment</label>
            <select name="apartment">
              <option value="">-- Select apartment --</option>
              <option value="1">Unit 101 - Skyline (₱15,000.00/mo)</option>
              <option value="2">Penthouse A (₱120,500/mo)</option>
            </select>
          </div>
          <div class="form-row">
            <div class="form-group"><input name="months" type="number" value="3"></div>
          </div>
          <button type="submit">Reserve</button>
        </form>"#;

    #[test]
    fn label_prices_strip_grouping_commas() -> Result<()> {
        assert_eq!(parse_label_price("Unit 1 (₱15,000.00/mo)")?, Some(15_000.0));
        assert_eq!(parse_label_price("₱1,234,567.5")?, Some(1_234_567.5));
        assert_eq!(parse_label_price("₱800.")?, Some(800.0));
        assert_eq!(parse_label_price("Unit 1 (PHP 15000)")?, None);
        Ok(())
    }

    #[test]
    fn months_fall_back_to_zero() {
        assert_eq!(parse_months("4"), 4.0);
        assert_eq!(parse_months("1.5"), 1.5);
        assert_eq!(parse_months(""), 0.0);
        assert_eq!(parse_months("many"), 0.0);
    }

    #[test]
    fn summary_renders_peso_amounts() -> Result<()> {
        let summary = summarize("Unit 101 (₱15,000.00/mo)", "2")?;
        let Some(summary) = summary else {
            panic!("expected a summary");
        };
        assert_eq!(summary.total, 30_000.0);
        let html = summary.to_html();
        assert!(html.contains("<strong>Monthly Rate:</strong> ₱15,000.00"));
        assert!(html.contains("2 month(s)"));
        assert!(html.contains(">₱30,000.00</span>"));
        Ok(())
    }

    #[test]
    fn placeholder_option_renders_nothing() -> Result<()> {
        let page = Page::from_html(HTML)?;
        page.assert_missing(".reservation-preview")?;
        Ok(())
    }

    #[test]
    fn preview_tracks_selection_and_duration() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.select_option("select[name='apartment']", "1")?;
        page.assert_exists(".form-row > .reservation-preview")?;
        page.assert_text(".reservation-preview .total-amount", "₱45,000.00")?;

        page.type_text("input[name='months']", "12")?;
        page.assert_text(".reservation-preview .total-amount", "₱180,000.00")?;

        page.select_option("select[name='apartment']", "2")?;
        page.assert_text(".total-amount", "₱1,446,000.00")?;

        page.type_text("input[name='months']", "")?;
        page.assert_text(".total-amount", "₱0.00")?;
        assert_eq!(page.dom.query_selector_all(".reservation-preview")?.len(), 1);
        Ok(())
    }

    #[test]
    fn rerendering_unchanged_inputs_is_stable() -> Result<()> {
        let mut page = Page::from_html(HTML)?;
        page.select_option("select[name='apartment']", "1")?;
        let before = page.dump_dom("form")?;
        page.type_text("input[name='months']", "3")?;
        assert_eq!(page.dump_dom("form")?, before);
        Ok(())
    }
}
