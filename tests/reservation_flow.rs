use apartment_ui::{
    KeyModifiers, LocationNavigationKind, MockFile, Page, PageConfig, PendingSubmission,
    SubmissionOutcome,
};

const RESERVATION_PAGE: &str = r#"
<nav class="navbar">
  <div class="nav-brand"><a href="/">Skyline Residences</a></div>
  <ul class="nav-menu">
    <li><a href="/apartments/">Apartments</a></li>
    <li><a href="/reservations/">My reservations</a></li>
  </ul>
</nav>
<main class="container">
  <div class="alert alert-info">Complete the form to reserve a unit.</div>
  <a class="btn btn-outline" href="/apartments/">Back to apartments</a>
  <form method="post" action="/reservations/create/" id="reservation-form">
    <div class="form-group">
      <label for="id_apartment">Apartment</label>
      <select name="apartment" id="id_apartment" required>
        <option value="">---------</option>
        <option value="4">Unit 101 - Skyline Loft (₱15,000.00/mo)</option>
        <option value="9">Unit 305 - Garden Suite (₱22,750.50/mo)</option>
      </select>
    </div>
    <div class="form-row">
      <div class="form-group">
        <label for="id_check_in">Check-in</label>
        <input type="date" name="check_in" id="id_check_in" required>
      </div>
      <div class="form-group">
        <label for="id_check_out">Check-out</label>
        <input type="date" name="check_out" id="id_check_out" required>
      </div>
    </div>
    <div class="form-row">
      <div class="form-group">
        <label for="id_months">Months</label>
        <input type="number" name="months" id="id_months" value="1" min="1" required>
      </div>
    </div>
    <div class="form-group">
      <label for="id_notes">Notes</label>
      <textarea name="notes" id="id_notes"></textarea>
    </div>
    <div class="form-group">
      <label for="id_image">Valid ID</label>
      <input type="file" name="image" id="id_image" accept="image/*">
    </div>
    <button type="submit" class="btn btn-primary">Reserve now</button>
  </form>
</main>
"#;

fn fill_reservation(page: &mut Page) -> apartment_ui::Result<()> {
    page.select_option("#id_apartment", "9")?;
    page.set_value("#id_check_in", "2026-02-01")?;
    page.set_value("#id_check_out", "2026-05-01")?;
    page.type_text("#id_months", "3")?;
    Ok(())
}

#[test]
fn calculator_summarizes_the_selected_unit() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    page.assert_missing(".reservation-preview")?;

    page.select_option("#id_apartment", "4")?;
    page.assert_text(
        ".reservation-preview",
        "Reservation SummaryMonthly Rate: ₱15,000.00Duration: 1 month(s)Total Amount: ₱15,000.00",
    )?;

    page.type_text("#id_months", "6")?;
    page.assert_text(".reservation-preview .total-amount", "₱90,000.00")?;

    page.select_option("#id_apartment", "9")?;
    page.assert_text(".reservation-preview .total-amount", "₱136,503.00")?;
    page.assert_style(".reservation-preview", "background-color", "#f3f4f6")?;
    Ok(())
}

#[test]
fn incomplete_reservation_is_blocked() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    page.select_option("#id_apartment", "4")?;
    page.click("button[type='submit']")?;

    assert_eq!(
        page.take_alert_messages(),
        vec!["Please fill in all required fields.".to_string()]
    );
    page.assert_class("#id_check_in", "error")?;
    page.assert_class("#id_check_out", "error")?;
    assert!(!page.has_class("#id_apartment", "error")?);
    assert!(!page.has_class("#id_notes", "error")?);
    page.assert_text("button[type='submit']", "Reserve now")?;
    assert_eq!(page.pending_submission(), None);

    page.set_value("#id_check_in", "2026-02-01")?;
    assert!(!page.has_class("#id_check_in", "error")?);
    page.assert_class("#id_check_out", "error")?;
    Ok(())
}

#[test]
fn complete_reservation_submits_and_settles() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    fill_reservation(&mut page)?;
    page.type_text("#id_notes", "Ground floor please")?;
    page.click("button[type='submit']")?;

    assert!(page.take_alert_messages().is_empty());
    assert_eq!(
        page.pending_submission(),
        Some(&PendingSubmission {
            method: "POST".to_string(),
            url: "http://localhost/reservations/create/".to_string(),
            body: Some(
                "apartment=9&check_in=2026-02-01&check_out=2026-05-01&months=3&notes=Ground+floor+please"
                    .to_string()
            ),
        })
    );
    page.assert_class("button[type='submit']", "loading")?;
    page.assert_text("button[type='submit']", "Processing...")?;

    assert!(page.settle_submission(SubmissionOutcome::Completed)?);
    page.assert_text("button[type='submit']", "Reserve now")?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].kind, LocationNavigationKind::FormSubmit);
    assert_eq!(page.location(), "http://localhost/reservations/create/");
    Ok(())
}

#[test]
fn dates_are_floored_at_today_and_ordered() -> apartment_ui::Result<()> {
    let mut page = Page::from_html_with_config(
        RESERVATION_PAGE,
        PageConfig::default().with_epoch_ms(1_772_323_200_000),
    )?;
    page.assert_attr("#id_check_in", "min", "2026-03-01")?;
    page.assert_attr("#id_check_out", "min", "2026-03-01")?;

    page.set_value("#id_check_in", "2026-04-10")?;
    page.assert_attr("#id_check_out", "min", "2026-04-10")?;
    page.set_value("#id_check_out", "2026-04-01")?;
    assert_eq!(
        page.take_alert_messages(),
        vec!["Check-out date must be after check-in date".to_string()]
    );
    page.assert_value("#id_check_out", "")?;

    page.set_value("#id_check_out", "2026-06-30")?;
    page.set_value("#id_check_in", "2026-07-01")?;
    page.assert_value("#id_check_out", "")?;
    assert!(page.take_alert_messages().is_empty());
    Ok(())
}

#[test]
fn id_upload_shows_a_preview() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    page.set_input_files(
        "#id_image",
        &[MockFile::new("C:\\Users\\ana\\license.png").with_bytes(vec![0x89, 0x50, 0x4e, 0x47])],
    )?;
    page.assert_value("#id_image", "C:\\fakepath\\license.png")?;
    page.run_next_timer()?;
    page.assert_attr(".image-preview img", "src", "data:image/png;base64,iVBORw==")?;
    page.assert_attr(".image-preview img", "alt", "Preview")?;
    Ok(())
}

#[test]
fn keyboard_shortcuts_on_the_reservation_page() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    page.press_key_with("b", KeyModifiers::ctrl())?;
    assert!(page.take_location_navigations().is_empty());

    page.press_key("Escape")?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].kind, LocationNavigationKind::LinkClick);
    assert_eq!(navigations[0].to, "http://localhost/apartments/");
    Ok(())
}

#[test]
fn flash_message_leaves_after_five_seconds() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(RESERVATION_PAGE)?;
    page.advance_time(5_000)?;
    page.assert_style(".alert", "animation", "slideOut 0.3s ease-out")?;
    page.advance_time(300)?;
    page.assert_missing(".alert")?;
    Ok(())
}
