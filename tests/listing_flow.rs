use apartment_ui::{
    FILTER_STORAGE_KEY, FilterSet, KeyModifiers, LocationNavigationKind, MemoryStorage, Page,
    PageConfig, SubmissionOutcome,
};

const LISTING_PAGE: &str = r#"
<main class="container">
  <form class="filter-form" method="get" action="/apartments/">
    <input type="text" name="search" placeholder="Search by name or location">
    <select name="apartment_type">
      <option value="">All types</option>
      <option value="studio">Studio</option>
      <option value="1br">1 Bedroom</option>
      <option value="penthouse">Penthouse</option>
    </select>
    <input type="number" name="bedrooms" placeholder="Bedrooms">
    <input type="number" name="min_price" placeholder="Min price">
    <input type="number" name="max_price" placeholder="Max price">
    <button type="submit" class="btn">Apply filters</button>
  </form>
  <div class="apartment-grid">
    <div class="apartment-card" id="card-1">
      <h3>Skyline Loft</h3><p>Makati City</p><p class="price">₱15,000.00/mo</p>
      <a href="/reservations/reservation/create/?apartment=1">Reserve</a>
    </div>
    <div class="apartment-card" id="card-2">
      <h3>Garden Studio</h3><p>Quezon City</p><p class="price">₱9,500.00/mo</p>
    </div>
    <div class="apartment-card" id="card-3">
      <h3>Bay Penthouse</h3><p>Pasay</p><p class="price">₱85,000.00/mo</p>
      <a href="/apartments/3/delete/">Delete</a>
    </div>
  </div>
</main>
"#;

#[test]
fn live_search_filters_cards_case_insensitively() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.type_text("input[name='search']", "QUEZON")?;
    page.advance_time(300)?;
    page.assert_hidden("#card-1")?;
    page.assert_visible("#card-2")?;
    page.assert_hidden("#card-3")?;

    page.type_text("input[name='search']", "city")?;
    page.advance_time(150)?;
    page.assert_hidden("#card-1")?;
    page.advance_time(150)?;
    page.assert_visible("#card-1")?;
    page.assert_visible("#card-2")?;
    page.assert_hidden("#card-3")?;
    Ok(())
}

#[test]
fn type_selection_fills_bedrooms() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.select_option("select[name='apartment_type']", "penthouse")?;
    page.assert_value("input[name='bedrooms']", "3")?;
    page.select_option("select[name='apartment_type']", "studio")?;
    page.assert_value("input[name='bedrooms']", "0")?;
    page.select_option("select[name='apartment_type']", "")?;
    page.assert_value("input[name='bedrooms']", "0")?;
    Ok(())
}

#[test]
fn price_bounds_never_cross() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.type_text("input[name='max_price']", "20000")?;
    page.type_text("input[name='min_price']", "25000")?;
    page.assert_value("input[name='min_price']", "20000")?;

    page.type_text("input[name='max_price']", "5000")?;
    page.assert_value("input[name='max_price']", "20000")?;

    page.type_text("input[name='max_price']", "")?;
    page.type_text("input[name='min_price']", "90000")?;
    page.assert_value("input[name='min_price']", "90000")?;
    Ok(())
}

#[test]
fn filters_survive_a_round_trip_through_storage() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.type_text("input[name='search']", "unit 5")?;
    page.select_option("select[name='apartment_type']", "1br")?;
    page.type_text("input[name='min_price']", "8000")?;
    page.click("button[type='submit']")?;

    let pending = page.pending_submission().cloned();
    assert_eq!(
        pending.map(|submission| submission.url),
        Some(
            "http://localhost/apartments/?search=unit+5&apartment_type=1br&bedrooms=1&min_price=8000&max_price="
                .to_string()
        )
    );
    page.settle_submission(SubmissionOutcome::Completed)?;

    let saved = page.saved_filters()?.unwrap_or_default();
    assert_eq!(saved.get("search"), Some("unit 5"));
    assert_eq!(saved.get("bedrooms"), Some("1"));
    assert_eq!(saved.get("max_price"), None);

    let storage = page.into_storage();
    let next = Page::from_html_with_storage(
        LISTING_PAGE,
        PageConfig::default().with_url("http://localhost/apartments/?search=unit+5"),
        storage,
    )?;
    next.assert_value("input[name='search']", "unit 5")?;
    next.assert_value("select[name='apartment_type']", "1br")?;
    next.assert_value("input[name='bedrooms']", "1")?;
    next.assert_value("input[name='min_price']", "8000")?;
    next.assert_value("input[name='max_price']", "")?;
    Ok(())
}

#[test]
fn prepopulated_storage_restores_on_load() -> apartment_ui::Result<()> {
    let mut filters = FilterSet::new();
    filters.insert("search", "unit 5");
    let storage = MemoryStorage::new().with_item(FILTER_STORAGE_KEY, &filters.to_json()?);
    let page = Page::from_html_with_storage(LISTING_PAGE, PageConfig::default(), Box::new(storage))?;
    page.assert_value("input[name='search']", "unit 5")?;
    Ok(())
}

#[test]
fn corrupt_storage_surfaces_as_a_storage_error() {
    let storage = MemoryStorage::new().with_item(FILTER_STORAGE_KEY, "{\"search\":");
    let result =
        Page::from_html_with_storage(LISTING_PAGE, PageConfig::default(), Box::new(storage));
    assert!(matches!(result, Err(apartment_ui::Error::Storage(_))));
}

#[test]
fn delete_link_needs_confirmation() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.click("#card-3 a")?;
    assert!(page.take_location_navigations().is_empty());

    page.set_default_confirm_response(true);
    page.click("#card-3 a")?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].to, "http://localhost/apartments/3/delete/");
    Ok(())
}

#[test]
fn ctrl_b_jumps_to_the_first_reservation_link() -> apartment_ui::Result<()> {
    let mut page = Page::from_html(LISTING_PAGE)?;
    page.press_key_with("b", KeyModifiers::meta())?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].kind, LocationNavigationKind::HrefSet);
    assert_eq!(
        navigations[0].to,
        "http://localhost/reservations/reservation/create/?apartment=1"
    );
    Ok(())
}
