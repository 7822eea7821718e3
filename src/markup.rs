//! Markup contract shared with the server-rendered templates.
//!
//! Every selector, class and field name the behaviors depend on lives here,
//! together with the small typed views the behaviors resolve at setup.

use super::*;

pub(crate) const ALERT: &str = ".alert";
pub(crate) const NAV_MENU: &str = ".nav-menu";
pub(crate) const NAV_BRAND: &str = ".nav-brand";
pub(crate) const DASHBOARD: &str = ".dashboard";
pub(crate) const STAT_VALUE: &str = ".stat-value";
pub(crate) const APARTMENT_CARD: &str = ".apartment-card";
pub(crate) const FILTER_FORM: &str = ".filter-form";
pub(crate) const RESERVATION_PREVIEW: &str = ".reservation-preview";
pub(crate) const IMAGE_PREVIEW: &str = ".image-preview";
pub(crate) const BACK_BUTTON: &str = ".btn-outline";

pub(crate) const FORM: &str = "form";
pub(crate) const FORM_FIELD: &str = "input, select, textarea";
pub(crate) const REQUIRED_FIELDS: &str = "input[required], select[required], textarea[required]";
pub(crate) const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
pub(crate) const DELETE_LINK: &str = r#"a[href*="/delete/"]"#;
pub(crate) const BOOKING_LINK: &str = r#"a[href*="reservation/create"]"#;

pub(crate) const MONTHS_INPUT: &str = r#"input[name="months"]"#;
pub(crate) const APARTMENT_SELECT: &str = r#"select[name="apartment"]"#;
pub(crate) const SEARCH_INPUT: &str = r#"input[name="search"]"#;
pub(crate) const IMAGE_INPUT: &str = r#"input[type="file"][name="image"]"#;
pub(crate) const TYPE_SELECT: &str = r#"select[name="apartment_type"]"#;
pub(crate) const BEDROOMS_INPUT: &str = r#"input[name="bedrooms"]"#;
pub(crate) const CHECK_IN_INPUT: &str = r#"input[name="check_in"]"#;
pub(crate) const CHECK_OUT_INPUT: &str = r#"input[name="check_out"]"#;
pub(crate) const MIN_PRICE_INPUT: &str = r#"input[name="min_price"]"#;
pub(crate) const MAX_PRICE_INPUT: &str = r#"input[name="max_price"]"#;

pub(crate) const CONFIRM_FORM_CLASS: &str = "confirm-form";
pub(crate) const ERROR_CLASS: &str = "error";
pub(crate) const LOADING_CLASS: &str = "loading";
pub(crate) const MENU_TOGGLE_CLASS: &str = "menu-toggle";
pub(crate) const RESERVATION_PREVIEW_CLASS: &str = "reservation-preview";
pub(crate) const IMAGE_PREVIEW_CLASS: &str = "image-preview";

fn both(dom: &Dom, first: &str, second: &str) -> Result<Option<(NodeId, NodeId)>> {
    let (Some(a), Some(b)) = (dom.query_selector(first)?, dom.query_selector(second)?) else {
        return Ok(None);
    };
    Ok(Some((a, b)))
}

/// Duration field and apartment picker of the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReservationFields {
    pub(crate) months: NodeId,
    pub(crate) apartment: NodeId,
}

impl ReservationFields {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        Ok(both(dom, MONTHS_INPUT, APARTMENT_SELECT)?
            .map(|(months, apartment)| Self { months, apartment }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeFields {
    pub(crate) apartment_type: NodeId,
    pub(crate) bedrooms: NodeId,
}

impl TypeFields {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        Ok(both(dom, TYPE_SELECT, BEDROOMS_INPUT)?
            .map(|(apartment_type, bedrooms)| Self { apartment_type, bedrooms }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields {
    pub(crate) check_in: NodeId,
    pub(crate) check_out: NodeId,
}

impl DateFields {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        Ok(both(dom, CHECK_IN_INPUT, CHECK_OUT_INPUT)?
            .map(|(check_in, check_out)| Self { check_in, check_out }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriceFields {
    pub(crate) min: NodeId,
    pub(crate) max: NodeId,
}

impl PriceFields {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        Ok(both(dom, MIN_PRICE_INPUT, MAX_PRICE_INPUT)?.map(|(min, max)| Self { min, max }))
    }
}

/// Navigation menu and the brand block that hosts the mobile toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NavView {
    pub(crate) menu: NodeId,
    pub(crate) brand: Option<NodeId>,
}

impl NavView {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        let Some(menu) = dom.query_selector(NAV_MENU)? else {
            return Ok(None);
        };
        let brand = dom.query_selector(NAV_BRAND)?;
        Ok(Some(Self { menu, brand }))
    }
}

/// Search box plus the card list captured when the page loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchView {
    pub(crate) input: NodeId,
    pub(crate) cards: Vec<NodeId>,
}

impl SearchView {
    pub(crate) fn resolve(dom: &Dom) -> Result<Option<Self>> {
        let Some(input) = dom.query_selector(SEARCH_INPUT)? else {
            return Ok(None);
        };
        let cards = dom.query_selector_all(APARTMENT_CARD)?;
        if cards.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { input, cards }))
    }
}
