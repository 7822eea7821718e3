//! Page behaviors: one module per independent enhancement.
//!
//! Each module keeps its decision logic in plain functions over strings and
//! numbers, and applies the outcome to the DOM from an `impl Page` block.

use super::*;
use crate::markup::{DateFields, PriceFields, ReservationFields, SearchView, TypeFields};
use crate::page::{EventState, ListenerTarget};

pub(crate) mod alerts;
pub(crate) mod bedrooms;
pub(crate) mod calculator;
pub(crate) mod dates;
pub(crate) mod delete_guard;
pub(crate) mod filters;
pub(crate) mod image_preview;
pub(crate) mod nav;
pub(crate) mod price_range;
pub(crate) mod search;
pub(crate) mod shortcuts;
pub(crate) mod stats;
pub(crate) mod submit_state;
pub(crate) mod validation;

/// A registered event reaction. Views are resolved once at setup and carried here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Handler {
    ValidateRequiredFields,
    ConfirmDelete,
    ToggleNavMenu { menu: NodeId },
    RecalculateReservation(ReservationFields),
    ReadImageFile { input: NodeId },
    SaveFilters { form: NodeId },
    ScheduleSearch,
    FillBedrooms(TypeFields),
    CheckInChanged(DateFields),
    CheckOutChanged(DateFields),
    ClampMinPrice(PriceFields),
    ClampMaxPrice(PriceFields),
    DebounceResize,
    ClearFieldError,
    EnterSubmitLoading,
    KeyboardShortcut,
}

impl Handler {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::ValidateRequiredFields => "validate-required-fields",
            Self::ConfirmDelete => "confirm-delete",
            Self::ToggleNavMenu { .. } => "toggle-nav-menu",
            Self::RecalculateReservation(_) => "recalculate-reservation",
            Self::ReadImageFile { .. } => "read-image-file",
            Self::SaveFilters { .. } => "save-filters",
            Self::ScheduleSearch => "schedule-search",
            Self::FillBedrooms(_) => "fill-bedrooms",
            Self::CheckInChanged(_) => "check-in-changed",
            Self::CheckOutChanged(_) => "check-out-changed",
            Self::ClampMinPrice(_) => "clamp-min-price",
            Self::ClampMaxPrice(_) => "clamp-max-price",
            Self::DebounceResize => "debounce-resize",
            Self::ClearFieldError => "clear-field-error",
            Self::EnterSubmitLoading => "enter-submit-loading",
            Self::KeyboardShortcut => "keyboard-shortcut",
        }
    }
}

/// Per-load bookkeeping owned by the behaviors (debounce handles and the like).
#[derive(Debug, Default)]
pub(crate) struct BehaviorState {
    pub(crate) nav: nav::NavState,
    pub(crate) search: Option<search::SearchState>,
    pub(crate) resize_timer: Option<i64>,
    pub(crate) loading_buttons: Vec<submit_state::LoadingButton>,
}

impl Page {
    pub(crate) fn run_handler(&mut self, handler: &Handler, event: &mut EventState) -> Result<()> {
        match handler {
            Handler::ValidateRequiredFields => self.validate_on_submit(event),
            Handler::ConfirmDelete => {
                self.confirm_delete(event);
                Ok(())
            }
            Handler::ToggleNavMenu { menu } => self.toggle_nav_menu(*menu),
            Handler::RecalculateReservation(fields) => self.recalculate_reservation(*fields),
            Handler::ReadImageFile { input } => {
                self.read_image_file(*input);
                Ok(())
            }
            Handler::SaveFilters { form } => self.save_filters(*form),
            Handler::ScheduleSearch => {
                self.schedule_search();
                Ok(())
            }
            Handler::FillBedrooms(fields) => self.fill_bedrooms(*fields),
            Handler::CheckInChanged(fields) => self.check_in_changed(*fields),
            Handler::CheckOutChanged(fields) => self.check_out_changed(*fields),
            Handler::ClampMinPrice(fields) => self.clamp_min_price(*fields),
            Handler::ClampMaxPrice(fields) => self.clamp_max_price(*fields),
            Handler::DebounceResize => {
                self.debounce_resize();
                Ok(())
            }
            Handler::ClearFieldError => self.clear_field_error(event),
            Handler::EnterSubmitLoading => self.enter_submit_loading(event),
            Handler::KeyboardShortcut => self.run_keyboard_shortcut(event),
        }
    }

    /// Runs a timer callback; for intervals, returns the state to requeue.
    pub(crate) fn run_timer_callback(
        &mut self,
        callback: TimerCallback,
    ) -> Result<Option<TimerCallback>> {
        match callback {
            TimerCallback::FadeAlert { alert } => self.fade_alert(alert)?,
            TimerCallback::RemoveAlert { alert } => self.dom.remove_node(alert)?,
            TimerCallback::ReevaluateNav => {
                self.behaviors.resize_timer = None;
                self.apply_nav_layout()?;
            }
            TimerCallback::ApplySearch { input } => self.apply_search(input)?,
            TimerCallback::StatTick(counter) => {
                return Ok(self.tick_stat(counter)?.map(TimerCallback::StatTick));
            }
            TimerCallback::FileLoaded { input, data_url } => {
                self.show_image_preview(input, &data_url)?;
            }
        }
        Ok(None)
    }

    /// Document and window level listeners, registered after the per-component behaviors.
    pub(crate) fn install_document_listeners(&mut self) -> Result<()> {
        let document = ListenerTarget::Node(self.dom.root);
        self.add_listener(ListenerTarget::Window, "resize", Handler::DebounceResize);
        self.add_listener(document, "input", Handler::ClearFieldError);
        self.add_listener(document, "submit", Handler::EnterSubmitLoading);
        self.add_listener(document, "keydown", Handler::KeyboardShortcut);
        Ok(())
    }
}
