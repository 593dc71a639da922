//! Submit and focus-loss event wiring

use std::cell::RefCell;
use std::rc::Rc;

use rusty_forms::{FormOutcome, HostEvent, TriggerController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, Event};

use crate::dom::DomAdapter;

/// One controller shared by every listener in the page
pub type SharedController = Rc<RefCell<TriggerController<DomAdapter>>>;

struct DomEvent<'a>(&'a Event);

impl HostEvent for DomEvent<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Install the listeners `form` opted into
///
/// Returns whether anything was attached.
pub fn attach(controller: &SharedController, form: &Element) -> Result<bool, JsValue> {
    let options = controller.borrow().options(form);
    if !options.intercepts_submit() {
        return Ok(false);
    }

    let shared = Rc::clone(controller);
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Ok(mut controller) = shared.try_borrow_mut() else {
            event.prevent_default();
            console::warn_1(&"rusty-forms: submit ignored while a pass is running".into());
            return;
        };

        match controller.handle_submit(&target, &DomEvent(&event)) {
            Ok(Some(report)) => warn_diagnostics(&report.outcome),
            Ok(None) => {}
            Err(err) => console::error_1(&format!("rusty-forms: {err}").into()),
        }
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    if options.on_blur {
        let shared = Rc::clone(controller);
        // focusout bubbles, so one listener on the form covers every field
        let on_focus_out = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(field) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(mut controller) = shared.try_borrow_mut() else {
                console::warn_1(&"rusty-forms: focus loss ignored while a pass is running".into());
                return;
            };

            match controller.handle_focus_loss(&field) {
                Ok(Some(outcome)) => warn_diagnostics(&outcome),
                Ok(None) => {}
                Err(err) => console::error_1(&format!("rusty-forms: {err}").into()),
            }
        });
        form.add_event_listener_with_callback("focusout", on_focus_out.as_ref().unchecked_ref())?;
        on_focus_out.forget();
    }

    Ok(true)
}

/// Surface configuration problems to the developer console
pub fn warn_diagnostics(outcome: &FormOutcome<Element>) {
    for report in &outcome.fields {
        for diagnostic in &report.outcome.diagnostics {
            let name = report.field.declared_name.as_deref().unwrap_or("<unnamed>");
            console::warn_1(&format!("rusty-forms: field {name}: {diagnostic}").into());
        }
    }
}
