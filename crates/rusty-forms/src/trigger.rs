//! Submit and focus-loss triggers
//!
//! ```text
//!            submit / focus loss
//!   Idle ───────────────────────▶ Evaluating
//!    ▲                              │   │
//!    │              valid submit    │   │ invalid submit
//!    │        ┌─────────────────────┘   └──────────────┐
//!    │        ▼                                        ▼
//!    ├── Submittable (native submit)             Blocked (scroll)
//!    │                                                 │
//!    └─────────────────────────────────────────────────┘
//! ```
//!
//! Focus-loss passes go straight from `Evaluating` back to `Idle`. Passes run
//! to completion; the controller is borrowed mutably for the whole pass, so a
//! second trigger cannot start until the first returns.

use crate::adapter::{HostEvent, UiAdapter};
use crate::error::{EngineError, EngineResult};
use crate::orchestrator::FormOrchestrator;
use crate::outcome::FormOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Evaluating,
    Submittable,
    Blocked,
}

impl TriggerState {
    fn can_move_to(self, next: TriggerState) -> bool {
        use TriggerState::*;
        matches!(
            (self, next),
            (Idle, Evaluating)
                | (Evaluating, Submittable)
                | (Evaluating, Blocked)
                | (Evaluating, Idle)
                | (Submittable, Idle)
                | (Blocked, Idle)
        )
    }
}

/// Per-form opt-ins read from the form's attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    pub on_submit: bool,
    pub on_blur: bool,
    pub scroll_to_error: bool,
}

impl TriggerOptions {
    /// Whether submit attempts are intercepted; live forms are too
    pub fn intercepts_submit(&self) -> bool {
        self.on_submit || self.on_blur
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Every field passed; the form was submitted natively
    Submitted,
    /// At least one field failed; submission suppressed
    Blocked,
}

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport<N> {
    pub decision: SubmitDecision,
    pub outcome: FormOutcome<N>,
}

/// Binds validation passes to submit and focus-loss events
pub struct TriggerController<A: UiAdapter> {
    orchestrator: FormOrchestrator<A>,
    state: TriggerState,
}

impl<A: UiAdapter> TriggerController<A> {
    pub fn new(orchestrator: FormOrchestrator<A>) -> Self {
        Self {
            orchestrator,
            state: TriggerState::Idle,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn orchestrator(&self) -> &FormOrchestrator<A> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut FormOrchestrator<A> {
        &mut self.orchestrator
    }

    /// Read a form's trigger opt-ins
    pub fn options(&self, form: &A::Node) -> TriggerOptions {
        let adapter = self.orchestrator.adapter();
        let attributes = &self.orchestrator.config().attributes;
        let flag = |name: &str| {
            adapter
                .attribute(form, name)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
        };

        TriggerOptions {
            on_submit: flag(&attributes.on_submit),
            on_blur: flag(&attributes.on_blur),
            scroll_to_error: flag(&attributes.scroll_to_error),
        }
    }

    /// Handle a submit attempt on `form`
    ///
    /// Returns `Ok(None)` when the form has not opted in; the event is left
    /// alone and the host submits as usual. Otherwise the native submission
    /// is cancelled before anything else and re-issued only if every field
    /// passes.
    pub fn handle_submit(
        &mut self,
        form: &A::Node,
        event: &dyn HostEvent,
    ) -> EngineResult<Option<SubmitReport<A::Node>>> {
        let options = self.options(form);
        if !options.intercepts_submit() {
            return Ok(None);
        }

        event.prevent_default();

        self.transition(TriggerState::Evaluating);
        let result = self.submit_pass(form, options);
        self.transition(TriggerState::Idle);

        result.map(Some)
    }

    /// Handle `field` losing focus
    ///
    /// Returns `Ok(None)` when the field has no rules or its form has not
    /// opted into focus-loss validation. Otherwise validates the field, then
    /// re-aggregates the whole form to refresh the submit control.
    pub fn handle_focus_loss(
        &mut self,
        field: &A::Node,
    ) -> EngineResult<Option<FormOutcome<A::Node>>> {
        let form = self
            .orchestrator
            .adapter()
            .enclosing_form(field)
            .ok_or(EngineError::NoEnclosingForm)?;

        if !self.options(&form).on_blur {
            return Ok(None);
        }

        if self.orchestrator.describe(field).is_none() {
            return Ok(None);
        }

        self.transition(TriggerState::Evaluating);
        let result = self.focus_pass(&form, field);
        self.transition(TriggerState::Idle);

        result.map(Some)
    }

    fn submit_pass(
        &mut self,
        form: &A::Node,
        options: TriggerOptions,
    ) -> EngineResult<SubmitReport<A::Node>> {
        let outcome = self.orchestrator.validate_form(form)?;

        if options.on_blur {
            self.orchestrator.gate_submit(form, outcome.valid)?;
        }

        if outcome.valid {
            self.transition(TriggerState::Submittable);
            self.orchestrator.adapter_mut().submit(form)?;

            return Ok(SubmitReport {
                decision: SubmitDecision::Submitted,
                outcome,
            });
        }

        self.transition(TriggerState::Blocked);
        if options.scroll_to_error {
            if let Some(first) = outcome.first_invalid() {
                self.orchestrator.adapter_mut().scroll_into_view(first)?;
            }
        }

        Ok(SubmitReport {
            decision: SubmitDecision::Blocked,
            outcome,
        })
    }

    fn focus_pass(&mut self, form: &A::Node, field: &A::Node) -> EngineResult<FormOutcome<A::Node>> {
        self.orchestrator.validate_field(form, field)?;

        let outcome = self.orchestrator.validate_form(form)?;
        self.orchestrator.gate_submit(form, outcome.valid)?;

        Ok(outcome)
    }

    fn transition(&mut self, next: TriggerState) {
        debug_assert!(
            self.state.can_move_to(next),
            "illegal trigger transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(from = ?self.state, to = ?next, "trigger transition");
        self.state = next;
    }
}
