//! Session state machine.
//!
//! All session mutation flows through [`apply`]: an explicit state value
//! plus an action in, a new state value out. Keeping the dispatch pure
//! (timestamps aside) makes the flow testable without any HTTP plumbing.
//!
//! States: not-started, in-progress (step 1..=18), complete. Completion is
//! terminal; every action except `Reset` is ignored afterwards.

use shared_types::{
    ConditionalVisibility, QuestionnaireSession, ResponseUpdate, SelectedFeature, TOTAL_STEPS,
};

use crate::estimate;
use crate::validation::{self, ValidationError};
use crate::visibility;

pub const ADVANCED_FEATURES_STEP: u32 = 9;
pub const ECOMMERCE_DETAILS_STEP: u32 = 11;
pub const MOBILE_DETAILS_STEP: u32 = 12;

#[derive(Debug, Clone)]
pub enum QuestionnaireAction {
    Start,
    Next,
    Previous,
    JumpTo(i64),
    UpdateResponse(ResponseUpdate),
    UpdateFeatures(Vec<SelectedFeature>),
    CalculateCost,
    Complete,
    Reset,
}

/// Dispatches one action against the session.
pub fn apply(mut state: QuestionnaireSession, action: QuestionnaireAction) -> QuestionnaireSession {
    if state.is_complete && !matches!(action, QuestionnaireAction::Reset) {
        return state;
    }

    match action {
        QuestionnaireAction::Start => {
            state.start();
        }
        QuestionnaireAction::Next => {
            state.current_step = next_visible_step(state.current_step, &state.conditional_visibility);
        }
        QuestionnaireAction::Previous => {
            state.current_step =
                previous_visible_step(state.current_step, &state.conditional_visibility);
        }
        QuestionnaireAction::JumpTo(step) => {
            state.current_step = step.clamp(1, TOTAL_STEPS as i64) as u32;
        }
        QuestionnaireAction::UpdateResponse(update) => {
            let affects_cost = update.affects_cost();
            merge_update(&mut state, update);
            state.conditional_visibility = visibility::resolve(&state.responses);
            if affects_cost {
                state.cost_calculation = estimate::calculate_project_cost(&state.responses);
            }
        }
        QuestionnaireAction::UpdateFeatures(features) => {
            state.responses.features = features;
            state.conditional_visibility = visibility::resolve(&state.responses);
            state.cost_calculation = estimate::calculate_project_cost(&state.responses);
        }
        QuestionnaireAction::CalculateCost => {
            state.cost_calculation = estimate::calculate_project_cost(&state.responses);
        }
        QuestionnaireAction::Complete => {
            state.complete();
        }
        QuestionnaireAction::Reset => {
            return QuestionnaireSession::new();
        }
    }

    state
}

/// `Next` with the validation gate: refuses to leave a step whose required
/// answer is missing or malformed.
pub fn advance(state: QuestionnaireSession) -> Result<QuestionnaireSession, ValidationError> {
    validation::validate_step(state.current_step, &state.responses)?;
    Ok(apply(state, QuestionnaireAction::Next))
}

/// Whether a step is currently shown. Only the three conditional steps can
/// be hidden; everything else is always visible.
pub fn step_visible(step: u32, flags: &ConditionalVisibility) -> bool {
    match step {
        ADVANCED_FEATURES_STEP => flags.show_advanced_features,
        ECOMMERCE_DETAILS_STEP => flags.show_ecommerce_details,
        MOBILE_DETAILS_STEP => flags.show_mobile_details,
        _ => true,
    }
}

fn next_visible_step(current: u32, flags: &ConditionalVisibility) -> u32 {
    let mut step = (current + 1).min(TOTAL_STEPS);
    while step < TOTAL_STEPS && !step_visible(step, flags) {
        step += 1;
    }
    step
}

fn previous_visible_step(current: u32, flags: &ConditionalVisibility) -> u32 {
    let mut step = current.saturating_sub(1).max(1);
    while step > 1 && !step_visible(step, flags) {
        step -= 1;
    }
    step
}

fn merge_update(state: &mut QuestionnaireSession, update: ResponseUpdate) {
    let responses = &mut state.responses;
    match update {
        ResponseUpdate::BusinessType(value) => responses.business_type = Some(value),
        ResponseUpdate::BusinessName(value) => responses.business_name = value,
        ResponseUpdate::BusinessDescription(value) => responses.business_description = value,
        ResponseUpdate::TargetCustomers(value) => responses.target_customers = value,
        ResponseUpdate::ProblemStatement(value) => responses.problem_statement = value,
        ResponseUpdate::PrimaryGoal(value) => responses.primary_goal = Some(value),
        ResponseUpdate::SuccessMetrics(value) => responses.success_metrics = value,
        ResponseUpdate::Features(value) => responses.features = value,
        ResponseUpdate::Platforms(value) => responses.platforms = value,
        ResponseUpdate::Integrations(value) => responses.integrations = value,
        ResponseUpdate::BudgetRange(value) => responses.budget_range = Some(value),
        ResponseUpdate::TimelinePreference(value) => responses.timeline_preference = Some(value),
        ResponseUpdate::ContactInfo(value) => responses.contact_info = Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{BusinessType, Complexity, FeatureCategory, Platform};

    fn started() -> QuestionnaireSession {
        apply(QuestionnaireSession::new(), QuestionnaireAction::Start)
    }

    fn at_step(step: u32) -> QuestionnaireSession {
        let mut state = started();
        state.current_step = step;
        state
    }

    #[test]
    fn start_stamps_time_and_step() {
        let state = started();
        assert_eq!(state.current_step, 1);
        assert!(state.started_at.is_some());
        assert!(!state.is_complete);
    }

    #[test]
    fn next_clamps_at_last_step() {
        let state = apply(at_step(TOTAL_STEPS), QuestionnaireAction::Next);
        assert_eq!(state.current_step, TOTAL_STEPS);
    }

    #[test]
    fn previous_clamps_at_first_step() {
        let state = apply(at_step(1), QuestionnaireAction::Previous);
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn jump_clamps_out_of_range_targets() {
        assert_eq!(apply(started(), QuestionnaireAction::JumpTo(0)).current_step, 1);
        assert_eq!(apply(started(), QuestionnaireAction::JumpTo(-5)).current_step, 1);
        assert_eq!(
            apply(started(), QuestionnaireAction::JumpTo(99)).current_step,
            TOTAL_STEPS
        );
        assert_eq!(apply(started(), QuestionnaireAction::JumpTo(7)).current_step, 7);
    }

    #[test]
    fn next_skips_hidden_conditional_steps() {
        // All flags off: 8 -> 10 (9 hidden), 10 -> 13 (11 and 12 hidden)
        let state = apply(at_step(8), QuestionnaireAction::Next);
        assert_eq!(state.current_step, 10);
        let state = apply(at_step(10), QuestionnaireAction::Next);
        assert_eq!(state.current_step, 13);
    }

    #[test]
    fn previous_skips_hidden_conditional_steps() {
        let state = apply(at_step(13), QuestionnaireAction::Previous);
        assert_eq!(state.current_step, 10);
        let state = apply(at_step(10), QuestionnaireAction::Previous);
        assert_eq!(state.current_step, 8);
    }

    #[test]
    fn visible_conditional_steps_are_not_skipped() {
        let mut state = at_step(10);
        state = apply(
            state,
            QuestionnaireAction::UpdateResponse(ResponseUpdate::BusinessType(
                BusinessType::Ecommerce,
            )),
        );
        assert!(state.conditional_visibility.show_ecommerce_details);
        let state = apply(state, QuestionnaireAction::Next);
        assert_eq!(state.current_step, 11);
    }

    #[test]
    fn update_recomputes_visibility_and_cost() {
        let features = vec![SelectedFeature {
            id: "messaging-system".to_string(),
            name: "Messaging".to_string(),
            category: FeatureCategory::CoreFunctionality,
            base_cost: 0,
            complexity: Complexity::Complex,
            selected: true,
        }];
        let state = apply(started(), QuestionnaireAction::UpdateFeatures(features));
        assert!(state.conditional_visibility.show_advanced_features);
        // 3500 base x 1.8 complex, multiplier 1.1 from one complex feature
        assert_eq!(state.cost_calculation.base_feature_cost, 6300.0);
        assert_eq!(state.cost_calculation.total_estimate, 6930);
        assert!(state.cost_calculation.last_calculated.is_some());
    }

    #[test]
    fn non_cost_updates_leave_estimate_untouched() {
        let state = apply(
            started(),
            QuestionnaireAction::UpdateResponse(ResponseUpdate::BusinessName(
                "Acme Anvils".to_string(),
            )),
        );
        assert!(state.cost_calculation.last_calculated.is_none());
        assert_eq!(state.responses.business_name, "Acme Anvils");

        // An explicit recalculation stamps the estimate even so
        let state = apply(state, QuestionnaireAction::CalculateCost);
        assert!(state.cost_calculation.last_calculated.is_some());
        assert_eq!(state.cost_calculation.total_estimate, 0);
    }

    #[test]
    fn advance_requires_a_valid_answer() {
        let state = started();
        assert!(advance(state.clone()).is_err());

        let state = apply(
            state,
            QuestionnaireAction::UpdateResponse(ResponseUpdate::BusinessType(BusinessType::Saas)),
        );
        let state = advance(state).expect("step 1 answered");
        assert_eq!(state.current_step, 2);
    }

    #[test]
    fn complete_is_terminal_until_reset() {
        let state = apply(started(), QuestionnaireAction::Complete);
        assert!(state.is_complete);
        assert_eq!(state.current_step, TOTAL_STEPS);
        assert!(state.completed_at.is_some());

        let after_next = apply(state.clone(), QuestionnaireAction::Next);
        assert_eq!(after_next, state);
        let after_update = apply(
            state.clone(),
            QuestionnaireAction::UpdateResponse(ResponseUpdate::BusinessName("x".to_string())),
        );
        assert_eq!(after_update, state);

        let fresh = apply(state.clone(), QuestionnaireAction::Reset);
        assert!(!fresh.is_complete);
        assert_ne!(fresh.session_id, state.session_id);
        assert_eq!(fresh.responses, Default::default());
    }

    #[test]
    fn mobile_platforms_route_through_mobile_step() {
        let mut state = at_step(11);
        state = apply(
            state,
            QuestionnaireAction::UpdateResponse(ResponseUpdate::Platforms(vec![
                Platform::IosNative,
            ])),
        );
        let state = apply(state, QuestionnaireAction::Next);
        assert_eq!(state.current_step, 12);
    }
}
