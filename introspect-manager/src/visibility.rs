//! Conditional step visibility.
//!
//! Each optional step has one named predicate over the responses. The
//! whole set is recomputed on every response change; the rules are small
//! enough that incremental updates would buy nothing.

use shared_types::{BusinessType, Complexity, ConditionalVisibility, FeatureCategory,
    QuestionnaireResponses};

pub fn resolve(responses: &QuestionnaireResponses) -> ConditionalVisibility {
    ConditionalVisibility {
        show_advanced_features: has_complex_core_feature(responses),
        show_ecommerce_details: is_commerce_business(responses),
        show_mobile_details: targets_native_mobile(responses),
    }
}

/// Advanced-features step: shown once a complex core feature is selected.
fn has_complex_core_feature(responses: &QuestionnaireResponses) -> bool {
    responses.features.iter().any(|f| {
        f.selected
            && f.category == FeatureCategory::CoreFunctionality
            && f.complexity == Complexity::Complex
    })
}

/// E-commerce details step: shown for retail-like businesses.
fn is_commerce_business(responses: &QuestionnaireResponses) -> bool {
    matches!(
        responses.business_type,
        Some(BusinessType::Ecommerce) | Some(BusinessType::Retail)
    )
}

/// Mobile details step: shown when any chosen platform is native mobile.
fn targets_native_mobile(responses: &QuestionnaireResponses) -> bool {
    responses.platforms.iter().any(|p| p.is_native_mobile())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Platform, SelectedFeature};

    fn core_feature(complexity: Complexity, selected: bool) -> SelectedFeature {
        SelectedFeature {
            id: "messaging-system".to_string(),
            name: "Messaging".to_string(),
            category: FeatureCategory::CoreFunctionality,
            base_cost: 0,
            complexity,
            selected,
        }
    }

    #[test]
    fn all_hidden_by_default() {
        let flags = resolve(&QuestionnaireResponses::default());
        assert_eq!(flags, ConditionalVisibility::default());
    }

    #[test]
    fn complex_core_feature_reveals_advanced_step() {
        let responses = QuestionnaireResponses {
            features: vec![core_feature(Complexity::Complex, true)],
            ..Default::default()
        };
        assert!(resolve(&responses).show_advanced_features);

        // Unselected or non-complex features do not count
        let responses = QuestionnaireResponses {
            features: vec![
                core_feature(Complexity::Complex, false),
                core_feature(Complexity::Moderate, true),
            ],
            ..Default::default()
        };
        assert!(!resolve(&responses).show_advanced_features);
    }

    #[test]
    fn commerce_business_types_reveal_ecommerce_step() {
        for business_type in [BusinessType::Ecommerce, BusinessType::Retail] {
            let responses = QuestionnaireResponses {
                business_type: Some(business_type),
                ..Default::default()
            };
            assert!(resolve(&responses).show_ecommerce_details);
        }

        let responses = QuestionnaireResponses {
            business_type: Some(BusinessType::Healthcare),
            ..Default::default()
        };
        assert!(!resolve(&responses).show_ecommerce_details);
    }

    #[test]
    fn native_mobile_platform_reveals_mobile_step() {
        let responses = QuestionnaireResponses {
            platforms: vec![Platform::WebResponsive, Platform::AndroidNative],
            ..Default::default()
        };
        assert!(resolve(&responses).show_mobile_details);

        let responses = QuestionnaireResponses {
            platforms: vec![Platform::WebResponsive, Platform::WebAppPwa],
            ..Default::default()
        };
        assert!(!resolve(&responses).show_mobile_details);
    }

    #[test]
    fn identical_responses_yield_identical_flags() {
        let responses = QuestionnaireResponses {
            business_type: Some(BusinessType::Ecommerce),
            features: vec![core_feature(Complexity::Complex, true)],
            platforms: vec![Platform::IosNative],
            ..Default::default()
        };
        assert_eq!(resolve(&responses), resolve(&responses));
    }
}
