//! Static pricing lookup table.
//!
//! Four maps drive the estimate engine: base feature costs, platform
//! multipliers, complexity multipliers and integration costs. Lookups over
//! the open identifier sets return `Option` so callers must spell out the
//! fallback; the closed enumerations resolve to a factor directly.

use shared_types::{Complexity, Platform};

/// Bumped whenever the table below changes.
pub const PRICING_TABLE_VERSION: &str = "2024-06";

/// Base cost in whole USD for a feature id, `None` for identifiers the
/// table does not know about.
pub fn base_feature_cost(id: &str) -> Option<i64> {
    let cost = match id {
        // Core functionality
        "user-authentication" => 2500,
        "user-profiles" => 1500,
        "dashboard" => 3000,
        "search-functionality" => 2000,
        "content-management" => 4000,
        "file-upload" => 1500,
        "notifications" => 2000,
        "messaging-system" => 3500,

        // E-commerce features
        "product-catalog" => 3000,
        "shopping-cart" => 2500,
        "payment-processing" => 4000,
        "order-management" => 3500,
        "inventory-tracking" => 3000,
        "shipping-integration" => 2500,

        // Advanced features
        "real-time-chat" => 4000,
        "video-calling" => 6000,
        "ai-integration" => 8000,
        "analytics-dashboard" => 3500,
        "reporting-system" => 3000,
        "api-development" => 4500,
        "third-party-integrations" => 2500,
        "custom-workflows" => 5000,

        // Mobile-specific
        "push-notifications" => 1500,
        "offline-functionality" => 3000,
        "camera-integration" => 2000,
        "gps-location" => 1500,
        "biometric-auth" => 2500,

        _ => return None,
    };
    Some(cost)
}

/// Cost in whole USD for an integration id, `None` when unknown.
pub fn integration_cost(id: &str) -> Option<i64> {
    let cost = match id {
        // Payment processors
        "stripe" => 1500,
        "paypal" => 1200,
        "square" => 1800,

        // CRM systems
        "salesforce" => 3000,
        "hubspot" => 2500,
        "pipedrive" => 2000,

        // Marketing tools
        "mailchimp" => 1500,
        "constant-contact" => 1200,
        "sendgrid" => 1000,

        // Analytics
        "google-analytics" => 800,
        "mixpanel" => 1500,
        "amplitude" => 1800,

        // Communication
        "twilio" => 2000,
        "sendbird" => 2500,
        "slack" => 1500,

        // Other
        "zapier" => 1200,
        "custom-api" => 3000,

        _ => return None,
    };
    Some(cost)
}

/// Per-platform overhead factor, always >= 1.0.
pub fn platform_multiplier(platform: Platform) -> f64 {
    match platform {
        Platform::WebResponsive => 1.0,
        Platform::IosNative => 1.5,
        Platform::AndroidNative => 1.5,
        Platform::DesktopApp => 1.3,
        Platform::WebAppPwa => 1.1,
    }
}

pub fn complexity_multiplier(complexity: Complexity) -> f64 {
    match complexity {
        Complexity::Simple => 1.0,
        Complexity::Moderate => 1.3,
        Complexity::Complex => 1.8,
    }
}
