mod common;

use actix_web::test::{self, TestRequest};
use actix_web::App;
use introspect_manager::routes::configure_routes;
use serde_json::{json, Value};

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .configure(configure_routes),
        )
        .await
    };
}

fn submission() -> Value {
    json!({
        "business": {
            "business_name": "Acme Anvils",
            "business_description": "Artisanal anvils for discerning coyotes",
            "target_customers": ["coyotes", "blacksmiths"],
            "differentiators": "Hand forged since 1949"
        },
        "goals": {
            "visitor_goals": ["Make purchases", "Learn about services"],
            "payment_methods": ["card"],
            "booking_type": "",
            "contact_preference": "email",
            "additional_features": ["Newsletter signup"]
        },
        "pages": {
            "selected_pages": ["Home", "About", "Shop", "Contact"],
            "content_status": { "Home": "ready", "Shop": "needs-work" }
        },
        "design": {
            "example_websites": ["https://example.com"],
            "design_likes": ["clean layout"],
            "emotional_tone": ["trustworthy", "warm"],
            "logo_status": "have-logo",
            "color_preferences": ["forge orange"]
        },
        "maintenance": {
            "who_updates": "me",
            "update_frequency": "weekly",
            "domain_status": "owned",
            "email_needs": ["info@acme.test"]
        },
        "budget": {
            "budget_tier": "professional",
            "launch_timeline": "3-months",
            "urgency_reason": ""
        }
    })
}

#[actix_rt::test]
async fn submit_generates_a_project_scope() -> anyhow::Result<()> {
    let ctx = common::test_state();
    let app = test_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/scope")
        .set_json(submission())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Project scope generated successfully");

    let data = &body["data"];
    assert!(data["submission_id"].as_str().unwrap().starts_with("proj_"));
    assert!(data["timestamp"].is_string());

    let scope = &data["project_scope"];
    assert_eq!(scope["business_summary"]["name"], "Acme Anvils");
    assert_eq!(
        scope["business_summary"]["target_audience"],
        "coyotes, blacksmiths"
    );
    // "Make purchases" routes to the e-commerce stack
    assert_eq!(scope["tech_stack"]["ecommerce"], "Shopify or WooCommerce");
    // who_updates = "me" calls for a real CMS
    assert_eq!(scope["tech_stack"]["cms"], "Sanity CMS");
    // 4 base weeks + 3 for e-commerce
    assert_eq!(scope["timeline"]["estimated"], "7 weeks");
    assert_eq!(scope["budget"]["estimate"], "$5,000 - $15,000");
    assert_eq!(scope["next_steps"].as_array().unwrap().len(), 5);
    Ok(())
}

#[actix_rt::test]
async fn submit_without_business_name_is_rejected() -> anyhow::Result<()> {
    let ctx = common::test_state();
    let app = test_app!(ctx);

    let mut payload = submission();
    payload["business"]["business_name"] = json!("   ");

    let req = TestRequest::post()
        .uri("/api/scope")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Business name is required"));
    Ok(())
}

#[actix_rt::test]
async fn document_renders_markdown_and_mailto() -> anyhow::Result<()> {
    let ctx = common::test_state();
    let app = test_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/scope")
        .set_json(submission())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = serde_json::from_slice(&test::read_body(resp).await)?;
    let project_scope = body["data"]["project_scope"].clone();

    let req = TestRequest::post()
        .uri("/api/scope/document")
        .set_json(json!({ "project_scope": project_scope }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["filename"], "project-scope-acme-anvils.md");

    let markdown = body["markdown"].as_str().unwrap();
    assert!(markdown.starts_with("# Project Scope: Acme Anvils"));
    assert!(markdown.contains("## Recommended Technology"));
    assert!(markdown.contains("- E-commerce: Shopify or WooCommerce"));
    assert!(markdown.contains("## Next Steps"));

    let mailto = body["mailto"].as_str().unwrap();
    assert!(mailto.starts_with("mailto:?subject="));
    assert!(mailto.contains("&body="));
    Ok(())
}
