//! Project scope generation: rule-based tech stack, timeline and budget
//! derivation from the submitted form sections, plus markdown rendering of
//! the result for download and email sharing.

use chrono::Utc;
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use shared_types::{
    BudgetBreakdown, BudgetEstimate, BudgetTier, BusinessSummary, DesignDirection, ProjectGoals,
    ProjectScope, ScopeRequest, TechStack, TechnicalRequirements, TimelineEstimate, TimelinePhase,
};

use crate::error::AppResult;

// Visitor-goal strings the rule table keys on; these match the form's
// checkbox labels verbatim.
const GOAL_PURCHASES: &str = "Make purchases";
const GOAL_BOOKING: &str = "Book appointments/services";

const MANY_PAGES_THRESHOLD: usize = 8;

static SCOPE_TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    // The output is markdown, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string("scope_document", SCOPE_DOCUMENT_TEMPLATE)
        .expect("built-in scope template parses");
    registry
});

pub fn generate_project_scope(request: &ScopeRequest) -> ProjectScope {
    ProjectScope {
        business_summary: BusinessSummary {
            name: request.business.business_name.clone(),
            description: request.business.business_description.clone(),
            target_audience: request.business.target_customers.join(", "),
            unique_value: request.business.differentiators.clone(),
        },
        project_goals: ProjectGoals {
            primary: request.goals.visitor_goals.clone(),
            features: request.goals.additional_features.clone(),
            pages: request.pages.selected_pages.clone(),
        },
        tech_stack: recommend_tech_stack(request),
        timeline: estimate_timeline(request),
        budget: estimate_budget(request),
        design_direction: DesignDirection {
            tone: request.design.emotional_tone.join(", "),
            style: request.design.design_likes.join(", "),
            colors: request.design.color_preferences.join(", "),
            logo_status: request.design.logo_status.clone(),
        },
        technical_requirements: TechnicalRequirements {
            maintenance: request.maintenance.who_updates.clone(),
            update_frequency: request.maintenance.update_frequency.clone(),
            domain: request.maintenance.domain_status.clone(),
            email: request.maintenance.email_needs.clone(),
        },
        next_steps: vec![
            "Review and approve this project scope".to_string(),
            "Finalize contract and timeline".to_string(),
            "Begin design phase with wireframes".to_string(),
            "Set up development environment".to_string(),
            "Regular check-ins and progress updates".to_string(),
        ],
    }
}

/// Timestamp-derived submission identifier. Collision odds across
/// submissions are negligible at form-filling rates.
pub fn new_submission_id() -> String {
    format!("proj_{}", Utc::now().timestamp_millis())
}

/// Renders the scope into the fixed markdown section layout.
pub fn render_scope_document(scope: &ProjectScope) -> AppResult<String> {
    let markdown = SCOPE_TEMPLATES.render("scope_document", scope)?;
    Ok(markdown)
}

/// Prefilled mailto URL carrying the document as the email body.
pub fn mailto_link(scope: &ProjectScope, document: &str) -> String {
    let subject = format!("Project Scope: {}", scope.business_summary.name);
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(document)
    )
}

/// Download filename for the rendered document.
pub fn document_filename(scope: &ProjectScope) -> String {
    format!("project-scope-{}.md", slugify(&scope.business_summary.name))
}

fn recommend_tech_stack(request: &ScopeRequest) -> TechStack {
    let has_ecommerce = request
        .goals
        .visitor_goals
        .iter()
        .any(|g| g == GOAL_PURCHASES);
    let has_booking = request.goals.visitor_goals.iter().any(|g| g == GOAL_BOOKING);
    let has_complex_sitemap = request.pages.selected_pages.len() > MANY_PAGES_THRESHOLD;
    let needs_cms =
        request.maintenance.who_updates == "me" || request.maintenance.update_frequency == "daily";

    let cms_choice = if needs_cms { "Sanity CMS" } else { "Built-in admin" };

    if has_ecommerce {
        TechStack {
            framework: "Next.js with TypeScript".to_string(),
            ecommerce: Some("Shopify or WooCommerce".to_string()),
            booking: None,
            database: Some("PostgreSQL".to_string()),
            hosting: "Vercel or AWS".to_string(),
            cms: cms_choice.to_string(),
        }
    } else if has_booking {
        TechStack {
            framework: "Next.js with TypeScript".to_string(),
            ecommerce: None,
            booking: Some("Calendly integration or custom system".to_string()),
            database: Some("PostgreSQL".to_string()),
            hosting: "Vercel".to_string(),
            cms: cms_choice.to_string(),
        }
    } else if has_complex_sitemap || needs_cms {
        TechStack {
            framework: "Next.js with TypeScript".to_string(),
            ecommerce: None,
            booking: None,
            database: Some("PostgreSQL or MongoDB".to_string()),
            hosting: "Vercel".to_string(),
            cms: "Sanity CMS or Strapi".to_string(),
        }
    } else {
        TechStack {
            framework: "Next.js with TypeScript".to_string(),
            ecommerce: None,
            booking: None,
            database: None,
            hosting: "Vercel".to_string(),
            cms: "File-based or simple admin".to_string(),
        }
    }
}

fn estimate_timeline(request: &ScopeRequest) -> TimelineEstimate {
    let page_count = request.pages.selected_pages.len();
    let has_ecommerce = request
        .goals
        .visitor_goals
        .iter()
        .any(|g| g == GOAL_PURCHASES);
    let has_booking = request.goals.visitor_goals.iter().any(|g| g == GOAL_BOOKING);
    let has_custom_design = request.design.design_likes.len() > 3;

    let mut weeks: u32 = 4;

    if page_count > MANY_PAGES_THRESHOLD {
        weeks += 2;
    }
    if has_ecommerce {
        weeks += 3;
    }
    if has_booking {
        weeks += 2;
    }
    if has_custom_design {
        weeks += 1;
    }
    if request.budget.launch_timeline == "asap" {
        weeks = weeks.saturating_sub(1).max(3);
    }

    let development_weeks = (weeks as f64 * 0.6).ceil() as u32;

    TimelineEstimate {
        estimated: format!("{weeks} weeks"),
        phases: vec![
            TimelinePhase {
                phase: "Planning & Design".to_string(),
                duration: "1-2 weeks".to_string(),
            },
            TimelinePhase {
                phase: "Development".to_string(),
                duration: format!("{development_weeks} weeks"),
            },
            TimelinePhase {
                phase: "Testing & Launch".to_string(),
                duration: "1 week".to_string(),
            },
        ],
    }
}

fn estimate_budget(request: &ScopeRequest) -> BudgetEstimate {
    match request.budget.budget_tier {
        Some(BudgetTier::Basic) => BudgetEstimate {
            estimate: "$2,000 - $5,000".to_string(),
            breakdown: Some(BudgetBreakdown {
                design: "$500 - $1,000".to_string(),
                development: "$1,200 - $3,000".to_string(),
                setup: "$300 - $1,000".to_string(),
            }),
        },
        Some(BudgetTier::Professional) => BudgetEstimate {
            estimate: "$5,000 - $15,000".to_string(),
            breakdown: Some(BudgetBreakdown {
                design: "$1,000 - $3,000".to_string(),
                development: "$3,000 - $10,000".to_string(),
                setup: "$1,000 - $2,000".to_string(),
            }),
        },
        Some(BudgetTier::Enterprise) => BudgetEstimate {
            estimate: "$15,000+".to_string(),
            breakdown: Some(BudgetBreakdown {
                design: "$3,000 - $8,000".to_string(),
                development: "$10,000+".to_string(),
                setup: "$2,000+".to_string(),
            }),
        },
        None => BudgetEstimate {
            estimate: "Custom quote needed".to_string(),
            breakdown: None,
        },
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "project".to_string()
    } else {
        trimmed.to_string()
    }
}

const SCOPE_DOCUMENT_TEMPLATE: &str = "\
# Project Scope: {{business_summary.name}}

## Business Summary

{{business_summary.description}}

- Target audience: {{business_summary.target_audience}}
- What sets them apart: {{business_summary.unique_value}}

## Goals

{{#each project_goals.primary}}- {{this}}
{{/each}}
### Requested features

{{#each project_goals.features}}- {{this}}
{{/each}}
## Pages

{{#each project_goals.pages}}- {{this}}
{{/each}}
## Recommended Technology

- Framework: {{tech_stack.framework}}
{{#if tech_stack.ecommerce}}- E-commerce: {{tech_stack.ecommerce}}
{{/if}}{{#if tech_stack.booking}}- Booking: {{tech_stack.booking}}
{{/if}}{{#if tech_stack.database}}- Database: {{tech_stack.database}}
{{/if}}- Hosting: {{tech_stack.hosting}}
- Content management: {{tech_stack.cms}}

## Timeline

Estimated total: {{timeline.estimated}}

{{#each timeline.phases}}- {{phase}}: {{duration}}
{{/each}}
## Budget

Estimate: {{budget.estimate}}

{{#if budget.breakdown}}- Design: {{budget.breakdown.design}}
- Development: {{budget.breakdown.development}}
- Setup: {{budget.breakdown.setup}}
{{/if}}
## Design Direction

- Tone: {{design_direction.tone}}
- Style references: {{design_direction.style}}
- Colors: {{design_direction.colors}}
- Logo: {{design_direction.logo_status}}

## Technical Requirements

- Content maintenance: {{technical_requirements.maintenance}}
- Update frequency: {{technical_requirements.update_frequency}}
- Domain: {{technical_requirements.domain}}
{{#each technical_requirements.email}}- Email: {{this}}
{{/each}}
## Next Steps

{{#each next_steps}}- {{this}}
{{/each}}";
