use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    types.push(clean_type(BusinessType::export_to_string()?));
    types.push(clean_type(ProjectGoal::export_to_string()?));
    types.push(clean_type(Complexity::export_to_string()?));
    types.push(clean_type(FeatureCategory::export_to_string()?));
    types.push(clean_type(Platform::export_to_string()?));
    types.push(clean_type(IntegrationCategory::export_to_string()?));
    types.push(clean_type(BudgetRange::export_to_string()?));
    types.push(clean_type(TimelineOption::export_to_string()?));
    types.push(clean_type(ContactPreference::export_to_string()?));
    types.push(clean_type(SelectedFeature::export_to_string()?));
    types.push(clean_type(Integration::export_to_string()?));
    types.push(clean_type(ContactInfo::export_to_string()?));
    types.push(clean_type(QuestionnaireResponses::export_to_string()?));
    types.push(clean_type(ResponseUpdate::export_to_string()?));
    types.push(clean_type(CostCalculation::export_to_string()?));
    types.push(clean_type(ConditionalVisibility::export_to_string()?));
    types.push(clean_type(QuestionnaireSession::export_to_string()?));
    types.push(clean_type(CreateSessionRequest::export_to_string()?));
    types.push(clean_type(SessionResponse::export_to_string()?));
    types.push(clean_type(UpdateResponseRequest::export_to_string()?));
    types.push(clean_type(NavigateRequest::export_to_string()?));
    types.push(clean_type(FeatureCostLine::export_to_string()?));
    types.push(clean_type(PlatformCostLine::export_to_string()?));
    types.push(clean_type(IntegrationCostLine::export_to_string()?));
    types.push(clean_type(BudgetBounds::export_to_string()?));
    types.push(clean_type(CostBreakdown::export_to_string()?));
    types.push(clean_type(EstimateResponse::export_to_string()?));

    // Scope wizard types
    types.push(clean_type(BudgetTier::export_to_string()?));
    types.push(clean_type(BusinessDetails::export_to_string()?));
    types.push(clean_type(SiteGoals::export_to_string()?));
    types.push(clean_type(PageSelection::export_to_string()?));
    types.push(clean_type(DesignPreferences::export_to_string()?));
    types.push(clean_type(MaintenancePlan::export_to_string()?));
    types.push(clean_type(BudgetTimeline::export_to_string()?));
    types.push(clean_type(ScopeRequest::export_to_string()?));
    types.push(clean_type(BusinessSummary::export_to_string()?));
    types.push(clean_type(ProjectGoals::export_to_string()?));
    types.push(clean_type(TechStack::export_to_string()?));
    types.push(clean_type(TimelinePhase::export_to_string()?));
    types.push(clean_type(TimelineEstimate::export_to_string()?));
    types.push(clean_type(BudgetBreakdown::export_to_string()?));
    types.push(clean_type(BudgetEstimate::export_to_string()?));
    types.push(clean_type(DesignDirection::export_to_string()?));
    types.push(clean_type(TechnicalRequirements::export_to_string()?));
    types.push(clean_type(ProjectScope::export_to_string()?));
    types.push(clean_type(ScopeData::export_to_string()?));
    types.push(clean_type(ScopeResponse::export_to_string()?));
    types.push(clean_type(ScopeDocumentRequest::export_to_string()?));
    types.push(clean_type(ScopeDocumentResponse::export_to_string()?));

    types.push(clean_type(ServerStatus::export_to_string()?));
    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("gui/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');
    let lines: Vec<&str> = type_def.lines().collect();
    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
