//! Canonical markdown renderings, used for on-screen display and plain-text
//! export. Pure functions of the artifact; same input, same bytes.

use reqpilot_core::{CriterionSet, RequirementSet, UserStorySet};

pub fn requirements_markdown(set: &RequirementSet) -> String {
    let mut out = String::new();

    if !set.functional.is_empty() {
        out.push_str("## Functional Requirements\n\n");
        for req in &set.functional {
            out.push_str(&format!("**{}**: {}\n", req.code, req.description));
        }
    }

    if !set.non_functional.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("## Non-Functional Requirements\n\n");
        for req in &set.non_functional {
            out.push_str(&format!("**{}**: {}\n", req.code, req.description));
        }
    }

    out.push_str(&format!(
        "\n---\n**Total Requirements**: {} ({} Functional, {} Non-Functional)\n",
        set.total_count(),
        set.functional.len(),
        set.non_functional.len()
    ));

    out
}

pub fn stories_markdown(set: &UserStorySet) -> String {
    let mut out = String::from("## User Stories\n");

    for story in &set.stories {
        out.push_str(&format!("\n### {}: {}\n", story.code, story.title));
        out.push_str(&format!("**Story**: {}\n", story.narrative));
        out.push_str(&format!(
            "**Priority**: {} | **Story Points**: {} | **Dependencies**: {}\n",
            story.priority.label(),
            story.story_points,
            story.dependencies
        ));
        if !story.notes.is_empty() {
            out.push_str(&format!("**Notes**: {}\n", story.notes));
        }
        out.push_str("\n---\n");
    }

    out.push_str(&format!("\n**Total User Stories**: {}\n", set.len()));
    out
}

pub fn criteria_markdown(set: &CriterionSet) -> String {
    let mut out = format!("## Acceptance Criteria: {}\n", set.story_code);

    for (idx, scenario) in set.scenarios.iter().enumerate() {
        out.push_str(&format!("\n### Scenario {}: {}\n", idx + 1, scenario.name));
        out.push_str(&format!("**Given** {}\n", scenario.given));
        out.push_str(&format!("**When** {}\n", scenario.when));
        out.push_str(&format!("**Then** {}\n", scenario.then));
    }

    out.push_str(&format!("\n---\n**Total Scenarios**: {}\n", set.scenarios.len()));
    out
}
