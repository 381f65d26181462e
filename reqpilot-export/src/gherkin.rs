//! Behavior-driven-development rendering: one `Feature:` block per story,
//! one `Scenario:` block per criterion, literal Given/When/Then step lines in
//! source order.

use reqpilot_core::CriterionSet;

pub fn criteria_feature(set: &CriterionSet, feature_name: &str) -> String {
    let mut out = vec![format!("Feature: {}\n", feature_name)];

    for scenario in &set.scenarios {
        out.push(format!("  Scenario: {}", scenario.name));
        out.push(format!("    Given {}", scenario.given));
        out.push(format!("    When {}", scenario.when));
        out.push(format!("    Then {}", scenario.then));
        out.push(String::new());
    }

    out.join("\n")
}
