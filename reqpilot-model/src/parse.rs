//! Parsers turning the generation service's markdown output into stage
//! artifacts. Structure tolerated: the strict formats the prompts pin down,
//! plus the bulleted/bold variants models actually produce. An output that
//! yields no items at all is a [`PipelineError::MalformedResponse`].

use regex::Regex;
use reqpilot_core::{
    CriterionSet, PipelineError, Priority, Requirement, RequirementKind, RequirementSet, Result,
    Scenario, UserStory, UserStorySet,
};
use std::sync::OnceLock;

fn requirement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(NFR|FR)-?(\d+)\b\**\s*[:.]\s*(.+)").unwrap())
}

fn story_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\*\*Story ID\*\*\s*:\s*(US-?\d+)").unwrap())
}

fn scenario_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\*\*\s*Scenario\s*\d+\s*:\s*([^*]+)\*\*").unwrap())
}

/// Collapse runs of whitespace, including line breaks, into single spaces.
fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_requirements(text: &str) -> Result<RequirementSet> {
    let mut set = RequirementSet::default();

    for line in text.lines() {
        if let Some(caps) = requirement_re().captures(line) {
            let prefix = caps[1].to_uppercase();
            let code = format!("{}-{}", prefix, &caps[2]);
            let description = squash(&caps[3]);
            if description.is_empty() {
                continue;
            }
            let (kind, bucket) = if prefix == "NFR" {
                (RequirementKind::NonFunctional, &mut set.non_functional)
            } else {
                (RequirementKind::Functional, &mut set.functional)
            };
            bucket.push(Requirement { code, kind, description });
        }
    }

    // No coded items: fall back to section-scoped bullets and assign
    // sequential codes, as uncoded outputs still carry the section headers.
    if set.is_empty() {
        set = parse_uncoded_requirements(text);
    }

    if set.is_empty() {
        return Err(PipelineError::MalformedResponse(
            "no requirements found in generation output".to_string(),
        ));
    }
    Ok(set)
}

fn parse_uncoded_requirements(text: &str) -> RequirementSet {
    let mut set = RequirementSet::default();
    let mut section: Option<RequirementKind> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if lowered.contains("non-functional requirements")
            || lowered.contains("non functional requirements")
        {
            section = Some(RequirementKind::NonFunctional);
            continue;
        } else if lowered.contains("functional requirements") {
            section = Some(RequirementKind::Functional);
            continue;
        } else if trimmed.starts_with("##") {
            section = None;
            continue;
        }

        let is_bullet = trimmed.starts_with('-') || trimmed.starts_with('*') || trimmed.starts_with('•');
        if !is_bullet || trimmed.len() <= 20 {
            continue;
        }
        let description = squash(trimmed.trim_start_matches(['-', '*', '•']).trim());

        match section {
            Some(RequirementKind::Functional) => {
                let code = format!("FR-{:03}", set.functional.len() + 1);
                set.functional.push(Requirement {
                    code,
                    kind: RequirementKind::Functional,
                    description,
                });
            }
            Some(RequirementKind::NonFunctional) => {
                let code = format!("NFR-{:03}", set.non_functional.len() + 1);
                set.non_functional.push(Requirement {
                    code,
                    kind: RequirementKind::NonFunctional,
                    description,
                });
            }
            None => {}
        }
    }

    set
}

pub fn parse_stories(text: &str) -> Result<UserStorySet> {
    let mut stories = Vec::new();

    for block in split_story_blocks(text) {
        if let Some(story) = parse_story_block(&block) {
            stories.push(story);
        }
    }

    if stories.is_empty() {
        return Err(PipelineError::MalformedResponse(
            "no user stories found in generation output".to_string(),
        ));
    }
    Ok(UserStorySet { stories })
}

/// Story blocks are separated by lines of dashes.
fn split_story_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
            if !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_story_block(block: &str) -> Option<UserStory> {
    let code = story_id_re().captures(block)?[1].to_uppercase();

    let title = field(block, "Title").unwrap_or_else(|| code.clone());
    let narrative = field(block, "User Story").unwrap_or_default();
    let priority = match field(block, "Priority").unwrap_or_default().to_lowercase() {
        p if p.contains("high") => Priority::High,
        p if p.contains("low") => Priority::Low,
        _ => Priority::Medium,
    };
    let story_points = field(block, "Story Points")
        .and_then(|v| {
            let digits: String = v.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(1)
        .max(1);
    let dependencies = field(block, "Dependencies").unwrap_or_else(|| "None".to_string());
    let notes = field(block, "Notes").unwrap_or_default();

    Some(UserStory { code, title, narrative, priority, story_points, dependencies, notes })
}

/// Value of a `**Label**: value` field, with continuation lines folded in
/// until the next bold label.
fn field(block: &str, label: &str) -> Option<String> {
    let marker = format!("**{}**", label);
    let mut collecting = false;
    let mut parts: Vec<String> = Vec::new();

    for line in block.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(&marker) {
            parts.push(rest.trim_start_matches(':').trim().to_string());
            collecting = true;
        } else if collecting {
            if trimmed.starts_with("**") || trimmed.is_empty() {
                break;
            }
            parts.push(trimmed.to_string());
        }
    }

    if !collecting {
        return None;
    }
    let value = squash(&parts.join(" "));
    if value.is_empty() { None } else { Some(value) }
}

pub fn parse_criteria(text: &str, story_code: &str) -> Result<CriterionSet> {
    let mut scenarios = Vec::new();

    let headers: Vec<_> = scenario_re().captures_iter(text).collect();
    for (idx, caps) in headers.iter().enumerate() {
        let name = squash(&caps[1]);
        let start = caps.get(0).unwrap().end();
        let end = headers
            .get(idx + 1)
            .map(|next| next.get(0).unwrap().start())
            .unwrap_or(text.len());

        if let Some(scenario) = parse_scenario(name, &text[start..end]) {
            scenarios.push(scenario);
        }
    }

    if scenarios.is_empty() {
        return Err(PipelineError::MalformedResponse(
            "no Given-When-Then scenarios found in generation output".to_string(),
        ));
    }
    Ok(CriterionSet::new(story_code, scenarios))
}

#[derive(Clone, Copy, PartialEq)]
enum Clause {
    Given,
    When,
    Then,
}

/// Strip a leading step keyword case-insensitively, keeping the rest of the
/// line in its original casing.
fn strip_keyword<'a>(step: &'a str, keyword: &str) -> Option<&'a str> {
    let prefix = step.get(..keyword.len())?;
    if prefix.eq_ignore_ascii_case(keyword) { Some(step[keyword.len()..].trim_start()) } else { None }
}

fn parse_scenario(name: String, content: &str) -> Option<Scenario> {
    let mut given: Vec<String> = Vec::new();
    let mut when: Vec<String> = Vec::new();
    let mut then: Vec<String> = Vec::new();
    let mut current: Option<Clause> = None;

    for line in content.lines() {
        let step = line.trim().trim_start_matches(['-', '*']).trim();

        let (clause, rest) = if let Some(rest) = strip_keyword(step, "GIVEN ") {
            (Some(Clause::Given), rest)
        } else if let Some(rest) = strip_keyword(step, "WHEN ") {
            (Some(Clause::When), rest)
        } else if let Some(rest) = strip_keyword(step, "THEN ") {
            (Some(Clause::Then), rest)
        } else if let Some(rest) = strip_keyword(step, "AND ") {
            (current, rest)
        } else {
            continue;
        };

        let value = squash(rest);
        if value.is_empty() {
            continue;
        }
        match clause {
            Some(Clause::Given) => {
                current = Some(Clause::Given);
                given.push(value);
            }
            Some(Clause::When) => {
                current = Some(Clause::When);
                when.push(value);
            }
            Some(Clause::Then) => {
                current = Some(Clause::Then);
                then.push(value);
            }
            None => {}
        }
    }

    if given.is_empty() || when.is_empty() || then.is_empty() {
        return None;
    }
    Some(Scenario {
        name,
        given: given.join(" AND "),
        when: when.join(" AND "),
        then: then.join(" AND "),
    })
}
