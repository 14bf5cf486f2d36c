//! Skill tags recognised in the Step 2 skills answer.

use serde::Serialize;

/// A predefined skill or passion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillTag {
    pub id: &'static str,
    pub label: &'static str,
}

static SKILL_TAGS: [SkillTag; 8] = [
    SkillTag { id: "s1", label: "Problem Solving" },
    SkillTag { id: "s2", label: "Leadership" },
    SkillTag { id: "s3", label: "Mathematics/Science" },
    SkillTag { id: "s4", label: "Creative Writing" },
    SkillTag { id: "s5", label: "Public Speaking" },
    SkillTag { id: "s6", label: "Digital Design" },
    SkillTag { id: "s7", label: "Teamwork/Organizing" },
    SkillTag { id: "s8", label: "Manual/Practical Skills" },
];

/// Returns every skill tag in catalog order.
pub fn skill_tags() -> &'static [SkillTag] {
    &SKILL_TAGS
}

impl SkillTag {
    /// True when any alternative of the label ("Mathematics" or "Science")
    /// appears in `text`, ignoring case.
    pub fn mentioned_in(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.label
            .split('/')
            .map(|part| part.trim().to_lowercase())
            .any(|part| !part.is_empty() && lower.contains(&part))
    }
}

/// Tags mentioned anywhere in a free-text skills answer, in catalog order.
pub fn detect_skills(text: &str) -> Vec<&'static SkillTag> {
    SKILL_TAGS.iter().filter(|t| t.mentioned_in(text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tags_by_any_label_part() {
        let found = detect_skills("I love science, leadership and organizing events");
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["s2", "s3", "s7"]);
    }

    #[test]
    fn detection_ignores_case() {
        assert!(skill_tags()[4].mentioned_in("PUBLIC SPEAKING at church"));
    }

    #[test]
    fn unrelated_text_matches_nothing() {
        assert!(detect_skills("football and cooking").is_empty());
    }
}
