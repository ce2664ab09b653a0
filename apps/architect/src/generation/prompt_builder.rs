//! Prompt Builder — a pure function from form input to the prompt string.
//!
//! User text is inserted verbatim: no LaTeX escaping, and inserted values are
//! never rescanned, so braces or `{name}` inside user input stay literal.

use crate::generation::prompts::{LATEX_TEMPLATE, OUTPUT_RULES, RECRUITER_PERSONA};
use crate::models::ProfileData;

/// Builds the full instruction text sent to the model.
pub fn build_prompt(job_description: &str, resume_text: &str, profile: &ProfileData) -> String {
    format!(
        "{RECRUITER_PERSONA}

JD: {job_description}
Old Resume: {resume_text}

CANDIDATE DATA TO INTEGRATE:
- Name: {name}
- Email: {email} | GitHub: {github} | LinkedIn: {linkedin}
- LeetCode: {leetcode} ({solved} solved)
- Internships: {internships}
- Experience: {experience}
- Achievements: {achievements}

STRICT RULES:
{OUTPUT_RULES}

LATEX TEMPLATE:
{LATEX_TEMPLATE}",
        name = profile.name,
        email = profile.email,
        github = profile.github,
        linkedin = profile.linkedin,
        leetcode = profile.leetcode,
        solved = profile.solved,
        internships = profile.internships,
        experience = profile.experience,
        achievements = profile.achievements,
    )
}
