//! Field Parser: applies a fixed set of patterns to a resume text blob.
//!
//! Every field is one independent search over the whole text. Matches are
//! returned verbatim and in document order: no deduplication, no overlap
//! resolution, no validation. Layouts that deviate from the usual
//! `Label: value` conventions will silently produce misses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `Name: First Last` (colon or dash optional). Only the label form is used;
/// the "first non-empty line" heuristic mistakes headers and addresses for names.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Name[:\-]?\s*(\w+\s*\w+)").expect("name pattern is valid"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

/// Optional `+`, then a digit run of 10–14 characters that may contain spaces or dashes.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d -]{8,12}\d").expect("phone pattern is valid"));

static SKILLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Skills[:\-]?\s*(.*)").expect("skills pattern is valid"));

static EDUCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(B\.Tech|M\.Tech|Ph\.D|PhD|MBA|Bachelors|Masters)")
        .expect("education pattern is valid")
});

static EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\+?\s+years?").expect("experience pattern is valid"));

/// Structured fields pulled out of one resume. All sequences are in match order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    /// Empty when no `Name:` label was found.
    pub name: String,
    pub email: Vec<String>,
    pub phone: Vec<String>,
    /// Raw text after each `Skills:` label, up to end of line. Not split.
    pub skills: Vec<String>,
    pub education: Vec<String>,
    /// Year counts only, e.g. `"5"` for "5+ years".
    pub experience: Vec<String>,
}

/// Runs every field pattern over `text`.
pub fn parse_resume(text: &str) -> ParsedResume {
    ParsedResume {
        name: extract_name(text),
        email: extract_emails(text),
        phone: extract_phones(text),
        skills: extract_skills(text),
        education: extract_education(text),
        experience: extract_experience(text),
    }
}

pub fn extract_name(text: &str) -> String {
    NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

pub fn extract_emails(text: &str) -> Vec<String> {
    find_all(&EMAIL_RE, text)
}

pub fn extract_phones(text: &str) -> Vec<String> {
    find_all(&PHONE_RE, text)
}

pub fn extract_skills(text: &str) -> Vec<String> {
    capture_all(&SKILLS_RE, text)
}

pub fn extract_education(text: &str) -> Vec<String> {
    find_all(&EDUCATION_RE, text)
}

pub fn extract_experience(text: &str) -> Vec<String> {
    capture_all(&EXPERIENCE_RE, text)
}

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// First capture group of every match.
fn capture_all(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Name: Jane Doe\n\
        Email: jane.doe@example.com | Phone: +91 98765 43210\n\
        Skills: Rust, Tokio, PostgreSQL\n\
        Education: B.Tech in Computer Science, MBA\n\
        Experience: 5+ years building distributed systems, 1 year of Go\n";

    #[test]
    fn test_sample_resume_all_fields() {
        let parsed = parse_resume(SAMPLE_RESUME);
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.email, vec!["jane.doe@example.com"]);
        assert_eq!(parsed.phone, vec!["+91 98765 43210"]);
        assert_eq!(parsed.skills, vec!["Rust, Tokio, PostgreSQL"]);
        assert_eq!(parsed.education, vec!["B.Tech", "MBA"]);
        assert_eq!(parsed.experience, vec!["5", "1"]);
    }

    #[test]
    fn test_empty_text_yields_empty_fields() {
        let parsed = parse_resume("");
        assert_eq!(parsed, ParsedResume::default());
        assert!(parsed.name.is_empty());
        assert!(parsed.email.is_empty());
        assert!(parsed.phone.is_empty());
        assert!(parsed.skills.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.experience.is_empty());
    }

    #[test]
    fn test_emails_in_left_to_right_order() {
        let text = "contact b.smith@corp.io or alice_01@mail.example.org, finally z+tag@x.dev";
        assert_eq!(
            extract_emails(text),
            vec!["b.smith@corp.io", "alice_01@mail.example.org", "z+tag@x.dev"]
        );
    }

    #[test]
    fn test_no_email_yields_empty_list() {
        assert!(extract_emails("reach me at jane at example dot com").is_empty());
    }

    #[test]
    fn test_name_without_label_is_empty() {
        assert_eq!(extract_name("Jane Doe\nSoftware Engineer"), "");
    }

    #[test]
    fn test_name_with_dash_label() {
        assert_eq!(extract_name("Name- John Smith\n"), "John Smith");
    }

    #[test]
    fn test_first_name_label_wins() {
        assert_eq!(extract_name("Name: Ada Lovelace\nName: Alan Turing"), "Ada Lovelace");
    }

    #[test]
    fn test_phone_with_dashes() {
        assert_eq!(extract_phones("Call 555-123-4567 today"), vec!["555-123-4567"]);
    }

    #[test]
    fn test_short_digit_run_is_not_a_phone() {
        assert!(extract_phones("Room 1234, zip 56789").is_empty());
    }

    #[test]
    fn test_skills_label_is_case_insensitive_and_unsplit() {
        let text = "SKILLS: Python, SQL\nTechnical skills- Docker, Kubernetes\n";
        assert_eq!(extract_skills(text), vec!["Python, SQL", "Docker, Kubernetes"]);
    }

    #[test]
    fn test_education_vocabulary_case_insensitive() {
        let text = "bachelors in physics, then a phd. Also holds an M.Tech and Ph.D";
        assert_eq!(
            extract_education(text),
            vec!["bachelors", "phd", "M.Tech", "Ph.D"]
        );
    }

    #[test]
    fn test_experience_numeric_only() {
        assert_eq!(extract_experience("10 years in QA, 3+ years lead"), vec!["10", "3"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "Masters ... Masters";
        assert_eq!(extract_education(text), vec!["Masters", "Masters"]);
    }
}
