// Prompt text for the external-judge scorer.
// The reply contract (`SCORE:` / `REASON:` lines) is parsed in `judge.rs`.

/// Judge prompt. The job description and resume are embedded verbatim.
pub fn judge_prompt(jd_text: &str, resume_text: &str) -> String {
    format!(
        "You are an experienced technical recruiter screening candidates for a role.
Compare the RESUME against the JOB DESCRIPTION and rate how well the candidate fits.

Respond with exactly two lines and nothing else:
SCORE: <integer from 0 to 100>
REASON: <one or two sentences justifying the score>

Scoring guide:
- 80-100: meets nearly every requirement, directly relevant experience
- 50-79: meets the core requirements with some gaps
- 20-49: partially relevant background, major gaps
- 0-19: unrelated profile

JOB DESCRIPTION:
{jd_text}

RESUME:
{resume_text}"
    )
}
