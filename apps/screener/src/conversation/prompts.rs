// Prompt text for the free-form chat strategy.

/// Question plus the candidate table as context. The reply is shown to the user verbatim.
pub fn free_form_prompt(question: &str, candidate_table: &str) -> String {
    format!(
        "You are an assistant helping a recruiter review screened candidates.
Answer the recruiter's question using only the candidate table below.
If the table does not contain the answer, say so plainly.

CANDIDATES:
{candidate_table}

QUESTION:
{question}"
    )
}
