// Aggregation: runs uploaded resumes through extraction, parsing and scoring,
// then ranks the resulting candidate rows. The HTTP upload endpoint lives here too.

pub mod handlers;
pub mod models;
pub mod pipeline;
