// Resume ingestion: PDF bytes -> flat text -> heuristically extracted fields.
// Both stages are best-effort and never fail; callers must tolerate empty output.

pub mod extract;
pub mod fields;
