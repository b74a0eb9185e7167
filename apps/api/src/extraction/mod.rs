// Resume ingestion: document decoding and heuristic section extraction.
// Decoding is the only place file formats exist; the extractor sees text.

pub mod decode;
pub mod handlers;
pub mod sections;
