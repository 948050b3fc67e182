// handlers/mod.rs - Route handlers by resource
//
// Public reads and admin-only writes share a module per resource; the guard
// extractor in each signature decides who may call it.

pub mod companies; // /companies[/:handle]
pub mod jobs;      // /jobs[/:id]
pub mod public;    // / and /health
