// Toxicity scoring — trait-based abstraction for swappable providers.
//
// The ToxicityScorer trait defines the interface. RemoteScorer implements
// it against the hosted analysis service; tests swap in in-process fakes
// without touching the rest of the pipeline.

pub mod remote;
pub mod traits;
