// Orchestration core.
//
// One submission flows fetch → aggregate → decide → (review) → store.
// The pipeline emits PipelineEvents instead of touching any display
// surface, so the presentation layer is swappable.

pub mod aggregate;
pub mod events;
pub mod session;
