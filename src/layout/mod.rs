pub(crate) mod node;
pub(crate) mod projector;
pub(crate) mod props;
pub(crate) mod reflow;
pub(crate) mod solver;
pub(crate) mod taffy_bridge;

#[cfg(test)]
#[path = "../../tests/unit/layout/recording.rs"]
pub(crate) mod recording;
