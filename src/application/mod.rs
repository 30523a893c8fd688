// Analysis pipeline
pub mod analyzer;

// Synthetic series generation
pub mod generator;

// Artifact writers and console summary
pub mod reporting;
