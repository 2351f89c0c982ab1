// Utility functions
// Storage access and display helpers

pub mod format;
pub mod storage;
