//! Tests for request encoding and response parsing
