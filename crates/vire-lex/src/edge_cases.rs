//! Edge case tests for the tokenizer: the scenarios from the component
//! design that don't fit naturally under a single submodule.
