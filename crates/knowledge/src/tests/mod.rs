//! End-to-end routing tests over the public pipeline.

mod support;
