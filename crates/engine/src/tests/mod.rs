//! Scenario tests exercising the full pipeline

mod pipeline_test;
