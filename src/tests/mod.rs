//! Scenario tests for the weather pipeline against mocked data.gov.sg endpoints.

mod pipeline_tests;
