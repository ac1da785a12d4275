//! Policy shared by the workspace's CI and local test runs.

pub mod property_test_profile;
