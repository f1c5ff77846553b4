mod property_tests;
mod scenario_tests;
mod test_helpers;
