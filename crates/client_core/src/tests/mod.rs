mod api_tests;
mod phase_tests;
mod store_tests;
