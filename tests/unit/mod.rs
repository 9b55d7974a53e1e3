/// Unit tests for the date-range and streak engine
mod basic_tests;
