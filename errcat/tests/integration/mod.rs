mod check_tests;
mod command_tests;
mod config_tests;
