pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use assertions::{assert_contains, assert_exit_code, assert_path_exists};
pub use fixtures::TestProject;
pub use logging::init_test_logging;
