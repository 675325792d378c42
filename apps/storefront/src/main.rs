//! # Wellness Storefront Entry Point
//!
//! The actual setup lives in lib.rs for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    wellness_storefront::run()
}
