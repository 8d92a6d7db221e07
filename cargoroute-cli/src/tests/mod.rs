//! Shared test harness modules for the CargoRoute CLI.

use super::*;

mod click_unit;
mod helpers;
mod locate_unit;
mod providers_unit;
