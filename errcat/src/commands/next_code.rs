//! `errcat next-code`: suggest the marker for the next free code.

use super::Outcome;
use super::helpers::load;
use crate::cli::CatalogArgs;
use anyhow::Result;
use errcat_common::{marker_line, next_free_code};

pub fn run(args: &CatalogArgs, bare: bool) -> Result<Outcome> {
    let loaded = load(args)?;
    let next = next_free_code(&loaded.catalog, loaded.config.floor());

    if bare {
        println!("{next}");
    } else {
        println!("{}", marker_line(next));
    }
    Ok(Outcome::Success)
}
