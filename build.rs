#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    // Falls back to default values outside of a git checkout.
    EmitBuilder::builder().git_describe(true, true, None).emit()?;

    return Ok(());
}
