//! `libusb-recipe source` command

use anyhow::Result;

use crate::cli::SourceArgs;
use libusb_recipe::sources::{acquire_source, HttpFetcher};
use libusb_recipe::util::GlobalContext;
use libusb_recipe::LIBUSB;

pub fn execute(args: SourceArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let workspace = ctx.workspace(args.workspace.as_deref());

    let fetcher = if args.no_cache {
        HttpFetcher::new()
    } else {
        HttpFetcher::new().with_cache_dir(ctx.download_cache_dir())
    };

    let source_dir = acquire_source(&LIBUSB, &workspace, &fetcher)?;
    eprintln!("   Extracted {} to {}", LIBUSB.release_name(), source_dir.display());

    Ok(())
}
