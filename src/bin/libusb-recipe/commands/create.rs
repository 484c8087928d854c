//! `libusb-recipe create` command

use anyhow::Result;

use super::resolve_target;
use crate::cli::CreateArgs;
use libusb_recipe::builder::ProcessRunner;
use libusb_recipe::ops::{create, CreateOptions};
use libusb_recipe::sources::HttpFetcher;
use libusb_recipe::util::GlobalContext;
use libusb_recipe::LIBUSB;

pub fn execute(args: CreateArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (settings, options) = resolve_target(&ctx, &args.target)?;
    let workspace = ctx.workspace(args.workspace.as_deref());

    let fetcher = if args.no_cache {
        HttpFetcher::new()
    } else {
        HttpFetcher::new().with_cache_dir(ctx.download_cache_dir())
    };

    let opts = CreateOptions::new(LIBUSB, settings, &workspace).with_options(options);
    let info = create(&opts, &fetcher, &ProcessRunner::new())?;

    eprintln!(
        "    Packaged {} {} ({}) in {}",
        info.name,
        info.version,
        info.strategy,
        opts.package_dir().display()
    );
    eprintln!("        link: {}", info.link.link_args().join(" "));

    Ok(())
}
