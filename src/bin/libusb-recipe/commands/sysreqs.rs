//! `libusb-recipe sysreqs` command

use anyhow::Result;

use super::resolve_target;
use crate::cli::SysreqsArgs;
use libusb_recipe::core::{Arch, ResolvedConfiguration};
use libusb_recipe::ops::{system_requirements, PackageTool};
use libusb_recipe::util::GlobalContext;

pub fn execute(args: SysreqsArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (settings, options) = resolve_target(&ctx, &args.target)?;
    let config = ResolvedConfiguration::resolve(settings, &options);

    match system_requirements(&config, Arch::host()?, PackageTool::detect()) {
        Some(reqs) => {
            println!("{}", reqs.packages.join(" "));
            eprintln!("  install with: {}", reqs.install_command());
        }
        None => println!("no system packages required"),
    }

    Ok(())
}
