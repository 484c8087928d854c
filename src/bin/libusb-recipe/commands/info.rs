//! `libusb-recipe info` command

use anyhow::Result;

use super::resolve_target;
use crate::cli::InfoArgs;
use libusb_recipe::ops::inspect;
use libusb_recipe::util::GlobalContext;
use libusb_recipe::LIBUSB;

fn show(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "True",
        Some(false) => "False",
        None => "(not applicable)",
    }
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (settings, options) = resolve_target(&ctx, &args.target)?;
    let info = inspect(&LIBUSB, settings, &options)?;

    if args.json {
        println!("{}", info.to_json()?);
        return Ok(());
    }

    println!("{} {}", info.name, info.version);
    println!("  settings:     {}", info.settings);
    println!("  strategy:     {}", info.strategy);
    println!("  shared:       {}", show(Some(info.options.shared)));
    println!("  enable_udev:  {}", show(info.options.enable_udev));
    println!("  fpic:         {}", show(info.options.fpic));

    if info.requirements.is_empty() {
        println!("  requires:     (none)");
    } else {
        let reqs: Vec<String> = info.requirements.iter().map(|r| r.to_string()).collect();
        println!("  requires:     {}", reqs.join(", "));
    }

    let includes: Vec<String> = info
        .link
        .include_dirs
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    println!("  include dirs: {}", includes.join(", "));
    if !info.link.system_libs.is_empty() {
        println!("  system libs:  {}", info.link.system_libs.join(", "));
    }
    if !info.link.frameworks.is_empty() {
        println!("  frameworks:   {}", info.link.frameworks.join(", "));
    }

    if info.udev_requirement_mismatch {
        println!("  note: libudev1 is required even though udev support is disabled");
    }

    Ok(())
}
