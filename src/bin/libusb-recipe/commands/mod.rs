//! Command implementations

pub mod completions;
pub mod create;
pub mod info;
pub mod source;
pub mod sysreqs;

use anyhow::Result;

use crate::cli::TargetArgs;
use libusb_recipe::core::{OptionRequest, Settings};
use libusb_recipe::util::config::{load_profile, Profile, ProfileOptions, ProfileSettings};
use libusb_recipe::util::GlobalContext;

/// Settings and options from profiles and flags, falling back to the host.
pub fn resolve_target(ctx: &GlobalContext, args: &TargetArgs) -> Result<(Settings, OptionRequest)> {
    let project_path = args
        .profile
        .clone()
        .unwrap_or_else(|| ctx.project_profile_path());
    if args.profile.is_some() && !project_path.exists() {
        anyhow::bail!("profile not found: {}", project_path.display());
    }

    let profile = load_profile(&ctx.global_profile_path(), &project_path)?;

    let shared = if args.static_ {
        Some(false)
    } else if args.shared {
        Some(true)
    } else {
        None
    };
    let flags = Profile {
        settings: ProfileSettings {
            os: args.os.clone(),
            compiler: args.compiler.clone(),
            compiler_version: args.compiler_version.clone(),
            arch: args.arch.clone(),
            build_type: args.build_type.clone(),
        },
        options: ProfileOptions {
            shared,
            enable_udev: args.no_udev.then_some(false),
            fpic: args.no_fpic.then_some(false),
        },
    };

    let profile = profile.merge(flags);
    Ok((profile.settings(&Settings::host())?, profile.options()))
}
