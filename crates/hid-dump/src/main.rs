//! Resolve generic HID layouts from report descriptor dumps
//!
//! Usage: `hid-dump [--config <file.json>] <path>...`
//!
//! Each path is a `VID_xxxx_PID_xxxx.hrd` binary dump, a cached `.json` descriptor, or a
//! directory of binary dumps. Resolved layouts are printed to stdout as JSON.
//!
//! Log output is controlled through `RUST_LOG`.
mod dumps;
mod env_log_tracer;
mod error;


use std::path::PathBuf;

use hid_layout::{DeviceHandle, LayoutResolver, LayoutSpec, Layouts, ResolverConfig};

use dumps::{Dump, DumpTransport};
use error::*;

/// Command-line arguments
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    paths: Vec<PathBuf>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let mut out = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config requires a path")?;
                    out.config = Some(path.into());
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown flag {}", flag).into());
                }
                _ => out.paths.push(arg.into()),
            }
        }

        if out.paths.is_empty() {
            return Err("Usage: hid-dump [--config <file.json>] <path>...".into());
        }

        Ok(out)
    }
}

fn main() -> Result<(), Error> {
    env_log_tracer::init()?;

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => ResolverConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ResolverConfig::default(),
    };

    let dumps = args
        .paths
        .iter()
        .filter_map(|path| match dumps::load(path) {
            Ok(dumps) => Some(dumps),
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                None
            }
        })
        .flatten()
        .collect::<Vec<_>>();

    let resolver = LayoutResolver::new(config, Layouts::new());

    let mut resolved = 0;
    for (layout, dump) in resolve_dumps(&resolver, &dumps)? {
        match layout {
            Some(layout) => {
                println!("{}", serde_json::to_string_pretty(&layout)?);
                resolved += 1;
            }
            None => log::warn!("No layout for {}", dump.path.display()),
        }
    }

    if resolved == 0 {
        return Err("No layouts resolved".into());
    }

    Ok(())
}

/// Run every dump through the resolver, pairing each with the layout it produced
fn resolve_dumps<'a>(
    resolver: &LayoutResolver<Layouts>,
    dumps: &'a [Dump],
) -> Result<Vec<(Option<LayoutSpec>, &'a Dump)>, Error> {
    let interface_name = resolver.config().interface_name.clone();

    dumps
        .iter()
        .enumerate()
        .map(|(i, dump)| {
            let mut description = dump.description(&interface_name)?;
            let mut transport = DumpTransport::new(dump);

            log::debug!("Resolving {}", dump.path.display());
            let layout = resolver
                .resolve_layout(
                    Some(DeviceHandle(i as u32)),
                    &mut description,
                    None,
                    &mut transport,
                )
                .and_then(|name| resolver.registry().build(&name));

            Ok((layout, dump))
        })
        .collect()
}
