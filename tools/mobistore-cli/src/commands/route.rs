//! Route resolution command.

use anyhow::{bail, Result};
use mobistore_router::{HistoryNavigator, Navigator, Resolution};
use serde_json::json;

use super::RouteArgs;
use crate::context::Context;

/// Redirect chains longer than this are reported as loops.
const MAX_REDIRECTS: usize = 5;

/// Resolve a path, following redirects.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let session = ctx.load_session()?;
    let table = ctx.route_table();
    let mut navigator = HistoryNavigator::starting_at(args.path.clone());

    let mut url = args.path;
    let mut resolution = table.resolve(&url, &session)?;
    let mut hops = 0;
    while let Resolution::Redirect { to } = &resolution {
        if hops == MAX_REDIRECTS {
            bail!("Too many redirects resolving {}", navigator.entries()[0]);
        }
        navigator.navigate(to);
        url = to.to_url();
        resolution = table.resolve(&url, &session)?;
        hops += 1;
    }

    if ctx.output.is_json() {
        ctx.output
            .json(&json!({ "history": navigator.entries(), "resolution": resolution }));
        return Ok(());
    }

    for (from, to) in navigator.entries().iter().zip(navigator.entries().iter().skip(1)) {
        ctx.output.redirect(from, to);
    }
    if let Resolution::Render { route } = &resolution {
        ctx.output.success(&format!("{} renders {}", url, route));
    }
    Ok(())
}
