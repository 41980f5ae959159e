//! JSON-RPC log fetching with paged ranges and a progress bar

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::rpc::{block_tag, EthRpc, GetLogsFilter};

/// `eth logs <address> <from-block> <topics> <page>` — walk block ranges
/// of `page + 1` blocks from `from_block` to the current head, collecting
/// matching logs, then print them one JSON object per line.
pub async fn logs(
    rpc_url: &str,
    address: &str,
    from_block: u64,
    topics: &str,
    page: u64,
) -> Result<()> {
    if page == 0 {
        bail!("page must be at least 1");
    }
    let rpc = EthRpc::new(rpc_url)?;
    let latest = rpc.block_number().await?;
    if from_block >= latest {
        bail!("from block {from_block} is not below the current head {latest}");
    }

    let topics: Vec<String> = topics
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let bar = ProgressBar::new(latest - from_block);
    bar.set_style(
        ProgressStyle::with_template("[{bar:50}] {percent:>3}% {elapsed} {pos}/{len}")
            .unwrap()
            .progress_chars("█ "),
    );

    let mut logs = Vec::new();
    let mut from = from_block;
    while from < latest {
        let to = (from + page).min(latest);
        let filter = GetLogsFilter {
            address: address.to_string(),
            from_block: block_tag(from),
            to_block: block_tag(to),
            topics: topics.clone(),
        };
        let mut batch = rpc.get_logs(&filter).await?;
        logs.append(&mut batch);
        bar.set_position(to - from_block);
        from = to + 1;
    }
    bar.finish();
    println!();

    for log in &logs {
        println!("{}", serde_json::to_string(log)?);
    }
    Ok(())
}
