//! Chain command - candidate namespaces for a module path
//!
//! Shows the normalized namespace of a caller and the documents that would be
//! consulted for it, most specific first. Does not touch the store.

use anyhow::Result;
use clap::Args;
use config::Settings;
use resolver::{NamespacePolicy, candidate_chain};

use crate::output;

#[derive(Args)]
pub struct ChainArgs {
    /// Module path of the caller, `::` or `.` separated
    #[arg(value_name = "MODULE_PATH")]
    pub module_path: String
}

pub fn run(args: ChainArgs, settings: &Settings, json: bool) -> Result<()> {
    let policy = NamespacePolicy::from(&settings.namespace);
    let namespace = policy.normalize_path(&args.module_path)?;
    let chain = candidate_chain(&namespace);

    if json {
        let output = serde_json::json!({
            "module_path": args.module_path,
            "namespace": namespace,
            "candidates": chain
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header("Candidate Chain");
    println!();
    output::field("module", &args.module_path);
    output::field("namespace", if namespace.is_empty() { "(root)" } else { namespace.as_str() });
    println!();

    if chain.is_empty() {
        output::hint("The root module has no candidates; every key resolves to its default");
        return Ok(());
    }

    for (i, candidate) in chain.iter().enumerate() {
        println!("  {}. {}", i + 1, candidate);
    }
    Ok(())
}
