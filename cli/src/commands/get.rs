//! Get command - resolve one configuration value
//!
//! Resolves a key for a module path against the configured store and reports
//! the value together with the namespace that supplied it.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use config::Settings;
use resolver::{
    ConfigResolver, FromConfigValue, NamespaceSource, Resolution, ValueKind, create_store
};
use std::fmt::Display;
use std::str::FromStr;

use crate::output;

#[derive(Args)]
pub struct GetArgs {
    /// Module path of the caller, `::` or `.` separated
    #[arg(value_name = "MODULE_PATH")]
    pub module_path: String,

    /// Configuration key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value type: string, bool, int, long, double
    #[arg(long = "type", short = 't', default_value = "string", value_name = "TYPE")]
    pub kind: ValueKind,

    /// Value returned when no document holds the key (defaults to the type's zero value)
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>
}

/// A resolved value flattened for printing.
#[derive(Debug, PartialEq)]
struct Resolved {
    display: String,
    json: serde_json::Value,
    namespace: Option<String>
}

pub async fn run(args: GetArgs, settings: &Settings, json: bool) -> Result<()> {
    let store = create_store(&settings.store, settings.observability.metrics_enabled)
        .await
        .context("Failed to open configuration store")?;
    let resolver = ConfigResolver::from_settings(store, &settings.namespace);
    let caller = NamespaceSource::module(args.module_path.clone());

    let default = args.default.as_deref();
    let resolved = match args.kind {
        ValueKind::String => {
            resolve::<String>(&resolver, &caller, &args.key, default, args.kind).await?
        }
        ValueKind::Boolean => {
            resolve::<bool>(&resolver, &caller, &args.key, default, args.kind).await?
        }
        ValueKind::Int => resolve::<i32>(&resolver, &caller, &args.key, default, args.kind).await?,
        ValueKind::Long => resolve::<i64>(&resolver, &caller, &args.key, default, args.kind).await?,
        ValueKind::Double => {
            resolve::<f64>(&resolver, &caller, &args.key, default, args.kind).await?
        }
    };

    if json {
        let output = serde_json::json!({
            "module_path": args.module_path,
            "key": args.key,
            "type": args.kind.name(),
            "value": resolved.json,
            "source": resolved.namespace,
            "default": resolved.namespace.is_none()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", resolved.display);
    match &resolved.namespace {
        Some(namespace) => output::info(&format!("{} from {}", args.key, namespace.cyan())),
        None => output::info(&format!("{} not configured, using default", args.key))
    }
    Ok(())
}

async fn resolve<T>(
    resolver: &ConfigResolver,
    caller: &NamespaceSource,
    key: &str,
    default: Option<&str>,
    kind: ValueKind
) -> Result<Resolved>
where
    T: FromConfigValue + FromStr + Default + Display + Into<serde_json::Value>,
    T::Err: Display
{
    let default = parse_default::<T>(default, kind)?;
    let resolution = resolver.resolve(caller, key, default).await?;
    Ok(flatten(resolution))
}

fn parse_default<T>(raw: Option<&str>, kind: ValueKind) -> Result<T>
where
    T: FromStr + Default,
    T::Err: Display
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("Invalid default {:?} for type {}: {}", raw, kind, e)),
        None => Ok(T::default())
    }
}

fn flatten<T: Display + Into<serde_json::Value>>(resolution: Resolution<T>) -> Resolved {
    let namespace = resolution.namespace().map(str::to_string);
    let value = resolution.into_value();
    Resolved {
        display: value.to_string(),
        json: value.into(),
        namespace
    }
}
