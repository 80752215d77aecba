//! Command handlers.
//!
//! Each handler loads its inputs, runs the library operation and returns a
//! [`Report`]; [`run`] renders it in the requested output mode.

use anyhow::{Context, Result};
use sessionseek::{
    FilterConstraint, Lookup, PropertyEntry, PropertyStore, SearchCandidate, SearchFilter,
    TypedValue, ValueKind,
};
use sessionseek_online::{
    find_sessions, MemorySubsystem, SearchRequest, SessionSearchResult, UniqueNetId,
};

use crate::cli::{Cli, Command, FilterArgs, GetArgs, KindArg, MergeArgs, SearchArgs};
use crate::config;
use crate::output::{render, LookupReport, Report};

/// Runs the parsed command line and returns the rendered output.
pub fn run(cli: &Cli) -> Result<String> {
    let report = match &cli.command {
        Command::Filter(args) => filter(args)?,
        Command::Merge(args) => merge(args)?,
        Command::Get(args) => get(args)?,
        Command::Search(args) => search(args)?,
    };
    Ok(render(&report, cli.output)?)
}

fn filter(args: &FilterArgs) -> Result<Report> {
    let candidates: Vec<SearchCandidate> = config::load(&args.candidates)?;

    let mut constraints: Vec<FilterConstraint> = match &args.filters {
        Some(path) => config::load(path)?,
        None => Vec::new(),
    };
    constraints.extend(args.constraints.iter().cloned());

    if args.strict {
        for constraint in &constraints {
            constraint
                .validate()
                .with_context(|| format!("constraint '{}'", constraint))?;
        }
    }

    let filter = SearchFilter::from(constraints);
    let total = candidates.len();
    let kept = filter.filter_cloned(&candidates);
    tracing::info!(kept = kept.len(), total, "filter applied");
    Ok(Report::Candidates(kept))
}

fn merge(args: &MergeArgs) -> Result<Report> {
    let base: PropertyStore = config::load(&args.base)?;
    let mut merged = match &args.updates {
        Some(path) => {
            let updates: Vec<PropertyEntry> = config::load(path)?;
            base.merge(updates)
        }
        None => base,
    };
    if !args.set.is_empty() {
        merged = merged.merge(args.set.iter().cloned());
    }
    Ok(Report::Store(merged))
}

fn get(args: &GetArgs) -> Result<Report> {
    let store: PropertyStore = config::load(&args.store)?;
    let key = args.key.as_str();

    let (kind, lookup): (ValueKind, Lookup<TypedValue>) = match args.kind {
        KindArg::Byte => (ValueKind::Int32, store.get_byte(key).map(TypedValue::from)),
        KindArg::Bool => (ValueKind::Bool, store.get_bool(key).map(TypedValue::Bool)),
        KindArg::Int32 => (ValueKind::Int32, store.get_int(key).map(TypedValue::Int32)),
        KindArg::Int64 => (ValueKind::Int64, store.get_int64(key).map(TypedValue::Int64)),
        KindArg::Float => (ValueKind::Float, store.get_float(key).map(TypedValue::Float)),
        KindArg::Double => (ValueKind::Double, store.get_double(key).map(TypedValue::Double)),
        KindArg::String => (ValueKind::String, store.get_string(key).map(TypedValue::from)),
    };

    let status = lookup.status();
    if args.strict {
        lookup.clone().into_result(key)?;
    }
    Ok(Report::Lookup(LookupReport {
        key: key.to_string(),
        kind,
        status,
        value: lookup.found(),
    }))
}

fn search(args: &SearchArgs) -> Result<Report> {
    let results: Vec<SessionSearchResult> = config::load(&args.results)?;
    let mut request: SearchRequest = match &args.request {
        Some(path) => config::load(path)?,
        None => SearchRequest::default(),
    };
    request.filters.extend(args.constraints.iter().cloned());
    if let Some(max) = args.max_results {
        request.max_results = max;
    }
    request.use_lan |= args.lan;

    let subsystem = MemorySubsystem::new("file").with_results(results);
    let player = UniqueNetId::new(args.player.as_str());
    let found = find_sessions(&subsystem, &player, &request)
        .into_result()
        .context("session search failed")?;
    Ok(Report::Sessions(request.filter_results(found)))
}
