// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What each subcommand does. Library errors get file context here and
//! surface through `anyhow`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use super::display::{self, themed, BOLD, CYAN, DIM, GRAY, GREEN};
use crate::build::{run_build, BuildOptions};
use crate::config::SearchConfig;
use crate::fuzzy::Trie;
use crate::oracle::MemoryIndex;
use crate::payload::{decode, IndexPayload, PayloadKind};
use crate::search::{group_by_component, ResultItem, SearchOutcome};
use crate::session::SearchSession;
use crate::store::FacetFilter;
use crate::types::DocId;

fn read_payload(dir: &Path, kind: PayloadKind) -> Result<Vec<u8>> {
    let path = dir.join(kind.file_name());
    fs::read(&path).with_context(|| format!("reading {} payload {}", kind, path.display()))
}

// ============================================================================
// BUILD
// ============================================================================

pub fn build(input: &Path, output: &Path, progress: bool) -> Result<()> {
    let report = run_build(input, output, BuildOptions { progress })
        .with_context(|| format!("building payloads from {}", input.display()))?;

    display::section_top("BUILD");
    display::row(&format!(
        " {} documents → {}",
        themed(GREEN, &[BOLD], &report.documents.to_string()),
        output.display()
    ));
    display::row(&format!(
        " {:<8}{}",
        "index",
        display::pad_left(&display::format_size(report.index_bytes), 12)
    ));
    display::row(&format!(
        " {:<8}{}",
        "trie",
        display::pad_left(&display::format_size(report.trie_bytes), 12)
    ));
    display::row(&format!(
        " took {}",
        display::timing_ms(report.took.as_secs_f64() * 1000.0)
    ));
    display::section_bot();
    Ok(())
}

// ============================================================================
// SEARCH
// ============================================================================

pub struct SearchArgs<'a> {
    pub facet: Option<&'a str>,
    pub limit: usize,
    pub config: SearchConfig,
    pub json: bool,
}

pub fn search(dir: &Path, query: &str, args: SearchArgs<'_>) -> Result<()> {
    let facet = args
        .facet
        .map(str::parse::<FacetFilter>)
        .transpose()
        .context("parsing --facet")?;

    let index = read_payload(dir, PayloadKind::Index)?;
    let trie = read_payload(dir, PayloadKind::Trie)?;
    let mut session: SearchSession<MemoryIndex> = SearchSession::new(args.config);
    session
        .load(&index, &trie)
        .with_context(|| format!("loading payloads from {}", dir.display()))?;

    let start = Instant::now();
    let outcome = session.search(query, facet.as_ref())?;
    let took = start.elapsed();

    let items: Vec<ResultItem> = outcome.items().iter().take(args.limit).cloned().collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    match &outcome {
        SearchOutcome::Cleared => {
            println!("{}", themed(GRAY, &[], "empty query"));
            return Ok(());
        }
        SearchOutcome::NoResults { query } => {
            println!("No results found for query \"{}\"", query);
            return Ok(());
        }
        SearchOutcome::Results(_) => {}
    }

    let source = session
        .searcher()?
        .ranked_hits(query, facet.as_ref())
        .ok()
        .and_then(|ranked| ranked.source);
    println!(
        "{} of {} results via {} in {}",
        themed(GREEN, &[BOLD], &items.len().to_string()),
        outcome.items().len(),
        display::source_label(source),
        display::timing_ms(took.as_secs_f64() * 1000.0)
    );
    println!();

    for group in group_by_component(&items) {
        let label = group.header.map_or("Other", |h| h.header.as_str());
        display::section_top(label);
        for item in group.items {
            print_item(item);
        }
        display::section_bot();
    }
    Ok(())
}

fn print_item(item: &ResultItem) {
    let mut heading = display::segments(&item.title);
    if let Some(section) = &item.section_title {
        heading.push_str(" › ");
        heading.push_str(&display::segments(section));
    }
    display::row(&format!(" {} {}", display::score_value(item.score), heading));
    display::row(&format!("        {}", themed(CYAN, &[DIM], &item.url)));
    if let Some(keyword) = item.keyword.as_ref().filter(|_| item.has_keyword_match()) {
        display::row(&format!("        {}", display::segments(keyword)));
    }
    let text = display::segments(&item.text);
    if !text.is_empty() {
        for line in wrap(&text, display::BOX_WIDTH - 9) {
            display::row(&format!("        {}", line));
        }
    }
}

/// Greedy word wrap on visible width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        let needed = display::visible_len(&line) + display::visible_len(word) + 1;
        if !line.is_empty() && needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ============================================================================
// INSPECT
// ============================================================================

pub fn inspect(dir: &Path) -> Result<()> {
    let index_bytes = read_payload(dir, PayloadKind::Index)?;
    let trie_bytes = read_payload(dir, PayloadKind::Trie)?;
    let payload: IndexPayload<MemoryIndex> =
        decode(&index_bytes, PayloadKind::Index).context("decoding index payload")?;
    let trie: Trie<DocId> = decode(&trie_bytes, PayloadKind::Trie).context("decoding trie payload")?;
    let stats = trie.stats();

    display::section_top("PAYLOADS");
    for (kind, len) in [
        (PayloadKind::Index, index_bytes.len()),
        (PayloadKind::Trie, trie_bytes.len()),
    ] {
        display::row(&format!(
            " {:<24}{}",
            kind.file_name(),
            display::pad_left(&display::format_size(len), 12)
        ));
    }
    display::section_top("INDEX");
    display::row(&format!(" documents      {}", payload.store.len()));
    display::row(&format!(" refs           {}", payload.index.len()));
    display::row(&format!(" terms          {}", payload.index.term_count()));
    let fields: Vec<String> = payload
        .index
        .fields()
        .iter()
        .map(|spec| format!("{}^{}", spec.field.as_str(), spec.boost))
        .collect();
    display::row(&format!(" fields         {}", fields.join(" ")));
    display::row(&format!(
        " groups         {}",
        payload.store.component_versions.len()
    ));
    display::section_top("TRIE");
    display::row(&format!(" words          {}", stats.words));
    display::row(&format!(" nodes          {}", stats.nodes));
    display::row(&format!(" payloads       {}", stats.payloads));
    display::row(&format!(" max depth      {}", stats.max_depth));
    display::section_bot();
    Ok(())
}
