//! End-to-end parses through the public surface: routing, two-phase scoped
//! resolution, diagnostics, and value inspection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use cordon_engine::{
    ActionRouter, BufferedSink, ParseError, PlainAction, ScopedAction, Severity, SCOPING_GROUP,
};
use cordon_params::ParameterDefinition;

fn tokens(line: &str) -> Vec<String> {
    shell_words::split(line).expect("split command line")
}

fn build_router() -> Result<ActionRouter> {
    let mut router = ActionRouter::new();
    router.register(PlainAction::new("do:the-job", |registry| {
        registry.define(ParameterDefinition::text("short1").short_alias('s'))?;
        registry.define(ParameterDefinition::text("short2").short_alias('s'))?;
        registry.define(ParameterDefinition::text("arg").scope("scope1"))?;
        registry.define(ParameterDefinition::text("arg").scope("scope2"))?;
        registry.define(ParameterDefinition::text("non-conflicting-arg").scope("scope"))?;
        Ok(())
    }))?;
    router.register(ScopedAction::new(
        "scoped-action",
        |registry| {
            registry.define(ParameterDefinition::flag("scoping").group(SCOPING_GROUP))?;
            Ok(())
        },
        |registry| {
            registry.define(ParameterDefinition::text("short1").short_alias('s'))?;
            registry.define(ParameterDefinition::text("short2").short_alias('s'))?;
            registry.define(
                ParameterDefinition::text("arg")
                    .short_alias('a')
                    .scope("scope1"),
            )?;
            registry.define(
                ParameterDefinition::text("arg")
                    .short_alias('a')
                    .scope("scope2"),
            )?;
            registry.define(
                ParameterDefinition::text("non-conflicting-arg")
                    .short_alias('a')
                    .scope("scope"),
            )?;
            Ok(())
        },
    ))?;
    Ok(router)
}

#[test]
fn full_scoped_command_line_round_trip() -> Result<()> {
    let router = build_router()?;
    let invocation = router.parse(&tokens(
        "scoped-action --scoping -- --short1 short1value --short2 short2value \
         --scope1:arg scope1value --scope2:arg scope2value \
         --non-conflicting-arg nonconflictingvalue",
    ))?;
    assert_eq!(invocation.action_name(), "scoped-action");
    assert!(invocation.flag_of("scoping"));
    assert_eq!(invocation.text_of("short1").as_deref(), Some("short1value"));
    assert_eq!(invocation.text_of("short2").as_deref(), Some("short2value"));
    assert_eq!(
        invocation.text_of("scope1:arg").as_deref(),
        Some("scope1value")
    );
    assert_eq!(
        invocation.text_of("scope2:arg").as_deref(),
        Some("scope2value")
    );
    assert_eq!(
        invocation.text_of("non-conflicting-arg").as_deref(),
        Some("nonconflictingvalue")
    );
    assert_eq!(
        serde_json::to_value(invocation.value_map())?,
        serde_json::json!({
            "--scoping": "true",
            "--short1": "short1value",
            "--short2": "short2value",
            "--scope1:arg": "scope1value",
            "--scope2:arg": "scope2value",
            "--scope:non-conflicting-arg": "nonconflictingvalue"
        })
    );
    Ok(())
}

#[test]
fn ambiguity_diagnostics_reach_the_host_sink() -> Result<()> {
    let mut router = build_router()?;
    let mut sink = BufferedSink::new();

    assert!(router.dispatch(&tokens("do:the-job -s"), &mut sink).is_err());
    assert!(router
        .dispatch(&tokens("do:the-job --arg test"), &mut sink)
        .is_err());
    assert!(router
        .dispatch(&tokens("scoped-action --scoping -- -a"), &mut sink)
        .is_err());

    let entries = sink.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries
        .iter()
        .all(|(severity, _)| *severity == Severity::Error));
    assert!(entries[0].1.contains("--short1, --short2"));
    assert!(entries[1].1.contains("--scope1:arg, --scope2:arg"));
    assert!(entries[2]
        .1
        .contains("--scope1:arg, --scope2:arg, --scope:non-conflicting-arg"));
    Ok(())
}

#[test]
fn repeated_parses_start_from_fresh_value_slots() -> Result<()> {
    let router = build_router()?;
    let first = router.parse(&tokens("do:the-job --short1 one"))?;
    assert_eq!(first.text_of("short1").as_deref(), Some("one"));

    let second = router.parse(&tokens("do:the-job --short2 two"))?;
    assert_eq!(second.text_of("short2").as_deref(), Some("two"));
    // nothing carries over from the previous invocation
    assert_eq!(second.text_of("short1"), None);
    Ok(())
}

#[test]
fn execute_hooks_run_in_invocation_order_after_parsing() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut router = ActionRouter::new();
    router.register(
        PlainAction::new("ship", |registry| {
            registry.define(ParameterDefinition::text("version").required())?;
            registry.define(ParameterDefinition::flag("dry-run").short_alias('n'))?;
            Ok(())
        })
        .on_execute(move |invocation| {
            assert_eq!(invocation.text_of("version").as_deref(), Some("1.2.3"));
            assert!(invocation.flag_of("dry-run"));
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    )?;

    let mut sink = BufferedSink::new();
    assert!(router.dispatch(&tokens("ship -n"), &mut sink).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no execution on a failed parse");

    router.dispatch(&tokens("ship --version 1.2.3 -n"), &mut sink)?;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn scoped_defaults_survive_an_unparsed_second_tier() -> Result<()> {
    let mut router = ActionRouter::new();
    router.register(ScopedAction::new(
        "sync",
        |registry| {
            registry.define(ParameterDefinition::flag("scoping").group(SCOPING_GROUP))?;
            Ok(())
        },
        |registry| {
            registry.define(ParameterDefinition::text("mode").default_value("incremental"))?;
            Ok(())
        },
    ))?;

    let invocation = router.parse(&tokens("sync --scoping"))?;
    assert_eq!(invocation.text_of("mode").as_deref(), Some("incremental"));

    let invocation = router.parse(&tokens("sync --scoping -- --mode full"))?;
    assert_eq!(invocation.text_of("mode").as_deref(), Some("full"));
    Ok(())
}

#[test]
fn parse_failures_yield_no_invocation_at_all() -> Result<()> {
    let router = build_router()?;
    // the first reference resolves and assigns before the second fails,
    // but the failed parse surfaces no partial state to the caller
    let error = router
        .parse(&tokens("do:the-job --short1 kept --arg x"))
        .expect_err("ambiguous tail");
    assert!(matches!(error, ParseError::Resolve(_)));
    Ok(())
}
