#![no_main]

use cordon_engine::{ActionRouter, PlainAction, ScopedAction, SCOPING_GROUP};
use cordon_params::ParameterDefinition;
use libfuzzer_sys::fuzz_target;

fn build_router() -> ActionRouter {
    let mut router = ActionRouter::new();
    router
        .register(PlainAction::new("job", |registry| {
            registry.define(ParameterDefinition::text("short1").short_alias('s'))?;
            registry.define(ParameterDefinition::text("short2").short_alias('s'))?;
            registry.define(ParameterDefinition::text("arg").scope("scope1"))?;
            registry.define(ParameterDefinition::text("arg").scope("scope2"))?;
            registry.define(ParameterDefinition::flag("verbose").short_alias('v'))?;
            Ok(())
        }))
        .expect("register plain action");
    router
        .register(ScopedAction::new(
            "scoped",
            |registry| {
                registry.define(ParameterDefinition::flag("scoping").group(SCOPING_GROUP))?;
                Ok(())
            },
            |registry| {
                registry.define(ParameterDefinition::text("arg").short_alias('a'))?;
                registry.define(ParameterDefinition::text("mode").default_value("fast"))?;
                Ok(())
            },
        ))
        .expect("register scoped action");
    router
}

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(tokens) = shell_words::split(&raw) else {
        return;
    };
    let router = build_router();
    match router.parse(&tokens) {
        Ok(invocation) => {
            assert!(!invocation.action_name().is_empty());
            for key in invocation.value_map().keys() {
                assert!(key.starts_with("--"));
            }
        }
        Err(error) => {
            assert!(!error.to_string().trim().is_empty());
        }
    }
});
