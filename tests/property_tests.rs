//! Property-based checks for the severity gate, the counter contract and
//! scope stack discipline.

use proptest::prelude::*;
use scoped_logger::prelude::*;
use scoped_logger::ScopeRegistry;

fn any_emittable_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::emittable().to_vec())
}

fn any_threshold() -> impl Strategy<Value = LogLevel> {
    let mut levels = LogLevel::emittable().to_vec();
    levels.push(LogLevel::Off);
    prop::sample::select(levels)
}

proptest! {
    #[test]
    fn gate_is_monotone_in_severity(
        threshold in any_threshold(),
        low in any_emittable_level(),
        high in any_emittable_level(),
    ) {
        prop_assume!(low <= high);
        let mut core = LoggerCore::isolated("GateProp");
        core.set_level(threshold);

        // Once a severity passes the gate, everything above it does too.
        if core.is_enabled(low) {
            prop_assert!(core.is_enabled(high));
        }
        prop_assert_eq!(core.is_enabled(low), low >= threshold);
    }

    #[test]
    fn counter_matches_enabled_emissions(
        threshold in any_threshold(),
        levels in prop::collection::vec(any_emittable_level(), 0..32),
    ) {
        let mut logger = MemoryLogger::new("CounterProp");
        logger.core_mut().set_registry(std::sync::Arc::new(ScopeRegistry::new()));
        logger.core_mut().set_level(threshold);

        for (i, level) in levels.iter().enumerate() {
            logger.log_at(*level, format!("msg {}", i))?;
        }

        let expected = levels.iter().filter(|l| **l >= threshold).count() as u64;
        prop_assert_eq!(logger.num_messages_logged(), expected);
        prop_assert_eq!(logger.len() as u64, expected);
    }

    #[test]
    fn balanced_scopes_restore_the_stack(
        names in prop::collection::vec("[a-z]{1,8}", 1..8),
    ) {
        let core = LoggerCore::isolated("ScopeProp");
        let before = core.scope_label();

        let markers: Vec<_> = names
            .iter()
            .map(|name| core.begin_scope(name.as_str()))
            .collect();
        for marker in markers.iter().rev() {
            core.end_scope(marker)?;
        }

        prop_assert_eq!(core.scope_label(), before);
    }

    #[test]
    fn scope_label_lists_outermost_first(
        names in prop::collection::vec("[a-z]{1,8}", 1..6),
    ) {
        let core = LoggerCore::isolated("LabelProp");
        let _guards: Vec<_> = names
            .iter()
            .map(|name| core.scope(name.as_str()))
            .collect();

        prop_assert_eq!(core.scope_label(), format!("[{}]", names.join(", ")));
    }
}
