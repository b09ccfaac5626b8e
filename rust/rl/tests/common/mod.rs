#![allow(dead_code)]

use frozen_lake::*;

pub fn lake(rows: &[&str], actions: ActionSetName, variant: Variant) -> Environment {
    Environment::build(
        Grid::parse(rows).unwrap(),
        ActionSet::get(actions),
        StateSet::get(variant.state_set_name()),
        &variant,
        100,
    )
    .unwrap()
}

pub fn square() -> Environment {
    lake(&["FF", "FG"], ActionSetName::Default, Variant::Default)
}

pub fn preset(map: MapName, actions: ActionSetName, variant: Variant) -> Environment {
    let config = EnvConfig::default()
        .with_map(map)
        .with_action_set(actions)
        .with_variant(variant);

    Environment::make(&config).unwrap()
}
