#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use quickserve_sim::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
slow_machine:
  probabilty: 0.5 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9101");
    assert_eq!(cfg.tick_interval_ms, 10);
    assert_eq!(cfg.categories.len(), 2);
    assert_eq!(cfg.category("fries").map(|c| c.machines), Some(10));
    assert_eq!(cfg.window.retention_ms, 10_000.0);
    assert_eq!(cfg.window.recency_ms, 100.0);
    assert_eq!(cfg.slow_total_ms, 400.0);
}

#[test]
fn custom_categories_replace_defaults() {
    let ok = r#"
version: 1
orders_per_tick: { min: 1, max: 1 }
categories:
  - item: burger
    processing_ms: { min: 300, max: 450 }
    machines: 4
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.categories.len(), 1);
    assert_eq!(cfg.categories[0].item, "burger");
    assert_eq!(cfg.orders_per_tick.max, 1);
}

#[test]
fn rejects_invalid_values() {
    let cases = [
        "version: 2\n",
        "version: 1\ntick_interval_ms: 0\n",
        "version: 1\norders_per_tick: { min: 5, max: 2 }\n",
        "version: 1\ncategories: []\n",
        "version: 1\ncategories:\n  - { item: all, processing_ms: { min: 1, max: 2 }, machines: 1 }\n",
        "version: 1\ncategories:\n  - { item: fries, processing_ms: { min: 1, max: 2 }, machines: 0 }\n",
        "version: 1\ncategories:\n  - { item: fries, processing_ms: { min: 9, max: 2 }, machines: 1 }\n",
        "version: 1\ncategories:\n  - { item: fries, processing_ms: { min: 1, max: 2 }, machines: 1 }\n  - { item: fries, processing_ms: { min: 1, max: 2 }, machines: 1 }\n",
        "version: 1\nslow_machine: { probability: 1.5 }\n",
        "version: 1\nwindow: { retention_ms: 0 }\n",
        "version: 1\nexporter: { listen: \"not-an-addr\" }\n",
        "version: 1\nambient: { handwash_probability: -0.1 }\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "case={case}");
    }
}

#[test]
fn port_env_overrides_listen_port() {
    let cfg = config::load_with(|k| match k {
        "ORDER_METRICS_PORT" => Some("9300".into()),
        _ => None,
    })
    .expect("must load");
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9300");

    let err = config::load_with(|k| match k {
        "ORDER_METRICS_PORT" => Some("http".into()),
        _ => None,
    })
    .expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_config_file_is_io_error() {
    let err = config::load_with(|k| match k {
        "ORDER_SIM_CONFIG" => Some("/nonexistent/quickserve/sim.yaml".into()),
        _ => None,
    })
    .expect_err("must fail");
    assert_eq!(err.code().as_str(), "IO");
}
