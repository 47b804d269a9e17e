#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use quickserve_web::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  lisen: "0.0.0.0:8000" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.app.version, "v0.1.2");
    assert_eq!(cfg.app.config, "staging");
}

#[test]
fn rejects_bad_listen_and_version() {
    for case in [
        "version: 1\nserver: { listen: \"localhost\" }\n",
        "version: 3\n",
        "version: 1\napp: { version: \"\" }\n",
    ] {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "case={case}");
    }
}
