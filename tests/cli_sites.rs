mod harness;

use harness::TestContext;
use predicates::prelude::*;

#[test]
fn sites_lists_resolved_names_and_status() {
    let ctx = TestContext::new();
    ctx.project(
        "VHOSTS_EXTENSION=.test\n",
        r#"{"sites": [
            {"folder": "blog", "type": "wordpress"},
            {"folder": "shop", "type": "laravel", "ssl": "true", "name": "Shop Front"}
        ]}"#,
    );
    ctx.site_dir("blog");

    ctx.cli()
        .arg("sites")
        .assert()
        .success()
        .stdout(predicate::str::contains("blog.test [WordPress] http://blog.test:80"))
        .stdout(predicate::str::contains("Shop Front [Laravel] shop.test: directory not found"))
        .stdout(predicate::str::contains("2 site(s), 1 invalid"));
}

#[test]
fn sites_reports_empty_list() {
    let ctx = TestContext::new();
    ctx.project("", "{}");

    ctx.cli()
        .arg("sites")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sites configured"));
}

#[test]
fn sites_rejects_malformed_list() {
    let ctx = TestContext::new();
    ctx.project("", "{\"vhosts\": [");

    ctx.cli()
        .arg("sites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid site list"));
}
