// tests/deploy_driver.rs

use std::error::Error;

use compose_deploy::deploy::Deployment;
use compose_deploy::errors::DeployError;
use compose_deploy_test_utils::builders::{SettingsBuilder, ps_table};
use compose_deploy_test_utils::init_tracing;
use compose_deploy_test_utils::scripted_runner::{Reply, ScriptedRunner};

type TestResult = Result<(), Box<dyn Error>>;

fn healthy_stack() -> ScriptedRunner {
    ScriptedRunner::new()
        .on("config --services", [Reply::ok("web\ndb\n")])
        .on(
            "ps",
            [Reply::ok(&ps_table(&[("app_web_1", "Up (healthy)"), ("app_db_1", "Up")]))],
        )
}

#[tokio::test(start_paused = true)]
async fn full_deployment_runs_steps_in_order() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new()
        .pull(true)
        .build_images(true)
        .post_cmd("docker-compose exec -T web ./migrate")
        .start_tests(true)
        .build();

    let mut runner = healthy_stack();
    let summary = Deployment::new(&mut runner, settings).run().await?;

    assert_eq!(summary.services, vec!["web".to_string(), "db".to_string()]);
    assert!(!summary.readiness_skipped);
    assert_eq!(summary.post_cmd_failures, 0);
    assert!(summary.tests_started);

    let cmds = runner.commands();
    assert_eq!(
        cmds,
        vec![
            "docker-compose -f docker-compose.yml pull".to_string(),
            "docker-compose -f docker-compose.yml up -d --build".to_string(),
            "docker-compose -f docker-compose.yml config --services".to_string(),
            "docker-compose -f docker-compose.yml ps".to_string(),
            "docker-compose exec -T web ./migrate".to_string(),
            "bash -c [ -x 'tools/test_start_all.sh' ] && bash 'tools/test_start_all.sh' || true"
                .to_string(),
        ]
    );

    // Deployment steps stream their output; only queries are captured.
    let calls = runner.calls();
    assert!(!calls[0].opts.capture && calls[0].opts.check);
    assert!(!calls[1].opts.capture && calls[1].opts.check);
    assert!(calls[2].opts.capture);
    assert!(calls[3].opts.capture);
    assert!(!calls[4].opts.check);
    assert!(!calls[5].opts.check);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn defaults_skip_pull_and_build() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().build();
    let mut runner = healthy_stack();
    Deployment::new(&mut runner, settings).run().await?;

    let cmds = runner.commands();
    assert_eq!(cmds[0], "docker-compose -f docker-compose.yml up -d");
    assert!(runner.calls_ending_with("pull").is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failing_pull_aborts_with_child_exit_code() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().pull(true).build();
    let mut runner = healthy_stack().on("pull", [Reply::exit(7)]);

    let err = Deployment::new(&mut runner, settings)
        .run()
        .await
        .expect_err("pull failure must abort");

    assert!(matches!(err, DeployError::ProcessFailed { code: 7, .. }));
    assert_eq!(err.exit_code(), 7);
    assert_eq!(runner.calls().len(), 1, "nothing runs after a fatal failure");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failing_up_aborts_before_polling() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().post_cmd("make seed").build();
    let mut runner = healthy_stack().on("up -d", [Reply::exit(1)]);

    let err = Deployment::new(&mut runner, settings)
        .run()
        .await
        .expect_err("up failure must abort");

    assert_eq!(err.exit_code(), 1);
    assert!(runner.calls_ending_with("ps").is_empty());
    assert!(runner.calls_ending_with("make seed").is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn unavailable_service_list_skips_polling() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().post_cmd("make seed").build();
    let mut runner = ScriptedRunner::new().on("config --services", [Reply::exit(1)]);

    let summary = Deployment::new(&mut runner, settings).run().await?;

    assert!(summary.readiness_skipped);
    assert!(summary.services.is_empty());
    assert!(runner.calls_ending_with("ps").is_empty());
    assert_eq!(runner.calls_ending_with("make seed").len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn unspawnable_compose_skips_polling_for_enumeration() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().build();
    let mut runner = ScriptedRunner::new().on("config --services", [Reply::SpawnFailure]);

    let summary = Deployment::new(&mut runner, settings).run().await?;
    assert!(summary.readiness_skipped);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_service_list_skips_polling() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().build();
    let mut runner = ScriptedRunner::new().on("config --services", [Reply::ok("\n")]);

    let summary = Deployment::new(&mut runner, settings).run().await?;
    assert!(summary.readiness_skipped);
    assert!(runner.calls_ending_with("ps").is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn readiness_timeout_exits_with_two_and_skips_post_cmds() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new()
        .timeout_secs(10)
        .post_cmd("make seed")
        .start_tests(true)
        .build();
    let mut runner = ScriptedRunner::new()
        .on("config --services", [Reply::ok("web\nworker\n")])
        .on("ps", [Reply::ok(&ps_table(&[("app_web_1", "Up")]))]);

    let err = Deployment::new(&mut runner, settings)
        .run()
        .await
        .expect_err("worker never shows up");

    assert!(matches!(err, DeployError::ReadinessTimeout { timeout_secs: 10 }));
    assert_eq!(err.exit_code(), 2);
    assert!(runner.calls_ending_with("make seed").is_empty());
    assert!(runner.calls_ending_with("|| true").is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn post_cmd_failures_are_not_fatal() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new()
        .post_cmd("make broken")
        .post_cmd("not-installed --flag")
        .post_cmd("make fine")
        .start_tests(true)
        .build();
    let mut runner = healthy_stack()
        .on("make broken", [Reply::exit(2)])
        .on("not-installed --flag", [Reply::SpawnFailure]);

    let summary = Deployment::new(&mut runner, settings).run().await?;

    assert_eq!(summary.post_cmd_failures, 2);
    assert!(summary.tests_started);
    assert_eq!(runner.calls_ending_with("make fine").len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failing_test_launcher_does_not_change_outcome() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new().start_tests(true).build();
    let mut runner = healthy_stack().on("|| true", [Reply::exit(1)]);

    let summary = Deployment::new(&mut runner, settings).run().await?;
    assert!(summary.tests_started);
    Ok(())
}
